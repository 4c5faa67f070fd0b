use crate::{
    chart::timeline::{YEAR_MAX, YEAR_MIN},
    foundation::core::Millis,
    runtime::scheduler::{Scheduler, Tick, TimerHandle},
};

/// Selected year of the timeline, with play/pause stepping.
///
/// Playing advances one year per [`Scrubber::STEP`]; stepping past the last year wraps to the
/// first and stops playback.
#[derive(Debug)]
pub struct Scrubber {
    year: u16,
    timer: Option<TimerHandle>,
}

impl Default for Scrubber {
    fn default() -> Self {
        Self::new()
    }
}

impl Scrubber {
    pub const STEP: Millis = Millis(150);

    pub fn new() -> Self {
        Self {
            year: YEAR_MIN,
            timer: None,
        }
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn is_playing(&self) -> bool {
        self.timer.is_some()
    }

    /// Label of the play/pause toggle.
    pub fn button_label(&self) -> &'static str {
        if self.is_playing() { "Pause" } else { "Play Animation" }
    }

    /// Position of the thumb along the track, in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        f64::from(self.year - YEAR_MIN) / f64::from(YEAR_MAX - YEAR_MIN)
    }

    /// Set the year from the range input; returns whether it changed.
    pub fn set_year(&mut self, year: u16) -> bool {
        let year = year.clamp(YEAR_MIN, YEAR_MAX);
        let changed = year != self.year;
        self.year = year;
        changed
    }

    pub fn play(&mut self, scheduler: &Scheduler) {
        if self.timer.is_none() {
            self.timer = Some(scheduler.interval(Self::STEP));
            tracing::debug!(year = self.year, "scrubber playing");
        }
    }

    pub fn pause(&mut self) {
        if self.timer.take().is_some() {
            tracing::debug!(year = self.year, "scrubber paused");
        }
    }

    pub fn toggle(&mut self, scheduler: &Scheduler) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play(scheduler);
        }
    }

    /// Step on one of this scrubber's ticks; returns whether the year changed.
    pub fn on_tick(&mut self, tick: &Tick) -> bool {
        if !self.timer.as_ref().is_some_and(|t| t.owns(tick)) {
            return false;
        }
        if self.year >= YEAR_MAX {
            self.year = YEAR_MIN;
            self.timer = None;
            tracing::debug!("scrubber wrapped, stopping");
        } else {
            self.year += 1;
        }
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/scrubber.rs"]
mod tests;
