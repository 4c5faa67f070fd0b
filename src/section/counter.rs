use crate::{
    animation::{
        ease::Ease,
        tween::{Timing, Tween},
    },
    foundation::{core::Millis, format::format_millions},
    runtime::scheduler::{Scheduler, Tick, TimerHandle},
};

/// Counts from zero up to a target once triggered, updating on animation frames.
#[derive(Debug)]
pub struct AnimatedCounter {
    tween: Tween<f64>,
    started_at: Option<Millis>,
    frame: Option<TimerHandle>,
    value: f64,
}

impl AnimatedCounter {
    pub const DURATION: Millis = Millis(2000);

    pub fn new(target: f64) -> Self {
        Self {
            tween: Tween::new(
                0.0,
                target,
                Timing::new(Millis::ZERO, Self::DURATION, Ease::OutCubic),
            ),
            started_at: None,
            frame: None,
            value: 0.0,
        }
    }

    pub fn target(&self) -> f64 {
        self.tween.to
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Whether a frame loop is registered for this counter.
    pub fn is_running(&self) -> bool {
        self.frame.is_some()
    }

    /// Start counting; later calls do nothing.
    pub fn trigger(&mut self, scheduler: &Scheduler) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.started_at = Some(scheduler.now());
        self.value = 0.0;
        self.frame = Some(scheduler.frame_loop());
        tracing::debug!(target = self.tween.to, "counter started");
        true
    }

    /// Advance on one of this counter's frames; returns whether the value changed.
    pub fn on_tick(&mut self, tick: &Tick) -> bool {
        let Some(frame) = &self.frame else {
            return false;
        };
        if !frame.owns(tick) {
            return false;
        }
        let Some(start) = self.started_at else {
            return false;
        };
        let elapsed = tick.at.saturating_sub(start);
        self.value = self.tween.sample(elapsed);
        if self.tween.timing.is_finished(elapsed) {
            self.frame = None;
        }
        true
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn text(&self) -> String {
        format_millions(self.value)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/counter.rs"]
mod tests;
