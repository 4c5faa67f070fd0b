use crate::{
    animation::ease::Ease,
    foundation::core::{Color, Millis},
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Color {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

/// Delay, duration and easing of one scheduled transition.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timing {
    pub delay: Millis,
    pub duration: Millis,
    pub ease: Ease,
}

impl Timing {
    pub fn new(delay: Millis, duration: Millis, ease: Ease) -> Self {
        Self {
            delay,
            duration,
            ease,
        }
    }

    /// Eased progress at `t` (measured from the start of the owning animation).
    ///
    /// Before the delay elapses this is 0; a zero duration jumps straight to 1.
    pub fn progress(&self, t: Millis) -> f64 {
        if t < self.delay {
            return 0.0;
        }
        if self.duration.0 == 0 {
            return 1.0;
        }
        let local = t.saturating_sub(self.delay).as_f64() / self.duration.as_f64();
        self.ease.apply(local)
    }

    pub fn end(&self) -> Millis {
        self.delay + self.duration
    }

    pub fn is_finished(&self, t: Millis) -> bool {
        t >= self.end()
    }
}

/// Interpolates `from -> to` over a [`Timing`].
#[derive(Clone, Debug, PartialEq)]
pub struct Tween<T> {
    pub from: T,
    pub to: T,
    pub timing: Timing,
}

impl<T> Tween<T>
where
    T: Lerp + Clone,
{
    pub fn new(from: T, to: T, timing: Timing) -> Self {
        Self { from, to, timing }
    }

    pub fn sample(&self, t: Millis) -> T {
        let p = self.timing.progress(t);
        if p <= 0.0 {
            return self.from.clone();
        }
        if p >= 1.0 {
            return self.to.clone();
        }
        T::lerp(&self.from, &self.to, p)
    }
}

/// Index-proportional delay: `base + index * step`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Stagger {
    pub base: Millis,
    pub step: Millis,
}

impl Stagger {
    pub fn new(base_ms: u64, step_ms: u64) -> Self {
        Self {
            base: Millis(base_ms),
            step: Millis(step_ms),
        }
    }

    pub fn delay_for(&self, index: usize) -> Millis {
        Millis(
            self.base
                .0
                .saturating_add(self.step.0.saturating_mul(index as u64)),
        )
    }

    pub fn timing(&self, index: usize, duration: Millis, ease: Ease) -> Timing {
        Timing::new(self.delay_for(index), duration, ease)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
