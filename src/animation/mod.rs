/// Easing curves.
pub mod ease;
/// Spring smoothing.
pub mod spring;
/// Timings, tweens and staggering.
pub mod tween;
