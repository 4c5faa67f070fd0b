/// Visibility-triggered, fire-once observers.
pub mod observer;
/// Page-level tooltip/popup layers.
pub mod overlay;
/// Virtual clock, frame loops and intervals.
pub mod scheduler;
