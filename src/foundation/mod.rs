/// Geometry re-exports, surfaces, margins, colors and clock units.
pub mod core;
/// Error taxonomy.
pub mod error;
/// Number formatting for labels and readouts.
pub mod format;
