/// Parallel frame-sequence export.
pub mod frames;
/// SVG rasterization and PNG encoding.
pub mod raster;
/// Scene to SVG serialization.
pub mod svg;
