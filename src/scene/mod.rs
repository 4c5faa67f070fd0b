/// Retained drawing tree, entrances and sampling.
pub mod model;
