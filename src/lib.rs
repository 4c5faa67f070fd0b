//! Animated data-storytelling charts for the UK climate co-benefits dataset.
//!
//! Charts build retained [`Scene`]s whose elements carry staggered entrance animations. A scene
//! is sampled at a point in time, serialized to SVG and optionally rasterized to PNG:
//!
//! - Build a chart from the compiled-in dataset ([`VizConfig::chart`])
//! - Sample it at any time ([`Scene::sample`]) and export ([`to_svg`], [`Rasterizer`])
//! - Or drive the whole [`Page`] on its virtual clock: scroll, resize, advance, snapshot
#![forbid(unsafe_code)]

/// Easing, tweens, staggers and the progress spring.
pub mod animation;
/// Chart primitives and the chart host.
pub mod chart;
/// JSON-loadable page configuration.
pub mod config;
/// Compiled-in metrics dataset.
pub mod data;
/// Geometry, colors, errors and number formatting.
pub mod foundation;
/// Page shell.
pub mod page;
/// SVG serialization, rasterization and frame sequences.
pub mod render;
/// Virtual clock, overlay layer and visibility observers.
pub mod runtime;
/// Retained drawing tree.
pub mod scene;
/// Story sections composed from charts.
pub mod section;

pub use crate::chart::map::{TileProvider, UrlTemplateTiles};
pub use crate::chart::{Chart, ChartHost, ChartKind, Theme};
pub use crate::config::VizConfig;
pub use crate::foundation::core::{Affine, BezPath, Color, Millis, Point, Rect, Surface, Vec2};
pub use crate::foundation::error::{VizError, VizResult};
pub use crate::page::Page;
pub use crate::render::frames::{SequenceOpts, render_sequence, write_sequence};
pub use crate::render::raster::{RasterFrame, Rasterizer};
pub use crate::render::svg::to_svg;
pub use crate::runtime::scheduler::Scheduler;
pub use crate::scene::model::{Element, Scene};
