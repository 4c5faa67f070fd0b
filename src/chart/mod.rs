use crate::{
    animation::{ease::Ease, tween::Timing},
    foundation::core::{Color, Millis, Surface},
    scene::model::Scene,
};

/// Horizontal bar charts (benefit categories, nations).
pub mod bar;
/// Force-settled bubble chart.
pub mod bubble;
/// Running totals as a row of growing circles.
pub mod cumulative;
/// Geographic marker map over an injected tile layer.
pub mod map;
/// Donut chart.
pub mod pie;
/// Linear, band and sqrt scales.
pub mod scale;
/// Multi-series time line with year indicator.
pub mod timeline;
/// Squarified treemap.
pub mod treemap;

/// Widths below this use the compact (mobile) layout.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Duration of a transition that only sets a delay.
pub const DEFAULT_TRANSITION: Millis = Millis(250);

/// Label fade that starts after `delay` and uses the default duration and easing.
pub(crate) fn label_fade(delay: Millis) -> Timing {
    Timing::new(delay, DEFAULT_TRANSITION, Ease::default())
}

/// Colors shared by every chart.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub axis: Color,
    pub grid: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            text: Color::WHITE,
            muted: Color::hex(0x9ca3af),
            axis: Color::hex(0x666666),
            grid: Color::hex(0x333333),
            accent: Color::hex(0x10b981),
        }
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Bar,
    Regions,
    Pie,
    Treemap,
    Bubble,
    Timeline,
    Map,
    Cumulative,
}

impl ChartKind {
    pub const ALL: [Self; 8] = [
        Self::Bar,
        Self::Regions,
        Self::Pie,
        Self::Treemap,
        Self::Bubble,
        Self::Timeline,
        Self::Map,
        Self::Cumulative,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Regions => "regions",
            Self::Pie => "pie",
            Self::Treemap => "treemap",
            Self::Bubble => "bubble",
            Self::Timeline => "timeline",
            Self::Map => "map",
            Self::Cumulative => "cumulative",
        }
    }

    /// Key prefix of the one element drawn per datum.
    pub fn datum_prefix(self) -> &'static str {
        match self {
            Self::Bar | Self::Regions => "bar-",
            Self::Pie => "arc-",
            Self::Treemap => "tile-",
            Self::Bubble | Self::Cumulative => "circle-",
            Self::Timeline => "line-",
            Self::Map => "marker-",
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A chart turns its data and a surface into a complete scene, entrances included.
pub trait Chart {
    fn kind(&self) -> ChartKind;

    /// Height the chart wants for a container of `width` pixels.
    fn preferred_height(&self, width: f64) -> f64;

    fn build(&self, surface: Surface) -> Scene;
}

/// Owns the rendered output of one chart.
///
/// Every render clears the previous scene first, so repeated renders and resizes never
/// accumulate elements.
#[derive(Clone, Debug, Default)]
pub struct ChartHost {
    scene: Option<Scene>,
    started_at: Millis,
    renders: u32,
}

impl ChartHost {
    pub fn new() -> Self {
        Self::default()
    }

    #[tracing::instrument(skip(self, chart), fields(kind = %chart.kind()))]
    pub fn render(&mut self, chart: &dyn Chart, surface: Surface, now: Millis) {
        self.clear();
        if !surface.is_drawable() {
            tracing::debug!(?surface, "surface not drawable, skipping render");
            return;
        }
        self.scene = Some(chart.build(surface));
        self.started_at = now;
        self.renders += 1;
    }

    /// Full clear-and-redraw at the new size; entrances restart.
    pub fn resize(&mut self, chart: &dyn Chart, surface: Surface, now: Millis) {
        self.render(chart, surface, now);
    }

    pub fn clear(&mut self) {
        self.scene = None;
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn render_count(&self) -> u32 {
        self.renders
    }

    pub fn started_at(&self) -> Millis {
        self.started_at
    }

    /// Scene resolved at page time `now`.
    pub fn snapshot(&self, now: Millis) -> Option<Scene> {
        self.scene
            .as_ref()
            .map(|scene| scene.sample(now.saturating_sub(self.started_at)))
    }

    pub fn is_settled(&self, now: Millis) -> bool {
        self.scene.as_ref().is_none_or(|scene| {
            now.saturating_sub(self.started_at) >= scene.settle_time()
        })
    }

    pub fn count_keyed(&self, prefix: &str) -> usize {
        self.scene.as_ref().map_or(0, |s| s.count_keyed(prefix))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/host.rs"]
mod tests;
