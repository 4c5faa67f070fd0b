use std::{rc::Rc, sync::Arc};

use crate::{
    animation::{ease::Ease, tween::Stagger},
    chart::{Chart, ChartHost, Theme, map::TileProvider},
    config::VizConfig,
    foundation::core::{Affine, Color, Millis, Point, Rect, Surface},
    runtime::{
        observer::VisibilityObserver,
        overlay::OverlayLayer,
        scheduler::{Scheduler, Tick},
    },
    scene::model::{Effect, Element, Paint, Shape, TextAnchor, TextStyle},
};

/// Benefit bars, donut and the total counter.
pub mod benefits;
/// Tweened total readout.
pub mod counter;
/// Treemap, nations, top authorities and the marker map.
pub mod economy;
/// Closing copy and the cumulative benefits row.
pub mod footer;
/// Outcome cards and the damage pathway bubbles.
pub mod health;
/// Hero copy, stats and the particle field.
pub mod overview;
/// Year stepping with a play/pause interval.
pub mod scrubber;
/// Annual benefits line chart with scrubber and readouts.
pub mod timeline;

/// Widest the centered content column gets.
pub const CONTENT_MAX_WIDTH: f64 = 1152.0;
/// Horizontal page padding on each side of the content column.
pub const GUTTER: f64 = 24.0;
/// Vertical padding above and below each section's content.
pub const SECTION_PADDING: f64 = 128.0;
/// Space between stacked blocks.
pub const BLOCK_GAP: f64 = 32.0;
/// Height taken by a section header, including the gap below it.
pub const HEADER_HEIGHT: f64 = 280.0;
/// Widths at or above this get side-by-side columns in the wide layouts.
pub const WIDE_BREAKPOINT: f64 = 1024.0;

/// Space a card title takes above the card content.
pub(crate) const CARD_TITLE_HEIGHT: f64 = 52.0;

/// Shared handles every section is built with.
#[derive(Clone, Debug)]
pub struct SectionContext {
    pub scheduler: Scheduler,
    pub overlay: OverlayLayer,
    pub config: Rc<VizConfig>,
    pub tiles: Option<Arc<dyn TileProvider>>,
}

impl SectionContext {
    pub fn new(config: VizConfig, tiles: Option<Arc<dyn TileProvider>>) -> Self {
        Self {
            scheduler: Scheduler::new(),
            overlay: OverlayLayer::new(),
            config: Rc::new(config),
            tiles,
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.config.theme
    }
}

/// Narrative text shown above a section's content.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SectionCopy {
    pub eyebrow: &'static str,
    pub title: &'static str,
    pub highlight: &'static str,
    pub lede: String,
}

/// One block of the page, laid out in page coordinates.
pub trait Section {
    /// Anchor id, without the leading `#`.
    fn anchor(&self) -> &'static str;

    fn copy(&self) -> &SectionCopy;

    /// Lay out at `top` for a `width` wide page and return the section height.
    ///
    /// Charts that already rendered are redrawn at their new size.
    fn layout(&mut self, top: f64, width: f64, viewport_height: f64, now: Millis) -> f64;

    fn height(&self) -> f64;

    /// `viewport` is the visible part of the page.
    fn on_scroll(&mut self, viewport: Rect, now: Millis);

    /// Called for every fired timer; sections ignore ticks they do not own.
    fn on_tick(&mut self, _tick: &Tick, _now: Millis) {}

    /// Everything the section draws at `now`, in page coordinates.
    fn elements(&self, now: Millis) -> Vec<Element>;
}

/// A chart that renders into its own host the first time its frame becomes visible.
#[derive(Debug)]
pub struct ChartSlot<C> {
    chart: C,
    observer: VisibilityObserver,
    host: ChartHost,
    frame: Rect,
}

impl<C: Chart> ChartSlot<C> {
    pub fn new(chart: C, root_margin: f64) -> Self {
        Self {
            chart,
            observer: VisibilityObserver::new(root_margin),
            host: ChartHost::new(),
            frame: Rect::ZERO,
        }
    }

    pub fn chart(&self) -> &C {
        &self.chart
    }

    pub fn host(&self) -> &ChartHost {
        &self.host
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn is_triggered(&self) -> bool {
        self.observer.has_fired()
    }

    fn surface(&self) -> Surface {
        Surface::new(self.frame.width(), self.frame.height())
    }

    /// Position the chart with its top-left at `origin`; returns the occupied frame.
    pub fn place(&mut self, origin: Point, width: f64, now: Millis) -> Rect {
        let height = self.chart.preferred_height(width).max(0.0);
        self.frame = Rect::from_origin_size(origin, (width.max(0.0), height));
        if self.is_triggered() {
            self.host.resize(&self.chart, self.surface(), now);
        }
        self.frame
    }

    /// Renders on the first call where the frame is visible; returns whether it did.
    pub fn observe(&mut self, viewport: Rect, now: Millis) -> bool {
        if !self.observer.observe(self.frame, viewport) {
            return false;
        }
        tracing::debug!(kind = %self.chart.kind(), "chart entered viewport");
        self.host.render(&self.chart, self.surface(), now);
        true
    }

    /// Swap the chart; a chart that was already on screen is redrawn immediately.
    pub fn set_chart(&mut self, chart: C, now: Millis) {
        self.chart = chart;
        if self.is_triggered() {
            self.host.render(&self.chart, self.surface(), now);
        }
    }

    /// The sampled chart translated to its frame, once rendered.
    pub fn element(&self, key: &str, now: Millis) -> Option<Element> {
        let scene = self.host.snapshot(now)?;
        Some(Element::group(
            key,
            Affine::translate((self.frame.x0, self.frame.y0)),
            scene.elements,
        ))
    }
}

/// Section-level fade-in, started the first time the section scrolls into view.
#[derive(Clone, Debug)]
pub struct Reveal {
    observer: VisibilityObserver,
    at: Option<Millis>,
}

impl Reveal {
    pub fn new(root_margin: f64) -> Self {
        Self {
            observer: VisibilityObserver::new(root_margin),
            at: None,
        }
    }

    pub fn revealed_at(&self) -> Option<Millis> {
        self.at
    }

    pub fn observe(&mut self, target: Rect, viewport: Rect, now: Millis) {
        if self.observer.observe(target, viewport) {
            self.at = Some(now);
        }
    }

    /// `element` resolved at `now`; hidden entrances stay at their start until revealed.
    pub fn sample(&self, element: &Element, now: Millis) -> Element {
        match self.at {
            Some(at) => element.sample(now.saturating_sub(at)),
            None => element.sample(Millis::ZERO),
        }
    }
}

/// Left edge and width of the centered content column for a `page_width` wide page.
pub fn content_column(page_width: f64) -> (f64, f64) {
    let inner = (page_width - 2.0 * GUTTER).clamp(0.0, CONTENT_MAX_WIDTH);
    ((page_width - inner) / 2.0, inner)
}

/// Split `width` into `count` equal columns separated by `gap`; returns (x, width) pairs.
pub fn columns(x0: f64, width: f64, count: usize, gap: f64) -> Vec<(f64, f64)> {
    let count = count.max(1);
    let w = ((width - gap * (count - 1) as f64) / count as f64).max(0.0);
    (0..count).map(|i| (x0 + i as f64 * (w + gap), w)).collect()
}

/// Fade-and-rise used by section blocks.
pub(crate) fn fade_in(element: Element, delay_ms: u64) -> Element {
    element.enter(
        Effect::Fade { from: 0.0 },
        Stagger::new(delay_ms, 0).timing(0, Millis(800), Ease::OutCubic),
    )
}

pub(crate) fn text(
    key: impl Into<String>,
    at: Point,
    content: impl Into<String>,
    style: TextStyle,
    color: Color,
) -> Element {
    Element::new(
        key,
        Shape::Text {
            at,
            content: content.into(),
            style,
        },
    )
    .paint(Paint::fill(color))
}

/// Translucent rounded panel.
pub(crate) fn card(key: impl Into<String>, rect: Rect, theme: &Theme) -> Element {
    Element::new(
        key,
        Shape::Rect {
            rect,
            corner_radius: 24.0,
        },
    )
    .paint(Paint::fill(theme.text.with_alpha(13)).with_stroke(theme.text.with_alpha(26), 1.0))
}

/// Card background plus title; returns the elements and the y where content starts.
pub(crate) fn titled_card(
    key: &str,
    rect: Rect,
    title: &str,
    padding: f64,
    theme: &Theme,
) -> (Vec<Element>, f64) {
    let elements = vec![
        card(format!("{key}-card"), rect, theme),
        text(
            format!("{key}-title"),
            Point::new(rect.x0 + padding, rect.y0 + padding + 20.0),
            title,
            TextStyle::sized(18.0).weight(600),
            theme.text,
        ),
    ];
    (elements, rect.y0 + padding + CARD_TITLE_HEIGHT)
}

/// Eyebrow, two-line title and lede, centered on `center_x`.
pub(crate) fn header(key: &str, copy: &SectionCopy, center_x: f64, top: f64, theme: &Theme) -> Element {
    let middle = |size: f64, weight: u16| TextStyle::sized(size).weight(weight).anchor(TextAnchor::Middle);
    let children = vec![
        text(
            format!("{key}-eyebrow"),
            Point::new(center_x, top + 20.0),
            copy.eyebrow,
            middle(16.0, 500),
            theme.accent,
        ),
        text(
            format!("{key}-title"),
            Point::new(center_x, top + 96.0),
            copy.title,
            middle(56.0, 700),
            theme.text,
        ),
        text(
            format!("{key}-highlight"),
            Point::new(center_x, top + 160.0),
            copy.highlight,
            middle(56.0, 700),
            theme.accent,
        ),
        text(
            format!("{key}-lede"),
            Point::new(center_x, top + 208.0),
            copy.lede.clone(),
            middle(20.0, 400),
            theme.muted,
        ),
    ];
    fade_in(Element::group(key, Affine::IDENTITY, children), 0)
}

#[cfg(test)]
#[path = "../../tests/unit/section/mod.rs"]
mod tests;
