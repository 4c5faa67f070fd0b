//! Page shell: ordered sections, anchor navigation and the scroll progress bar.

use std::sync::Arc;

use crate::{
    animation::{ease::Ease, spring::Spring, tween::Timing},
    chart::map::TileProvider,
    config::VizConfig,
    foundation::core::{Affine, Millis, Point, Rect, Surface},
    runtime::{overlay::OverlayLayer, scheduler::Scheduler},
    scene::model::{Effect, Element, Paint, Scene, Shape, TextAnchor, TextStyle},
    section::{
        Section, SectionContext, benefits::BenefitsSection, economy::EconomySection,
        footer::FooterSection, health::HealthSection, overview::OverviewSection,
        timeline::TimelineSection,
    },
};

/// Navigation entries in page order: (label, anchor). The footer has no entry.
pub const NAV_ITEMS: [(&str, &str); 5] = [
    ("Overview", "overview"),
    ("Benefits", "benefits"),
    ("Health", "health"),
    ("Economy", "economy"),
    ("Timeline", "timeline"),
];

pub const PROGRESS_BAR_HEIGHT: f64 = 4.0;

const NAV_TOP: f64 = 16.0;
const NAV_HEIGHT: f64 = 44.0;

/// The whole story page on a virtual clock.
///
/// Nothing happens on its own: [`Page::scroll_to`], [`Page::resize`] and [`Page::advance`]
/// drive visibility, layout and timers.
#[derive(Debug)]
pub struct Page {
    ctx: SectionContext,
    overview: OverviewSection,
    benefits: BenefitsSection,
    health: HealthSection,
    economy: EconomySection,
    timeline: TimelineSection,
    footer: FooterSection,
    offsets: [f64; 6],
    document_height: f64,
    viewport: Surface,
    scroll: f64,
    progress: Spring,
}

impl Page {
    pub fn new(config: VizConfig, tiles: Option<Arc<dyn TileProvider>>) -> Self {
        let viewport = config.viewport;
        let ctx = SectionContext::new(config, tiles);
        let mut page = Self {
            overview: OverviewSection::new(ctx.clone()),
            benefits: BenefitsSection::new(ctx.clone()),
            health: HealthSection::new(ctx.clone()),
            economy: EconomySection::new(ctx.clone()),
            timeline: TimelineSection::new(ctx.clone()),
            footer: FooterSection::new(ctx.clone()),
            ctx,
            offsets: [0.0; 6],
            document_height: 0.0,
            viewport,
            scroll: 0.0,
            progress: Spring::default(),
        };
        page.layout();
        page.dispatch_scroll();
        page
    }

    fn sections(&self) -> [&dyn Section; 6] {
        [
            &self.overview,
            &self.benefits,
            &self.health,
            &self.economy,
            &self.timeline,
            &self.footer,
        ]
    }

    fn sections_mut(&mut self) -> [&mut dyn Section; 6] {
        [
            &mut self.overview,
            &mut self.benefits,
            &mut self.health,
            &mut self.economy,
            &mut self.timeline,
            &mut self.footer,
        ]
    }

    #[tracing::instrument(skip(self), fields(width = self.viewport.width, height = self.viewport.height))]
    fn layout(&mut self) {
        let now = self.now();
        let Surface { width, height } = self.viewport;
        let mut top = 0.0;
        let mut offsets = [0.0; 6];
        for (slot, section) in offsets.iter_mut().zip(self.sections_mut()) {
            *slot = top;
            top += section.layout(top, width, height, now);
        }
        self.offsets = offsets;
        self.document_height = top;
        self.scroll = self.scroll.clamp(0.0, self.max_scroll());
        self.progress.set_target(self.raw_progress());
    }

    fn dispatch_scroll(&mut self) {
        let now = self.now();
        let visible = self.visible_rect();
        for section in self.sections_mut() {
            section.on_scroll(visible, now);
        }
    }

    pub fn now(&self) -> Millis {
        self.ctx.scheduler.now()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.ctx.scheduler
    }

    pub fn overlay(&self) -> &OverlayLayer {
        &self.ctx.overlay
    }

    pub fn config(&self) -> &VizConfig {
        &self.ctx.config
    }

    pub fn viewport(&self) -> Surface {
        self.viewport
    }

    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    pub fn document_height(&self) -> f64 {
        self.document_height
    }

    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.viewport.height).max(0.0)
    }

    /// Visible part of the document in page coordinates.
    pub fn visible_rect(&self) -> Rect {
        Rect::new(
            0.0,
            self.scroll,
            self.viewport.width,
            self.scroll + self.viewport.height,
        )
    }

    /// Scroll position as a fraction of the scrollable range.
    pub fn raw_progress(&self) -> f64 {
        let max = self.max_scroll();
        if max > 0.0 { self.scroll / max } else { 0.0 }
    }

    /// Spring-smoothed scroll fraction shown by the progress bar.
    pub fn progress(&self) -> f64 {
        self.progress.value()
    }

    pub fn scroll_to(&mut self, y: f64) {
        self.scroll = if y.is_finite() { y.clamp(0.0, self.max_scroll()) } else { 0.0 };
        self.progress.set_target(self.raw_progress());
        self.dispatch_scroll();
    }

    /// Top of the section with anchor `id` (`"#timeline"` or `"timeline"`).
    pub fn anchor_offset(&self, id: &str) -> Option<f64> {
        let id = id.strip_prefix('#').unwrap_or(id);
        self.sections()
            .iter()
            .position(|s| s.anchor() == id)
            .map(|i| self.offsets[i])
    }

    /// Follow a navigation link; returns the new scroll position.
    pub fn navigate(&mut self, id: &str) -> Option<f64> {
        let offset = self.anchor_offset(id)?;
        self.scroll_to(offset);
        Some(self.scroll)
    }

    /// New viewport size: every section is laid out again and visible charts redraw.
    pub fn resize(&mut self, viewport: Surface) {
        tracing::debug!(?viewport, "page resized");
        self.viewport = viewport;
        self.layout();
        self.dispatch_scroll();
    }

    /// Run the clock forward, delivering every fired timer to the sections in time order.
    pub fn advance(&mut self, by: Millis) {
        let ticks = self.ctx.scheduler.advance(by);
        tracing::trace!(ticks = ticks.len(), ?by, "advance");
        for tick in &ticks {
            for section in self.sections_mut() {
                section.on_tick(tick, tick.at);
            }
        }
        self.progress.step(by.0);
    }

    pub fn overview(&self) -> &OverviewSection {
        &self.overview
    }

    pub fn benefits(&self) -> &BenefitsSection {
        &self.benefits
    }

    pub fn health(&self) -> &HealthSection {
        &self.health
    }

    pub fn economy(&self) -> &EconomySection {
        &self.economy
    }

    pub fn timeline(&self) -> &TimelineSection {
        &self.timeline
    }

    pub fn footer(&self) -> &FooterSection {
        &self.footer
    }

    pub fn hover_bar(&mut self, index: usize) -> bool {
        self.benefits.hover_bar(index)
    }

    pub fn hover_marker(&mut self, index: usize) -> bool {
        self.economy.hover_marker(index)
    }

    /// Pointer left every hover target.
    pub fn unhover(&mut self) {
        self.benefits.unhover();
        self.economy.unhover();
    }

    pub fn set_year(&mut self, year: u16) {
        let now = self.now();
        self.timeline.set_year(year, now);
    }

    pub fn toggle_playback(&mut self) {
        self.timeline.toggle_playback();
    }

    fn navigation(&self) -> Element {
        let theme = &self.ctx.config.theme;
        let item_width = 96.0;
        let pill_width = item_width * NAV_ITEMS.len() as f64 + 24.0;
        let x0 = (self.viewport.width - pill_width) / 2.0;
        let mut children = vec![
            Element::new(
                "nav-pill",
                Shape::Rect {
                    rect: Rect::new(x0, NAV_TOP, x0 + pill_width, NAV_TOP + NAV_HEIGHT),
                    corner_radius: NAV_HEIGHT / 2.0,
                },
            )
            .paint(Paint::fill(theme.background.with_alpha(178)).with_stroke(theme.text.with_alpha(26), 1.0)),
        ];
        for (i, (label, anchor)) in NAV_ITEMS.iter().enumerate() {
            children.push(
                Element::new(
                    format!("nav-{anchor}"),
                    Shape::Text {
                        at: Point::new(
                            x0 + 12.0 + (i as f64 + 0.5) * item_width,
                            NAV_TOP + NAV_HEIGHT / 2.0 + 5.0,
                        ),
                        content: (*label).to_owned(),
                        style: TextStyle::sized(14.0).weight(500).anchor(TextAnchor::Middle),
                    },
                )
                .paint(Paint::fill(theme.muted)),
            );
        }
        Element::group("nav", Affine::IDENTITY, children).enter(
            Effect::Fade { from: 0.0 },
            Timing::new(Millis(1000), Millis(600), Ease::OutCubic),
        )
    }

    fn progress_bar(&self) -> Element {
        let width = self.viewport.width * self.progress().clamp(0.0, 1.0);
        Element::new(
            "progress",
            Shape::Rect {
                rect: Rect::new(0.0, 0.0, width, PROGRESS_BAR_HEIGHT),
                corner_radius: 0.0,
            },
        )
        .paint(Paint::fill(self.ctx.config.theme.accent))
    }

    /// Fixed chrome (navigation, then the progress bar) in viewport coordinates.
    fn chrome(&self, now: Millis) -> Vec<Element> {
        vec![self.navigation().sample(now), self.progress_bar()]
    }

    /// The whole document at the current time: sections, overlay layers and the fixed chrome
    /// placed at the current scroll position.
    #[tracing::instrument(skip(self), fields(now = self.now().0))]
    pub fn snapshot(&self) -> Scene {
        let now = self.now();
        let mut scene = Scene::new(Surface::new(self.viewport.width, self.document_height))
            .with_background(self.ctx.config.theme.background);
        for section in self.sections() {
            scene.push(Element::group(
                section.anchor(),
                Affine::IDENTITY,
                section.elements(now),
            ));
        }
        scene.push(Element::group(
            "overlay",
            Affine::IDENTITY,
            self.ctx.overlay.elements(),
        ));
        scene.push(Element::group(
            "chrome",
            Affine::translate((0.0, self.scroll)),
            self.chrome(now),
        ));
        scene
    }

    /// What the viewport shows: the document shifted by the scroll offset.
    pub fn viewport_snapshot(&self) -> Scene {
        let document = self.snapshot();
        let mut scene = Scene::new(self.viewport).with_background(self.ctx.config.theme.background);
        scene.push(Element::group(
            "document",
            Affine::translate((0.0, -self.scroll)),
            document.elements,
        ));
        scene
    }
}

#[cfg(test)]
#[path = "../tests/unit/page/mod.rs"]
mod tests;
