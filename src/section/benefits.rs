use crate::{
    chart::{bar::BarChart, pie::PieChart},
    data::metrics::{SUMMARY_STATS, total_positive_benefits},
    foundation::{
        core::{Affine, Millis, Point, Rect, Surface},
        format::format_number,
    },
    runtime::{observer::VisibilityObserver, overlay::OverlayGuard, scheduler::Tick},
    scene::model::{Element, TextAnchor, TextStyle},
    section::{
        BLOCK_GAP, CARD_TITLE_HEIGHT, ChartSlot, HEADER_HEIGHT, Reveal, SECTION_PADDING, Section,
        SectionContext, SectionCopy, WIDE_BREAKPOINT, card, columns, content_column,
        counter::AnimatedCounter, fade_in, header, text, titled_card,
    },
};

const CARD_PADDING: f64 = 24.0;
const COUNTER_WIDTH: f64 = 560.0;
const COUNTER_HEIGHT: f64 = 200.0;

/// Benefit categories as bars and a donut, plus the animated grand total.
#[derive(Debug)]
pub struct BenefitsSection {
    ctx: SectionContext,
    copy: SectionCopy,
    reveal: Reveal,
    bars: ChartSlot<BarChart>,
    pie: ChartSlot<PieChart>,
    counter: AnimatedCounter,
    counter_observer: VisibilityObserver,
    counter_card: Rect,
    tooltip: Option<OverlayGuard>,
    hovered: Option<usize>,
    blocks: Vec<Element>,
    bounds: Rect,
}

impl BenefitsSection {
    pub fn new(ctx: SectionContext) -> Self {
        let margin = ctx.config.root_margin;
        Self {
            copy: SectionCopy {
                eyebrow: "The Facts Speak",
                title: "The Benefits of Fighting",
                highlight: "Climate Change",
                lede: format!(
                    "Every co-benefit measured across {} UK small areas",
                    format_number(SUMMARY_STATS.total_small_areas as f64)
                ),
            },
            reveal: Reveal::new(margin),
            bars: ChartSlot::new(ctx.config.bar_chart(), margin),
            pie: ChartSlot::new(ctx.config.pie_chart(), margin),
            counter: AnimatedCounter::new(total_positive_benefits()),
            counter_observer: VisibilityObserver::new(0.0),
            counter_card: Rect::ZERO,
            tooltip: None,
            hovered: None,
            blocks: Vec::new(),
            bounds: Rect::ZERO,
            ctx,
        }
    }

    pub fn bars(&self) -> &ChartSlot<BarChart> {
        &self.bars
    }

    pub fn pie(&self) -> &ChartSlot<PieChart> {
        &self.pie
    }

    pub fn counter(&self) -> &AnimatedCounter {
        &self.counter
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Show the tooltip of bar `index` in the overlay; returns whether one is shown.
    pub fn hover_bar(&mut self, index: usize) -> bool {
        if !self.bars.is_triggered() {
            return false;
        }
        let chart = self.bars.chart();
        let frame = self.bars.frame();
        let Some(tooltip) = chart.tooltip(index) else {
            return false;
        };
        let Some(bar) = chart
            .layout(Surface::new(frame.width(), frame.height()))
            .and_then(|layout| layout.bars.get(index).copied())
        else {
            return false;
        };
        let at = Point::new(frame.x0 + bar.x1, frame.y0 + bar.center().y);
        let element = tooltip.to_element("tooltip", at, self.ctx.theme());
        match &self.tooltip {
            Some(guard) => guard.update(element),
            None => self.tooltip = Some(self.ctx.overlay.acquire(element)),
        }
        self.hovered = Some(index);
        true
    }

    pub fn unhover(&mut self) {
        self.tooltip = None;
        self.hovered = None;
    }

    fn counter_elements(&self) -> Vec<Element> {
        let theme = self.ctx.theme();
        let c = self.counter_card;
        let cx = c.center().x;
        let middle = |size: f64, weight: u16| {
            TextStyle::sized(size)
                .weight(weight)
                .anchor(TextAnchor::Middle)
        };
        vec![
            card("counter-card", c, theme),
            text(
                "counter-label",
                Point::new(cx, c.y0 + 48.0),
                "Total Co-Benefits",
                middle(14.0, 400),
                theme.muted,
            ),
            text(
                "counter-value",
                Point::new(cx, c.y0 + 124.0),
                self.counter.text(),
                middle(64.0, 700),
                theme.accent,
            ),
            text(
                "counter-caption",
                Point::new(cx, c.y0 + 164.0),
                format!(
                    "Across {} UK communities by 2050",
                    format_number(SUMMARY_STATS.total_small_areas as f64)
                ),
                middle(14.0, 400),
                theme.muted,
            ),
        ]
    }
}

impl Section for BenefitsSection {
    fn anchor(&self) -> &'static str {
        "benefits"
    }

    fn copy(&self) -> &SectionCopy {
        &self.copy
    }

    #[tracing::instrument(skip(self))]
    fn layout(&mut self, top: f64, width: f64, viewport_height: f64, now: Millis) -> f64 {
        self.unhover();
        let theme = self.ctx.theme().clone();
        let (x0, inner) = content_column(width);
        let mut y = top + SECTION_PADDING;
        let mut blocks = vec![header("benefits-header", &self.copy, width / 2.0, y, &theme)];
        y += HEADER_HEIGHT;

        let wide = width >= WIDE_BREAKPOINT;
        let cols = if wide {
            columns(x0, inner, 2, BLOCK_GAP)
        } else {
            vec![(x0, inner), (x0, inner)]
        };

        let (bar_x, bar_w) = cols[0];
        let title_offset = CARD_PADDING + CARD_TITLE_HEIGHT;
        let frame = self.bars.place(
            Point::new(bar_x + CARD_PADDING, y + title_offset),
            bar_w - 2.0 * CARD_PADDING,
            now,
        );
        let bar_bottom = frame.y1 + CARD_PADDING;

        let (pie_x, pie_w) = cols[1];
        let pie_top = if wide { y } else { bar_bottom + BLOCK_GAP };
        let side = (pie_w - 2.0 * CARD_PADDING).max(0.0).min(self.ctx.config.pie.size);
        let frame = self.pie.place(
            Point::new(pie_x + (pie_w - side) / 2.0, pie_top + title_offset),
            side,
            now,
        );
        let pie_bottom = frame.y1 + CARD_PADDING;

        let (bar_card_bottom, pie_card_bottom) = if wide {
            let bottom = bar_bottom.max(pie_bottom);
            (bottom, bottom)
        } else {
            (bar_bottom, pie_bottom)
        };
        let (bar_card, _) = titled_card(
            "bars",
            Rect::new(bar_x, y, bar_x + bar_w, bar_card_bottom),
            "Benefits Breakdown (2025-2050)",
            CARD_PADDING,
            &theme,
        );
        blocks.push(fade_in(Element::group("bars-block", Affine::IDENTITY, bar_card), 200));
        let (pie_card, _) = titled_card(
            "pie",
            Rect::new(pie_x, pie_top, pie_x + pie_w, pie_card_bottom),
            "Distribution",
            CARD_PADDING,
            &theme,
        );
        blocks.push(fade_in(Element::group("pie-block", Affine::IDENTITY, pie_card), 400));
        y = pie_card_bottom.max(bar_card_bottom) + 2.0 * BLOCK_GAP;

        let counter_w = inner.min(COUNTER_WIDTH);
        self.counter_card = Rect::new(
            (width - counter_w) / 2.0,
            y,
            (width + counter_w) / 2.0,
            y + COUNTER_HEIGHT,
        );
        y += COUNTER_HEIGHT + SECTION_PADDING;

        self.blocks = blocks;
        self.bounds = Rect::new(0.0, top, width, y);
        tracing::debug!(height = y - top, viewport_height, "benefits laid out");
        self.bounds.height()
    }

    fn height(&self) -> f64 {
        self.bounds.height()
    }

    fn on_scroll(&mut self, viewport: Rect, now: Millis) {
        self.reveal.observe(self.bounds, viewport, now);
        self.bars.observe(viewport, now);
        self.pie.observe(viewport, now);
        if self.counter_observer.observe(self.counter_card, viewport) {
            self.counter.trigger(&self.ctx.scheduler);
        }
    }

    fn on_tick(&mut self, tick: &Tick, _now: Millis) {
        self.counter.on_tick(tick);
    }

    fn elements(&self, now: Millis) -> Vec<Element> {
        let mut out: Vec<Element> = self
            .blocks
            .iter()
            .map(|b| self.reveal.sample(b, now))
            .collect();
        out.extend(self.bars.element("benefits-bars", now));
        out.extend(self.pie.element("benefits-pie", now));
        let counter = fade_in(
            Element::group("counter", Affine::IDENTITY, self.counter_elements()),
            600,
        );
        out.push(self.reveal.sample(&counter, now));
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/benefits.rs"]
mod tests;
