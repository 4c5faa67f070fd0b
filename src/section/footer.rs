use crate::{
    chart::{MOBILE_BREAKPOINT, cumulative::CumulativeChart},
    data::metrics::SUMMARY_STATS,
    foundation::{
        core::{Affine, Color, Millis, Point, Rect},
        format::{format_compact_population, format_number},
    },
    scene::model::{Element, Paint, Shape, TextAnchor, TextStyle},
    section::{ChartSlot, Reveal, SECTION_PADDING, Section, SectionContext, SectionCopy, fade_in, text},
};

/// Trigger margin of the closing chart; smaller than the page default.
pub const CHART_ROOT_MARGIN: f64 = -50.0;

const MAX_WIDTH: f64 = 896.0;
const PADDING_X: f64 = 24.0;
const ORB_RADIUS: f64 = 192.0;

/// Closing copy, the cumulative benefits row and the data source note.
#[derive(Debug)]
pub struct FooterSection {
    ctx: SectionContext,
    copy: SectionCopy,
    reveal: Reveal,
    chart: ChartSlot<CumulativeChart>,
    blocks: Vec<Element>,
    bounds: Rect,
}

impl FooterSection {
    pub fn new(ctx: SectionContext) -> Self {
        Self {
            copy: SectionCopy {
                eyebrow: "Benefits Over Time",
                title: "The Future",
                highlight: "We Create Together",
                lede: "Climate action means cleaner air, stronger economies, and healthier communities for everyone."
                    .to_owned(),
            },
            reveal: Reveal::new(ctx.config.root_margin),
            chart: ChartSlot::new(ctx.config.cumulative_chart(), CHART_ROOT_MARGIN),
            blocks: Vec::new(),
            bounds: Rect::ZERO,
            ctx,
        }
    }

    pub fn chart(&self) -> &ChartSlot<CumulativeChart> {
        &self.chart
    }

    pub fn reveal(&self) -> &Reveal {
        &self.reveal
    }

    /// Source line and coverage line under the divider.
    pub fn source_notes() -> [String; 2] {
        [
            format!(
                "Data source: UK Co-Benefits Dataset (Level 3) - {}",
                SUMMARY_STATS.years_span
            ),
            format!(
                "{} small areas analyzed • {} population covered",
                format_number(SUMMARY_STATS.total_small_areas as f64),
                format_compact_population(SUMMARY_STATS.total_population as f64)
            ),
        ]
    }

    fn orbs(&self, bounds: Rect) -> Element {
        let orb = |key: &str, center: Point, color: Color| {
            Element::new(
                key,
                Shape::Circle {
                    center,
                    radius: ORB_RADIUS,
                },
            )
            .paint(Paint::fill(color).with_opacity(0.1))
        };
        Element::group(
            "footer-orbs",
            Affine::IDENTITY,
            vec![
                orb(
                    "orb-emerald",
                    Point::new(bounds.x0 + bounds.width() / 4.0 + ORB_RADIUS, bounds.y0 + ORB_RADIUS),
                    self.ctx.theme().accent,
                ),
                orb(
                    "orb-cyan",
                    Point::new(bounds.x1 - bounds.width() / 4.0 - ORB_RADIUS, bounds.y1 - ORB_RADIUS),
                    Color::hex(0x06b6d4),
                ),
            ],
        )
    }
}

impl Section for FooterSection {
    fn anchor(&self) -> &'static str {
        "footer"
    }

    fn copy(&self) -> &SectionCopy {
        &self.copy
    }

    #[tracing::instrument(skip(self))]
    fn layout(&mut self, top: f64, width: f64, viewport_height: f64, now: Millis) -> f64 {
        let theme = self.ctx.theme().clone();
        let inner = (width.min(MAX_WIDTH) - 2.0 * PADDING_X).max(0.0);
        let x0 = (width - inner) / 2.0;
        let cx = width / 2.0;
        let title_size = if width >= MOBILE_BREAKPOINT { 72.0 } else { 48.0 };
        let middle = |size: f64| TextStyle::sized(size).anchor(TextAnchor::Middle);

        let mut y = top + SECTION_PADDING;
        let title = vec![
            text(
                "footer-title",
                Point::new(cx, y + title_size),
                self.copy.title,
                middle(title_size).weight(700),
                theme.accent,
            ),
            text(
                "footer-highlight",
                Point::new(cx, y + 2.1 * title_size),
                self.copy.highlight,
                middle(title_size).weight(700),
                theme.text,
            ),
        ];
        y += 2.2 * title_size + 24.0;
        let mut blocks = vec![fade_in(Element::group("footer-heading", Affine::IDENTITY, title), 200)];

        blocks.push(fade_in(
            text("footer-lede", Point::new(cx, y + 22.0), self.copy.lede.clone(), middle(20.0), theme.muted),
            400,
        ));
        y += 28.0 + 32.0;

        let caption = text(
            "footer-caption",
            Point::new(cx, y + 14.0),
            self.copy.eyebrow,
            middle(14.0),
            theme.axis,
        );
        y += 20.0 + 16.0;
        let frame = self.chart.place(Point::new(x0, y), inner, now);
        blocks.push(fade_in(caption, 600));
        y = frame.y1 + 48.0;

        let [source, coverage] = Self::source_notes();
        let notes = vec![
            Element::new(
                "footer-divider",
                Shape::Line {
                    from: Point::new(x0, y),
                    to: Point::new(x0 + inner, y),
                },
            )
            .paint(Paint::stroke(theme.text.with_alpha(26), 1.0)),
            text("footer-source", Point::new(cx, y + 32.0 + 14.0), source, middle(14.0), theme.axis),
            text("footer-coverage", Point::new(cx, y + 32.0 + 42.0), coverage, middle(14.0), theme.grid),
        ];
        blocks.push(fade_in(Element::group("footer-notes", Affine::IDENTITY, notes), 1000));
        y += 32.0 + 48.0 + SECTION_PADDING;

        self.bounds = Rect::new(0.0, top, width, y);
        blocks.insert(0, self.orbs(self.bounds));
        self.blocks = blocks;
        tracing::debug!(height = y - top, viewport_height, "footer laid out");
        self.bounds.height()
    }

    fn height(&self) -> f64 {
        self.bounds.height()
    }

    fn on_scroll(&mut self, viewport: Rect, now: Millis) {
        self.reveal.observe(self.bounds, viewport, now);
        self.chart.observe(viewport, now);
    }

    fn elements(&self, now: Millis) -> Vec<Element> {
        let mut out: Vec<Element> = self
            .blocks
            .iter()
            .map(|b| self.reveal.sample(b, now))
            .collect();
        out.extend(self.chart.element("footer-chart", now));
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/footer.rs"]
mod tests;
