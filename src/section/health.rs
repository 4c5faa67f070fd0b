use crate::{
    chart::{MOBILE_BREAKPOINT, bubble::BubbleChart},
    data::metrics::{DAMAGE_PATHWAYS, ECONOMIC_BREAKDOWN, HEALTH_OUTCOMES, OutcomeRecord, PathwayRecord},
    foundation::{
        core::{Affine, Millis, Point, Rect},
        format::format_millions,
    },
    scene::model::{Element, Paint, Shape, TextAnchor, TextStyle},
    section::{
        BLOCK_GAP, CARD_TITLE_HEIGHT, ChartSlot, HEADER_HEIGHT, Reveal, SECTION_PADDING, Section,
        SectionContext, SectionCopy, WIDE_BREAKPOINT, card, columns, content_column, fade_in,
        header, text,
    },
};

const GRID_MAX_WIDTH: f64 = 896.0;
const OUTCOME_CARD_HEIGHT: f64 = 240.0;
const BUBBLE_PADDING: f64 = 32.0;
const LEGEND_ROW: f64 = 28.0;
const LEGEND_FONT: f64 = 14.0;

/// Columns of the outcome grid for a `width` wide page.
pub fn outcome_columns(width: f64) -> usize {
    if width >= WIDE_BREAKPOINT {
        3
    } else if width >= MOBILE_BREAKPOINT {
        2
    } else {
        1
    }
}

/// Wrap legend entries into centered rows no wider than `max_width`; returns each entry's
/// top-left corner relative to the legend origin.
pub fn legend_layout(labels: &[&str], max_width: f64) -> Vec<Point> {
    const GAP: f64 = 16.0;
    let widths: Vec<f64> = labels.iter().map(|l| legend_entry_width(l)).collect();

    let mut rows: Vec<Vec<usize>> = vec![Vec::new()];
    let mut used = 0.0;
    for (i, w) in widths.iter().enumerate() {
        let needed = if used > 0.0 { used + GAP + w } else { *w };
        if needed > max_width && used > 0.0 {
            rows.push(Vec::new());
            used = *w;
        } else {
            used = needed;
        }
        if let Some(row) = rows.last_mut() {
            row.push(i);
        }
    }

    let mut out = vec![Point::ZERO; labels.len()];
    for (r, row) in rows.iter().enumerate() {
        let row_width: f64 =
            row.iter().map(|&i| widths[i]).sum::<f64>() + GAP * row.len().saturating_sub(1) as f64;
        let mut x = (max_width - row_width).max(0.0) / 2.0;
        for &i in row {
            out[i] = Point::new(x, r as f64 * LEGEND_ROW);
            x += widths[i] + GAP;
        }
    }
    out
}

fn legend_entry_width(label: &str) -> f64 {
    12.0 + 8.0 + label.chars().count() as f64 * LEGEND_FONT * 0.6
}

/// Outcome cards and the damage pathway bubble chart with its legend.
#[derive(Debug)]
pub struct HealthSection {
    ctx: SectionContext,
    copy: SectionCopy,
    reveal: Reveal,
    bubbles: ChartSlot<BubbleChart>,
    blocks: Vec<Element>,
    bounds: Rect,
}

impl HealthSection {
    pub fn new(ctx: SectionContext) -> Self {
        let health_total = ECONOMIC_BREAKDOWN.first().map_or(0.0, |r| r.value);
        Self {
            copy: SectionCopy {
                eyebrow: "Better Health For All",
                title: "Healthy Planet,",
                highlight: "Healthy People.",
                lede: format!(
                    "Taking care of our planet means taking care of our health. {} in benefits by 2050.",
                    format_millions(health_total)
                ),
            },
            reveal: Reveal::new(ctx.config.root_margin),
            bubbles: ChartSlot::new(ctx.config.bubble_chart(), ctx.config.root_margin),
            blocks: Vec::new(),
            bounds: Rect::ZERO,
            ctx,
        }
    }

    pub fn outcomes(&self) -> &'static [OutcomeRecord] {
        HEALTH_OUTCOMES
    }

    pub fn pathways(&self) -> &'static [PathwayRecord] {
        DAMAGE_PATHWAYS
    }

    pub fn bubbles(&self) -> &ChartSlot<BubbleChart> {
        &self.bubbles
    }

    fn outcome_card(&self, i: usize, outcome: &OutcomeRecord, rect: Rect) -> Element {
        let theme = self.ctx.theme();
        let x = rect.x0 + 24.0;
        let panel = Rect::new(x, rect.y1 - 88.0, rect.x1 - 24.0, rect.y1 - 24.0);
        let children = vec![
            card(format!("outcome-card-{i}"), rect, theme),
            text(
                format!("outcome-icon-{i}"),
                Point::new(x, rect.y0 + 60.0),
                outcome.icon,
                TextStyle::sized(36.0),
                theme.text,
            ),
            text(
                format!("outcome-name-{i}"),
                Point::new(x, rect.y0 + 100.0),
                outcome.name,
                TextStyle::sized(18.0).weight(700),
                theme.text,
            ),
            text(
                format!("outcome-desc-{i}"),
                Point::new(x, rect.y0 + 124.0),
                outcome.description,
                TextStyle::sized(14.0),
                theme.muted,
            ),
            Element::new(
                format!("outcome-panel-{i}"),
                Shape::Rect {
                    rect: panel,
                    corner_radius: 12.0,
                },
            )
            .paint(Paint::fill(outcome.color.with_alpha(0x15))),
            text(
                format!("outcome-value-{i}"),
                Point::new(panel.center().x, panel.center().y + 10.0),
                format_millions(outcome.value),
                TextStyle::sized(30.0).weight(700).anchor(TextAnchor::Middle),
                outcome.color,
            ),
        ];
        fade_in(
            Element::group(format!("outcome-{i}"), Affine::IDENTITY, children),
            100 * i as u64,
        )
    }

    fn legend(&self, origin: Point, max_width: f64) -> (Element, f64) {
        let labels: Vec<&str> = DAMAGE_PATHWAYS.iter().map(|p| p.pathway).collect();
        let spots = legend_layout(&labels, max_width);
        let rows = spots.iter().map(|p| p.y).fold(0.0, f64::max) + LEGEND_ROW;
        let children = DAMAGE_PATHWAYS
            .iter()
            .zip(spots)
            .enumerate()
            .flat_map(|(i, (pathway, at))| {
                [
                    Element::new(
                        format!("legend-dot-{i}"),
                        Shape::Circle {
                            center: Point::new(at.x + 6.0, at.y + 6.0),
                            radius: 6.0,
                        },
                    )
                    .paint(Paint::fill(pathway.color)),
                    text(
                        format!("legend-label-{i}"),
                        Point::new(at.x + 20.0, at.y + 11.0),
                        pathway.pathway,
                        TextStyle::sized(LEGEND_FONT),
                        self.ctx.theme().muted,
                    ),
                ]
            })
            .collect();
        (
            Element::group(
                "pathway-legend",
                Affine::translate((origin.x, origin.y)),
                children,
            ),
            rows,
        )
    }
}

impl Section for HealthSection {
    fn anchor(&self) -> &'static str {
        "health"
    }

    fn copy(&self) -> &SectionCopy {
        &self.copy
    }

    #[tracing::instrument(skip(self))]
    fn layout(&mut self, top: f64, width: f64, viewport_height: f64, now: Millis) -> f64 {
        let theme = self.ctx.theme().clone();
        let (x0, inner) = content_column(width);
        let mut y = top + SECTION_PADDING;
        let mut blocks = vec![header("health-header", &self.copy, width / 2.0, y, &theme)];
        y += HEADER_HEIGHT;

        let grid_width = inner.min(GRID_MAX_WIDTH);
        let cols = columns((width - grid_width) / 2.0, grid_width, outcome_columns(width), 24.0);
        for (i, outcome) in HEALTH_OUTCOMES.iter().enumerate() {
            let (cx, cw) = cols[i % cols.len()];
            let row = (i / cols.len()) as f64;
            let y0 = y + row * (OUTCOME_CARD_HEIGHT + 24.0);
            blocks.push(self.outcome_card(i, outcome, Rect::new(cx, y0, cx + cw, y0 + OUTCOME_CARD_HEIGHT)));
        }
        let rows = HEALTH_OUTCOMES.len().div_ceil(cols.len()) as f64;
        y += rows * (OUTCOME_CARD_HEIGHT + 24.0) - 24.0 + 2.0 * BLOCK_GAP;

        let card_top = y;
        let content = inner - 2.0 * BUBBLE_PADDING;
        let frame = self.bubbles.place(
            Point::new(x0 + BUBBLE_PADDING, card_top + BUBBLE_PADDING + CARD_TITLE_HEIGHT),
            content,
            now,
        );
        let (legend, legend_height) = self.legend(Point::new(frame.x0, frame.y1 + 24.0), content);
        let card_bottom = frame.y1 + 24.0 + legend_height + BUBBLE_PADDING;

        let children = vec![
            card("bubbles-card", Rect::new(x0, card_top, x0 + inner, card_bottom), &theme),
            text(
                "bubbles-title",
                Point::new(width / 2.0, card_top + BUBBLE_PADDING + 20.0),
                "Damage Pathway Distribution",
                TextStyle::sized(20.0).weight(600).anchor(TextAnchor::Middle),
                theme.text,
            ),
            legend,
        ];
        blocks.push(fade_in(Element::group("bubbles-block", Affine::IDENTITY, children), 500));
        y = card_bottom + SECTION_PADDING;

        self.blocks = blocks;
        self.bounds = Rect::new(0.0, top, width, y);
        tracing::debug!(height = y - top, viewport_height, "health laid out");
        self.bounds.height()
    }

    fn height(&self) -> f64 {
        self.bounds.height()
    }

    fn on_scroll(&mut self, viewport: Rect, now: Millis) {
        self.reveal.observe(self.bounds, viewport, now);
        self.bubbles.observe(viewport, now);
    }

    fn elements(&self, now: Millis) -> Vec<Element> {
        let mut out: Vec<Element> = self
            .blocks
            .iter()
            .map(|b| self.reveal.sample(b, now))
            .collect();
        out.extend(self.bubbles.element("health-bubbles", now));
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/health.rs"]
mod tests;
