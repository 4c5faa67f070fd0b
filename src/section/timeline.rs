use crate::{
    chart::{MOBILE_BREAKPOINT, timeline::TimelineChart},
    data::metrics::{TIMELINE, timeline_point_for},
    foundation::{
        core::{Affine, Color, Millis, Point, Rect},
        format::format_millions,
    },
    runtime::scheduler::Tick,
    scene::model::{Element, Paint, Shape, TextAnchor, TextStyle},
    section::{
        BLOCK_GAP, ChartSlot, HEADER_HEIGHT, Reveal, SECTION_PADDING, Section, SectionContext,
        SectionCopy, card, columns, content_column, fade_in, header, scrubber::Scrubber, text,
    },
};

const CARD_PADDING: f64 = 32.0;
const CONTROLS_HEIGHT: f64 = 48.0;
const BUTTON_WIDTH: f64 = 180.0;
const TRACK_WIDTH: f64 = 192.0;
const YEAR_WIDTH: f64 = 80.0;
const READOUT_HEIGHT: f64 = 88.0;
const STORY_HEIGHT: f64 = 180.0;

/// One category figure shown under the chart for the selected year.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Readout {
    pub label: &'static str,
    pub value: String,
    pub color: Color,
}

/// Category readouts for `year` (latest data point at or before it).
pub fn readouts(year: u16) -> Vec<Readout> {
    let p = timeline_point_for(year);
    vec![
        Readout {
            label: "Physical Activity",
            value: format_millions(p.physical_activity),
            color: Color::hex(0x34d399),
        },
        Readout {
            label: "Air Quality",
            value: format_millions(p.air_quality),
            color: Color::hex(0x60a5fa),
        },
        Readout {
            label: "Noise Reduction",
            value: format_millions(p.noise),
            color: Color::hex(0xc084fc),
        },
        Readout {
            label: "Excess Cold",
            value: format_millions(p.excess_cold),
            color: Color::hex(0xf472b6),
        },
    ]
}

#[derive(Clone, Copy, Debug, Default)]
struct Controls {
    button: Rect,
    track: Rect,
    year_at: Point,
    readouts: [Rect; 4],
}

/// Annual benefits chart driven by a year scrubber with play/pause.
#[derive(Debug)]
pub struct TimelineSection {
    ctx: SectionContext,
    copy: SectionCopy,
    reveal: Reveal,
    chart: ChartSlot<TimelineChart>,
    scrubber: Scrubber,
    controls: Controls,
    blocks: Vec<Element>,
    bounds: Rect,
}

impl TimelineSection {
    pub fn new(ctx: SectionContext) -> Self {
        let scrubber = Scrubber::new();
        Self {
            copy: SectionCopy {
                eyebrow: "Long-Term Impact",
                title: "Benefits That",
                highlight: "Grow Over Time",
                lede: "See how annual co-benefits grow from 2025 to 2050".to_owned(),
            },
            reveal: Reveal::new(ctx.config.root_margin),
            chart: ChartSlot::new(
                ctx.config.timeline_chart(scrubber.year(), true),
                ctx.config.root_margin,
            ),
            scrubber,
            controls: Controls::default(),
            blocks: Vec::new(),
            bounds: Rect::ZERO,
            ctx,
        }
    }

    pub fn chart(&self) -> &ChartSlot<TimelineChart> {
        &self.chart
    }

    pub fn scrubber(&self) -> &Scrubber {
        &self.scrubber
    }

    pub fn year(&self) -> u16 {
        self.scrubber.year()
    }

    pub fn readouts(&self) -> Vec<Readout> {
        readouts(self.scrubber.year())
    }

    /// Range input change; the chart redraws without its entrance.
    pub fn set_year(&mut self, year: u16, now: Millis) {
        if self.scrubber.set_year(year) {
            self.redraw(now);
        }
    }

    pub fn toggle_playback(&mut self) {
        self.scrubber.toggle(&self.ctx.scheduler);
    }

    pub fn play(&mut self) {
        self.scrubber.play(&self.ctx.scheduler);
    }

    pub fn pause(&mut self) {
        self.scrubber.pause();
    }

    fn redraw(&mut self, now: Millis) {
        // Lines only draw on for the first render.
        let draw_on = !self.chart.is_triggered();
        let chart = self.ctx.config.timeline_chart(self.scrubber.year(), draw_on);
        self.chart.set_chart(chart, now);
    }

    fn controls(&self) -> Element {
        let theme = self.ctx.theme();
        let c = self.controls;
        let playing = self.scrubber.is_playing();
        let thumb_x = c.track.x0 + c.track.width() * self.scrubber.fraction();

        let mut children = vec![
            Element::new(
                "play-button",
                Shape::Rect {
                    rect: c.button,
                    corner_radius: c.button.height() / 2.0,
                },
            )
            .paint(Paint::fill(if playing { Color::hex(0x374151) } else { theme.text })),
            text(
                "play-label",
                Point::new(c.button.center().x, c.button.center().y + 5.0),
                self.scrubber.button_label(),
                TextStyle::sized(15.0).weight(600).anchor(TextAnchor::Middle),
                if playing { theme.text } else { theme.background },
            ),
            Element::new(
                "year-track",
                Shape::Rect {
                    rect: c.track,
                    corner_radius: c.track.height() / 2.0,
                },
            )
            .paint(Paint::fill(Color::hex(0x374151))),
            Element::new(
                "year-thumb",
                Shape::Circle {
                    center: Point::new(thumb_x, c.track.center().y),
                    radius: 10.0,
                },
            )
            .paint(Paint::fill(theme.accent)),
            text(
                "year-label",
                c.year_at,
                self.scrubber.year().to_string(),
                TextStyle::sized(30.0).weight(700),
                theme.accent,
            ),
        ];

        for (i, (readout, rect)) in self.readouts().into_iter().zip(c.readouts).enumerate() {
            children.push(
                Element::new(
                    format!("readout-panel-{i}"),
                    Shape::Rect {
                        rect,
                        corner_radius: 12.0,
                    },
                )
                .paint(Paint::fill(readout.color.with_alpha(26))),
            );
            children.push(text(
                format!("readout-value-{i}"),
                Point::new(rect.center().x, rect.y0 + 40.0),
                readout.value,
                TextStyle::sized(24.0).weight(700).anchor(TextAnchor::Middle),
                readout.color,
            ));
            children.push(text(
                format!("readout-label-{i}"),
                Point::new(rect.center().x, rect.y0 + 64.0),
                readout.label,
                TextStyle::sized(12.0).anchor(TextAnchor::Middle),
                theme.muted,
            ));
        }
        fade_in(Element::group("controls", Affine::IDENTITY, children), 200)
    }
}

impl Section for TimelineSection {
    fn anchor(&self) -> &'static str {
        "timeline"
    }

    fn copy(&self) -> &SectionCopy {
        &self.copy
    }

    #[tracing::instrument(skip(self))]
    fn layout(&mut self, top: f64, width: f64, viewport_height: f64, now: Millis) -> f64 {
        let theme = self.ctx.theme().clone();
        let (x0, inner) = content_column(width);
        let mut y = top + SECTION_PADDING;
        let mut blocks = vec![header("timeline-header", &self.copy, width / 2.0, y, &theme)];
        y += HEADER_HEIGHT;

        let card_top = y;
        let content_w = inner - 2.0 * CARD_PADDING;
        let frame = self.chart.place(
            Point::new(x0 + CARD_PADDING, card_top + CARD_PADDING),
            content_w,
            now,
        );

        let controls_top = frame.y1 + BLOCK_GAP;
        let row_width = BUTTON_WIDTH + 24.0 + TRACK_WIDTH + 16.0 + YEAR_WIDTH;
        let left = width / 2.0 - row_width / 2.0;
        let button = Rect::new(left, controls_top, left + BUTTON_WIDTH, controls_top + CONTROLS_HEIGHT);
        let track_x = button.x1 + 24.0;
        let mid = button.center().y;
        let track = Rect::new(track_x, mid - 4.0, track_x + TRACK_WIDTH, mid + 4.0);
        let year_at = Point::new(track.x1 + 16.0, mid + 10.0);

        let readouts_top = controls_top + CONTROLS_HEIGHT + BLOCK_GAP;
        let per_row = if width >= MOBILE_BREAKPOINT { 4 } else { 2 };
        let cols = columns(x0 + CARD_PADDING, content_w, per_row, 16.0);
        let mut panels = [Rect::ZERO; 4];
        for (i, panel) in panels.iter_mut().enumerate() {
            let (px, pw) = cols[i % per_row];
            let py = readouts_top + (i / per_row) as f64 * (READOUT_HEIGHT + 16.0);
            *panel = Rect::new(px, py, px + pw, py + READOUT_HEIGHT);
        }
        let rows = (4 / per_row) as f64;
        let card_bottom = readouts_top + rows * (READOUT_HEIGHT + 16.0) - 16.0 + CARD_PADDING;
        self.controls = Controls {
            button,
            track,
            year_at,
            readouts: panels,
        };
        blocks.push(fade_in(
            card("timeline-card", Rect::new(x0, card_top, x0 + inner, card_bottom), &theme),
            200,
        ));

        y = card_bottom + 1.5 * BLOCK_GAP;
        let first = TIMELINE.first().map_or(0.0, |p| p.total);
        let last = TIMELINE.last().map_or(0.0, |p| p.total);
        let stories = [
            (
                "Immediate Benefits",
                format!(
                    "In 2025, annual benefits total {}, primarily from physical activity.",
                    format_millions(first)
                ),
                theme.accent,
            ),
            (
                "Peak Impact by 2050",
                format!(
                    "By 2050, annual benefits reach {} as air quality improvements fully mature.",
                    format_millions(last)
                ),
                Color::hex(0x22d3ee),
            ),
        ];
        let story_cols = if width >= MOBILE_BREAKPOINT {
            columns(x0, inner, 2, 24.0)
        } else {
            vec![(x0, inner), (x0, inner)]
        };
        let mut story_top = y;
        for (i, ((title, body, color), (sx, sw))) in stories.into_iter().zip(story_cols).enumerate() {
            if i > 0 && width < MOBILE_BREAKPOINT {
                story_top += STORY_HEIGHT + 24.0;
            }
            let rect = Rect::new(sx, story_top, sx + sw, story_top + STORY_HEIGHT);
            blocks.push(fade_in(
                Element::group(
                    format!("story-{i}"),
                    Affine::IDENTITY,
                    vec![
                        card(format!("story-card-{i}"), rect, &theme),
                        text(
                            format!("story-title-{i}"),
                            Point::new(rect.x0 + 24.0, rect.y0 + 48.0),
                            title,
                            TextStyle::sized(20.0).weight(700),
                            color,
                        ),
                        text(
                            format!("story-body-{i}"),
                            Point::new(rect.x0 + 24.0, rect.y0 + 84.0),
                            body,
                            TextStyle::sized(15.0),
                            theme.muted,
                        ),
                    ],
                ),
                400,
            ));
        }
        y = story_top + STORY_HEIGHT + SECTION_PADDING;

        self.blocks = blocks;
        self.bounds = Rect::new(0.0, top, width, y);
        tracing::debug!(height = y - top, viewport_height, "timeline laid out");
        self.bounds.height()
    }

    fn height(&self) -> f64 {
        self.bounds.height()
    }

    fn on_scroll(&mut self, viewport: Rect, now: Millis) {
        self.reveal.observe(self.bounds, viewport, now);
        self.chart.observe(viewport, now);
    }

    fn on_tick(&mut self, tick: &Tick, now: Millis) {
        if self.scrubber.on_tick(tick) {
            self.redraw(now);
        }
    }

    fn elements(&self, now: Millis) -> Vec<Element> {
        let mut out: Vec<Element> = self
            .blocks
            .iter()
            .map(|b| self.reveal.sample(b, now))
            .collect();
        out.extend(self.chart.element("timeline-chart", now));
        out.push(self.reveal.sample(&self.controls(), now));
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/timeline.rs"]
mod tests;
