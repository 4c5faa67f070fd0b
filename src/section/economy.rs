use crate::{
    chart::{MOBILE_BREAKPOINT, bar::BarChart, map::MapChart, treemap::TreemapChart},
    data::metrics::{TOP_AUTHORITIES, total_positive_benefits},
    foundation::{
        core::{Affine, Millis, Point, Rect},
        format::format_millions,
    },
    runtime::overlay::OverlayGuard,
    scene::model::{Element, Paint, Shape, TextAnchor, TextStyle},
    section::{
        BLOCK_GAP, CARD_TITLE_HEIGHT, ChartSlot, HEADER_HEIGHT, Reveal, SECTION_PADDING, Section,
        SectionContext, SectionCopy, columns, content_column, fade_in, header, text, titled_card,
    },
};

const WIDE_PADDING: f64 = 32.0;
const CARD_PADDING: f64 = 24.0;
const LIST_ROW: f64 = 36.0;
const LISTED_AUTHORITIES: usize = 5;
const BANNER_WIDTH: f64 = 560.0;
const BANNER_HEIGHT: f64 = 200.0;

/// Ranked `(label, value)` rows of the top `n` local authorities.
pub fn top_authorities(n: usize) -> Vec<(String, String)> {
    TOP_AUTHORITIES
        .iter()
        .take(n)
        .enumerate()
        .map(|(i, a)| (format!("{}. {}", i + 1, a.name), format_millions(a.value)))
        .collect()
}

/// Treemap of the economic breakdown, nations, top authorities and the authority map.
#[derive(Debug)]
pub struct EconomySection {
    ctx: SectionContext,
    copy: SectionCopy,
    reveal: Reveal,
    treemap: ChartSlot<TreemapChart>,
    regions: ChartSlot<BarChart>,
    map: ChartSlot<MapChart>,
    popup: Option<OverlayGuard>,
    hovered: Option<usize>,
    blocks: Vec<Element>,
    bounds: Rect,
}

impl EconomySection {
    pub fn new(ctx: SectionContext) -> Self {
        let margin = ctx.config.root_margin;
        Self {
            copy: SectionCopy {
                eyebrow: "Economic Impact",
                title: "Good for the Planet.",
                highlight: "Great for the Economy.",
                lede: "By 2050, net-zero policies will generate billions in co-benefits.".to_owned(),
            },
            reveal: Reveal::new(margin),
            treemap: ChartSlot::new(ctx.config.treemap_chart(), margin),
            regions: ChartSlot::new(ctx.config.regions_chart(), margin),
            map: ChartSlot::new(ctx.config.map_chart(ctx.tiles.clone()), margin),
            popup: None,
            hovered: None,
            blocks: Vec::new(),
            bounds: Rect::ZERO,
            ctx,
        }
    }

    pub fn treemap(&self) -> &ChartSlot<TreemapChart> {
        &self.treemap
    }

    pub fn regions(&self) -> &ChartSlot<BarChart> {
        &self.regions
    }

    pub fn map(&self) -> &ChartSlot<MapChart> {
        &self.map
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Open the popup of marker `index` in the overlay; returns whether one is shown.
    pub fn hover_marker(&mut self, index: usize) -> bool {
        let chart = self.map.chart();
        if !self.map.is_triggered() || !chart.has_tiles() {
            return false;
        }
        let frame = self.map.frame();
        let (Some(popup), Some(at)) = (chart.popup(index), chart.marker_position(index, frame.width()))
        else {
            return false;
        };
        let at = Point::new(frame.x0 + at.x, frame.y0 + at.y);
        let element = popup.to_element("popup", at, self.ctx.theme());
        match &self.popup {
            Some(guard) => guard.update(element),
            None => self.popup = Some(self.ctx.overlay.acquire(element)),
        }
        self.hovered = Some(index);
        true
    }

    pub fn unhover(&mut self) {
        self.popup = None;
        self.hovered = None;
    }

    fn authority_list(&self, rect: Rect) -> Vec<Element> {
        let theme = self.ctx.theme();
        let (mut out, content_top) =
            titled_card("authorities", rect, "Top Local Authorities", CARD_PADDING, theme);
        for (i, (label, value)) in top_authorities(LISTED_AUTHORITIES).into_iter().enumerate() {
            let y = content_top + i as f64 * LIST_ROW + 16.0;
            out.push(text(
                format!("authority-name-{i}"),
                Point::new(rect.x0 + CARD_PADDING, y),
                label,
                TextStyle::sized(14.0),
                theme.muted,
            ));
            out.push(text(
                format!("authority-value-{i}"),
                Point::new(rect.x1 - CARD_PADDING, y),
                value,
                TextStyle::sized(16.0).weight(600).anchor(TextAnchor::End),
                theme.accent,
            ));
        }
        out
    }

    fn banner(&self, rect: Rect) -> Element {
        let theme = self.ctx.theme();
        let cx = rect.center().x;
        let middle = |size: f64, weight: u16| {
            TextStyle::sized(size)
                .weight(weight)
                .anchor(TextAnchor::Middle)
        };
        let children = vec![
            Element::new(
                "banner-frame",
                Shape::Rect {
                    rect,
                    corner_radius: 32.0,
                },
            )
            .paint(Paint::fill(theme.background).with_stroke(theme.accent, 2.0)),
            text(
                "banner-label",
                Point::new(cx, rect.y0 + 48.0),
                "Total Economic Benefits",
                middle(14.0, 400),
                theme.muted,
            ),
            text(
                "banner-value",
                Point::new(cx, rect.y0 + 124.0),
                format_millions(total_positive_benefits()),
                middle(64.0, 700),
                theme.accent,
            ),
            text(
                "banner-caption",
                Point::new(cx, rect.y0 + 164.0),
                "by 2050",
                middle(14.0, 400),
                theme.muted,
            ),
        ];
        fade_in(Element::group("banner", Affine::IDENTITY, children), 600)
    }
}

impl Section for EconomySection {
    fn anchor(&self) -> &'static str {
        "economy"
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
        let mut blocks = vec![header("economy-header", &self.copy, width / 2.0, y, &theme)];
        y += HEADER_HEIGHT;

        let content_offset = WIDE_PADDING + CARD_TITLE_HEIGHT;
        let frame = self.treemap.place(
            Point::new(x0 + WIDE_PADDING, y + content_offset),
            inner - 2.0 * WIDE_PADDING,
            now,
        );
        let bottom = frame.y1 + WIDE_PADDING;
        let (card, _) = titled_card(
            "treemap",
            Rect::new(x0, y, x0 + inner, bottom),
            "Economic Benefits Breakdown",
            WIDE_PADDING,
            &theme,
        );
        blocks.push(fade_in(Element::group("treemap-block", Affine::IDENTITY, card), 200));
        y = bottom + 1.5 * BLOCK_GAP;

        let side_by_side = width >= MOBILE_BREAKPOINT;
        let cols = if side_by_side {
            columns(x0, inner, 2, BLOCK_GAP)
        } else {
            vec![(x0, inner), (x0, inner)]
        };
        let (rx, rw) = cols[0];
        let frame = self.regions.place(
            Point::new(rx + CARD_PADDING, y + CARD_PADDING + CARD_TITLE_HEIGHT),
            rw - 2.0 * CARD_PADDING,
            now,
        );
        let regions_bottom = frame.y1 + CARD_PADDING;
        let list_height = CARD_PADDING * 2.0 + CARD_TITLE_HEIGHT + LIST_ROW * LISTED_AUTHORITIES as f64;
        let (lx, lw) = cols[1];
        let list_top = if side_by_side { y } else { regions_bottom + BLOCK_GAP };
        let list_bottom = list_top + list_height;
        let (regions_bottom, list_bottom) = if side_by_side {
            let b = regions_bottom.max(list_bottom);
            (b, b)
        } else {
            (regions_bottom, list_bottom)
        };
        let (card, _) = titled_card(
            "regions",
            Rect::new(rx, y, rx + rw, regions_bottom),
            "By Nation",
            CARD_PADDING,
            &theme,
        );
        blocks.push(fade_in(Element::group("regions-block", Affine::IDENTITY, card), 400));
        blocks.push(fade_in(
            Element::group(
                "authorities-block",
                Affine::IDENTITY,
                self.authority_list(Rect::new(lx, list_top, lx + lw, list_bottom)),
            ),
            500,
        ));
        y = regions_bottom.max(list_bottom) + 1.5 * BLOCK_GAP;

        let frame = self.map.place(
            Point::new(x0 + WIDE_PADDING, y + content_offset),
            inner - 2.0 * WIDE_PADDING,
            now,
        );
        let bottom = frame.y1 + WIDE_PADDING;
        let (card, _) = titled_card(
            "map",
            Rect::new(x0, y, x0 + inner, bottom),
            "Local Authority Benefits",
            WIDE_PADDING,
            &theme,
        );
        blocks.push(fade_in(Element::group("map-block", Affine::IDENTITY, card), 500));
        y = bottom + 1.5 * BLOCK_GAP;

        let banner_w = inner.min(BANNER_WIDTH);
        blocks.push(self.banner(Rect::new(
            (width - banner_w) / 2.0,
            y,
            (width + banner_w) / 2.0,
            y + BANNER_HEIGHT,
        )));
        y += BANNER_HEIGHT + SECTION_PADDING;

        self.blocks = blocks;
        self.bounds = Rect::new(0.0, top, width, y);
        tracing::debug!(height = y - top, viewport_height, "economy laid out");
        self.bounds.height()
    }

    fn height(&self) -> f64 {
        self.bounds.height()
    }

    fn on_scroll(&mut self, viewport: Rect, now: Millis) {
        self.reveal.observe(self.bounds, viewport, now);
        self.treemap.observe(viewport, now);
        self.regions.observe(viewport, now);
        self.map.observe(viewport, now);
    }

    fn elements(&self, now: Millis) -> Vec<Element> {
        let mut out: Vec<Element> = self
            .blocks
            .iter()
            .map(|b| self.reveal.sample(b, now))
            .collect();
        out.extend(self.treemap.element("economy-treemap", now));
        out.extend(self.regions.element("economy-regions", now));
        out.extend(self.map.element("economy-map", now));
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/economy.rs"]
mod tests;
