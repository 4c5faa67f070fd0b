use crate::{
    animation::{
        ease::Ease,
        tween::{Lerp, Stagger},
    },
    chart::{Chart, ChartKind, Theme, label_fade, scale::{BandScale, SqrtScale}},
    data::metrics::CumulativePoint,
    foundation::{
        core::{Affine, Color, Millis, Point, Surface},
        format::format_millions,
    },
    scene::model::{Effect, Element, Paint, Scene, Shape, TextAnchor, TextStyle},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CumulativeOptions {
    /// The row never grows wider than this and is centered in wider containers.
    pub max_width: f64,
    pub height: f64,
    /// Space kept clear at both ends of the band range.
    pub inset: f64,
    pub padding: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    /// Color of the first year; later years ramp toward `to`.
    pub from: Color,
    pub to: Color,
    pub opacity: f64,
    pub grow_ms: u64,
    pub stagger_ms: u64,
}

impl Default for CumulativeOptions {
    fn default() -> Self {
        Self {
            max_width: 700.0,
            height: 180.0,
            inset: 50.0,
            padding: 0.3,
            min_radius: 15.0,
            max_radius: 50.0,
            from: Color::hex(0x334155),
            to: Color::hex(0x10b981),
            opacity: 0.9,
            grow_ms: 800,
            stagger_ms: 100,
        }
    }
}

/// Running benefit totals as a row of growing circles, one per year.
#[derive(Clone, Debug)]
pub struct CumulativeChart {
    points: Vec<CumulativePoint>,
    options: CumulativeOptions,
    theme: Theme,
}

impl CumulativeChart {
    pub fn new(points: &[CumulativePoint], options: CumulativeOptions, theme: Theme) -> Self {
        Self {
            points: points.to_vec(),
            options,
            theme,
        }
    }

    pub fn points(&self) -> &[CumulativePoint] {
        &self.points
    }

    pub fn radius_scale(&self) -> SqrtScale {
        let max = self.points.iter().map(|p| p.cumulative).fold(0.0, f64::max);
        SqrtScale::new(max, self.options.max_radius).with_floor(self.options.min_radius)
    }

    /// Ramp position of point `index`, from `from` (first) to `to` (last).
    pub fn color_at(&self, index: usize) -> Color {
        let last = self.points.len().saturating_sub(1);
        let t = if last == 0 { 0.0 } else { index as f64 / last as f64 };
        Color::lerp(&self.options.from, &self.options.to, t)
    }

    fn row_width(&self, surface: Surface) -> f64 {
        surface.width.min(self.options.max_width)
    }
}

impl Chart for CumulativeChart {
    fn kind(&self) -> ChartKind {
        ChartKind::Cumulative
    }

    fn preferred_height(&self, _width: f64) -> f64 {
        self.options.height
    }

    #[tracing::instrument(skip(self), fields(points = self.points.len()))]
    fn build(&self, surface: Surface) -> Scene {
        let o = &self.options;
        let row = self.row_width(surface);
        if !surface.is_drawable() || self.points.is_empty() || row - 2.0 * o.inset <= 0.0 {
            tracing::debug!(?surface, "nothing to draw");
            return Scene::new(surface);
        }

        let x = BandScale::new(self.points.len(), (o.inset, row - o.inset), o.padding);
        let r = self.radius_scale();
        let grow = Stagger::new(0, o.stagger_ms);
        let labels = Stagger::new(o.grow_ms, o.stagger_ms);
        let cy = o.height / 2.0;

        let children = self
            .points
            .iter()
            .enumerate()
            .map(|(i, point)| {
                let circle = Element::new(
                    format!("circle-{i}"),
                    Shape::Circle {
                        center: Point::ORIGIN,
                        radius: r.map(point.cumulative),
                    },
                )
                .paint(Paint::fill(self.color_at(i)).with_opacity(o.opacity))
                .enter(Effect::GrowRadius, grow.timing(i, Millis(o.grow_ms), Ease::default()));

                let value = Element::new(
                    format!("value-{i}"),
                    Shape::Text {
                        at: Point::ORIGIN,
                        content: format_millions(point.cumulative),
                        style: TextStyle::sized(11.0)
                            .weight(600)
                            .anchor(TextAnchor::Middle)
                            .dy(0.35),
                    },
                )
                .paint(Paint::fill(self.theme.text))
                .enter(Effect::Fade { from: 0.0 }, label_fade(labels.delay_for(i)));

                let year = Element::new(
                    format!("year-{i}"),
                    Shape::Text {
                        at: Point::new(0.0, o.max_radius + 20.0),
                        content: point.year.to_string(),
                        style: TextStyle::sized(12.0).anchor(TextAnchor::Middle),
                    },
                )
                .paint(Paint::fill(self.theme.muted));

                Element::group(
                    format!("point-{i}"),
                    Affine::translate((x.center(i), cy)),
                    vec![circle, value, year],
                )
            })
            .collect();

        let mut scene = Scene::new(surface);
        scene.push(Element::group(
            "cumulative",
            Affine::translate(((surface.width - row) / 2.0, 0.0)),
            children,
        ));
        scene
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/cumulative.rs"]
mod tests;
