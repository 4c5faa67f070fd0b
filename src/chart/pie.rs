use std::f64::consts::TAU;

use crate::{
    animation::{ease::Ease, tween::Stagger},
    chart::{Chart, ChartKind, Theme},
    data::metrics::BenefitRecord,
    foundation::{
        core::{Affine, Color, Millis, Point, Surface},
        format::format_millions,
    },
    scene::model::{ArcSpec, Effect, Element, Paint, Scene, Shape, TextAnchor, TextStyle},
};

/// Angular extent of one datum; angles clockwise from 12 o'clock.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PieSlice {
    pub index: usize,
    pub value: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

/// Lay values out around the full circle in input order.
///
/// Non-positive values get a zero-width slice; if nothing is positive every slice is empty.
pub fn pie_layout(values: &[f64]) -> Vec<PieSlice> {
    let sum: f64 = values.iter().filter(|v| **v > 0.0).sum();
    let k = if sum > 0.0 { TAU / sum } else { 0.0 };
    let mut angle = 0.0;
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let start_angle = angle;
            if value > 0.0 {
                angle += value * k;
            }
            PieSlice {
                index,
                value,
                start_angle,
                end_angle: angle,
            }
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PieDatum {
    pub label: String,
    pub value: f64,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PieOptions {
    pub size: f64,
    /// Inner radius as a fraction of the outer radius.
    pub inner_ratio: f64,
    pub sweep_ms: u64,
    pub stagger_ms: u64,
    pub stroke: Color,
    pub stroke_width: f64,
    pub center_title: String,
}

impl Default for PieOptions {
    fn default() -> Self {
        Self {
            size: 300.0,
            inner_ratio: 0.55,
            sweep_ms: 1000,
            stagger_ms: 80,
            stroke: Color::BLACK,
            stroke_width: 2.0,
            center_title: "Total Benefits".to_owned(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PieChart {
    data: Vec<PieDatum>,
    total: f64,
    options: PieOptions,
    theme: Theme,
}

impl PieChart {
    pub fn new(data: Vec<PieDatum>, total: f64, options: PieOptions, theme: Theme) -> Self {
        Self {
            data,
            total,
            options,
            theme,
        }
    }

    pub fn benefits(benefits: &[BenefitRecord], total: f64, options: PieOptions, theme: Theme) -> Self {
        let data = benefits
            .iter()
            .map(|b| PieDatum {
                label: b.name.to_owned(),
                value: b.value,
                color: b.color,
            })
            .collect();
        Self::new(data, total, options, theme)
    }

    pub fn slices(&self) -> Vec<PieSlice> {
        let values: Vec<f64> = self.data.iter().map(|d| d.value).collect();
        pie_layout(&values)
    }

    fn side(&self, surface: Surface) -> f64 {
        self.options.size.min(surface.width)
    }
}

impl Chart for PieChart {
    fn kind(&self) -> ChartKind {
        ChartKind::Pie
    }

    fn preferred_height(&self, width: f64) -> f64 {
        self.options.size.min(width)
    }

    #[tracing::instrument(skip(self), fields(slices = self.data.len()))]
    fn build(&self, surface: Surface) -> Scene {
        let side = self.side(surface);
        let radius = side / 2.0 - 10.0;
        if self.data.is_empty() || radius <= 0.0 {
            tracing::debug!(radius, "nothing to draw");
            return Scene::new(surface);
        }
        let mut scene = Scene::new(Surface::new(side, side));

        let stagger = Stagger::new(0, self.options.stagger_ms);
        let mut children: Vec<Element> = self
            .slices()
            .into_iter()
            .zip(&self.data)
            .map(|(slice, datum)| {
                let timing = stagger.timing(slice.index, Millis(self.options.sweep_ms), Ease::default());
                Element::new(
                    format!("arc-{}", slice.index),
                    Shape::Arc(ArcSpec {
                        center: Point::ORIGIN,
                        inner_radius: radius * self.options.inner_ratio,
                        outer_radius: radius,
                        start_angle: slice.start_angle,
                        end_angle: slice.end_angle,
                    }),
                )
                .paint(
                    Paint::fill(datum.color)
                        .with_stroke(self.options.stroke, self.options.stroke_width),
                )
                .enter(Effect::Sweep, timing)
                .enter(Effect::Fade { from: 0.0 }, timing)
            })
            .collect();

        children.push(
            Element::new(
                "center-title",
                Shape::Text {
                    at: Point::ORIGIN,
                    content: self.options.center_title.clone(),
                    style: TextStyle::sized(12.0).anchor(TextAnchor::Middle).dy(-0.3),
                },
            )
            .paint(Paint::fill(self.theme.muted)),
        );
        children.push(
            Element::new(
                "center-value",
                Shape::Text {
                    at: Point::ORIGIN,
                    content: format_millions(self.total),
                    style: TextStyle::sized(18.0)
                        .weight(700)
                        .anchor(TextAnchor::Middle)
                        .dy(1.0),
                },
            )
            .paint(Paint::fill(self.theme.accent)),
        );

        scene.push(Element::group(
            "pie",
            Affine::translate((side / 2.0, side / 2.0)),
            children,
        ));
        scene
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/pie.rs"]
mod tests;
