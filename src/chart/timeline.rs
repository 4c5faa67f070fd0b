use std::f64::consts::FRAC_PI_2;

use crate::{
    animation::{ease::Ease, tween::Stagger},
    chart::{Chart, ChartKind, Theme, scale::LinearScale},
    data::metrics::{TIMELINE, TimelineSeries, YearlyPoint, timeline_point_for},
    foundation::{
        core::{Affine, BezPath, Margin, Millis, Point, Rect, Surface},
        format::format_millions,
    },
    scene::model::{Effect, Element, Paint, Scene, Shape, TextAnchor, TextStyle},
};

pub const YEAR_MIN: u16 = 2025;
pub const YEAR_MAX: u16 = 2050;

/// Cubic curve through `points` that preserves monotonicity in y (points sorted by x).
pub fn monotone_x(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some(first) = points.first() else {
        return path;
    };
    path.move_to(*first);
    match points.len() {
        1 => return path,
        2 => {
            path.line_to(points[1]);
            return path;
        }
        _ => {}
    }

    let n = points.len();
    let mut tangents = vec![0.0; n];
    for i in 1..n - 1 {
        tangents[i] = interior_slope(points[i - 1], points[i], points[i + 1]);
    }
    tangents[0] = end_slope(points[0], points[1], tangents[1]);
    tangents[n - 1] = end_slope(points[n - 2], points[n - 1], tangents[n - 2]);

    for i in 0..n - 1 {
        let (p0, p1) = (points[i], points[i + 1]);
        let dx = (p1.x - p0.x) / 3.0;
        path.curve_to(
            Point::new(p0.x + dx, p0.y + dx * tangents[i]),
            Point::new(p1.x - dx, p1.y - dx * tangents[i + 1]),
            p1,
        );
    }
    path
}

fn sign(v: f64) -> f64 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

/// Steffen tangent at `p1`.
fn interior_slope(p0: Point, p1: Point, p2: Point) -> f64 {
    let h0 = p1.x - p0.x;
    let h1 = p2.x - p1.x;
    let s0 = (p1.y - p0.y) / h0;
    let s1 = (p2.y - p1.y) / h1;
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if t.is_finite() { t } else { 0.0 }
}

/// One-sided tangent for an end point given the neighbour's tangent.
fn end_slope(p0: Point, p1: Point, t: f64) -> f64 {
    let h = p1.x - p0.x;
    if h != 0.0 {
        (3.0 * (p1.y - p0.y) / h - t) / 2.0
    } else {
        t
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TimelineOptions {
    pub margin: Margin,
    /// Whole chart height, margins included.
    pub height: f64,
    pub y_max: f64,
    pub draw_ms: u64,
    pub stagger_ms: u64,
    pub x_ticks: usize,
    pub y_ticks: usize,
    pub y_label: String,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            margin: Margin::new(30.0, 140.0, 50.0, 70.0),
            height: 400.0,
            y_max: 14_000.0,
            draw_ms: 2000,
            stagger_ms: 200,
            x_ticks: 6,
            y_ticks: 7,
            y_label: "Annual Benefits (GBP)".to_owned(),
        }
    }
}

/// Annual benefit lines with a dashed indicator at the selected year.
#[derive(Clone, Debug)]
pub struct TimelineChart {
    points: Vec<YearlyPoint>,
    year: u16,
    draw_on: bool,
    options: TimelineOptions,
    theme: Theme,
}

impl TimelineChart {
    pub fn new(year: u16, draw_on: bool, options: TimelineOptions, theme: Theme) -> Self {
        Self {
            points: TIMELINE.to_vec(),
            year: year.clamp(YEAR_MIN, YEAR_MAX),
            draw_on,
            options,
            theme,
        }
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    /// Readout shown next to the indicator, if the indicator is drawn.
    pub fn readout(&self) -> Option<String> {
        (self.year > YEAR_MIN).then(|| format_millions(timeline_point_for(self.year).total))
    }

    fn scales(&self, surface: Surface) -> Option<(LinearScale, LinearScale, f64, f64)> {
        let m = self.options.margin;
        let width = surface.width - m.horizontal();
        let height = self.options.height - m.vertical();
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        let x = LinearScale::new((f64::from(YEAR_MIN), f64::from(YEAR_MAX)), (0.0, width));
        let y = LinearScale::new((0.0, self.options.y_max), (height, 0.0));
        Some((x, y, width, height))
    }

    pub fn series_path(&self, series: TimelineSeries, x: &LinearScale, y: &LinearScale) -> BezPath {
        let points: Vec<Point> = self
            .points
            .iter()
            .map(|p| Point::new(x.map(f64::from(p.year)), y.map(series.value(p))))
            .collect();
        monotone_x(&points)
    }

    fn text(key: String, at: Point, content: String, style: TextStyle, paint: Paint) -> Element {
        Element::new(key, Shape::Text { at, content, style }).paint(paint)
    }

    fn grid(&self, y: &LinearScale, width: f64) -> Vec<Element> {
        y.ticks(self.options.y_ticks)
            .into_iter()
            .map(|t| {
                let at = y.map(t);
                Element::new(
                    format!("grid-{t}"),
                    Shape::Line {
                        from: Point::new(0.0, at),
                        to: Point::new(width, at),
                    },
                )
                .paint(Paint::stroke(self.theme.grid, 1.0).with_opacity(0.3))
            })
            .collect()
    }

    fn axes(&self, x: &LinearScale, y: &LinearScale, width: f64, height: f64) -> Vec<Element> {
        let axis = Paint::stroke(self.theme.axis, 1.0);
        let label = Paint::fill(self.theme.axis);
        let mut out = vec![
            Element::new(
                "x-axis",
                Shape::Line {
                    from: Point::new(0.0, height),
                    to: Point::new(width, height),
                },
            )
            .paint(axis.clone()),
            Element::new(
                "y-axis",
                Shape::Line {
                    from: Point::new(0.0, 0.0),
                    to: Point::new(0.0, height),
                },
            )
            .paint(axis.clone()),
        ];
        for t in x.ticks(self.options.x_ticks) {
            let at = x.map(t);
            out.push(
                Element::new(
                    format!("x-tick-{t}"),
                    Shape::Line {
                        from: Point::new(at, height),
                        to: Point::new(at, height + 6.0),
                    },
                )
                .paint(axis.clone()),
            );
            out.push(Self::text(
                format!("x-label-{t}"),
                Point::new(at, height + 9.0),
                format!("{t:.0}"),
                TextStyle::sized(10.0).anchor(TextAnchor::Middle).dy(0.71),
                label.clone(),
            ));
        }
        for t in y.ticks(self.options.y_ticks) {
            let at = y.map(t);
            out.push(
                Element::new(
                    format!("y-tick-{t}"),
                    Shape::Line {
                        from: Point::new(-6.0, at),
                        to: Point::new(0.0, at),
                    },
                )
                .paint(axis.clone()),
            );
            out.push(Self::text(
                format!("y-label-{t}"),
                Point::new(-9.0, at),
                format!("£{}B", t / 1000.0),
                TextStyle::sized(10.0).anchor(TextAnchor::End).dy(0.32),
                label.clone(),
            ));
        }
        out.push(Element::group(
            "y-title",
            Affine::rotate(-FRAC_PI_2),
            vec![Self::text(
                "y-title-text".to_owned(),
                Point::new(-height / 2.0, -55.0),
                self.options.y_label.clone(),
                TextStyle::sized(12.0).anchor(TextAnchor::Middle),
                label,
            )],
        ));
        out
    }

    fn legend(&self, width: f64) -> Element {
        let children = TimelineSeries::ALL
            .iter()
            .enumerate()
            .flat_map(|(i, series)| {
                let row = i as f64 * 28.0;
                let thickness = if *series == TimelineSeries::Total { 4.0 } else { 2.0 };
                [
                    Element::new(
                        format!("legend-swatch-{i}"),
                        Shape::Rect {
                            rect: Rect::new(0.0, row, 20.0, row + thickness),
                            corner_radius: 1.0,
                        },
                    )
                    .paint(Paint::fill(series.color())),
                    Self::text(
                        format!("legend-label-{i}"),
                        Point::new(28.0, row + 4.0),
                        series.label().to_owned(),
                        TextStyle::sized(10.0),
                        Paint::fill(self.theme.muted),
                    ),
                ]
            })
            .collect();
        Element::group("legend", Affine::translate((width + 15.0, 0.0)), children)
    }
}

impl Chart for TimelineChart {
    fn kind(&self) -> ChartKind {
        ChartKind::Timeline
    }

    fn preferred_height(&self, _width: f64) -> f64 {
        self.options.height
    }

    #[tracing::instrument(skip(self), fields(year = self.year, draw_on = self.draw_on))]
    fn build(&self, surface: Surface) -> Scene {
        let Some((x, y, width, height)) = self.scales(surface) else {
            tracing::debug!("plot area collapsed");
            return Scene::new(surface);
        };
        if self.points.is_empty() {
            return Scene::new(surface);
        }
        let mut scene = Scene::new(Surface::new(surface.width, self.options.height));

        let mut plot = self.grid(&y, width);

        let stagger = Stagger::new(0, self.options.stagger_ms);
        for (idx, series) in TimelineSeries::ALL.iter().enumerate() {
            let width = if *series == TimelineSeries::Total { 4.0 } else { 2.0 };
            let mut line = Element::new(
                format!("line-{idx}"),
                Shape::Path(self.series_path(*series, &x, &y)),
            )
            .paint(Paint::stroke(series.color(), width));
            if self.draw_on {
                line = line.enter(
                    Effect::DrawOn,
                    stagger.timing(idx, Millis(self.options.draw_ms), Ease::default()),
                );
            }
            plot.push(line);
        }

        if let Some(readout) = self.readout() {
            let at = x.map(f64::from(self.year));
            plot.push(
                Element::new(
                    "indicator",
                    Shape::Line {
                        from: Point::new(at, 0.0),
                        to: Point::new(at, height),
                    },
                )
                .paint(
                    Paint::stroke(self.theme.text, 2.0)
                        .with_dash(vec![5.0, 5.0])
                        .with_opacity(0.5),
                ),
            );
            plot.push(Self::text(
                "readout".to_owned(),
                Point::new(at + 10.0, 20.0),
                readout,
                TextStyle::sized(14.0).weight(700),
                Paint::fill(self.theme.accent),
            ));
        }

        plot.extend(self.axes(&x, &y, width, height));
        plot.push(self.legend(width));

        let m = self.options.margin;
        scene.push(Element::group(
            "plot",
            Affine::translate((m.left, m.top)),
            plot,
        ));
        scene
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/timeline.rs"]
mod tests;
