use crate::{
    animation::{ease::Ease, tween::Stagger},
    chart::{Chart, ChartKind, MOBILE_BREAKPOINT, Theme, label_fade},
    data::metrics::OutcomeRecord,
    foundation::{
        core::{Affine, Color, Millis, Point, Rect, Surface},
        format::format_millions,
    },
    scene::model::{Effect, Element, Paint, Scene, Shape, TextStyle},
};

/// Target aspect ratio of squarified rows.
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Tile `values` into `bounds` with squarified rows.
///
/// `padding` separates leaves from each other and from the bounds. Input order is kept, and
/// with `round` every edge lands on a whole pixel.
pub fn squarify(values: &[f64], bounds: Rect, padding: f64, round: bool) -> Vec<Rect> {
    let values: Vec<f64> = values.iter().map(|v| v.max(0.0)).collect();
    if values.is_empty() {
        return Vec::new();
    }

    // The outer padding minus half the inner padding goes around the parent; each leaf is then
    // inset by the other half.
    let half = padding / 2.0;
    let inner = inset(bounds, padding - half);
    let mut cells = vec![Rect::ZERO; values.len()];
    squarify_rows(&values, inner, &mut cells);

    cells
        .into_iter()
        .map(|cell| {
            let cell = inset(cell, half);
            if round {
                Rect::new(cell.x0.round(), cell.y0.round(), cell.x1.round(), cell.y1.round())
            } else {
                cell
            }
        })
        .collect()
}

fn inset(r: Rect, by: f64) -> Rect {
    let (mut x0, mut y0, mut x1, mut y1) = (r.x0 + by, r.y0 + by, r.x1 - by, r.y1 - by);
    if x1 < x0 {
        x0 = (x0 + x1) / 2.0;
        x1 = x0;
    }
    if y1 < y0 {
        y0 = (y0 + y1) / 2.0;
        y1 = y0;
    }
    Rect::new(x0, y0, x1, y1)
}

fn squarify_rows(values: &[f64], bounds: Rect, out: &mut [Rect]) {
    let n = values.len();
    let (mut x0, mut y0, x1, y1) = (bounds.x0, bounds.y0, bounds.x1, bounds.y1);
    let mut remaining: f64 = values.iter().sum();
    let mut i0 = 0;
    let mut i1 = 0;

    while i0 < n {
        let dx = x1 - x0;
        let dy = y1 - y0;

        // Next non-empty value starts the row.
        let mut sum = 0.0;
        while i1 < n {
            sum = values[i1];
            i1 += 1;
            if sum != 0.0 {
                break;
            }
        }
        let mut min_value = sum;
        let mut max_value = sum;
        let alpha = (dy / dx).max(dx / dy) / (remaining * GOLDEN_RATIO);
        let mut beta = sum * sum * alpha;
        let mut min_ratio = (max_value / beta).max(beta / min_value);

        while i1 < n {
            let v = values[i1];
            sum += v;
            min_value = min_value.min(v);
            max_value = max_value.max(v);
            beta = sum * sum * alpha;
            let ratio = (max_value / beta).max(beta / min_value);
            if ratio > min_ratio {
                sum -= v;
                break;
            }
            min_ratio = ratio;
            i1 += 1;
        }

        let row = &values[i0..i1];
        if dx < dy {
            let y_end = if dy != 0.0 && remaining > 0.0 {
                y0 + dy * sum / remaining
            } else {
                y1
            };
            dice(row, Rect::new(x0, y0, x1, y_end), &mut out[i0..i1]);
            if dy != 0.0 {
                y0 = y_end;
            }
        } else {
            let x_end = if dx != 0.0 && remaining > 0.0 {
                x0 + dx * sum / remaining
            } else {
                x1
            };
            slice(row, Rect::new(x0, y0, x_end, y1), &mut out[i0..i1]);
            if dx != 0.0 {
                x0 = x_end;
            }
        }
        remaining -= sum;
        i0 = i1;
    }
}

/// Split `r` left to right.
fn dice(values: &[f64], r: Rect, out: &mut [Rect]) {
    let total: f64 = values.iter().sum();
    let k = if total > 0.0 { r.width() / total } else { 0.0 };
    let mut x = r.x0;
    for (v, cell) in values.iter().zip(out.iter_mut()) {
        let next = x + v * k;
        *cell = Rect::new(x, r.y0, next, r.y1);
        x = next;
    }
}

/// Split `r` top to bottom.
fn slice(values: &[f64], r: Rect, out: &mut [Rect]) {
    let total: f64 = values.iter().sum();
    let k = if total > 0.0 { r.height() / total } else { 0.0 };
    let mut y = r.y0;
    for (v, cell) in values.iter().zip(out.iter_mut()) {
        let next = y + v * k;
        *cell = Rect::new(r.x0, y, r.x1, next);
        y = next;
    }
}

/// Shorten `text` to fit `max_width` at `font_size`, ending in an ellipsis when cut.
pub fn truncate_to_width(text: &str, max_width: f64, font_size: f64) -> String {
    let char_width = font_size * 0.6;
    let fits = if char_width > 0.0 {
        (max_width / char_width).floor().max(0.0) as usize
    } else {
        usize::MAX
    };
    let count = text.chars().count();
    if count <= fits {
        return text.to_owned();
    }
    if fits == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(fits - 1).collect();
    out.push('…');
    out
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TreemapDatum {
    pub name: String,
    pub value: f64,
    pub color: Color,
    pub description: String,
}

impl From<&OutcomeRecord> for TreemapDatum {
    fn from(r: &OutcomeRecord) -> Self {
        Self {
            name: r.name.to_owned(),
            value: r.value,
            color: r.color,
            description: r.description.to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TreemapOptions {
    pub height: f64,
    pub padding: f64,
    pub corner_radius: f64,
    pub fade_ms: u64,
    pub stagger_ms: u64,
    pub cell_opacity: f64,
}

impl Default for TreemapOptions {
    fn default() -> Self {
        Self {
            height: 400.0,
            padding: 6.0,
            corner_radius: 16.0,
            fade_ms: 800,
            stagger_ms: 150,
            cell_opacity: 0.9,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TreemapChart {
    data: Vec<TreemapDatum>,
    options: TreemapOptions,
    theme: Theme,
}

impl TreemapChart {
    pub fn new(data: Vec<TreemapDatum>, options: TreemapOptions, theme: Theme) -> Self {
        Self {
            data,
            options,
            theme,
        }
    }

    pub fn from_records(records: &[OutcomeRecord], options: TreemapOptions, theme: Theme) -> Self {
        Self::new(records.iter().map(TreemapDatum::from).collect(), options, theme)
    }

    pub fn cells(&self, surface: Surface) -> Vec<Rect> {
        let values: Vec<f64> = self.data.iter().map(|d| d.value).collect();
        let bounds = Rect::new(0.0, 0.0, surface.width, self.options.height);
        squarify(&values, bounds, self.options.padding, true)
    }

    fn text(key: String, at: Point, content: String, style: TextStyle, color: Color) -> Element {
        Element::new(key, Shape::Text { at, content, style }).paint(Paint::fill(color))
    }
}

impl Chart for TreemapChart {
    fn kind(&self) -> ChartKind {
        ChartKind::Treemap
    }

    fn preferred_height(&self, _width: f64) -> f64 {
        self.options.height
    }

    #[tracing::instrument(skip(self), fields(leaves = self.data.len()))]
    fn build(&self, surface: Surface) -> Scene {
        if self.data.is_empty() || !surface.is_drawable() {
            tracing::debug!(?surface, "nothing to draw");
            return Scene::new(surface);
        }
        let mut scene = Scene::new(Surface::new(surface.width, self.options.height));
        let compact = surface.width < MOBILE_BREAKPOINT;

        let fade = Stagger::new(0, self.options.stagger_ms);
        let name_at = Stagger::new(self.options.fade_ms, self.options.stagger_ms);
        let value_at = Stagger::new(self.options.fade_ms + 100, self.options.stagger_ms);
        let desc_at = Stagger::new(self.options.fade_ms + 200, self.options.stagger_ms);

        for (i, (datum, cell)) in self.data.iter().zip(self.cells(surface)).enumerate() {
            let name = if compact {
                truncate_to_width(&datum.name, cell.width() - 32.0, 14.0)
            } else {
                datum.name.clone()
            };

            let mut children = vec![
                Element::new(
                    format!("tile-{i}"),
                    Shape::Rect {
                        rect: Rect::new(0.0, 0.0, cell.width(), cell.height()),
                        corner_radius: self.options.corner_radius,
                    },
                )
                .paint(Paint::fill(datum.color).with_opacity(self.options.cell_opacity))
                .enter(
                    Effect::Fade { from: 0.0 },
                    fade.timing(i, Millis(self.options.fade_ms), Ease::default()),
                ),
                Self::text(
                    format!("name-{i}"),
                    Point::new(16.0, 30.0),
                    name,
                    TextStyle::sized(14.0).weight(600),
                    self.theme.text,
                )
                .enter(Effect::Fade { from: 0.0 }, label_fade(name_at.delay_for(i))),
                Self::text(
                    format!("amount-{i}"),
                    Point::new(16.0, 58.0),
                    format_millions(datum.value),
                    TextStyle::sized(28.0).weight(700),
                    self.theme.text,
                )
                .enter(Effect::Fade { from: 0.0 }, label_fade(value_at.delay_for(i))),
            ];
            if !compact {
                children.push(
                    Self::text(
                        format!("desc-{i}"),
                        Point::new(16.0, 80.0),
                        datum.description.clone(),
                        TextStyle::sized(11.0),
                        self.theme.text,
                    )
                    .paint(Paint::fill(self.theme.text).with_opacity(0.7))
                    .enter(Effect::Fade { from: 0.0 }, label_fade(desc_at.delay_for(i))),
                );
            }

            scene.push(Element::group(
                format!("cell-{i}"),
                Affine::translate((cell.x0, cell.y0)),
                children,
            ));
        }
        scene
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/treemap.rs"]
mod tests;
