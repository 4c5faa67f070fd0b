use crate::{
    animation::{ease::Ease, tween::Stagger},
    chart::{
        Chart, ChartKind, Theme, label_fade,
        scale::{BandScale, LinearScale},
    },
    data::metrics::{BenefitRecord, RegionalRecord},
    foundation::{
        core::{Affine, Color, Margin, Millis, Point, Rect, Surface},
        format::{format_millions, format_percent},
    },
    scene::model::{Effect, Element, Paint, Scene, Shape, TextAnchor, TextStyle},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BarDatum {
    pub label: String,
    pub value: f64,
    pub color: Color,
    pub description: Option<String>,
}

impl From<&BenefitRecord> for BarDatum {
    fn from(r: &BenefitRecord) -> Self {
        Self {
            label: r.name.to_owned(),
            value: r.value,
            color: r.color,
            description: Some(r.description.to_owned()),
        }
    }
}

impl From<&RegionalRecord> for BarDatum {
    fn from(r: &RegionalRecord) -> Self {
        Self {
            label: r.region.to_owned(),
            value: r.value,
            color: r.color,
            description: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BarOptions {
    pub margin: Margin,
    /// Height of the plot area, margins excluded.
    pub plot_height: f64,
    /// Cap on the whole chart width, margins included.
    pub max_width: Option<f64>,
    pub padding: f64,
    pub grow_ms: u64,
    pub stagger_ms: u64,
    pub value_font_size: f64,
}

impl Default for BarOptions {
    fn default() -> Self {
        Self::benefits()
    }
}

impl BarOptions {
    pub fn benefits() -> Self {
        Self {
            margin: Margin::new(20.0, 100.0, 20.0, 140.0),
            plot_height: 340.0,
            max_width: Some(700.0),
            padding: 0.35,
            grow_ms: 1000,
            stagger_ms: 100,
            value_font_size: 13.0,
        }
    }

    pub fn regions() -> Self {
        Self {
            margin: Margin::new(20.0, 80.0, 20.0, 120.0),
            plot_height: 150.0,
            max_width: None,
            padding: 0.4,
            grow_ms: 1000,
            stagger_ms: 150,
            value_font_size: 12.0,
        }
    }
}

/// Hover card for one bar.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Tooltip {
    pub title: String,
    pub value: String,
    pub share: String,
    pub description: Option<String>,
}

impl Tooltip {
    /// Overlay card anchored at `at` (page coordinates).
    pub fn to_element(&self, key: &str, at: Point, theme: &Theme) -> Element {
        let width = 220.0;
        let mut lines = vec![
            (self.title.clone(), TextStyle::sized(13.0).weight(600), theme.text),
            (
                format!("{} ({})", self.value, self.share),
                TextStyle::sized(12.0).weight(700),
                theme.accent,
            ),
        ];
        if let Some(desc) = &self.description {
            lines.push((desc.clone(), TextStyle::sized(11.0), theme.muted));
        }
        let height = 16.0 + lines.len() as f64 * 18.0;

        let mut children = vec![
            Element::new(
                format!("{key}-card"),
                Shape::Rect {
                    rect: Rect::new(0.0, 0.0, width, height),
                    corner_radius: 8.0,
                },
            )
            .paint(
                Paint::fill(Color::hex(0x111827).with_alpha(235))
                    .with_stroke(Color::WHITE.with_alpha(26), 1.0),
            ),
        ];
        for (i, (content, style, color)) in lines.into_iter().enumerate() {
            children.push(
                Element::new(
                    format!("{key}-line-{i}"),
                    Shape::Text {
                        at: Point::new(12.0, 22.0 + i as f64 * 18.0),
                        content,
                        style,
                    },
                )
                .paint(Paint::fill(color)),
            );
        }
        Element::group(key, Affine::translate((at.x + 12.0, at.y - height / 2.0)), children)
    }
}

/// Resolved bar geometry in chart coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct BarLayout {
    pub width: f64,
    pub height: f64,
    pub bars: Vec<Rect>,
}

#[derive(Clone, Debug)]
pub struct BarChart {
    kind: ChartKind,
    data: Vec<BarDatum>,
    options: BarOptions,
    theme: Theme,
}

impl BarChart {
    pub fn new(kind: ChartKind, data: Vec<BarDatum>, options: BarOptions, theme: Theme) -> Self {
        Self {
            kind,
            data,
            options,
            theme,
        }
    }

    pub fn benefits(benefits: &[BenefitRecord], options: BarOptions, theme: Theme) -> Self {
        Self::new(
            ChartKind::Bar,
            benefits.iter().map(BarDatum::from).collect(),
            options,
            theme,
        )
    }

    pub fn regions(regions: &[RegionalRecord], options: BarOptions, theme: Theme) -> Self {
        Self::new(
            ChartKind::Regions,
            regions.iter().map(BarDatum::from).collect(),
            options,
            theme,
        )
    }

    pub fn data(&self) -> &[BarDatum] {
        &self.data
    }

    pub fn total(&self) -> f64 {
        self.data.iter().map(|d| d.value).sum()
    }

    pub fn tooltip(&self, index: usize) -> Option<Tooltip> {
        let datum = self.data.get(index)?;
        let total = self.total();
        let share = if total > 0.0 { datum.value / total } else { 0.0 };
        Some(Tooltip {
            title: datum.label.clone(),
            value: format_millions(datum.value),
            share: format_percent(share),
            description: datum.description.clone(),
        })
    }

    fn outer_width(&self, container: f64) -> f64 {
        match self.options.max_width {
            Some(cap) => container.min(cap),
            None => container,
        }
    }

    /// Bar rectangles in chart coordinates (margins applied), or `None` when nothing fits.
    pub fn layout(&self, surface: Surface) -> Option<BarLayout> {
        let m = self.options.margin;
        let width = self.outer_width(surface.width) - m.horizontal();
        let height = self.options.plot_height;
        if self.data.is_empty() || width <= 0.0 || height <= 0.0 {
            return None;
        }

        let max = self.data.iter().map(|d| d.value).fold(0.0, f64::max);
        let x = LinearScale::new((0.0, max), (0.0, width));
        let y = BandScale::new(self.data.len(), (0.0, height), self.options.padding);
        let bars = self
            .data
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let y0 = m.top + y.position(i);
                let len = x.map(d.value.max(0.0)).max(0.0);
                Rect::new(m.left, y0, m.left + len, y0 + y.bandwidth())
            })
            .collect();
        Some(BarLayout {
            width: width + m.horizontal(),
            height: height + m.vertical(),
            bars,
        })
    }
}

impl Chart for BarChart {
    fn kind(&self) -> ChartKind {
        self.kind
    }

    fn preferred_height(&self, _width: f64) -> f64 {
        self.options.plot_height + self.options.margin.vertical()
    }

    #[tracing::instrument(skip(self), fields(kind = %self.kind, bars = self.data.len()))]
    fn build(&self, surface: Surface) -> Scene {
        let Some(layout) = self.layout(surface) else {
            tracing::debug!("no bars to draw");
            return Scene::new(surface);
        };
        let mut scene = Scene::new(Surface::new(layout.width, layout.height));

        let grow = Stagger::new(0, self.options.stagger_ms);
        let reveal = Stagger::new(self.options.grow_ms, self.options.stagger_ms);
        for (i, (datum, rect)) in self.data.iter().zip(&layout.bars).enumerate() {
            let mid = rect.center().y;
            scene.push(
                Element::new(
                    format!("bar-{i}"),
                    Shape::Rect {
                        rect: *rect,
                        corner_radius: rect.height() / 2.0,
                    },
                )
                .paint(Paint::fill(datum.color))
                .enter(
                    Effect::GrowWidth,
                    grow.timing(i, Millis(self.options.grow_ms), Ease::default()),
                ),
            );
            scene.push(
                Element::new(
                    format!("label-{i}"),
                    Shape::Text {
                        at: Point::new(rect.x0 - 10.0, mid),
                        content: datum.label.clone(),
                        style: TextStyle::sized(12.0).anchor(TextAnchor::End).dy(0.35),
                    },
                )
                .paint(Paint::fill(self.theme.muted)),
            );
            scene.push(
                Element::new(
                    format!("value-{i}"),
                    Shape::Text {
                        at: Point::new(rect.x1 + 8.0, mid),
                        content: format_millions(datum.value),
                        style: TextStyle::sized(self.options.value_font_size)
                            .weight(600)
                            .dy(0.35),
                    },
                )
                .paint(Paint::fill(self.theme.text))
                .enter(Effect::Fade { from: 0.0 }, label_fade(reveal.delay_for(i))),
            );
        }
        scene
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/bar.rs"]
mod tests;
