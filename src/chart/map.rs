use std::{f64::consts::PI, sync::Arc};

use crate::{
    animation::{ease::Ease, tween::Stagger},
    chart::{Chart, ChartKind, Theme, scale::SqrtScale},
    data::metrics::{AuthorityRecord, GeoBounds, RegionalRecord, UK_BOUNDS},
    foundation::{
        core::{Affine, Color, Millis, Point, Rect, Surface, Vec2},
        error::{VizError, VizResult},
        format::{format_millions, format_per_capita, format_percent},
    },
    scene::model::{Effect, Element, Paint, Scene, Shape, TextAnchor, TextStyle},
};

pub const TILE_SIZE: f64 = 256.0;

/// Source of raster map tiles (an external capability the page may or may not have).
pub trait TileProvider: std::fmt::Debug + Send + Sync {
    fn tile_url(&self, zoom: u8, x: u32, y: u32) -> String;

    fn max_zoom(&self) -> u8 {
        18
    }

    fn attribution(&self) -> Option<&str> {
        None
    }
}

/// Tiles addressed by a `{z}/{x}/{y}` URL template.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UrlTemplateTiles {
    template: String,
    attribution: Option<String>,
}

impl UrlTemplateTiles {
    pub fn new(template: impl Into<String>) -> VizResult<Self> {
        let template = template.into();
        for placeholder in ["{z}", "{x}", "{y}"] {
            if !template.contains(placeholder) {
                return Err(VizError::validation(format!(
                    "tile template \"{template}\" is missing {placeholder}"
                )));
            }
        }
        Ok(Self {
            template,
            attribution: None,
        })
    }

    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = Some(attribution.into());
        self
    }
}

impl TileProvider for UrlTemplateTiles {
    fn tile_url(&self, zoom: u8, x: u32, y: u32) -> String {
        self.template
            .replace("{z}", &zoom.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }

    fn attribution(&self) -> Option<&str> {
        self.attribution.as_deref()
    }
}

/// Web Mercator world pixel coordinates at `zoom`.
pub fn project(lat: f64, lng: f64, zoom: u8) -> Point {
    let world = TILE_SIZE * f64::from(1u32 << zoom);
    let lat = lat.clamp(-85.051_128_78, 85.051_128_78).to_radians();
    let x = (lng + 180.0) / 360.0 * world;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * world;
    Point::new(x, y)
}

/// Projection fitted so that `bounds` is centered in a viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub zoom: u8,
    /// Added to world pixel coordinates to get viewport coordinates.
    pub offset: Vec2,
    pub size: Surface,
}

impl Viewport {
    /// Highest zoom at which `bounds` (plus `padding` on each side) fits `size`.
    pub fn fit(bounds: GeoBounds, size: Surface, padding: f64, max_zoom: u8) -> Self {
        let avail_w = (size.width - 2.0 * padding).max(1.0);
        let avail_h = (size.height - 2.0 * padding).max(1.0);
        let mut zoom = 0;
        for z in 0..=max_zoom.min(22) {
            let nw = project(bounds.north, bounds.west, z);
            let se = project(bounds.south, bounds.east, z);
            if se.x - nw.x <= avail_w && se.y - nw.y <= avail_h {
                zoom = z;
            } else {
                break;
            }
        }
        let nw = project(bounds.north, bounds.west, zoom);
        let se = project(bounds.south, bounds.east, zoom);
        let center = nw.midpoint(se);
        Self {
            zoom,
            offset: Vec2::new(size.width / 2.0 - center.x, size.height / 2.0 - center.y),
            size,
        }
    }

    pub fn locate(&self, lat: f64, lng: f64) -> Point {
        project(lat, lng, self.zoom) + self.offset
    }

    /// Tiles covering the viewport as `(x, y, rect)`; x wraps around the antimeridian.
    pub fn tiles(&self) -> Vec<(u32, u32, Rect)> {
        let count = 1i64 << self.zoom;
        let tx0 = (-self.offset.x / TILE_SIZE).floor() as i64;
        let tx1 = ((self.size.width - self.offset.x) / TILE_SIZE).floor() as i64;
        let ty0 = ((-self.offset.y / TILE_SIZE).floor() as i64).max(0);
        let ty1 = (((self.size.height - self.offset.y) / TILE_SIZE).floor() as i64).min(count - 1);

        let mut out = Vec::new();
        for ty in ty0..=ty1 {
            for tx in tx0..=tx1 {
                let x0 = tx as f64 * TILE_SIZE + self.offset.x;
                let y0 = ty as f64 * TILE_SIZE + self.offset.y;
                let wrapped = tx.rem_euclid(count) as u32;
                out.push((
                    wrapped,
                    ty as u32,
                    Rect::new(x0, y0, x0 + TILE_SIZE, y0 + TILE_SIZE),
                ));
            }
        }
        out
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct MapDatum {
    pub name: String,
    pub value: f64,
    pub lat: f64,
    pub lng: f64,
    pub population: u64,
}

impl From<&AuthorityRecord> for MapDatum {
    fn from(r: &AuthorityRecord) -> Self {
        Self {
            name: r.name.to_owned(),
            value: r.value,
            lat: r.lat,
            lng: r.lng,
            population: r.population,
        }
    }
}

impl From<&RegionalRecord> for MapDatum {
    fn from(r: &RegionalRecord) -> Self {
        Self {
            name: r.region.to_owned(),
            value: r.value,
            lat: r.lat,
            lng: r.lng,
            population: r.population,
        }
    }
}

/// Marker popup content.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Popup {
    pub title: String,
    pub value: String,
    pub share: String,
    pub per_capita: String,
}

impl Popup {
    pub fn to_element(&self, key: &str, at: Point, theme: &Theme) -> Element {
        let lines = [
            (self.title.clone(), TextStyle::sized(13.0).weight(700), theme.text),
            (self.value.clone(), TextStyle::sized(12.0).weight(600), theme.accent),
            (format!("{} of total", self.share), TextStyle::sized(11.0), theme.muted),
            (format!("{} per person", self.per_capita), TextStyle::sized(11.0), theme.muted),
        ];
        let height = 16.0 + lines.len() as f64 * 18.0;
        let mut children = vec![
            Element::new(
                format!("{key}-card"),
                Shape::Rect {
                    rect: Rect::new(-90.0, -height, 90.0, 0.0),
                    corner_radius: 8.0,
                },
            )
            .paint(Paint::fill(Color::WHITE).with_stroke(Color::hex(0xd1d5db), 1.0)),
        ];
        for (i, (content, style, color)) in lines.into_iter().enumerate() {
            let color = if color == theme.text { Color::hex(0x111827) } else { color };
            children.push(
                Element::new(
                    format!("{key}-line-{i}"),
                    Shape::Text {
                        at: Point::new(-78.0, -height + 22.0 + i as f64 * 18.0),
                        content,
                        style,
                    },
                )
                .paint(Paint::fill(color)),
            );
        }
        Element::group(key, Affine::translate((at.x, at.y - 10.0)), children)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MapOptions {
    pub height: f64,
    pub padding: f64,
    pub max_radius: f64,
    pub marker_color: Color,
    pub grow_ms: u64,
    pub stagger_ms: u64,
    /// `{z}/{x}/{y}` URL template; without one the map is not drawn.
    pub tiles: Option<String>,
    pub attribution: Option<String>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            height: 500.0,
            padding: 20.0,
            max_radius: 24.0,
            marker_color: Color::hex(0x10b981),
            grow_ms: 800,
            stagger_ms: 100,
            tiles: None,
            attribution: None,
        }
    }
}

impl MapOptions {
    pub fn tile_provider(&self) -> VizResult<Option<Arc<dyn TileProvider>>> {
        let Some(template) = &self.tiles else {
            return Ok(None);
        };
        let mut tiles = UrlTemplateTiles::new(template.clone())?;
        if let Some(attribution) = &self.attribution {
            tiles = tiles.with_attribution(attribution.clone());
        }
        Ok(Some(Arc::new(tiles)))
    }
}

#[derive(Clone, Debug)]
pub struct MapChart {
    data: Vec<MapDatum>,
    tiles: Option<Arc<dyn TileProvider>>,
    options: MapOptions,
    theme: Theme,
}

impl MapChart {
    pub fn new(
        data: Vec<MapDatum>,
        tiles: Option<Arc<dyn TileProvider>>,
        options: MapOptions,
        theme: Theme,
    ) -> Self {
        Self {
            data,
            tiles,
            options,
            theme,
        }
    }

    pub fn authorities(
        records: &[AuthorityRecord],
        tiles: Option<Arc<dyn TileProvider>>,
        options: MapOptions,
        theme: Theme,
    ) -> Self {
        Self::new(records.iter().map(MapDatum::from).collect(), tiles, options, theme)
    }

    pub fn has_tiles(&self) -> bool {
        self.tiles.is_some()
    }

    pub fn total(&self) -> f64 {
        self.data.iter().map(|d| d.value).sum()
    }

    pub fn viewport(&self, width: f64) -> Viewport {
        let max_zoom = self.tiles.as_ref().map_or(18, |t| t.max_zoom());
        Viewport::fit(
            UK_BOUNDS,
            Surface::new(width, self.options.height),
            self.options.padding,
            max_zoom,
        )
    }

    /// Marker center in chart coordinates.
    pub fn marker_position(&self, index: usize, width: f64) -> Option<Point> {
        let d = self.data.get(index)?;
        Some(self.viewport(width).locate(d.lat, d.lng))
    }

    pub fn popup(&self, index: usize) -> Option<Popup> {
        let d = self.data.get(index)?;
        let total = self.total();
        let share = if total > 0.0 { d.value / total } else { 0.0 };
        let per_capita = if d.population > 0 {
            d.value / (d.population as f64 / 1_000_000.0)
        } else {
            0.0
        };
        Some(Popup {
            title: d.name.clone(),
            value: format_millions(d.value),
            share: format_percent(share),
            per_capita: format_per_capita(per_capita),
        })
    }
}

impl Chart for MapChart {
    fn kind(&self) -> ChartKind {
        ChartKind::Map
    }

    fn preferred_height(&self, _width: f64) -> f64 {
        self.options.height
    }

    #[tracing::instrument(skip(self), fields(markers = self.data.len()))]
    fn build(&self, surface: Surface) -> Scene {
        let Some(tiles) = &self.tiles else {
            tracing::debug!("no tile provider, map not drawn");
            return Scene::new(surface);
        };
        if !surface.is_drawable() {
            tracing::debug!(?surface, "surface not drawable");
            return Scene::new(surface);
        }
        let size = Surface::new(surface.width, self.options.height);
        let mut scene = Scene::new(size);
        let view = self.viewport(surface.width);

        let layer = view
            .tiles()
            .into_iter()
            .map(|(x, y, rect)| {
                Element::new(
                    format!("tile-{}-{x}-{y}-{}", view.zoom, rect.x0 as i64),
                    Shape::Image {
                        href: tiles.tile_url(view.zoom, x, y),
                        rect,
                    },
                )
            })
            .collect();
        scene.push(Element::group("tiles", Affine::IDENTITY, layer));

        let max = self.data.iter().map(|d| d.value).fold(0.0, f64::max);
        let radius = SqrtScale::new(max, self.options.max_radius);
        let grow = Stagger::new(0, self.options.stagger_ms);
        for (i, d) in self.data.iter().enumerate() {
            scene.push(
                Element::new(
                    format!("marker-{i}"),
                    Shape::Circle {
                        center: view.locate(d.lat, d.lng),
                        radius: radius.map(d.value),
                    },
                )
                .paint(
                    Paint::fill(self.options.marker_color.with_alpha(153))
                        .with_stroke(self.theme.text, 1.0),
                )
                .enter(
                    Effect::GrowRadius,
                    grow.timing(i, Millis(self.options.grow_ms), Ease::default()),
                ),
            );
        }

        if let Some(attribution) = tiles.attribution() {
            scene.push(
                Element::new(
                    "attribution",
                    Shape::Text {
                        at: Point::new(size.width - 6.0, size.height - 6.0),
                        content: attribution.to_owned(),
                        style: TextStyle::sized(9.0).anchor(TextAnchor::End),
                    },
                )
                .paint(Paint::fill(self.theme.muted)),
            );
        }
        scene
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/map.rs"]
mod tests;
