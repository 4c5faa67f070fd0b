use kurbo::Shape as _;

use crate::{
    animation::tween::{Lerp, Timing},
    foundation::core::{Affine, BezPath, Color, Millis, Point, Rect, Surface},
};

/// Tolerance used when flattening arcs and measuring path lengths.
pub(crate) const GEOM_ACCURACY: f64 = 0.1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextStyle {
    pub size: f64,
    pub weight: u16,
    pub anchor: TextAnchor,
    /// Baseline shift in `em` (SVG `dy`).
    pub dy_em: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 12.0,
            weight: 400,
            anchor: TextAnchor::Start,
            dy_em: 0.0,
        }
    }
}

impl TextStyle {
    pub fn sized(size: f64) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn weight(mut self, weight: u16) -> Self {
        self.weight = weight;
        self
    }

    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn dy(mut self, dy_em: f64) -> Self {
        self.dy_em = dy_em;
        self
    }
}

/// Annular sector; angles in radians, clockwise from 12 o'clock.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ArcSpec {
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl ArcSpec {
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    fn point_at(&self, radius: f64, angle: f64) -> Point {
        Point::new(
            self.center.x + radius * angle.sin(),
            self.center.y - radius * angle.cos(),
        )
    }

    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let sweep = self.sweep();
        if sweep.abs() <= f64::EPSILON {
            return path;
        }

        // kurbo measures angles from +x in y-down space; shift by a quarter turn.
        let kurbo_start = self.start_angle - std::f64::consts::FRAC_PI_2;
        let outer = kurbo::Arc::new(
            self.center,
            (self.outer_radius, self.outer_radius),
            kurbo_start,
            sweep,
            0.0,
        );
        path.move_to(self.point_at(self.outer_radius, self.start_angle));
        path.extend(outer.append_iter(GEOM_ACCURACY));

        if self.inner_radius > 0.0 {
            path.line_to(self.point_at(self.inner_radius, self.end_angle));
            let inner = kurbo::Arc::new(
                self.center,
                (self.inner_radius, self.inner_radius),
                kurbo_start + sweep,
                -sweep,
                0.0,
            );
            path.extend(inner.append_iter(GEOM_ACCURACY));
        } else {
            path.line_to(self.center);
        }
        path.close_path();
        path
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Rect { rect: Rect, corner_radius: f64 },
    Circle { center: Point, radius: f64 },
    Arc(ArcSpec),
    Path(BezPath),
    Line { from: Point, to: Point },
    Text { at: Point, content: String, style: TextStyle },
    Image { href: String, rect: Rect },
    Group { transform: Affine, children: Vec<Element> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Paint {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub dash: Option<Vec<f64>>,
    pub dash_offset: f64,
    pub opacity: f64,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: 1.0,
            dash: None,
            dash_offset: 0.0,
            opacity: 1.0,
        }
    }
}

impl Paint {
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            ..Self::default()
        }
    }

    pub fn stroke(color: Color, width: f64) -> Self {
        Self {
            stroke: Some(color),
            stroke_width: width,
            ..Self::default()
        }
    }

    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke = Some(color);
        self.stroke_width = width;
        self
    }

    pub fn with_dash(mut self, dash: Vec<f64>) -> Self {
        self.dash = Some(dash);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

/// What an entrance animates, from its start state to the element's final state.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum Effect {
    /// Rect width grows from 0 (anchored at its left edge).
    GrowWidth,
    /// Circle radius grows from 0.
    GrowRadius,
    /// Arc angles tween from a zero-angle wedge at 0 rad.
    Sweep,
    /// Opacity tweens from `from` to the paint's opacity.
    Fade { from: f64 },
    /// Stroke is revealed by animating the dash offset from the path length to 0.
    DrawOn,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entrance {
    pub effect: Effect,
    pub timing: Timing,
}

/// A keyed node of the drawing tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub key: String,
    pub shape: Shape,
    pub paint: Paint,
    pub entrances: Vec<Entrance>,
}

impl Element {
    pub fn new(key: impl Into<String>, shape: Shape) -> Self {
        Self {
            key: key.into(),
            shape,
            paint: Paint::default(),
            entrances: Vec::new(),
        }
    }

    pub fn paint(mut self, paint: Paint) -> Self {
        self.paint = paint;
        self
    }

    pub fn enter(mut self, effect: Effect, timing: Timing) -> Self {
        self.entrances.push(Entrance { effect, timing });
        self
    }

    pub fn group(key: impl Into<String>, transform: Affine, children: Vec<Element>) -> Self {
        Self::new(
            key,
            Shape::Group {
                transform,
                children,
            },
        )
    }

    /// Time at which every entrance of this element (and its children) has finished.
    pub fn settle_time(&self) -> Millis {
        let own = self
            .entrances
            .iter()
            .map(|e| e.timing.end())
            .max()
            .unwrap_or(Millis::ZERO);
        match &self.shape {
            Shape::Group { children, .. } => children
                .iter()
                .map(Element::settle_time)
                .max()
                .unwrap_or(Millis::ZERO)
                .max(own),
            _ => own,
        }
    }

    /// Static snapshot at `t`: entrances are resolved into concrete geometry and paint.
    pub fn sample(&self, t: Millis) -> Element {
        let mut shape = match &self.shape {
            Shape::Group {
                transform,
                children,
            } => Shape::Group {
                transform: *transform,
                children: children.iter().map(|c| c.sample(t)).collect(),
            },
            other => other.clone(),
        };
        let mut paint = self.paint.clone();

        for entrance in &self.entrances {
            let p = entrance.timing.progress(t);
            apply_effect(entrance.effect, p, &mut shape, &mut paint);
        }

        Element {
            key: self.key.clone(),
            shape,
            paint,
            entrances: Vec::new(),
        }
    }

    /// Visit this element and every descendant.
    pub fn walk<'a>(&'a self, f: &mut dyn FnMut(&'a Element)) {
        f(self);
        if let Shape::Group { children, .. } = &self.shape {
            for child in children {
                child.walk(f);
            }
        }
    }
}

fn apply_effect(effect: Effect, p: f64, shape: &mut Shape, paint: &mut Paint) {
    match (effect, shape) {
        (Effect::GrowWidth, Shape::Rect { rect, corner_radius }) => {
            rect.x1 = rect.x0 + rect.width() * p;
            *corner_radius = corner_radius.min(rect.width() / 2.0);
        }
        (Effect::GrowRadius, Shape::Circle { radius, .. }) => {
            *radius *= p;
        }
        (Effect::Sweep, Shape::Arc(arc)) => {
            arc.start_angle = f64::lerp(&0.0, &arc.start_angle, p);
            arc.end_angle = f64::lerp(&0.0, &arc.end_angle, p);
        }
        (Effect::Fade { from }, _) => {
            paint.opacity = f64::lerp(&from, &paint.opacity, p);
        }
        (Effect::DrawOn, Shape::Path(path)) => {
            if p < 1.0 {
                let len = path.perimeter(GEOM_ACCURACY);
                paint.dash = Some(vec![len, len]);
                paint.dash_offset = len * (1.0 - p);
            }
        }
        _ => {}
    }
}

/// Retained drawing tree for one surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub surface: Surface,
    pub background: Option<Color>,
    pub elements: Vec<Element>,
}

impl Scene {
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            background: None,
            elements: Vec::new(),
        }
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn extend(&mut self, elements: impl IntoIterator<Item = Element>) {
        self.elements.extend(elements);
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Time after which sampling no longer changes the scene.
    pub fn settle_time(&self) -> Millis {
        self.elements
            .iter()
            .map(Element::settle_time)
            .max()
            .unwrap_or(Millis::ZERO)
    }

    pub fn sample(&self, t: Millis) -> Scene {
        Scene {
            surface: self.surface,
            background: self.background,
            elements: self.elements.iter().map(|e| e.sample(t)).collect(),
        }
    }

    /// Final state with every entrance completed.
    pub fn settled(&self) -> Scene {
        self.sample(self.settle_time())
    }

    /// Number of elements (at any depth) whose key starts with `prefix`.
    pub fn count_keyed(&self, prefix: &str) -> usize {
        let mut n = 0;
        for e in &self.elements {
            e.walk(&mut |el| {
                if el.key.starts_with(prefix) {
                    n += 1;
                }
            });
        }
        n
    }

    pub fn find(&self, key: &str) -> Option<&Element> {
        let mut found = None;
        for e in &self.elements {
            e.walk(&mut |el| {
                if found.is_none() && el.key == key {
                    found = Some(el);
                }
            });
        }
        found
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
