use std::f64::consts::PI;

use crate::{
    animation::{ease::Ease, tween::Stagger},
    chart::{Chart, ChartKind, Theme, label_fade, scale::SqrtScale},
    data::metrics::PathwayRecord,
    foundation::{
        core::{Affine, Color, Millis, Point, Surface},
        format::format_millions,
    },
    scene::model::{Effect, Element, Paint, Scene, Shape, TextAnchor, TextStyle},
};

/// A body in the force simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Collision radius.
    pub radius: f64,
}

/// Deterministic d3-force style simulation with centering and collision forces.
#[derive(Clone, Debug)]
pub struct ForceSimulation {
    pub nodes: Vec<Node>,
    pub center: Point,
    pub center_strength: f64,
    alpha: f64,
    alpha_decay: f64,
    velocity_decay: f64,
}

impl ForceSimulation {
    const INITIAL_RADIUS: f64 = 10.0;
    const ALPHA_MIN: f64 = 0.001;
    const DECAY_TICKS: f64 = 300.0;

    /// Nodes are seeded on a phyllotaxis spiral around the origin.
    pub fn new(radii: &[f64], center: Point, center_strength: f64) -> Self {
        let initial_angle = PI * (3.0 - 5f64.sqrt());
        let nodes = radii
            .iter()
            .enumerate()
            .map(|(i, &radius)| {
                let r = Self::INITIAL_RADIUS * (0.5 + i as f64).sqrt();
                let a = i as f64 * initial_angle;
                Node {
                    x: r * a.cos(),
                    y: r * a.sin(),
                    vx: 0.0,
                    vy: 0.0,
                    radius,
                }
            })
            .collect();
        Self {
            nodes,
            center,
            center_strength,
            alpha: 1.0,
            alpha_decay: 1.0 - Self::ALPHA_MIN.powf(1.0 / Self::DECAY_TICKS),
            velocity_decay: 0.6,
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn tick(&mut self) {
        self.alpha += -self.alpha * self.alpha_decay;
        let alpha = self.alpha;

        for node in &mut self.nodes {
            node.vx += (self.center.x - node.x) * self.center_strength * alpha;
        }
        for node in &mut self.nodes {
            node.vy += (self.center.y - node.y) * self.center_strength * alpha;
        }
        self.collide();

        let decay = self.velocity_decay;
        for node in &mut self.nodes {
            node.vx *= decay;
            node.x += node.vx;
            node.vy *= decay;
            node.y += node.vy;
        }
    }

    pub fn run(&mut self, ticks: usize) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    /// Pairwise collision against projected positions (`x + vx`), split by squared radius.
    fn collide(&mut self) {
        const JIGGLE: f64 = 1e-6;
        let n = self.nodes.len();
        for i in 0..n {
            let ri = self.nodes[i].radius;
            let ri2 = ri * ri;
            let xi = self.nodes[i].x + self.nodes[i].vx;
            let yi = self.nodes[i].y + self.nodes[i].vy;
            for j in (i + 1)..n {
                let other = self.nodes[j];
                let rj = other.radius;
                let r = ri + rj;
                let mut x = xi - other.x - other.vx;
                let mut y = yi - other.y - other.vy;
                let mut l = x * x + y * y;
                if l >= r * r {
                    continue;
                }
                if x == 0.0 {
                    x = JIGGLE;
                    l += x * x;
                }
                if y == 0.0 {
                    y = JIGGLE;
                    l += y * y;
                }
                let dist = l.sqrt();
                let push = (r - dist) / dist;
                x *= push;
                y *= push;
                let rj2 = rj * rj;
                let share = rj2 / (ri2 + rj2);
                self.nodes[i].vx += x * share;
                self.nodes[i].vy += y * share;
                self.nodes[j].vx -= x * (1.0 - share);
                self.nodes[j].vy -= y * (1.0 - share);
            }
        }
    }

    /// Push apart any circles of `radii` that still overlap, for at most `max_passes` sweeps.
    ///
    /// Returns whether the layout ended overlap-free.
    pub fn relax(&mut self, radii: &[f64], max_passes: usize) -> bool {
        const SLACK: f64 = 0.5;
        for _ in 0..max_passes {
            let mut moved = false;
            for i in 0..self.nodes.len() {
                for j in (i + 1)..self.nodes.len() {
                    let (a, b) = (self.nodes[i], self.nodes[j]);
                    let min = radii[i] + radii[j];
                    let (dx, dy) = (b.x - a.x, b.y - a.y);
                    let dist = (dx * dx + dy * dy).sqrt();
                    if dist >= min {
                        continue;
                    }
                    let (ux, uy) = if dist > 0.0 {
                        (dx / dist, dy / dist)
                    } else {
                        (1.0, 0.0)
                    };
                    let shift = (min - dist + SLACK) / 2.0;
                    self.nodes[i].x -= ux * shift;
                    self.nodes[i].y -= uy * shift;
                    self.nodes[j].x += ux * shift;
                    self.nodes[j].y += uy * shift;
                    moved = true;
                }
            }
            if !moved {
                return true;
            }
        }
        !has_overlap(&self.positions(), radii)
    }

    pub fn positions(&self) -> Vec<Point> {
        self.nodes.iter().map(|n| Point::new(n.x, n.y)).collect()
    }
}

/// Whether any two circles intersect.
pub fn has_overlap(centers: &[Point], radii: &[f64]) -> bool {
    for i in 0..centers.len() {
        for j in (i + 1)..centers.len() {
            if centers[i].distance(centers[j]) < radii[i] + radii[j] {
                return true;
            }
        }
    }
    false
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BubbleDatum {
    pub name: String,
    pub value: f64,
    pub color: Color,
}

impl From<&PathwayRecord> for BubbleDatum {
    fn from(r: &PathwayRecord) -> Self {
        Self {
            name: r.pathway.to_owned(),
            value: r.value,
            color: r.color,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BubbleOptions {
    pub height: f64,
    /// Radius drawn for a value of `scale.domain_max`.
    pub scale: SqrtScale,
    pub collide_padding: f64,
    pub center_strength: f64,
    pub ticks: usize,
    pub relax_passes: usize,
    pub grow_ms: u64,
    pub stagger_ms: u64,
    pub opacity: f64,
}

impl Default for BubbleOptions {
    fn default() -> Self {
        Self {
            height: 380.0,
            scale: SqrtScale::new(1000.0, 8.0),
            collide_padding: 15.0,
            center_strength: 0.2,
            ticks: 200,
            relax_passes: 100,
            grow_ms: 1000,
            stagger_ms: 150,
            opacity: 0.85,
        }
    }
}

/// Settled bubble positions and radii.
#[derive(Clone, Debug, PartialEq)]
pub struct BubbleLayout {
    pub centers: Vec<Point>,
    pub radii: Vec<f64>,
}

#[derive(Clone, Debug)]
pub struct BubbleChart {
    data: Vec<BubbleDatum>,
    options: BubbleOptions,
    theme: Theme,
}

impl BubbleChart {
    pub fn new(data: Vec<BubbleDatum>, options: BubbleOptions, theme: Theme) -> Self {
        Self {
            data,
            options,
            theme,
        }
    }

    pub fn pathways(records: &[PathwayRecord], options: BubbleOptions, theme: Theme) -> Self {
        Self::new(records.iter().map(BubbleDatum::from).collect(), options, theme)
    }

    /// Run the simulation to completion for a `width` wide chart.
    #[tracing::instrument(skip(self))]
    pub fn layout(&self, width: f64) -> BubbleLayout {
        let radii: Vec<f64> = self.data.iter().map(|d| self.options.scale.map(d.value)).collect();
        let collide: Vec<f64> = radii
            .iter()
            .map(|r| r + self.options.collide_padding)
            .collect();
        let mut sim = ForceSimulation::new(
            &collide,
            Point::new(width / 2.0, self.options.height / 2.0),
            self.options.center_strength,
        );
        sim.run(self.options.ticks);
        if !sim.relax(&radii, self.options.relax_passes) {
            tracing::warn!("bubbles still overlap after relaxation");
        }
        BubbleLayout {
            centers: sim.positions(),
            radii,
        }
    }
}

fn first_word(name: &str) -> &str {
    name.split(' ').next().unwrap_or(name)
}

impl Chart for BubbleChart {
    fn kind(&self) -> ChartKind {
        ChartKind::Bubble
    }

    fn preferred_height(&self, _width: f64) -> f64 {
        self.options.height
    }

    #[tracing::instrument(skip(self), fields(bubbles = self.data.len()))]
    fn build(&self, surface: Surface) -> Scene {
        if self.data.is_empty() || !surface.is_drawable() {
            tracing::debug!(?surface, "nothing to draw");
            return Scene::new(surface);
        }
        let mut scene = Scene::new(Surface::new(surface.width, self.options.height));
        let layout = self.layout(surface.width);

        let grow = Stagger::new(0, self.options.stagger_ms);
        let tag_at = Stagger::new(self.options.grow_ms, self.options.stagger_ms);
        let amount_at = Stagger::new(self.options.grow_ms + 100, self.options.stagger_ms);
        for (i, datum) in self.data.iter().enumerate() {
            let children = vec![
                Element::new(
                    format!("circle-{i}"),
                    Shape::Circle {
                        center: Point::ORIGIN,
                        radius: layout.radii[i],
                    },
                )
                .paint(Paint::fill(datum.color).with_opacity(self.options.opacity))
                .enter(
                    Effect::GrowRadius,
                    grow.timing(i, Millis(self.options.grow_ms), Ease::default()),
                ),
                Element::new(
                    format!("tag-{i}"),
                    Shape::Text {
                        at: Point::ORIGIN,
                        content: first_word(&datum.name).to_owned(),
                        style: TextStyle::sized(10.0)
                            .weight(600)
                            .anchor(TextAnchor::Middle)
                            .dy(-0.3),
                    },
                )
                .paint(Paint::fill(self.theme.text))
                .enter(Effect::Fade { from: 0.0 }, label_fade(tag_at.delay_for(i))),
                Element::new(
                    format!("amount-{i}"),
                    Shape::Text {
                        at: Point::ORIGIN,
                        content: format_millions(datum.value),
                        style: TextStyle::sized(9.0).anchor(TextAnchor::Middle).dy(1.0),
                    },
                )
                .paint(Paint::fill(self.theme.text).with_opacity(0.8))
                .enter(Effect::Fade { from: 0.0 }, label_fade(amount_at.delay_for(i))),
            ];
            let c = layout.centers[i];
            scene.push(Element::group(
                format!("bubble-{i}"),
                Affine::translate((c.x, c.y)),
                children,
            ));
        }
        scene
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/bubble.rs"]
mod tests;
