use crate::{
    data::metrics::{SUMMARY_STATS, total_positive_benefits},
    foundation::{
        core::{Affine, Color, Millis, Point, Rect, Vec2},
        format::{format_compact_population, format_millions, format_number},
    },
    runtime::scheduler::{Tick, TimerHandle},
    scene::model::{Element, Paint, Shape, TextAnchor, TextStyle},
    section::{Section, SectionContext, SectionCopy, card, columns, fade_in, text},
};

/// Drifting background particles of the hero.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ParticleOptions {
    pub count: usize,
    pub seed: u64,
}

impl Default for ParticleOptions {
    fn default() -> Self {
        Self {
            count: 60,
            seed: 0x00C0_BE4E_F175,
        }
    }
}

#[derive(Clone, Debug)]
struct Rng64 {
    state: u64,
}

impl Rng64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn next_f64_01(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Point,
    pub velocity: Vec2,
    pub radius: f64,
    pub opacity: f64,
}

/// Particles bouncing around a rectangle, one step per animation frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: Rect,
}

impl ParticleField {
    pub fn new(options: &ParticleOptions, bounds: Rect) -> Self {
        let mut rng = Rng64::new(options.seed);
        let particles = (0..options.count)
            .map(|_| Particle {
                position: Point::new(
                    bounds.x0 + rng.next_f64_01() * bounds.width(),
                    bounds.y0 + rng.next_f64_01() * bounds.height(),
                ),
                radius: rng.next_f64_01() * 3.0 + 1.0,
                velocity: Vec2::new(
                    (rng.next_f64_01() - 0.5) * 0.3,
                    (rng.next_f64_01() - 0.5) * 0.3,
                ),
                opacity: rng.next_f64_01() * 0.3 + 0.1,
            })
            .collect();
        Self { particles, bounds }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Move every particle by its velocity, reversing direction once it leaves the bounds.
    pub fn step(&mut self) {
        let b = self.bounds;
        for p in &mut self.particles {
            p.position += p.velocity;
            if p.position.x < b.x0 || p.position.x > b.x1 {
                p.velocity.x = -p.velocity.x;
            }
            if p.position.y < b.y0 || p.position.y > b.y1 {
                p.velocity.y = -p.velocity.y;
            }
        }
    }

    fn element(&self, colors: (Color, Color)) -> Element {
        let children = self
            .particles
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let color = if i % 2 == 0 { colors.0 } else { colors.1 };
                Element::new(
                    format!("particle-{i}"),
                    Shape::Circle {
                        center: p.position,
                        radius: p.radius,
                    },
                )
                .paint(Paint::fill(color).with_opacity(p.opacity))
            })
            .collect();
        Element::group("particles", Affine::IDENTITY, children).paint(Paint::default().with_opacity(0.5))
    }
}

/// One headline figure of the hero.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct HeroStat {
    pub value: String,
    pub label: &'static str,
}

pub fn hero_stats() -> Vec<HeroStat> {
    vec![
        HeroStat {
            value: format_number(SUMMARY_STATS.total_small_areas as f64),
            label: "UK Small Areas",
        },
        HeroStat {
            value: format_compact_population(SUMMARY_STATS.total_population as f64),
            label: "Population Covered",
        },
        HeroStat {
            value: format_millions(total_positive_benefits()),
            label: "Total Benefits",
        },
    ]
}

const CONTENT_HEIGHT: f64 = 720.0;

/// Full-viewport hero: copy, stats and a particle field that runs from mount to teardown.
#[derive(Debug)]
pub struct OverviewSection {
    ctx: SectionContext,
    copy: SectionCopy,
    stats: Vec<HeroStat>,
    field: ParticleField,
    frame: Option<TimerHandle>,
    mounted_at: Millis,
    steps: u64,
    top: f64,
    width: f64,
    height: f64,
}

impl OverviewSection {
    pub fn new(ctx: SectionContext) -> Self {
        let frame = (ctx.config.particles.count > 0).then(|| ctx.scheduler.frame_loop());
        let mounted_at = ctx.scheduler.now();
        Self {
            copy: SectionCopy {
                eyebrow: "UK Climate Action Co-Benefits 2025-2050",
                title: "Your Future",
                highlight: "Starts Now",
                lede: "What if fighting climate change made your life better?".to_owned(),
            },
            stats: hero_stats(),
            field: ParticleField::new(&ctx.config.particles, Rect::ZERO),
            frame,
            mounted_at,
            steps: 0,
            top: 0.0,
            width: 0.0,
            height: 0.0,
            ctx,
        }
    }

    pub fn stats(&self) -> &[HeroStat] {
        &self.stats
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// Animation frames the particle field has advanced.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    fn content(&self) -> Vec<Element> {
        let theme = self.ctx.theme();
        let cx = self.width / 2.0;
        let y0 = self.top + (self.height - CONTENT_HEIGHT).max(0.0) / 2.0;
        let middle = |size: f64, weight: u16| {
            TextStyle::sized(size)
                .weight(weight)
                .anchor(TextAnchor::Middle)
        };

        let mut out = vec![
            fade_in(
                text(
                    "hero-eyebrow",
                    Point::new(cx, y0 + 24.0),
                    self.copy.eyebrow,
                    middle(16.0, 500),
                    theme.accent,
                ),
                200,
            ),
            fade_in(
                Element::group(
                    "hero-title",
                    Affine::IDENTITY,
                    vec![
                        text("hero-title-0", Point::new(cx, y0 + 120.0), self.copy.title, middle(84.0, 700), theme.text),
                        text(
                            "hero-title-1",
                            Point::new(cx, y0 + 210.0),
                            self.copy.highlight,
                            middle(84.0, 700),
                            theme.accent,
                        ),
                    ],
                ),
                0,
            ),
            fade_in(
                text(
                    "hero-lede",
                    Point::new(cx, y0 + 280.0),
                    self.copy.lede.clone(),
                    middle(24.0, 300),
                    theme.muted,
                ),
                400,
            ),
            fade_in(
                Element::group(
                    "hero-tagline",
                    Affine::IDENTITY,
                    vec![
                        text(
                            "hero-tagline-0",
                            Point::new(cx, y0 + 340.0),
                            "This isn't about sacrifice.",
                            middle(30.0, 600),
                            theme.text,
                        ),
                        text(
                            "hero-tagline-1",
                            Point::new(cx, y0 + 380.0),
                            "It's about cleaner air, healthier bodies, and thriving communities.",
                            middle(18.0, 400),
                            theme.muted,
                        ),
                    ],
                ),
                600,
            ),
        ];

        let row_width = (self.width - 48.0).clamp(0.0, 768.0);
        let mut stats = Vec::with_capacity(self.stats.len() * 3);
        for (i, ((x, w), stat)) in columns(cx - row_width / 2.0, row_width, self.stats.len(), 16.0)
            .into_iter()
            .zip(&self.stats)
            .enumerate()
        {
            let rect = Rect::new(x, y0 + 440.0, x + w, y0 + 560.0);
            stats.push(card(format!("hero-stat-{i}"), rect, theme));
            stats.push(text(
                format!("hero-stat-value-{i}"),
                Point::new(rect.center().x, rect.y0 + 60.0),
                stat.value.clone(),
                middle(36.0, 700),
                theme.accent,
            ));
            stats.push(text(
                format!("hero-stat-label-{i}"),
                Point::new(rect.center().x, rect.y0 + 92.0),
                stat.label,
                middle(14.0, 400),
                theme.muted,
            ));
        }
        out.push(fade_in(Element::group("hero-stats", Affine::IDENTITY, stats), 800));

        let button = Rect::new(cx - 100.0, y0 + 620.0, cx + 100.0, y0 + 668.0);
        out.push(fade_in(
            Element::group(
                "hero-cta",
                Affine::IDENTITY,
                vec![
                    Element::new(
                        "hero-cta-button",
                        Shape::Rect {
                            rect: button,
                            corner_radius: 24.0,
                        },
                    )
                    .paint(Paint::fill(theme.text)),
                    text(
                        "hero-cta-label",
                        Point::new(cx, button.center().y + 6.0),
                        "Explore the Data",
                        middle(16.0, 600),
                        theme.background,
                    ),
                ],
            ),
            1200,
        ));
        out
    }
}

impl Section for OverviewSection {
    fn anchor(&self) -> &'static str {
        "overview"
    }

    fn copy(&self) -> &SectionCopy {
        &self.copy
    }

    fn layout(&mut self, top: f64, width: f64, viewport_height: f64, _now: Millis) -> f64 {
        self.top = top;
        self.width = width;
        self.height = viewport_height.max(CONTENT_HEIGHT);
        let bounds = Rect::new(0.0, top, width, top + self.height);
        if self.field.bounds() != bounds {
            self.field = ParticleField::new(&self.ctx.config.particles, bounds);
        }
        self.height
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn on_scroll(&mut self, _viewport: Rect, _now: Millis) {}

    fn on_tick(&mut self, tick: &Tick, _now: Millis) {
        if self.frame.as_ref().is_some_and(|f| f.owns(tick)) {
            self.field.step();
            self.steps += 1;
        }
    }

    fn elements(&self, now: Millis) -> Vec<Element> {
        let theme = self.ctx.theme();
        let mut out = vec![self.field.element((theme.accent, Color::hex(0x3b82f6)))];
        let since_mount = now.saturating_sub(self.mounted_at);
        out.extend(self.content().iter().map(|e| e.sample(since_mount)));
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/overview.rs"]
mod tests;
