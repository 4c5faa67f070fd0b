use super::*;
use crate::{config::VizConfig, foundation::core::Surface, scene::model::Scene};

fn bounds() -> Rect {
    Rect::new(0.0, 0.0, 1280.0, 800.0)
}

#[test]
fn seeded_field_is_deterministic() {
    let opts = ParticleOptions::default();
    let a = ParticleField::new(&opts, bounds());
    let b = ParticleField::new(&opts, bounds());
    assert_eq!(a, b);
    assert_eq!(a.particles().len(), 60);

    let other = ParticleField::new(&ParticleOptions { seed: 7, ..opts }, bounds());
    assert_ne!(a, other);
}

#[test]
fn particles_start_inside_with_bounded_attributes() {
    let field = ParticleField::new(&ParticleOptions::default(), bounds());
    for p in field.particles() {
        assert!(bounds().contains(p.position));
        assert!((1.0..=4.0).contains(&p.radius));
        assert!((0.1..=0.4).contains(&p.opacity));
        assert!(p.velocity.x.abs() <= 0.15 && p.velocity.y.abs() <= 0.15);
    }
}

#[test]
fn particles_bounce_back_into_bounds() {
    let mut field = ParticleField::new(&ParticleOptions::default(), Rect::new(0.0, 0.0, 20.0, 20.0));
    for _ in 0..2000 {
        field.step();
    }
    for p in field.particles() {
        assert!(p.position.x > -1.0 && p.position.x < 21.0);
        assert!(p.position.y > -1.0 && p.position.y < 21.0);
    }
}

#[test]
fn hero_stats_format_summary_figures() {
    let stats = hero_stats();
    assert_eq!(stats[0].value, "46,426");
    assert_eq!(stats[0].label, "UK Small Areas");
    assert_eq!(stats[1].value, "67.6M");
    assert_eq!(stats[2].label, "Total Benefits");
    assert!(stats[2].value.starts_with('£'));
}

#[test]
fn frame_loop_runs_from_mount_until_drop() {
    let ctx = SectionContext::new(VizConfig::default(), None);
    let mut hero = OverviewSection::new(ctx.clone());
    assert_eq!(ctx.scheduler.active_count(), 1);
    let height = hero.layout(0.0, 1280.0, 800.0, Millis::ZERO);
    assert_eq!(height, 800.0);
    assert_eq!(hero.field().bounds(), Rect::new(0.0, 0.0, 1280.0, 800.0));

    for tick in ctx.scheduler.advance(Millis(160)) {
        hero.on_tick(&tick, tick.at);
    }
    assert_eq!(hero.steps(), 10);

    drop(hero);
    assert_eq!(ctx.scheduler.active_count(), 0);
}

#[test]
fn short_viewports_keep_a_minimum_height() {
    let ctx = SectionContext::new(VizConfig::default(), None);
    let mut hero = OverviewSection::new(ctx);
    assert_eq!(hero.layout(0.0, 600.0, 500.0, Millis::ZERO), 720.0);
}

#[test]
fn no_particles_means_no_frame_loop() {
    let mut config = VizConfig::default();
    config.particles.count = 0;
    let ctx = SectionContext::new(config, None);
    let hero = OverviewSection::new(ctx.clone());
    assert_eq!(ctx.scheduler.active_count(), 0);
    assert!(hero.field().particles().is_empty());
}

#[test]
fn hero_content_fades_in_after_mount() {
    let ctx = SectionContext::new(VizConfig::default(), None);
    let mut hero = OverviewSection::new(ctx);
    hero.layout(0.0, 1280.0, 800.0, Millis::ZERO);
    let at_mount = Scene {
        surface: Surface::new(1280.0, 800.0),
        background: None,
        elements: hero.elements(Millis::ZERO),
    };
    let eyebrow = at_mount.find("hero-eyebrow").unwrap();
    assert_eq!(eyebrow.paint.opacity, 0.0);
    assert_eq!(at_mount.count_keyed("particle-"), 60);

    let later = Scene {
        surface: Surface::new(1280.0, 800.0),
        background: None,
        elements: hero.elements(Millis(5000)),
    };
    assert_eq!(later.find("hero-eyebrow").unwrap().paint.opacity, 1.0);
}
