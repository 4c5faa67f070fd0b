use super::*;
use crate::{config::VizConfig, scene::model::Effect};

fn has_draw_on(slot: &ChartSlot<TimelineChart>) -> bool {
    let mut found = false;
    if let Some(scene) = slot.host().scene() {
        for e in &scene.elements {
            e.walk(&mut |el| {
                found |= el.entrances.iter().any(|en| en.effect == Effect::DrawOn);
            });
        }
    }
    found
}

fn mounted() -> (SectionContext, TimelineSection, f64) {
    let ctx = SectionContext::new(VizConfig::default(), None);
    let mut section = TimelineSection::new(ctx.clone());
    let height = section.layout(0.0, 1280.0, 800.0, Millis::ZERO);
    (ctx, section, height)
}

fn run(ctx: &SectionContext, s: &mut TimelineSection, by: Millis) {
    for tick in ctx.scheduler.advance(by) {
        s.on_tick(&tick, tick.at);
    }
}

#[test]
fn readouts_use_latest_point_at_or_before_year() {
    let first = readouts(2025);
    assert_eq!(first.len(), 4);
    assert_eq!(first[0].label, "Physical Activity");
    assert_eq!(first[0].value, "£1.6B");
    assert_eq!(first[3].value, "£0.2M");
    assert_eq!(readouts(2029), first);
    assert_eq!(readouts(2030)[0].value, "£4.1B");
}

#[test]
fn first_render_draws_lines_on() {
    let (_, mut s, height) = mounted();
    assert!(s.chart().host().scene().is_none());
    s.on_scroll(Rect::new(0.0, 0.0, 1280.0, height), Millis::ZERO);
    assert!(has_draw_on(s.chart()));
}

#[test]
fn year_changes_redraw_without_draw_on() {
    let (_, mut s, height) = mounted();
    s.on_scroll(Rect::new(0.0, 0.0, 1280.0, height), Millis::ZERO);
    s.set_year(2035, Millis(500));
    assert_eq!(s.year(), 2035);
    assert_eq!(s.chart().chart().year(), 2035);
    assert_eq!(s.chart().host().render_count(), 2);
    assert!(!has_draw_on(s.chart()));

    s.set_year(2035, Millis(600));
    assert_eq!(s.chart().host().render_count(), 2);
}

#[test]
fn year_changes_before_visibility_only_swap_the_chart() {
    let (_, mut s, _) = mounted();
    s.set_year(2040, Millis::ZERO);
    assert_eq!(s.chart().host().render_count(), 0);
    assert_eq!(s.readouts(), readouts(2040));
}

#[test]
fn playback_steps_the_chart_and_stops_after_wrapping() {
    let (ctx, mut s, height) = mounted();
    s.on_scroll(Rect::new(0.0, 0.0, 1280.0, height), Millis::ZERO);
    s.toggle_playback();
    assert!(s.scrubber().is_playing());

    run(&ctx, &mut s, Millis(450));
    assert_eq!(s.year(), 2028);
    assert_eq!(s.chart().chart().year(), 2028);

    run(&ctx, &mut s, Millis(150 * 23));
    assert_eq!(s.year(), 2025);
    assert!(!s.scrubber().is_playing());
    assert_eq!(ctx.scheduler.active_count(), 0);
}

#[test]
fn controls_reflect_playback_state() {
    let (_, mut s, _) = mounted();
    let label = |s: &TimelineSection| {
        let scene = crate::scene::model::Scene {
            surface: crate::foundation::core::Surface::new(1280.0, 4000.0),
            background: None,
            elements: s.elements(Millis(5000)),
        };
        match &scene.find("play-label").unwrap().shape {
            Shape::Text { content, .. } => content.clone(),
            _ => String::new(),
        }
    };
    assert_eq!(label(&s), "Play Animation");
    s.play();
    assert_eq!(label(&s), "Pause");
    s.pause();
    assert_eq!(label(&s), "Play Animation");
}
