use super::*;
use crate::foundation::format::format_millions;

fn deliver(counter: &mut AnimatedCounter, scheduler: &Scheduler, by: Millis) {
    for tick in scheduler.advance(by) {
        counter.on_tick(&tick);
    }
}

#[test]
fn starts_at_zero_and_lands_on_target() {
    let s = Scheduler::new();
    let mut c = AnimatedCounter::new(12_345.6);
    assert_eq!(c.text(), "£0.0M");
    assert!(c.trigger(&s));
    assert_eq!(c.text(), "£0.0M");
    assert!(c.is_running());

    deliver(&mut c, &s, Millis(1000));
    assert!(c.value() > 0.5 * c.target() && c.value() < c.target());

    deliver(&mut c, &s, Millis(1000));
    assert_eq!(c.value(), 12_345.6);
    assert_eq!(c.text(), format_millions(12_345.6));
    assert!(!c.is_running());
    assert_eq!(s.active_count(), 0);
}

#[test]
fn triggers_only_once() {
    let s = Scheduler::new();
    let mut c = AnimatedCounter::new(100.0);
    assert!(c.trigger(&s));
    assert!(!c.trigger(&s));
    assert_eq!(s.active_count(), 1);
    assert!(c.has_started());
}

#[test]
fn ignores_foreign_ticks() {
    let s = Scheduler::new();
    let other = s.interval(Millis(10));
    let mut c = AnimatedCounter::new(100.0);
    let ticks = s.advance(Millis(10));
    assert!(other.owns(&ticks[0]));
    assert!(!c.on_tick(&ticks[0]));
    c.trigger(&s);
    let ticks = s.advance(Millis(10));
    assert!(ticks.iter().all(|t| !c.on_tick(t)));
    assert_eq!(c.value(), 0.0);
}

#[test]
fn untriggered_counter_registers_nothing() {
    let s = Scheduler::new();
    let c = AnimatedCounter::new(100.0);
    s.advance(Millis(5000));
    assert!(!c.has_started());
    assert_eq!(s.active_count(), 0);
}
