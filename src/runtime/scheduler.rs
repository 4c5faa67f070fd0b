use std::{
    cell::RefCell,
    collections::BTreeMap,
    rc::{Rc, Weak},
};

use crate::foundation::core::Millis;

/// Cadence of animation-frame callbacks.
pub const FRAME_MS: u64 = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    Frame,
    Interval,
}

/// One fired registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    pub id: TimerId,
    pub kind: TimerKind,
    pub at: Millis,
}

#[derive(Debug)]
struct Registration {
    kind: TimerKind,
    period: u64,
    next_due: Millis,
}

#[derive(Debug, Default)]
struct Clock {
    now: Millis,
    next_id: u64,
    registrations: BTreeMap<TimerId, Registration>,
}

/// Virtual clock shared by everything on a page.
///
/// Registrations are owned by [`TimerHandle`]s; dropping the handle unregisters it.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    clock: Rc<RefCell<Clock>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Millis {
        self.clock.borrow().now
    }

    /// Fires every [`FRAME_MS`] until the handle is dropped.
    pub fn frame_loop(&self) -> TimerHandle {
        self.register(TimerKind::Frame, FRAME_MS)
    }

    /// Fires every `period` (at least 1 ms) until the handle is dropped.
    pub fn interval(&self, period: Millis) -> TimerHandle {
        self.register(TimerKind::Interval, period.0.max(1))
    }

    fn register(&self, kind: TimerKind, period: u64) -> TimerHandle {
        let mut clock = self.clock.borrow_mut();
        let id = TimerId(clock.next_id);
        clock.next_id += 1;
        let next_due = clock.now + Millis(period);
        clock.registrations.insert(
            id,
            Registration {
                kind,
                period,
                next_due,
            },
        );
        tracing::trace!(?id, ?kind, period, "timer registered");
        TimerHandle {
            id,
            clock: Rc::downgrade(&self.clock),
        }
    }

    pub fn active_count(&self) -> usize {
        self.clock.borrow().registrations.len()
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.clock.borrow().registrations.contains_key(&id)
    }

    /// Move the clock forward by `by`, returning every tick that fell due, in time order.
    ///
    /// Ticks at the same instant are ordered by registration.
    pub fn advance(&self, by: Millis) -> Vec<Tick> {
        let mut clock = self.clock.borrow_mut();
        let target = clock.now + by;
        let mut fired = Vec::new();
        loop {
            let next = clock
                .registrations
                .iter()
                .filter(|(_, r)| r.next_due <= target)
                .min_by_key(|(id, r)| (r.next_due, **id))
                .map(|(id, _)| *id);
            let Some(id) = next else {
                break;
            };
            let Some(reg) = clock.registrations.get_mut(&id) else {
                break;
            };
            let at = reg.next_due;
            let kind = reg.kind;
            reg.next_due = at + Millis(reg.period);
            clock.now = at;
            fired.push(Tick { id, kind, at });
        }
        clock.now = target;
        fired
    }
}

/// Owns one scheduler registration.
#[derive(Debug)]
pub struct TimerHandle {
    id: TimerId,
    clock: Weak<RefCell<Clock>>,
}

impl TimerHandle {
    pub fn id(&self) -> TimerId {
        self.id
    }

    pub fn owns(&self, tick: &Tick) -> bool {
        tick.id == self.id
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        let Some(clock) = self.clock.upgrade() else {
            return;
        };
        if let Ok(mut clock) = clock.try_borrow_mut() {
            clock.registrations.remove(&self.id);
            tracing::trace!(id = ?self.id, "timer dropped");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/scheduler.rs"]
mod tests;
