use std::{
    cell::RefCell,
    collections::BTreeMap,
    rc::{Rc, Weak},
};

use crate::scene::model::Element;

#[derive(Debug, Default)]
struct Layers {
    next_id: u64,
    entries: BTreeMap<u64, Element>,
}

/// Page-level layer stack drawn above every section (tooltips, popups).
#[derive(Clone, Debug, Default)]
pub struct OverlayLayer {
    layers: Rc<RefCell<Layers>>,
}

impl OverlayLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self, content: Element) -> OverlayGuard {
        let mut layers = self.layers.borrow_mut();
        let id = layers.next_id;
        layers.next_id += 1;
        layers.entries.insert(id, content);
        OverlayGuard {
            id,
            layers: Rc::downgrade(&self.layers),
        }
    }

    pub fn layer_count(&self) -> usize {
        self.layers.borrow().entries.len()
    }

    /// Current layers, oldest first.
    pub fn elements(&self) -> Vec<Element> {
        self.layers.borrow().entries.values().cloned().collect()
    }
}

/// Keeps one overlay layer alive; dropping it removes the layer.
#[derive(Debug)]
pub struct OverlayGuard {
    id: u64,
    layers: Weak<RefCell<Layers>>,
}

impl OverlayGuard {
    /// Swap the layer content in place.
    pub fn update(&self, content: Element) {
        if let Some(layers) = self.layers.upgrade() {
            layers.borrow_mut().entries.insert(self.id, content);
        }
    }
}

impl Drop for OverlayGuard {
    fn drop(&mut self) {
        if let Some(layers) = self.layers.upgrade()
            && let Ok(mut layers) = layers.try_borrow_mut()
        {
            layers.entries.remove(&self.id);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/overlay.rs"]
mod tests;
