use crate::foundation::core::Rect;

/// Negative margin: a target must be 100 px inside the viewport to count as visible.
pub const DEFAULT_ROOT_MARGIN: f64 = -100.0;

/// Reports the first time a target intersects the (margin-adjusted) viewport, then never again.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityObserver {
    root_margin: f64,
    fired: bool,
}

impl Default for VisibilityObserver {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_MARGIN)
    }
}

impl VisibilityObserver {
    pub fn new(root_margin: f64) -> Self {
        Self {
            root_margin,
            fired: false,
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    pub fn intersects(&self, target: Rect, viewport: Rect) -> bool {
        let root = viewport.inflate(self.root_margin, self.root_margin);
        if root.width() <= 0.0 || root.height() <= 0.0 {
            return false;
        }
        target.x0 < root.x1 && target.x1 > root.x0 && target.y0 < root.y1 && target.y1 > root.y0
    }

    /// `true` exactly once: on the first call where `target` is visible.
    pub fn observe(&mut self, target: Rect, viewport: Rect) -> bool {
        if self.fired || !self.intersects(target, viewport) {
            return false;
        }
        self.fired = true;
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/observer.rs"]
mod tests;
