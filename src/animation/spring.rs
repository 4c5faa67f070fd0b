/// Damped spring that smooths a moving target (used for the scroll progress bar).
///
/// Integrated with fixed 1 ms semi-implicit Euler substeps so results do not depend on how the
/// caller slices time.
#[derive(Clone, Debug, PartialEq)]
pub struct Spring {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    pub rest_delta: f64,
    pub rest_speed: f64,
    value: f64,
    velocity: f64,
    target: f64,
}

impl Default for Spring {
    fn default() -> Self {
        Self::new(100.0, 30.0, 0.001)
    }
}

impl Spring {
    pub fn new(stiffness: f64, damping: f64, rest_delta: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass: 1.0,
            rest_delta,
            rest_speed: 0.01,
            value: 0.0,
            velocity: 0.0,
            target: 0.0,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    pub fn is_at_rest(&self) -> bool {
        (self.target - self.value).abs() <= self.rest_delta && self.velocity.abs() <= self.rest_speed
    }

    pub fn step(&mut self, dt_ms: u64) {
        const SUBSTEP_S: f64 = 0.001;
        for _ in 0..dt_ms {
            if self.is_at_rest() {
                self.value = self.target;
                self.velocity = 0.0;
                return;
            }
            let displacement = self.value - self.target;
            let force = -self.stiffness * displacement - self.damping * self.velocity;
            self.velocity += (force / self.mass) * SUBSTEP_S;
            self.value += self.velocity * SUBSTEP_S;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
