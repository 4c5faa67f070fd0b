//! Continuous and band scales in the style of d3-scale.

/// Affine map from a numeric domain onto a pixel range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Round-number ticks covering the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        let span = hi - lo;
        if count == 0 || !span.is_finite() || span <= 0.0 {
            return vec![lo];
        }
        let inc = tick_increment(span / count as f64);
        let first = (lo / inc).ceil() as i64;
        let last = (hi / inc).floor() as i64;
        (first..=last).map(|i| i as f64 * inc).collect()
    }
}

fn tick_increment(raw_step: f64) -> f64 {
    let power = raw_step.log10().floor();
    let base = 10f64.powf(power);
    let error = raw_step / base;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * base
}

/// Evenly spaced bands for categorical data, `padding` applied inside and outside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandScale {
    pub count: usize,
    pub range: (f64, f64),
    pub padding: f64,
}

impl BandScale {
    pub fn new(count: usize, range: (f64, f64), padding: f64) -> Self {
        Self {
            count,
            range,
            padding: padding.clamp(0.0, 1.0),
        }
    }

    pub fn step(&self) -> f64 {
        let n = self.count as f64;
        let denom = (n - self.padding + self.padding * 2.0).max(1.0);
        (self.range.1 - self.range.0) / denom
    }

    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding)
    }

    /// Leading edge of band `index`.
    pub fn position(&self, index: usize) -> f64 {
        let n = self.count as f64;
        let step = self.step();
        let start = self.range.0 + (self.range.1 - self.range.0 - step * (n - self.padding)) * 0.5;
        start + step * index as f64
    }

    pub fn center(&self, index: usize) -> f64 {
        self.position(index) + self.bandwidth() / 2.0
    }
}

/// `range_min + (range_max - range_min) * sqrt(v / domain_max)`: with a zero floor, area rather
/// than radius is proportional to value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SqrtScale {
    pub domain_max: f64,
    pub range_max: f64,
    #[serde(default)]
    pub range_min: f64,
}

impl SqrtScale {
    pub fn new(domain_max: f64, range_max: f64) -> Self {
        Self {
            domain_max,
            range_max,
            range_min: 0.0,
        }
    }

    /// Output for a zero (or negative) input.
    pub fn with_floor(mut self, range_min: f64) -> Self {
        self.range_min = range_min;
        self
    }

    pub fn map(&self, v: f64) -> f64 {
        if self.domain_max <= 0.0 || v <= 0.0 {
            return self.range_min;
        }
        self.range_min + (self.range_max - self.range_min) * (v / self.domain_max).sqrt()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/scale.rs"]
mod tests;
