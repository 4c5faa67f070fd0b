use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::{
    chart::{
        Chart, ChartKind, Theme,
        bar::{BarChart, BarOptions},
        bubble::{BubbleChart, BubbleOptions},
        cumulative::{CumulativeChart, CumulativeOptions},
        map::{MapChart, MapOptions, TileProvider},
        pie::{PieChart, PieOptions},
        timeline::{TimelineChart, TimelineOptions, YEAR_MAX, YEAR_MIN},
        treemap::{TreemapChart, TreemapOptions},
    },
    data::metrics::{
        BENEFITS, CUMULATIVE, DAMAGE_PATHWAYS, ECONOMIC_BREAKDOWN, REGIONS, TOP_AUTHORITIES,
        total_positive_benefits,
    },
    foundation::{
        core::Surface,
        error::{VizError, VizResult},
    },
    render::frames::SequenceOpts,
    runtime::observer::DEFAULT_ROOT_MARGIN,
    section::overview::ParticleOptions,
};

/// Everything tunable about the page, loadable from JSON.
///
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VizConfig {
    pub theme: Theme,
    pub viewport: Surface,
    /// Visibility margin for chart triggers (negative shrinks the viewport).
    pub root_margin: f64,
    pub bar: BarOptions,
    /// Fields missing from a partial object fall back to [`BarOptions::regions`].
    #[serde(default = "BarOptions::regions", deserialize_with = "regions_options")]
    pub regions: BarOptions,
    pub pie: PieOptions,
    pub treemap: TreemapOptions,
    pub bubble: BubbleOptions,
    pub timeline: TimelineOptions,
    pub map: MapOptions,
    pub cumulative: CumulativeOptions,
    pub particles: ParticleOptions,
    pub frames: SequenceOpts,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            viewport: Surface::new(1280.0, 800.0),
            root_margin: DEFAULT_ROOT_MARGIN,
            bar: BarOptions::benefits(),
            regions: BarOptions::regions(),
            pie: PieOptions::default(),
            treemap: TreemapOptions::default(),
            bubble: BubbleOptions::default(),
            timeline: TimelineOptions::default(),
            map: MapOptions::default(),
            cumulative: CumulativeOptions::default(),
            particles: ParticleOptions::default(),
            frames: SequenceOpts::default(),
        }
    }
}

/// Partial `regions` objects are layered over [`BarOptions::regions`], not the struct default.
fn regions_options<'de, D>(deserializer: D) -> Result<BarOptions, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::{Deserialize as _, de::Error as _};

    let overrides = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
    let serde_json::Value::Object(mut merged) =
        serde_json::to_value(BarOptions::regions()).map_err(D::Error::custom)?
    else {
        return Err(D::Error::custom("bar options must serialize to an object"));
    };
    merged.extend(overrides);
    serde_json::from_value(serde_json::Value::Object(merged)).map_err(D::Error::custom)
}

fn positive(name: &str, v: f64) -> VizResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(VizError::validation(format!("{name} must be finite and > 0")));
    }
    Ok(())
}

fn unit_interval(name: &str, v: f64) -> VizResult<()> {
    if !(0.0..=1.0).contains(&v) {
        return Err(VizError::validation(format!("{name} must be in [0, 1]")));
    }
    Ok(())
}

impl VizConfig {
    pub fn from_json_str(json: &str) -> VizResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| VizError::serde(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_path(path: &Path) -> VizResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> VizResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| VizError::serde(e.to_string()))
    }

    pub fn validate(&self) -> VizResult<()> {
        positive("viewport.width", self.viewport.width)?;
        positive("viewport.height", self.viewport.height)?;
        if !self.root_margin.is_finite() {
            return Err(VizError::validation("root_margin must be finite"));
        }

        for (name, bar) in [("bar", &self.bar), ("regions", &self.regions)] {
            bar.margin.validate()?;
            positive(&format!("{name}.plot_height"), bar.plot_height)?;
            if let Some(cap) = bar.max_width {
                positive(&format!("{name}.max_width"), cap)?;
            }
            unit_interval(&format!("{name}.padding"), bar.padding)?;
        }

        positive("pie.size", self.pie.size)?;
        unit_interval("pie.inner_ratio", self.pie.inner_ratio)?;

        positive("treemap.height", self.treemap.height)?;
        if !self.treemap.padding.is_finite() || self.treemap.padding < 0.0 {
            return Err(VizError::validation("treemap.padding must be finite and >= 0"));
        }
        unit_interval("treemap.cell_opacity", self.treemap.cell_opacity)?;

        positive("bubble.height", self.bubble.height)?;
        positive("bubble.scale.domain_max", self.bubble.scale.domain_max)?;
        positive("bubble.scale.range_max", self.bubble.scale.range_max)?;
        unit_interval("bubble.opacity", self.bubble.opacity)?;

        self.timeline.margin.validate()?;
        positive("timeline.height", self.timeline.height)?;
        positive("timeline.y_max", self.timeline.y_max)?;

        positive("map.height", self.map.height)?;
        positive("map.max_radius", self.map.max_radius)?;
        self.map.tile_provider()?;

        let c = &self.cumulative;
        positive("cumulative.max_width", c.max_width)?;
        positive("cumulative.height", c.height)?;
        positive("cumulative.max_radius", c.max_radius)?;
        if !c.inset.is_finite() || c.inset < 0.0 {
            return Err(VizError::validation("cumulative.inset must be finite and >= 0"));
        }
        if !(0.0..=c.max_radius).contains(&c.min_radius) {
            return Err(VizError::validation(
                "cumulative.min_radius must be in [0, cumulative.max_radius]",
            ));
        }
        unit_interval("cumulative.padding", c.padding)?;
        unit_interval("cumulative.opacity", c.opacity)?;

        if self.particles.count > 10_000 {
            return Err(VizError::validation("particles.count must be <= 10000"));
        }
        if self.frames.fps == 0 {
            return Err(VizError::validation("frames.fps must be > 0"));
        }
        if self.frames.threads == Some(0) {
            return Err(VizError::validation("frames.threads must be > 0"));
        }
        Ok(())
    }

    pub fn tile_provider(&self) -> VizResult<Option<Arc<dyn TileProvider>>> {
        self.map.tile_provider()
    }

    pub fn bar_chart(&self) -> BarChart {
        BarChart::benefits(BENEFITS, self.bar.clone(), self.theme.clone())
    }

    pub fn regions_chart(&self) -> BarChart {
        BarChart::regions(REGIONS, self.regions.clone(), self.theme.clone())
    }

    pub fn pie_chart(&self) -> PieChart {
        PieChart::benefits(
            BENEFITS,
            total_positive_benefits(),
            self.pie.clone(),
            self.theme.clone(),
        )
    }

    pub fn treemap_chart(&self) -> TreemapChart {
        TreemapChart::from_records(ECONOMIC_BREAKDOWN, self.treemap.clone(), self.theme.clone())
    }

    pub fn bubble_chart(&self) -> BubbleChart {
        BubbleChart::pathways(DAMAGE_PATHWAYS, self.bubble.clone(), self.theme.clone())
    }

    pub fn timeline_chart(&self, year: u16, draw_on: bool) -> TimelineChart {
        TimelineChart::new(year, draw_on, self.timeline.clone(), self.theme.clone())
    }

    pub fn map_chart(&self, tiles: Option<Arc<dyn TileProvider>>) -> MapChart {
        MapChart::authorities(TOP_AUTHORITIES, tiles, self.map.clone(), self.theme.clone())
    }

    pub fn cumulative_chart(&self) -> CumulativeChart {
        CumulativeChart::new(CUMULATIVE, self.cumulative.clone(), self.theme.clone())
    }

    /// Any chart by kind; the timeline is drawn at `year` with its draw-on entrance.
    pub fn chart(
        &self,
        kind: ChartKind,
        year: u16,
        tiles: Option<Arc<dyn TileProvider>>,
    ) -> Box<dyn Chart> {
        match kind {
            ChartKind::Bar => Box::new(self.bar_chart()),
            ChartKind::Regions => Box::new(self.regions_chart()),
            ChartKind::Pie => Box::new(self.pie_chart()),
            ChartKind::Treemap => Box::new(self.treemap_chart()),
            ChartKind::Bubble => Box::new(self.bubble_chart()),
            ChartKind::Timeline => {
                Box::new(self.timeline_chart(year.clamp(YEAR_MIN, YEAR_MAX), true))
            }
            ChartKind::Map => Box::new(self.map_chart(tiles)),
            ChartKind::Cumulative => Box::new(self.cumulative_chart()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/mod.rs"]
mod tests;
