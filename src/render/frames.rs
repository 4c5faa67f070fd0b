use std::path::{Path, PathBuf};

use anyhow::Context;
use rayon::prelude::*;

use crate::{
    foundation::core::Millis,
    foundation::error::{VizError, VizResult},
    render::raster::{RasterFrame, Rasterizer},
    scene::model::Scene,
};

/// Sample times covering a scene's entrance animation at `fps`, including the settled frame.
pub fn frame_times(settle: Millis, fps: u32) -> VizResult<Vec<Millis>> {
    if fps == 0 {
        return Err(VizError::validation("fps must be > 0"));
    }
    let step = 1000.0 / f64::from(fps);
    let count = (settle.as_f64() / step).ceil() as u64;
    let mut times: Vec<Millis> = (0..count)
        .map(|i| Millis((i as f64 * step).round() as u64))
        .collect();
    if times.last() != Some(&settle) {
        times.push(settle);
    }
    Ok(times)
}

/// Frame-sequence export settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SequenceOpts {
    pub fps: u32,
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for SequenceOpts {
    fn default() -> Self {
        Self {
            fps: 30,
            parallel: true,
            threads: None,
        }
    }
}

/// Rasterize every frame of a scene's entrance animation.
///
/// Frames are pure functions of time, so they are rendered independently (in parallel unless
/// disabled) and returned in time order.
#[tracing::instrument(skip(scene, rasterizer))]
pub fn render_sequence(
    scene: &Scene,
    rasterizer: &Rasterizer,
    opts: &SequenceOpts,
) -> VizResult<Vec<RasterFrame>> {
    let times = frame_times(scene.settle_time(), opts.fps)?;
    tracing::debug!(frames = times.len(), "rendering entrance sequence");

    if !opts.parallel {
        return times
            .iter()
            .map(|t| rasterizer.rasterize(&scene.sample(*t)))
            .collect();
    }

    let pool = build_thread_pool(opts.threads)?;
    pool.install(|| {
        times
            .par_iter()
            .map(|t| rasterizer.rasterize(&scene.sample(*t)))
            .collect()
    })
}

/// Write `frame_00000.png`, `frame_00001.png`, ... into `dir`.
pub fn write_sequence(frames: &[RasterFrame], dir: &Path) -> VizResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create output dir '{}'", dir.display()))?;
    frames
        .iter()
        .enumerate()
        .map(|(i, frame)| {
            let path = dir.join(format!("frame_{i:05}.png"));
            frame.save_png(&path)?;
            Ok(path)
        })
        .collect()
}

fn build_thread_pool(threads: Option<usize>) -> VizResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        if n == 0 {
            return Err(VizError::validation("thread count must be > 0"));
        }
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| VizError::render(format!("build thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/frames.rs"]
mod tests;
