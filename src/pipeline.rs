//! Offline rendering: single years to SVG/PNG and full playback to MP4.
//!
//! Both paths drive a regular [`EnergySankey`] on an [`SvgSurface`]; video export advances its
//! virtual clock one frame interval at a time.

use std::path::{Path, PathBuf};

use crate::{
    config::options::SankeyOptions,
    data::store::DataStore,
    encode::ffmpeg::{FfmpegEncoder, VideoConfig},
    foundation::error::{SankeyError, SankeyResult},
    playback::controller::EnergySankey,
    render::{
        raster::{FrameRGBA, Rasterizer},
        svg::SvgSurface,
    },
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ExportStats {
    pub frames: u64,
    pub years: usize,
}

/// Session parked on `year` with every transition completed.
pub fn settle_on_year(
    store: DataStore,
    options: &SankeyOptions,
    year: i32,
) -> SankeyResult<EnergySankey<SvgSurface>> {
    let opts = SankeyOptions {
        auto_play: false,
        ..options.clone()
    };
    let surface = SvgSurface::new(opts.canvas());
    let mut sankey = EnergySankey::new(store, opts, surface)?;
    if !sankey.set_year(year) {
        return Err(SankeyError::navigation(format!(
            "year {year} is not in the dataset ({}..={})",
            sankey.store().first_year(),
            sankey.store().last_year()
        )));
    }
    sankey.finish_transitions();
    Ok(sankey)
}

pub fn render_year_svg(
    store: DataStore,
    options: &SankeyOptions,
    year: i32,
) -> SankeyResult<String> {
    Ok(settle_on_year(store, options, year)?.surface().to_svg())
}

pub fn render_year_frame(
    store: DataStore,
    options: &SankeyOptions,
    year: i32,
    rasterizer: &Rasterizer,
) -> SankeyResult<FrameRGBA> {
    let sankey = settle_on_year(store, options, year)?;
    rasterizer.render_surface(sankey.surface())
}

#[tracing::instrument(skip(store, options, out), fields(out = %out.display()))]
pub fn render_year_png(
    store: DataStore,
    options: &SankeyOptions,
    year: i32,
    out: &Path,
) -> SankeyResult<()> {
    let frame = render_year_frame(store, options, year, &Rasterizer::new())?;
    frame.save_png(out)
}

/// Upper bound on frames for a non-looping playback: one interval per year plus the trailing
/// transition.
pub fn frame_budget(years: usize, speed_ms: u64, fps: u32) -> u64 {
    let total_ms = (years as f64 + 1.0) * speed_ms as f64;
    (total_ms * f64::from(fps) / 1000.0).ceil() as u64 + 1
}

/// Play the whole dataset once and encode it as MP4.
#[tracing::instrument(skip(store, options, out), fields(out = %out.as_ref().display()))]
pub fn render_playback_mp4(
    store: DataStore,
    options: &SankeyOptions,
    out: impl AsRef<Path>,
    fps: u32,
) -> SankeyResult<ExportStats> {
    let opts = SankeyOptions {
        auto_play: false,
        loop_animation: false,
        ..options.clone()
    };
    let cfg = VideoConfig::new(PathBuf::from(out.as_ref()), opts.width, opts.height, fps);
    cfg.validate()?;

    let years = store.len();
    let budget = frame_budget(years, opts.animation_speed, fps);
    let frame_ms = 1000.0 / f64::from(fps);

    let surface = SvgSurface::new(opts.canvas());
    let mut sankey = EnergySankey::new(store, opts, surface)?;
    let rasterizer = Rasterizer::new();
    let mut encoder = FfmpegEncoder::new(cfg)?;

    sankey.play();
    let mut frames = 0;
    while frames < budget {
        let frame = rasterizer.render_surface(sankey.surface())?;
        encoder.encode_frame(&frame)?;
        frames += 1;
        if !sankey.is_playing() && !sankey.is_animating() {
            break;
        }
        sankey.advance(frame_ms);
    }
    sankey.destroy();

    encoder.finish()?;
    Ok(ExportStats { frames, years })
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
