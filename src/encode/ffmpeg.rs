//! MP4 export through the system `ffmpeg` binary.
//!
//! Frames are piped as raw RGBA and encoded to H.264/yuv420p, so no native FFmpeg libraries are
//! linked.

use std::{
    io::Write as _,
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use anyhow::Context as _;

use crate::{
    foundation::{
        core::Rgba8,
        error::{SankeyError, SankeyResult},
    },
    render::raster::FrameRGBA,
};

#[derive(Clone, Debug, PartialEq)]
pub struct VideoConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub out_path: PathBuf,
    pub overwrite: bool,
    /// Colour transparent pixels are flattened onto.
    pub background: Rgba8,
}

impl VideoConfig {
    pub fn new(out_path: impl Into<PathBuf>, width: u32, height: u32, fps: u32) -> Self {
        Self {
            width,
            height,
            fps,
            out_path: out_path.into(),
            overwrite: true,
            background: Rgba8::rgb(0xff, 0xff, 0xff),
        }
    }

    pub fn validate(&self) -> SankeyResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SankeyError::validation("video width/height must be > 0"));
        }
        if self.fps == 0 {
            return Err(SankeyError::validation("video fps must be > 0"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(SankeyError::validation(
                "video width/height must be even for yuv420p output",
            ));
        }
        Ok(())
    }

    /// Arguments passed to `ffmpeg`, output path last.
    pub fn ffmpeg_args(&self) -> Vec<String> {
        let mut args = vec![if self.overwrite { "-y" } else { "-n" }.to_string()];
        args.extend(
            [
                "-loglevel",
                "error",
                "-f",
                "rawvideo",
                "-pix_fmt",
                "rgba",
                "-s",
                &format!("{}x{}", self.width, self.height),
                "-r",
                &self.fps.to_string(),
                "-i",
                "pipe:0",
                "-an",
                "-c:v",
                "libx264",
                "-pix_fmt",
                "yuv420p",
                "-movflags",
                "+faststart",
            ]
            .map(str::to_string),
        );
        args.push(self.out_path.display().to_string());
        args
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

fn ensure_parent_dir(path: &Path) -> SankeyResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

pub struct FfmpegEncoder {
    cfg: VideoConfig,
    child: Child,
    stdin: Option<ChildStdin>,
    scratch: Vec<u8>,
    frames: u64,
}

impl FfmpegEncoder {
    pub fn new(cfg: VideoConfig) -> SankeyResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(SankeyError::validation(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(SankeyError::encode(
                "ffmpeg is required for MP4 export but was not found on PATH",
            ));
        }

        let mut child = Command::new("ffmpeg")
            .args(cfg.ffmpeg_args())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SankeyError::encode(format!("failed to spawn ffmpeg: {e}")))?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| SankeyError::encode("ffmpeg stdin unavailable"))?;

        tracing::debug!(
            out = %cfg.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            fps = cfg.fps,
            "ffmpeg started"
        );
        Ok(Self {
            scratch: vec![0u8; cfg.width as usize * cfg.height as usize * 4],
            cfg,
            child,
            stdin: Some(stdin),
            frames: 0,
        })
    }

    pub fn encode_frame(&mut self, frame: &FrameRGBA) -> SankeyResult<()> {
        if frame.width != self.cfg.width || frame.height != self.cfg.height {
            return Err(SankeyError::encode(format!(
                "frame is {}x{}, encoder expects {}x{}",
                frame.width, frame.height, self.cfg.width, self.cfg.height
            )));
        }
        flatten_onto(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.cfg.background,
        )?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(SankeyError::encode("encoder already finished"));
        };
        stdin
            .write_all(&self.scratch)
            .map_err(|e| SankeyError::encode(format!("write frame to ffmpeg: {e}")))?;
        self.frames += 1;
        Ok(())
    }

    pub fn frames_written(&self) -> u64 {
        self.frames
    }

    pub fn finish(mut self) -> SankeyResult<PathBuf> {
        drop(self.stdin.take());
        let output = self
            .child
            .wait_with_output()
            .map_err(|e| SankeyError::encode(format!("wait for ffmpeg: {e}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SankeyError::encode(format!(
                "ffmpeg exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        tracing::info!(frames = self.frames, out = %self.cfg.out_path.display(), "video written");
        Ok(self.cfg.out_path)
    }
}

/// Composite RGBA8 pixels over an opaque background.
pub fn flatten_onto(
    dst: &mut [u8],
    src: &[u8],
    premultiplied: bool,
    background: Rgba8,
) -> SankeyResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(SankeyError::encode(format!(
            "pixel buffer is {} bytes, expected {}",
            src.len(),
            dst.len()
        )));
    }
    let bg = [
        u16::from(background.r),
        u16::from(background.g),
        u16::from(background.b),
    ];

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        let inv = 255 - a;
        for c in 0..3 {
            let fg = if premultiplied {
                u16::from(s[c])
            } else {
                mul_div255(u16::from(s[c]), a)
            };
            d[c] = (fg + mul_div255(bg[c], inv)).min(255) as u8;
        }
        d[3] = 255;
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    ((u32::from(x) * u32::from(y) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
