use crate::config::constants::{DEFAULT_SPEED_MS, TRANSITION_FACTOR};
use crate::foundation::core::Canvas;
use crate::foundation::error::{SankeyError, SankeyResult};

/// Session options recognised by [`crate::EnergySankey`].
///
/// The `include_*` toggles only affect surrounding UI chrome; the core carries them so hosts can
/// read one options object.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SankeyOptions {
    pub country: String,
    pub include_controls: bool,
    pub include_timeline: bool,
    pub include_waste_toggle: bool,
    pub auto_play: bool,
    pub show_waste_heat: bool,
    /// Milliseconds per year during playback.
    pub animation_speed: u64,
    pub width: u32,
    pub height: u32,
    pub loop_animation: bool,
    pub debug_logging: bool,
}

impl Default for SankeyOptions {
    fn default() -> Self {
        Self {
            country: "United States".to_string(),
            include_controls: true,
            include_timeline: true,
            include_waste_toggle: true,
            auto_play: false,
            show_waste_heat: true,
            animation_speed: DEFAULT_SPEED_MS,
            width: 1200,
            height: 800,
            loop_animation: false,
            debug_logging: false,
        }
    }
}

impl SankeyOptions {
    pub fn validate(&self) -> SankeyResult<()> {
        if self.animation_speed == 0 {
            return Err(SankeyError::validation("animationSpeed must be > 0 ms"));
        }
        Canvas::new(self.width, self.height)?;
        Ok(())
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    pub fn from_json_str(s: &str) -> SankeyResult<Self> {
        let opts: Self = serde_json::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }
}

/// Transition length for a given per-year interval.
pub fn transition_ms(speed_ms: u64) -> f64 {
    speed_ms as f64 * TRANSITION_FACTOR
}

#[cfg(test)]
#[path = "../../tests/unit/config/options.rs"]
mod tests;
