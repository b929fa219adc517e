use serde::{Deserialize, Serialize};

use crate::error::{Result, UiError};

/// Host-supplied configuration for the UI layer.
///
/// `v_half_height` and `depth_scale` are calibrated against the host's
/// effective viewport rather than derived from the camera; override them when
/// the host camera changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Viewport width / height (default: 16/9).
    pub aspect: f32,
    /// World units from the viewport centre to its top edge (default: 5.0).
    pub v_half_height: f32,
    /// Multiplier applied to the depth component of positions (default: 1.0).
    pub depth_scale: f32,
    /// Target frame rate for the frame clock (default: 60).
    pub target_frame_rate: u32,
    /// Ticks between tween apply steps for new elements (default: 1 = every tick).
    pub wait_frames: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            aspect: 16.0 / 9.0,
            v_half_height: 5.0,
            depth_scale: 1.0,
            target_frame_rate: 60,
            wait_frames: 1,
        }
    }
}

impl UiConfig {
    /// Parse and validate a config from a JSON string. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            log::warn!("ui config: {}", e);
            UiError::Config(e)
        })?;
        config.validate()?;
        log::debug!("ui config loaded: {:?}", config);
        Ok(config)
    }

    /// Derive the aspect ratio from the host viewport size in pixels.
    pub fn with_viewport_size(mut self, width: f32, height: f32) -> Self {
        self.aspect = width / height;
        self
    }

    pub fn with_half_height(mut self, v_half_height: f32) -> Self {
        self.v_half_height = v_half_height;
        self
    }

    pub fn with_wait_frames(mut self, wait_frames: u32) -> Self {
        self.wait_frames = wait_frames;
        self
    }

    /// Reject values that would produce NaN or degenerate geometry.
    pub fn validate(&self) -> Result<()> {
        let err = if !(self.aspect.is_finite() && self.aspect > 0.0) {
            Some(UiError::InvalidAspect(self.aspect))
        } else if !(self.v_half_height.is_finite() && self.v_half_height > 0.0) {
            Some(UiError::InvalidHalfHeight(self.v_half_height))
        } else if self.target_frame_rate == 0 {
            Some(UiError::InvalidFrameRate(self.target_frame_rate))
        } else {
            None
        };
        match err {
            Some(e) => {
                log::warn!("ui config rejected: {}", e);
                Err(e)
            }
            None => Ok(()),
        }
    }
}
