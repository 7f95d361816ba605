use serde::{Deserialize, Serialize};

use crate::model::{clamp_stroke_width, Color};

/// Surfaces smaller than one logical unit per side cannot hold a stroke.
const MIN_SURFACE_EXTENT: f32 = 1.0;

/// Persisted capture configuration. Every field falls back to its default
/// when missing from the settings file, so older files keep loading as new
/// fields are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureSettings {
    /// Logical surface width in CSS-style units, before density scaling.
    #[serde(default = "default_logical_width")]
    pub logical_width: f32,
    /// Logical surface height in CSS-style units, before density scaling.
    #[serde(default = "default_logical_height")]
    pub logical_height: f32,
    /// Pen width in logical units. Rendered dots use half of this as radius.
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,
    #[serde(default = "default_stroke_color")]
    pub stroke_color: Color,
    /// Paper color used for the initial fill, clears, and seed letterboxing.
    #[serde(default = "default_background")]
    pub background: Color,
    /// When enabled the host initialises the logger at debug level.
    /// Defaults to `false` when the field is missing in the settings file.
    #[serde(default)]
    pub debug_logging: bool,
}

fn default_logical_width() -> f32 {
    800.0
}

fn default_logical_height() -> f32 {
    400.0
}

fn default_stroke_width() -> f32 {
    3.0
}

fn default_stroke_color() -> Color {
    Color::rgb(255, 255, 255)
}

fn default_background() -> Color {
    Color::rgb(17, 17, 17)
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            logical_width: default_logical_width(),
            logical_height: default_logical_height(),
            stroke_width: default_stroke_width(),
            stroke_color: default_stroke_color(),
            background: default_background(),
            debug_logging: false,
        }
    }
}

impl CaptureSettings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Pull hand-edited values back into the supported ranges. Returns `true`
    /// when anything had to change; callers typically persist the file again
    /// in that case.
    pub fn sanitize(&mut self) -> bool {
        let mut changed = false;

        if !self.logical_width.is_finite() || self.logical_width < MIN_SURFACE_EXTENT {
            self.logical_width = default_logical_width();
            changed = true;
        }
        if !self.logical_height.is_finite() || self.logical_height < MIN_SURFACE_EXTENT {
            self.logical_height = default_logical_height();
            changed = true;
        }
        if self.stroke_width.is_finite() {
            let next = clamp_stroke_width(self.stroke_width);
            changed |= next != self.stroke_width;
            self.stroke_width = next;
        } else {
            self.stroke_width = default_stroke_width();
            changed = true;
        }

        if changed {
            tracing::warn!("capture settings contained out-of-range values; adjusted");
        }
        changed
    }
}
