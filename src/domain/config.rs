//! Editor configuration (JSON)

use serde::{Deserialize, Serialize};

use crate::brush::{Brush, BrushShape, MAX_BRUSH_RADIUS};
use crate::domain::error::EditorError;

pub const DEFAULT_WIDTH: u32 = 612;
pub const DEFAULT_HEIGHT: u32 = 384;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub width: u32,
    pub height: u32,
    /// Particle slots; the simulation uses one slot per cell
    pub capacity: usize,
    pub brush: BrushConfig,
    pub stack_edit_depth: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrushConfig {
    pub shape: BrushShape,
    pub radius_x: i32,
    pub radius_y: i32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            capacity: (DEFAULT_WIDTH * DEFAULT_HEIGHT) as usize,
            brush: BrushConfig::default(),
            stack_edit_depth: 0,
        }
    }
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            shape: BrushShape::Circle,
            radius_x: 4,
            radius_y: 4,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EditorError> {
        if self.width == 0 || self.height == 0 {
            return Err(EditorError::InvalidConfig(format!(
                "grid must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > i32::MAX as u32 || self.height > i32::MAX as u32 {
            return Err(EditorError::InvalidConfig("grid too large".to_string()));
        }
        if self.capacity == 0 {
            return Err(EditorError::InvalidConfig("capacity must be at least 1".to_string()));
        }
        let radius_ok = |r: i32| (0..=MAX_BRUSH_RADIUS).contains(&r);
        if !radius_ok(self.brush.radius_x) || !radius_ok(self.brush.radius_y) {
            return Err(EditorError::InvalidConfig(format!(
                "brush radius must be within 0..={}",
                MAX_BRUSH_RADIUS
            )));
        }
        Ok(())
    }
}

impl BrushConfig {
    pub fn build(&self) -> Brush {
        Brush::new(self.shape, self.radius_x, self.radius_y)
    }
}
