//! Release tool - the config tool's right-button companion
//!
//! While a config session is active a click cancels it and strokes do nothing.
//! Otherwise it clears particles under the stroke with a single-cell brush.

use crate::brush::Brush;
use crate::core::Point;
use crate::systems::clear::ClearTool;
use crate::systems::config::ConfigTool;
use crate::systems::BrushTool;
use crate::world::ParticleWorld;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseOutcome {
    Cancelled,
    Cleared(usize),
    Blocked,
}

#[derive(Default)]
pub struct ReleaseTool {
    clear: ClearTool,
}

impl ReleaseTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn click<W: ParticleWorld + ?Sized>(
        &mut self,
        config: &mut ConfigTool,
        world: &mut W,
        brush: &Brush,
        position: Point,
    ) -> ReleaseOutcome {
        if config.is_configuring() {
            config.on_cancel();
            return ReleaseOutcome::Cancelled;
        }
        let point = brush.with_zero_radius();
        ReleaseOutcome::Cleared(self.clear.apply_at_point(world, &point, position))
    }

    pub fn drag<W: ParticleWorld + ?Sized>(
        &mut self,
        config: &ConfigTool,
        world: &mut W,
        brush: &Brush,
        position: Point,
    ) -> ReleaseOutcome {
        if config.is_configuring() {
            return ReleaseOutcome::Blocked;
        }
        let point = brush.with_zero_radius();
        ReleaseOutcome::Cleared(self.clear.apply_at_point(world, &point, position))
    }

    pub fn line<W: ParticleWorld + ?Sized>(
        &mut self,
        config: &ConfigTool,
        world: &mut W,
        brush: &Brush,
        p1: Point,
        p2: Point,
        dragging: bool,
    ) -> ReleaseOutcome {
        if config.is_configuring() {
            return ReleaseOutcome::Blocked;
        }
        let point = brush.with_zero_radius();
        ReleaseOutcome::Cleared(self.clear.apply_along_line(world, &point, p1, p2, dragging))
    }

    pub fn rect<W: ParticleWorld + ?Sized>(
        &mut self,
        config: &ConfigTool,
        world: &mut W,
        brush: &Brush,
        p1: Point,
        p2: Point,
    ) -> ReleaseOutcome {
        if config.is_configuring() {
            return ReleaseOutcome::Blocked;
        }
        let point = brush.with_zero_radius();
        ReleaseOutcome::Cleared(self.clear.apply_over_rectangle(world, &point, p1, p2))
    }
}
