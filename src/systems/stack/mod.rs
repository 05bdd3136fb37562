//! Stack tool - collapse a selection onto one cell, or fan a stack back out
//!
//! A stroke over particles at different cells stacks them at the selection's top-left
//! cell. A stroke over particles that already share a cell unstacks them downwards,
//! as far as free space allows.
//!
//! Occupancy bookkeeping for the stack path is left to the simulation's next
//! reconciliation pass; the unstack path registers the cells it fills itself.

mod process;
mod selection;

pub use process::{
    process_selection, NoticeGate, StackOrder, StackOutcome, MSG_MANY_STACKED,
    MSG_UNSTACK_NO_SPACE, STACK_ADVISORY_DEPTH,
};
pub use selection::{line_cells, select_in_brush, select_in_rect, select_on_line};

use crate::brush::Brush;
use crate::core::Point;
use crate::systems::BrushTool;
use crate::world::ParticleWorld;

#[derive(Default)]
pub struct StackTool {
    notices: NoticeGate,
}

impl StackTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell of the last "not enough space" notice, if one was shown
    pub fn last_notice_at(&self) -> Option<Point> {
        self.notices.last_shown()
    }
}

impl BrushTool for StackTool {
    type Outcome = StackOutcome;

    fn apply_at_point<W: ParticleWorld + ?Sized>(
        &mut self,
        world: &mut W,
        brush: &Brush,
        position: Point,
    ) -> StackOutcome {
        let handles = select_in_brush(world.particles(), brush, position);
        process_selection(world, &handles, position, &mut self.notices)
    }

    fn apply_along_line<W: ParticleWorld + ?Sized>(
        &mut self,
        world: &mut W,
        brush: &Brush,
        p1: Point,
        p2: Point,
        _dragging: bool,
    ) -> StackOutcome {
        let handles = select_on_line(world.particles(), brush, p1, p2);
        process_selection(world, &handles, p1, &mut self.notices)
    }

    fn apply_over_rectangle<W: ParticleWorld + ?Sized>(
        &mut self,
        world: &mut W,
        _brush: &Brush,
        p1: Point,
        p2: Point,
    ) -> StackOutcome {
        let (handles, top_left) = select_in_rect(world.particles(), p1, p2);
        process_selection(world, &handles, top_left, &mut self.notices)
    }
}
