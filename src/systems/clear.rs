//! Clear tool - deletes every particle the stroke selects

use crate::brush::Brush;
use crate::core::Point;
use crate::particles::ParticleHandle;
use crate::systems::stack::{select_in_brush, select_in_rect, select_on_line};
use crate::systems::BrushTool;
use crate::world::ParticleWorld;

#[derive(Default)]
pub struct ClearTool;

fn kill_all<W: ParticleWorld + ?Sized>(world: &mut W, handles: Vec<ParticleHandle>) -> usize {
    let count = handles.len();
    for handle in handles {
        world.kill_particle(handle);
    }
    count
}

impl BrushTool for ClearTool {
    /// Number of particles removed
    type Outcome = usize;

    fn apply_at_point<W: ParticleWorld + ?Sized>(&mut self, world: &mut W, brush: &Brush, position: Point) -> usize {
        let handles = select_in_brush(world.particles(), brush, position);
        kill_all(world, handles)
    }

    fn apply_along_line<W: ParticleWorld + ?Sized>(
        &mut self,
        world: &mut W,
        brush: &Brush,
        p1: Point,
        p2: Point,
        _dragging: bool,
    ) -> usize {
        let handles = select_on_line(world.particles(), brush, p1, p2);
        kill_all(world, handles)
    }

    fn apply_over_rectangle<W: ParticleWorld + ?Sized>(
        &mut self,
        world: &mut W,
        _brush: &Brush,
        p1: Point,
        p2: Point,
    ) -> usize {
        let (handles, _) = select_in_rect(world.particles(), p1, p2);
        kill_all(world, handles)
    }
}
