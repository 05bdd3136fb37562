//! Systems - the editing tools
//!
//! Stroke tools (stack, clear) share the `BrushTool` entry points so the tool-dispatch
//! layer can drive any of them from point, line and rectangle strokes.

pub mod clear;
pub mod config;
pub mod release;
pub mod stack;

use crate::brush::Brush;
use crate::core::Point;
use crate::world::ParticleWorld;

pub trait BrushTool {
    type Outcome;

    fn apply_at_point<W: ParticleWorld + ?Sized>(
        &mut self,
        world: &mut W,
        brush: &Brush,
        position: Point,
    ) -> Self::Outcome;

    fn apply_along_line<W: ParticleWorld + ?Sized>(
        &mut self,
        world: &mut W,
        brush: &Brush,
        p1: Point,
        p2: Point,
        dragging: bool,
    ) -> Self::Outcome;

    fn apply_over_rectangle<W: ParticleWorld + ?Sized>(
        &mut self,
        world: &mut W,
        brush: &Brush,
        p1: Point,
        p2: Point,
    ) -> Self::Outcome;
}
