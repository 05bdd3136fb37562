//! Stack sample - what sits under the cursor this frame
//!
//! Rebuilt every frame. While a configuration session is active the stack column is
//! pinned to the anchor's cell, but `particle` still follows the cursor (the
//! converter stage reads the element under the cursor from it).

use crate::core::{Direction, Point};
use crate::elements::{ElementId, EL_FILT, EL_SPRK};
use crate::occupancy::Layer;
use crate::particles::{Particle, ParticleHandle};
use crate::world::{select_handles, ParticleWorld};

pub const CONDUCTOR_FLAG: u8 = 1 << 0;
pub const FILTER_FLAG: u8 = 1 << 1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackEntry {
    pub handle: ParticleHandle,
    pub particle: Particle,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StackSample {
    /// Cursor cell
    pub position: Point,
    /// Cell whose stack was sampled (the pinned cell, or the cursor)
    pub stack_position: Point,
    pub in_sim: bool,
    /// Topmost particle at the cursor (energy layer first); empty when none
    pub particle: Particle,
    /// Live particles sharing `stack_position`, ascending handle
    pub stack: Vec<StackEntry>,
    pub effective_depth: usize,
    /// `adjacent[dy + 1][dx + 1]` flags around `stack_position`
    pub adjacent: [[u8; 3]; 3],
}

impl StackSample {
    pub fn take<W: ParticleWorld + ?Sized>(
        world: &W,
        cursor: Point,
        pinned: Option<Point>,
        stack_edit_depth: usize,
    ) -> Self {
        let in_sim = world.in_bounds(cursor);
        let stack_position = pinned.unwrap_or(cursor);

        let particle = if in_sim {
            top_particle_at(world, cursor).unwrap_or_default()
        } else {
            Particle::default()
        };

        let stack: Vec<StackEntry> = if world.in_bounds(stack_position) {
            select_handles(world.particles(), |p| p.cell() == stack_position)
                .into_iter()
                .map(|handle| StackEntry {
                    handle,
                    particle: world.particles()[handle],
                })
                .collect()
        } else {
            Vec::new()
        };

        let effective_depth = stack_edit_depth.min(stack.len().saturating_sub(1));

        let mut adjacent = [[0u8; 3]; 3];
        for dy in -1..=1 {
            for dx in -1..=1 {
                let p = Point::new(stack_position.x + dx, stack_position.y + dy);
                adjacent[(dy + 1) as usize][(dx + 1) as usize] = neighbour_flags(world, p);
            }
        }

        Self {
            position: cursor,
            stack_position,
            in_sim,
            particle,
            stack,
            effective_depth,
            adjacent,
        }
    }

    /// First entry at or above the effective depth whose element passes `is_target`
    pub fn deepest_matching<F>(&self, is_target: F) -> Option<&StackEntry>
    where
        F: Fn(ElementId) -> bool,
    {
        self.stack
            .iter()
            .skip(self.effective_depth)
            .find(|entry| is_target(entry.particle.element))
    }

    /// Flags of the neighbour at `dir` from the stack cell
    pub fn adjacent_flags(&self, dir: Direction) -> u8 {
        let row = (dir.dy + 1).clamp(0, 2) as usize;
        let col = (dir.dx + 1).clamp(0, 2) as usize;
        self.adjacent[row][col]
    }
}

fn top_particle_at<W: ParticleWorld + ?Sized>(world: &W, p: Point) -> Option<Particle> {
    let entry = world
        .cell(Layer::Energy, p)
        .or_else(|| world.cell(Layer::Matter, p))?;
    world.live_particle(entry.handle).copied()
}

fn neighbour_flags<W: ParticleWorld + ?Sized>(world: &W, p: Point) -> u8 {
    let Some(entry) = world.cell(Layer::Matter, p) else {
        return 0;
    };
    let Some(particle) = world.live_particle(entry.handle) else {
        return 0;
    };
    let mut flags = 0;
    if particle.element == EL_SPRK || world.is_conductive(particle.element) {
        flags |= CONDUCTOR_FLAG;
    }
    if particle.element == EL_FILT {
        flags |= FILTER_FLAG;
    }
    flags
}
