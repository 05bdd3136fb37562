use crate::core::Point;
use crate::elements::{ElementId, EL_NONE};
use crate::occupancy::{CellRef, Layer};
use crate::particles::{Particle, ParticleHandle};
use crate::world::ParticleWorld;

use super::Sandbox;

pub(super) fn add_particle(world: &mut Sandbox, x: i32, y: i32, element: ElementId) -> Option<ParticleHandle> {
    let cell = Point::new(x, y);
    if !world.in_bounds(cell) {
        return None;
    }

    // Validate element ID
    if element == EL_NONE || !world.content.is_valid_element_id(element) {
        return None;
    }

    let layer = world.layer_of(element);
    if world.occupancy.layer(layer).get(cell).is_some() {
        return None;
    }

    let handle = world.particles.alloc(Particle::new(element, x as f32, y as f32))?;
    world
        .occupancy
        .layer_mut(layer)
        .set(cell, Some(CellRef { handle, element }));
    Some(handle)
}

pub(super) fn remove_particle_at(world: &mut Sandbox, x: i32, y: i32) -> bool {
    let cell = Point::new(x, y);
    let entry = world
        .occupancy
        .energy
        .get(cell)
        .or_else(|| world.occupancy.matter.get(cell));
    match entry {
        Some(entry) => {
            kill_particle(world, entry.handle);
            true
        }
        None => false,
    }
}

pub(super) fn kill_particle(world: &mut Sandbox, handle: ParticleHandle) {
    let Some(part) = world.particles.get(handle).copied().filter(|p| p.is_alive()) else {
        return;
    };

    let cell = part.cell();
    world.particles.kill(handle);
    for layer in [Layer::Matter, Layer::Energy] {
        if world.occupancy.layer(layer).get(cell).map_or(false, |e| e.handle == handle) {
            let next = top_remaining(world, cell, layer);
            world.occupancy.layer_mut(layer).set(cell, next);
        }
    }
}

/// Highest live handle left standing on `cell` in `layer`, so a stacked cell stays
/// registered after one of its particles dies
fn top_remaining(world: &Sandbox, cell: Point, layer: Layer) -> Option<CellRef> {
    world
        .particles
        .active()
        .iter()
        .enumerate()
        .rev()
        .find(|(_, p)| p.is_alive() && p.cell() == cell && world.layer_of(p.element) == layer)
        .map(|(handle, p)| CellRef {
            handle,
            element: p.element,
        })
}

pub(super) fn clear(world: &mut Sandbox) {
    world.particles.clear();
    world.occupancy.clear();
    world.notices.clear();
    world.frame = 0;
}
