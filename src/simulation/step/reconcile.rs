use crate::occupancy::{CellRef, Layer};
use crate::world::ParticleWorld;

use super::Sandbox;

pub(super) fn reconcile(world: &mut Sandbox) {
    world.occupancy.clear();

    let mut escaped = Vec::new();
    for (handle, part) in world.particles.active().iter().enumerate() {
        if !part.is_alive() {
            continue;
        }
        let cell = part.cell();
        if !world.in_bounds(cell) {
            escaped.push(handle);
            continue;
        }
        let layer = Layer::of(world.content.is_energy(part.element));
        world.occupancy.layer_mut(layer).set(
            cell,
            Some(CellRef {
                handle,
                element: part.element,
            }),
        );
    }

    for handle in escaped {
        world.particles.kill(handle);
    }
    world.frame += 1;
}

pub(super) fn occupancy_is_consistent(world: &Sandbox) -> bool {
    [Layer::Matter, Layer::Energy].into_iter().all(|layer| {
        world.occupancy.layer(layer).iter_occupied().all(|(cell, entry)| {
            world.live_particle(entry.handle).map_or(false, |p| {
                p.cell() == cell && world.layer_of(p.element) == layer
            })
        })
    })
}
