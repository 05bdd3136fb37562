//! ParticleWorld - the grid owner's interface as seen by the editing tools
//!
//! The simulation engine owns the particle array and both occupancy layers. Tools only
//! borrow them for one input event, through this trait, so they can run against the
//! real engine or against a small in-memory world in tests.

use crate::core::Point;
use crate::elements::ElementId;
use crate::occupancy::{CellRef, Layer};
use crate::particles::{Particle, ParticleHandle};

pub trait ParticleWorld {
    fn width(&self) -> i32;
    fn height(&self) -> i32;

    #[inline]
    fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width() && p.y >= 0 && p.y < self.height()
    }

    /// Slots `0..=last_active`. Dead slots have an empty element.
    fn particles(&self) -> &[Particle];
    fn particles_mut(&mut self) -> &mut [Particle];

    #[inline]
    fn particle(&self, handle: ParticleHandle) -> Option<&Particle> {
        self.particles().get(handle)
    }

    #[inline]
    fn particle_mut(&mut self, handle: ParticleHandle) -> Option<&mut Particle> {
        self.particles_mut().get_mut(handle)
    }

    /// Live particle at `handle`, if any
    fn live_particle(&self, handle: ParticleHandle) -> Option<&Particle> {
        self.particle(handle).filter(|p| p.is_alive())
    }

    fn cell(&self, layer: Layer, p: Point) -> Option<CellRef>;
    fn set_cell(&mut self, layer: Layer, p: Point, entry: Option<CellRef>);

    fn is_energy(&self, element: ElementId) -> bool;
    fn is_conductive(&self, element: ElementId) -> bool;

    #[inline]
    fn layer_of(&self, element: ElementId) -> Layer {
        Layer::of(self.is_energy(element))
    }

    /// Remove a particle and its occupancy entry
    fn kill_particle(&mut self, handle: ParticleHandle);

    /// User-visible advisory sink
    fn notify(&mut self, message: &str);
}

/// Handles of live particles matching `pred`, in ascending handle order.
///
/// This is a full scan of the active slots; with the `parallel` feature it is split
/// across the rayon pool (the collect keeps index order).
pub fn select_handles<F>(particles: &[Particle], pred: F) -> Vec<ParticleHandle>
where
    F: Fn(&Particle) -> bool + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        particles
            .par_iter()
            .enumerate()
            .filter_map(|(handle, p)| (p.is_alive() && pred(p)).then_some(handle))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        particles
            .iter()
            .enumerate()
            .filter_map(|(handle, p)| (p.is_alive() && pred(p)).then_some(handle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{EL_DUST, EL_NONE};

    #[test]
    fn select_skips_dead_slots_and_keeps_order() {
        let particles = vec![
            Particle::new(EL_DUST, 1.0, 1.0),
            Particle::new(EL_NONE, 1.0, 1.0),
            Particle::new(EL_DUST, 1.2, 0.9),
            Particle::new(EL_DUST, 5.0, 1.0),
        ];
        let hits = select_handles(&particles, |p| p.cell() == Point::new(1, 1));
        assert_eq!(hits, vec![0, 2]);
    }
}
