use std::sync::Arc;

use crate::domain::content::ContentRegistry;
use crate::occupancy::OccupancyMaps;
use crate::particles::ParticleStore;

use super::Sandbox;

pub(super) fn create_sandbox(width: u32, height: u32, capacity: usize) -> Sandbox {
    Sandbox {
        content: Arc::new(ContentRegistry::from_generated()),
        width,
        height,
        particles: ParticleStore::new(capacity),
        occupancy: OccupancyMaps::new(width, height),
        notices: Vec::new(),
        frame: 0,
    }
}
