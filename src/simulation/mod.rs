//! Sandbox - in-memory particle world the tools operate on
//!
//! Owns the particle store and both occupancy layers and implements `ParticleWorld`.
//! Physics stepping belongs to the engine; the only piece of the frame loop modelled
//! here is `reconcile`, the pass that rebuilds occupancy from particle positions.

use std::sync::Arc;

use crate::core::Point;
use crate::domain::config::EditorConfig;
use crate::domain::content::ContentRegistry;
use crate::domain::error::EditorError;
use crate::elements::ElementId;
use crate::occupancy::{CellRef, Layer, OccupancyMaps};
use crate::particles::{Particle, ParticleHandle, ParticleStore};
use crate::world::ParticleWorld;

#[path = "commands/commands.rs"]
mod commands;
#[path = "init/init.rs"]
mod init;
#[path = "step/reconcile.rs"]
mod reconcile;
mod facade;

pub use facade::Editor;

pub struct Sandbox {
    content: Arc<ContentRegistry>,
    width: u32,
    height: u32,
    particles: ParticleStore,
    occupancy: OccupancyMaps,

    // Advisories waiting to be shown
    notices: Vec<String>,
    frame: u64,
}

impl Sandbox {
    /// One particle slot per cell, like the engine
    pub fn new(width: u32, height: u32) -> Self {
        init::create_sandbox(width, height, (width as usize) * (height as usize))
    }

    pub fn with_capacity(width: u32, height: u32, capacity: usize) -> Self {
        init::create_sandbox(width, height, capacity)
    }

    pub fn from_config(config: &EditorConfig) -> Result<Self, EditorError> {
        config.validate()?;
        Ok(init::create_sandbox(config.width, config.height, config.capacity))
    }

    pub fn load_content_bundle_json(&mut self, json: &str) -> Result<(), EditorError> {
        let registry = ContentRegistry::from_bundle_json(json)?;
        self.content = Arc::new(registry);
        self.clear();
        Ok(())
    }

    pub fn content(&self) -> &ContentRegistry {
        &self.content
    }

    pub fn particle_count(&self) -> usize {
        self.particles.live_count()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Add a particle at a free cell of its layer
    pub fn add_particle(&mut self, x: i32, y: i32, element: ElementId) -> Option<ParticleHandle> {
        commands::add_particle(self, x, y, element)
    }

    /// Remove the topmost particle at a cell (energy layer first)
    pub fn remove_particle_at(&mut self, x: i32, y: i32) -> bool {
        commands::remove_particle_at(self, x, y)
    }

    /// Clear all particles
    pub fn clear(&mut self) {
        commands::clear(self)
    }

    /// Rebuild both occupancy layers from particle positions. Higher handles win shared
    /// cells. Live particles that rounded outside the grid are removed.
    pub fn reconcile(&mut self) {
        reconcile::reconcile(self);
    }

    /// Whether every occupied cell refers to a live particle at that cell, in its layer
    pub fn occupancy_is_consistent(&self) -> bool {
        reconcile::occupancy_is_consistent(self)
    }

    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }
}

impl ParticleWorld for Sandbox {
    fn width(&self) -> i32 {
        self.width as i32
    }

    fn height(&self) -> i32 {
        self.height as i32
    }

    fn particles(&self) -> &[Particle] {
        self.particles.active()
    }

    fn particles_mut(&mut self) -> &mut [Particle] {
        self.particles.active_mut()
    }

    fn cell(&self, layer: Layer, p: Point) -> Option<CellRef> {
        self.occupancy.layer(layer).get(p)
    }

    fn set_cell(&mut self, layer: Layer, p: Point, entry: Option<CellRef>) {
        self.occupancy.layer_mut(layer).set(p, entry);
    }

    fn is_energy(&self, element: ElementId) -> bool {
        self.content.is_energy(element)
    }

    fn is_conductive(&self, element: ElementId) -> bool {
        self.content.is_conductive(element)
    }

    fn kill_particle(&mut self, handle: ParticleHandle) {
        commands::kill_particle(self, handle);
    }

    fn notify(&mut self, message: &str) {
        log::warn!("{}", message);
        #[cfg(target_arch = "wasm32")]
        web_sys::console::warn_1(&message.into());
        self.notices.push(message.to_string());
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
