//! Mode menu request - handed to the host UI, answered once through
//! `ConfigTool::on_mode_selected`

use crate::particles::{Particle, ParticleHandle};

use super::state::Param;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModeMenuRequest {
    pub handle: ParticleHandle,
    /// Anchor record when the menu opened; a selection only applies if it still matches
    pub particle: Particle,
    pub param: Param,
    pub modes: &'static [&'static str],
}

impl ModeMenuRequest {
    pub fn mode_names(&self) -> &'static [&'static str] {
        self.modes
    }

    pub fn is_valid_mode(&self, mode: usize) -> bool {
        mode < self.modes.len()
    }
}
