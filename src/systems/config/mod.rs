//! Config tool - point-and-click editing of directional particle settings
//!
//! Clicking a configurable particle starts a session anchored on it. Each frame the
//! cursor is projected onto the anchor's aim directions and the in-progress value is
//! written to the session's working copy; each further click commits the current
//! stage to the live particle. The session is dropped without writing anything more
//! as soon as the anchor changes underneath it.

mod menu;
mod overlay;
mod state;

pub use menu::ModeMenuRequest;
pub use overlay::{
    draw_config_overlay, DrawCommand, OverlaySink, Rgba, ACTIVE_COLOR, GUIDE_COLOR,
    RADIUS_BOX_COLOR,
};
pub use state::{
    is_configurable_type, transition, ConfigEvent, ConfigKind, ConfigState, Effect, Param,
    Session,
};

use crate::core::Point;
use crate::elements::EL_NONE;
use crate::particles::ParticleHandle;
use crate::sample::{StackEntry, StackSample};
use crate::world::ParticleWorld;

#[derive(Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    /// Nothing configurable under the cursor
    Idle,
    /// A session started on `handle`
    Started { handle: ParticleHandle },
    /// A stage was committed and the session moved on
    Advanced { handle: ParticleHandle, param: Param, value: i32 },
    /// The last stage was committed; back to ready
    Finished { handle: ParticleHandle, param: Param, value: i32 },
    /// The host should show a mode menu
    OpenModeMenu(ModeMenuRequest),
    /// The anchor changed underneath the session, which was dropped
    Corrupted,
}

#[derive(Default)]
pub struct ConfigTool {
    state: ConfigState,
    cursor: Point,
    stack_edit_depth: usize,
    sample: StackSample,
    hover: Option<StackEntry>,
    pending_menu: Option<ModeMenuRequest>,
}

impl ConfigTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ConfigState {
        &self.state
    }

    pub fn is_configuring(&self) -> bool {
        !self.state.is_ready()
    }

    /// Particle field the active stage edits, for property highlighting
    pub fn configuring_param(&self) -> Option<Param> {
        self.state.active_param()
    }

    /// Anchor handle and working copy while configuring, hovered target in ready
    pub fn target(&self) -> Option<StackEntry> {
        match self.state.session() {
            Some(session) => Some(StackEntry {
                handle: session.anchor,
                particle: session.snapshot,
            }),
            None => self.hover,
        }
    }

    pub fn sample(&self) -> &StackSample {
        &self.sample
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn stack_edit_depth(&self) -> usize {
        self.stack_edit_depth
    }

    pub fn set_stack_edit_depth(&mut self, depth: usize) {
        self.stack_edit_depth = depth;
    }

    pub fn pending_menu(&self) -> Option<&ModeMenuRequest> {
        self.pending_menu.as_ref()
    }

    /// Per-frame update: resample, check for corruption, track the cursor.
    /// Returns false when the session had to be dropped.
    pub fn on_frame_update<W: ParticleWorld + ?Sized>(&mut self, world: &W, cursor: Point) -> bool {
        self.resample(world, cursor);

        let intact = if self.is_corrupted(world) {
            log::debug!("config session on {:?} corrupted; resetting", self.state.session().map(|s| s.anchor));
            self.apply_event(ConfigEvent::Corrupted);
            // the pin is gone with the session
            self.resample(world, cursor);
            false
        } else {
            true
        };

        self.cursor = self.sample.position;
        if self.state.is_ready() {
            self.hover = if self.sample.in_sim {
                self.sample.deepest_matching(is_configurable_type).copied()
            } else {
                None
            };
        } else {
            self.hover = None;
            let under_cursor = if self.sample.in_sim {
                self.sample.particle.element
            } else {
                EL_NONE
            };
            self.state.update_scratch(self.cursor, under_cursor);
        }
        intact
    }

    pub fn on_click<W: ParticleWorld + ?Sized>(&mut self, world: &mut W, position: Point) -> ClickOutcome {
        if self.pending_menu.is_some() {
            return ClickOutcome::Idle;
        }
        let was_configuring = self.is_configuring();
        if !self.on_frame_update(&*world, position) && was_configuring {
            return ClickOutcome::Corrupted;
        }

        let target = if self.state.is_ready() { self.hover } else { None };
        let effect = self.apply_event(ConfigEvent::Click {
            target,
            at: self.cursor,
        });

        match effect {
            Effect::None => match self.state.session() {
                Some(session) => {
                    log::debug!("config session started on {}", session.anchor);
                    ClickOutcome::Started { handle: session.anchor }
                }
                None => ClickOutcome::Idle,
            },
            Effect::Commit { handle, param, value } => {
                if let Some(live) = world.particle_mut(handle) {
                    param.set(live, value);
                }
                if self.state.is_ready() {
                    ClickOutcome::Finished { handle, param, value }
                } else {
                    ClickOutcome::Advanced { handle, param, value }
                }
            }
            Effect::OpenModeMenu {
                handle,
                particle,
                param,
                modes,
            } => {
                let request = ModeMenuRequest {
                    handle,
                    particle,
                    param,
                    modes,
                };
                self.pending_menu = Some(request);
                ClickOutcome::OpenModeMenu(request)
            }
        }
    }

    /// Explicit exit: drop the session (and any open menu) without writing
    pub fn on_cancel(&mut self) {
        self.pending_menu = None;
        self.apply_event(ConfigEvent::Cancel);
    }

    /// Answer to a mode menu. Applies at most once per menu, and only if the particle
    /// is still the one the menu was opened for.
    pub fn on_mode_selected<W: ParticleWorld + ?Sized>(
        &mut self,
        world: &mut W,
        handle: ParticleHandle,
        mode: usize,
    ) -> bool {
        let Some(request) = self.pending_menu.take() else {
            return false;
        };
        if request.handle != handle || !request.is_valid_mode(mode) {
            return false;
        }
        match world.particle_mut(handle) {
            Some(live) if live.is_same_part(&request.particle) => {
                request.param.set(live, mode as i32);
                true
            }
            _ => false,
        }
    }

    pub fn draw_overlay(&self, sink: &mut dyn OverlaySink) {
        draw_config_overlay(sink, &self.state, self.cursor, self.hover.as_ref(), &self.sample);
    }

    fn apply_event(&mut self, event: ConfigEvent) -> Effect {
        let (next, effect) = transition(std::mem::take(&mut self.state), event);
        self.state = next;
        effect
    }

    fn resample<W: ParticleWorld + ?Sized>(&mut self, world: &W, cursor: Point) {
        let pinned = self.state.session().map(|s| s.pinned);
        self.sample = StackSample::take(world, cursor, pinned, self.stack_edit_depth);
    }

    fn is_corrupted<W: ParticleWorld + ?Sized>(&self, world: &W) -> bool {
        let Some(session) = self.state.session() else {
            return false;
        };
        let same = world
            .particle(session.anchor)
            .map_or(false, |live| live.is_same_part(&session.snapshot));
        if !same {
            return true;
        }
        match self.sample.deepest_matching(is_configurable_type) {
            Some(entry) => entry.handle != session.anchor,
            None => true,
        }
    }
}
