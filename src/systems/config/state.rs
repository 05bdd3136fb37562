//! Config states and the pure transition function
//!
//! Each non-ready state carries the session (anchor handle, working copy of the
//! anchor's record, pinned stack cell, current aim direction) plus which field(s) it
//! edits. `transition` decides the next state and which write to perform; it never
//! touches the world itself.

use crate::core::{get_dist, project_point, Direction, Point};
use crate::elements::{
    ElementId, EL_CONV, EL_CRAY, EL_DRAY, EL_DTEC, EL_FILT, EL_LDTC, EL_LSNS, EL_TSNS,
};
use crate::filter_modes::FILT_MODES;
use crate::particles::{Particle, ParticleHandle};
use crate::sample::StackEntry;

/// Particle field edited by a config stage
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Param {
    Life,
    Tmp,
    Tmp2,
}

impl Param {
    #[inline]
    pub fn get(self, p: &Particle) -> i32 {
        match self {
            Param::Life => p.life,
            Param::Tmp => p.tmp,
            Param::Tmp2 => p.tmp2,
        }
    }

    #[inline]
    pub fn set(self, p: &mut Particle, value: i32) {
        match self {
            Param::Life => p.life = value,
            Param::Tmp => p.tmp = value,
            Param::Tmp2 => p.tmp2 = value,
        }
    }
}

/// How an element is configured
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigKind {
    /// Two stages along one direction: `inner` from the anchor, then `outer` from the
    /// end of `inner`. `mirror_outer` draws a trailing copy of `inner` past `outer`;
    /// `filter_source` lets a neighbouring FILT count as an input in previews.
    Ray {
        inner: Param,
        outer: Param,
        mirror_outer: bool,
        filter_source: bool,
    },
    /// Square radius around the anchor, aimed along the axes only
    Radius { param: Param },
    /// Element under the cursor
    CopyElement { param: Param },
    /// Pick one of a fixed set of modes from a menu
    ModeMenu {
        param: Param,
        modes: &'static [&'static str],
    },
}

impl ConfigKind {
    pub fn for_element(element: ElementId) -> Option<Self> {
        let kind = match element {
            EL_DRAY => ConfigKind::Ray {
                inner: Param::Tmp,
                outer: Param::Tmp2,
                mirror_outer: true,
                filter_source: false,
            },
            EL_CRAY => ConfigKind::Ray {
                inner: Param::Tmp2,
                outer: Param::Tmp,
                mirror_outer: false,
                filter_source: false,
            },
            EL_LDTC => ConfigKind::Ray {
                inner: Param::Life,
                outer: Param::Tmp,
                mirror_outer: false,
                filter_source: true,
            },
            EL_DTEC | EL_TSNS | EL_LSNS => ConfigKind::Radius { param: Param::Tmp2 },
            EL_CONV => ConfigKind::CopyElement { param: Param::Tmp },
            EL_FILT => ConfigKind::ModeMenu {
                param: Param::Tmp,
                modes: &FILT_MODES,
            },
            _ => return None,
        };
        Some(kind)
    }
}

pub fn is_configurable_type(element: ElementId) -> bool {
    ConfigKind::for_element(element).is_some()
}

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub anchor: ParticleHandle,
    /// Working copy of the anchor: compared against the live particle to detect
    /// corruption, and holds uncommitted edits
    pub snapshot: Particle,
    /// Stack cell sampled while the session is active
    pub pinned: Point,
    pub dir: Direction,
}

impl Session {
    pub fn new(anchor: ParticleHandle, snapshot: Particle, pinned: Point) -> Self {
        Self {
            anchor,
            snapshot,
            pinned,
            dir: Direction::NONE,
        }
    }

    fn commit(&self, param: Param) -> Effect {
        Effect::Commit {
            handle: self.anchor,
            param,
            value: param.get(&self.snapshot),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ConfigState {
    #[default]
    Ready,
    RayInner {
        session: Session,
        inner: Param,
        outer: Param,
    },
    RayOuter {
        session: Session,
        inner: Param,
        outer: Param,
    },
    Radius {
        session: Session,
        param: Param,
    },
    CopyElement {
        session: Session,
        param: Param,
    },
}

impl ConfigState {
    pub fn is_ready(&self) -> bool {
        matches!(self, ConfigState::Ready)
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            ConfigState::Ready => None,
            ConfigState::RayInner { session, .. }
            | ConfigState::RayOuter { session, .. }
            | ConfigState::Radius { session, .. }
            | ConfigState::CopyElement { session, .. } => Some(session),
        }
    }

    fn session_mut(&mut self) -> Option<&mut Session> {
        match self {
            ConfigState::Ready => None,
            ConfigState::RayInner { session, .. }
            | ConfigState::RayOuter { session, .. }
            | ConfigState::Radius { session, .. }
            | ConfigState::CopyElement { session, .. } => Some(session),
        }
    }

    /// Field the current stage edits
    pub fn active_param(&self) -> Option<Param> {
        match self {
            ConfigState::Ready => None,
            ConfigState::RayInner { inner, .. } => Some(*inner),
            ConfigState::RayOuter { outer, .. } => Some(*outer),
            ConfigState::Radius { param, .. } | ConfigState::CopyElement { param, .. } => {
                Some(*param)
            }
        }
    }

    pub fn allows_diagonal(&self) -> bool {
        !matches!(self, ConfigState::Radius { .. })
    }

    /// Recompute the aim direction and the in-progress value from the cursor.
    /// `cursor_element` is the element under the cursor (empty outside the grid).
    pub fn update_scratch(&mut self, cursor: Point, cursor_element: ElementId) {
        let allow_diagonal = self.allows_diagonal();
        let Some(session) = self.session_mut() else {
            return;
        };
        let proj = project_point(session.snapshot.cell(), cursor, allow_diagonal);
        session.dir = proj.signum();

        match self {
            ConfigState::Ready => {}
            ConfigState::RayInner { session, inner, .. } => {
                inner.set(&mut session.snapshot, get_dist(proj, 0));
            }
            ConfigState::RayOuter {
                session,
                inner,
                outer,
            } => {
                let offset = inner.get(&session.snapshot);
                outer.set(&mut session.snapshot, get_dist(proj, offset));
            }
            ConfigState::Radius { session, param } => {
                param.set(&mut session.snapshot, get_dist(proj, 0));
            }
            ConfigState::CopyElement { session, param } => {
                param.set(&mut session.snapshot, cursor_element as i32);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigEvent {
    /// `target` is the configurable particle under the cursor (only used in `Ready`);
    /// `at` is the cell to pin sampling to.
    Click {
        target: Option<StackEntry>,
        at: Point,
    },
    Cancel,
    Corrupted,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    None,
    Commit {
        handle: ParticleHandle,
        param: Param,
        value: i32,
    },
    OpenModeMenu {
        handle: ParticleHandle,
        particle: Particle,
        param: Param,
        modes: &'static [&'static str],
    },
}

pub fn transition(state: ConfigState, event: ConfigEvent) -> (ConfigState, Effect) {
    let (target, at) = match event {
        ConfigEvent::Cancel | ConfigEvent::Corrupted => return (ConfigState::Ready, Effect::None),
        ConfigEvent::Click { target, at } => (target, at),
    };

    match state {
        ConfigState::Ready => {
            let Some(entry) = target else {
                return (ConfigState::Ready, Effect::None);
            };
            let Some(kind) = ConfigKind::for_element(entry.particle.element) else {
                return (ConfigState::Ready, Effect::None);
            };
            let session = Session::new(entry.handle, entry.particle, at);
            match kind {
                ConfigKind::Ray { inner, outer, .. } => (
                    ConfigState::RayInner {
                        session,
                        inner,
                        outer,
                    },
                    Effect::None,
                ),
                ConfigKind::Radius { param } => (ConfigState::Radius { session, param }, Effect::None),
                ConfigKind::CopyElement { param } => {
                    (ConfigState::CopyElement { session, param }, Effect::None)
                }
                ConfigKind::ModeMenu { param, modes } => (
                    ConfigState::Ready,
                    Effect::OpenModeMenu {
                        handle: entry.handle,
                        particle: entry.particle,
                        param,
                        modes,
                    },
                ),
            }
        }
        ConfigState::RayInner {
            session,
            inner,
            outer,
        } => {
            let effect = session.commit(inner);
            (
                ConfigState::RayOuter {
                    session,
                    inner,
                    outer,
                },
                effect,
            )
        }
        ConfigState::RayOuter { session, outer, .. } => (ConfigState::Ready, session.commit(outer)),
        ConfigState::Radius { session, param } | ConfigState::CopyElement { session, param } => {
            (ConfigState::Ready, session.commit(param))
        }
    }
}
