//! Stack / unstack transform over a selection of handles
//!
//! Stack order is carried by handles: after stacking, ascending handle order within the
//! stack equals the row-major order the particles had before they were collapsed.
//! The records are permuted across the selected slots to make that true, so handles keep
//! their numeric identity but may describe a different particle afterwards.

use crate::core::Point;
use crate::occupancy::{CellRef, Layer};
use crate::particles::{Particle, ParticleHandle};
use crate::world::ParticleWorld;

pub const MSG_UNSTACK_NO_SPACE: &str = "Warning: Not enough space to unstack fully.";
pub const MSG_MANY_STACKED: &str = "Warning: More than 5 stacked particles.";

/// Stacks deeper than this get an advisory (the operation still goes through)
pub const STACK_ADVISORY_DEPTH: usize = 5;

/// Explicit depth order of one stack: top first, ascending handle
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StackOrder(Vec<ParticleHandle>);

impl StackOrder {
    pub fn from_handles(handles: &[ParticleHandle]) -> Self {
        let mut order = handles.to_vec();
        order.sort_unstable();
        order.dedup();
        Self(order)
    }

    pub fn handles(&self) -> &[ParticleHandle] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The last `n` entries (the bottom of the stack)
    pub fn tail(&self, n: usize) -> &[ParticleHandle] {
        &self.0[self.0.len() - n.min(self.0.len())..]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StackOutcome {
    /// Empty selection
    Nothing,
    Stacked {
        cell: Point,
        order: StackOrder,
    },
    Unstacked {
        cell: Point,
        /// Handles that were laid out, with their new cells
        placed: Vec<(ParticleHandle, Point)>,
        total: usize,
    },
}

/// Suppresses repeated "not enough space" notices for the same stroke anchor
#[derive(Clone, Debug, Default)]
pub struct NoticeGate {
    last_shown: Option<Point>,
}

impl NoticeGate {
    pub fn should_show(&mut self, key: Point) -> bool {
        if self.last_shown == Some(key) {
            return false;
        }
        self.last_shown = Some(key);
        true
    }

    pub fn last_shown(&self) -> Option<Point> {
        self.last_shown
    }
}

/// Stack the selection if it is spread out, unstack it if it already shares one cell.
pub fn process_selection<W: ParticleWorld + ?Sized>(
    world: &mut W,
    handles: &[ParticleHandle],
    notice_key: Point,
    notices: &mut NoticeGate,
) -> StackOutcome {
    let order = StackOrder::from_handles(handles);
    let order = StackOrder(
        order
            .handles()
            .iter()
            .copied()
            .filter(|h| world.live_particle(*h).is_some())
            .collect(),
    );
    if order.is_empty() {
        return StackOutcome::Nothing;
    }

    let first = world.particles()[order.handles()[0]].cell();
    let mut same_pos = true;
    let mut top_left = first;
    for &h in &order.handles()[1..] {
        let c = world.particles()[h].cell();
        if c != first {
            same_pos = false;
        }
        top_left.x = top_left.x.min(c.x);
        top_left.y = top_left.y.min(c.y);
    }

    if same_pos {
        unstack(world, &order, first, notice_key, notices)
    } else {
        stack(world, order, top_left)
    }
}

fn unstack<W: ParticleWorld + ?Sized>(
    world: &mut W,
    order: &StackOrder,
    cell: Point,
    notice_key: Point,
    notices: &mut NoticeGate,
) -> StackOutcome {
    let count = order.len();

    // Find the first blocked row below the shared cell
    let mut limit = count;
    for i in 1..count {
        let below = Point::new(cell.x, cell.y + i as i32);
        let blocked = !world.in_bounds(below)
            || world.cell(Layer::Matter, below).is_some()
            || world.cell(Layer::Energy, below).is_some();
        if blocked {
            limit = i;
            if notices.should_show(notice_key) {
                log::warn!("unstack at {:?} limited to {} of {}", cell, limit, count);
                world.notify(MSG_UNSTACK_NO_SPACE);
            }
            break;
        }
    }

    // Only the trailing `limit` handles move; the first of them stays on the shared cell
    let mut placed = Vec::with_capacity(limit);
    for (k, &handle) in order.tail(limit).iter().enumerate() {
        let Some(part) = world.particle_mut(handle) else {
            continue;
        };
        part.y += k as f32;
        let element = part.element;
        let new_cell = part.cell();
        let layer = world.layer_of(element);
        world.set_cell(layer, new_cell, Some(CellRef { handle, element }));
        placed.push((handle, new_cell));
    }

    StackOutcome::Unstacked {
        cell,
        placed,
        total: count,
    }
}

fn stack<W: ParticleWorld + ?Sized>(world: &mut W, order: StackOrder, top_left: Point) -> StackOutcome {
    if order.len() > STACK_ADVISORY_DEPTH {
        log::warn!("stacking {} particles at {:?}", order.len(), top_left);
        world.notify(MSG_MANY_STACKED);
    }

    let mut records: Vec<Particle> = order
        .handles()
        .iter()
        .map(|&h| world.particles()[h])
        .collect();
    records.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));

    let particles = world.particles_mut();
    for (&handle, record) in order.handles().iter().zip(records) {
        particles[handle] = Particle {
            x: top_left.x as f32,
            y: top_left.y as f32,
            ..record
        };
    }

    StackOutcome::Stacked {
        cell: top_left,
        order,
    }
}
