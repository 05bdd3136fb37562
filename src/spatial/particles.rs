//! Particle store - fixed-capacity dense array addressed by handle
//!
//! A handle is a slot index. Slots are reused after a particle dies, so a handle
//! only identifies a particle while its element is non-empty.

use std::collections::BTreeSet;

use crate::core::{cell_of, Point};
use crate::elements::{ElementId, EL_NONE};

pub type ParticleHandle = usize;

/// One particle record. `life`, `tmp` and `tmp2` mean different things per element
/// (aim distance, secondary distance, countdown, mode index...).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Particle {
    pub element: ElementId,
    pub x: f32,
    pub y: f32,
    pub life: i32,
    pub tmp: i32,
    pub tmp2: i32,
}

impl Particle {
    pub fn new(element: ElementId, x: f32, y: f32) -> Self {
        Self {
            element,
            x,
            y,
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.element != EL_NONE
    }

    /// Rounded cell this particle occupies
    #[inline]
    pub fn cell(&self) -> Point {
        cell_of(self.x, self.y)
    }

    /// Same element at the same rounded cell. Other fields may differ.
    pub fn is_same_part(&self, other: &Particle) -> bool {
        self.element == other.element && self.cell() == other.cell()
    }
}

pub struct ParticleStore {
    capacity: usize,
    // High-water slice: every slot up to the last active one. Trailing dead slots are popped.
    parts: Vec<Particle>,
    free: BTreeSet<ParticleHandle>,
    live: usize,
}

impl ParticleStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            parts: Vec::new(),
            free: BTreeSet::new(),
            live: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Slots `0..=last_active`, dead ones included
    pub fn active(&self) -> &[Particle] {
        &self.parts
    }

    pub fn active_mut(&mut self) -> &mut [Particle] {
        &mut self.parts
    }

    pub fn get(&self, handle: ParticleHandle) -> Option<&Particle> {
        self.parts.get(handle)
    }

    pub fn get_mut(&mut self, handle: ParticleHandle) -> Option<&mut Particle> {
        self.parts.get_mut(handle)
    }

    /// Store a particle in the lowest free slot. `None` when the store is full.
    pub fn alloc(&mut self, particle: Particle) -> Option<ParticleHandle> {
        let handle = match self.free.pop_first() {
            Some(handle) => {
                self.parts[handle] = particle;
                handle
            }
            None => {
                if self.parts.len() >= self.capacity {
                    return None;
                }
                self.parts.push(particle);
                self.parts.len() - 1
            }
        };
        self.live += 1;
        Some(handle)
    }

    pub fn kill(&mut self, handle: ParticleHandle) -> Option<Particle> {
        let slot = self.parts.get_mut(handle)?;
        if !slot.is_alive() {
            return None;
        }
        let old = std::mem::take(slot);
        self.live -= 1;
        self.free.insert(handle);

        // Shrink the high-water mark past trailing dead slots
        while let Some(last) = self.parts.last() {
            if last.is_alive() {
                break;
            }
            let idx = self.parts.len() - 1;
            self.free.remove(&idx);
            self.parts.pop();
        }
        Some(old)
    }

    pub fn clear(&mut self) {
        self.parts.clear();
        self.free.clear();
        self.live = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{EL_DUST, EL_STNE};

    #[test]
    fn alloc_reuses_lowest_free_slot() {
        let mut store = ParticleStore::new(8);
        let a = store.alloc(Particle::new(EL_DUST, 1.0, 1.0)).unwrap();
        let b = store.alloc(Particle::new(EL_DUST, 2.0, 1.0)).unwrap();
        let c = store.alloc(Particle::new(EL_DUST, 3.0, 1.0)).unwrap();
        assert_eq!((a, b, c), (0, 1, 2));

        store.kill(a);
        store.kill(b);
        assert_eq!(store.alloc(Particle::new(EL_STNE, 0.0, 0.0)), Some(0));
        assert_eq!(store.live_count(), 2);
    }

    #[test]
    fn kill_shrinks_trailing_dead_slots() {
        let mut store = ParticleStore::new(8);
        for i in 0..4 {
            store.alloc(Particle::new(EL_DUST, i as f32, 0.0));
        }
        store.kill(2);
        assert_eq!(store.active().len(), 4);
        store.kill(3);
        assert_eq!(store.active().len(), 2);
        assert_eq!(store.alloc(Particle::new(EL_DUST, 9.0, 0.0)), Some(2));
    }

    #[test]
    fn alloc_fails_when_full() {
        let mut store = ParticleStore::new(1);
        assert!(store.alloc(Particle::new(EL_DUST, 0.0, 0.0)).is_some());
        assert!(store.alloc(Particle::new(EL_DUST, 1.0, 0.0)).is_none());
    }

    #[test]
    fn same_part_compares_type_and_cell() {
        let a = Particle { tmp: 4, ..Particle::new(EL_DUST, 3.2, 4.4) };
        let b = Particle::new(EL_DUST, 2.6, 3.9);
        assert!(a.is_same_part(&b));
        assert!(!a.is_same_part(&Particle::new(EL_STNE, 3.0, 4.0)));
        assert!(!a.is_same_part(&Particle::new(EL_DUST, 3.0, 5.0)));
    }
}
