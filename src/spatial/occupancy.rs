//! Occupancy maps - cell -> particle lookup, one layer for matter and one for energy
//!
//! Invariant (after reconciliation): a non-empty cell refers to a live particle whose
//! rounded position is that cell, and every live particle is registered in exactly
//! the layer matching its energy classification.

use crate::core::Point;
use crate::elements::ElementId;
use crate::particles::ParticleHandle;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    Matter,
    Energy,
}

impl Layer {
    #[inline]
    pub fn of(is_energy: bool) -> Self {
        if is_energy {
            Layer::Energy
        } else {
            Layer::Matter
        }
    }
}

/// Occupancy entry: which particle holds the cell and its element at registration time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRef {
    pub handle: ParticleHandle,
    pub element: ElementId,
}

pub struct OccupancyLayer {
    width: u32,
    height: u32,
    cells: Vec<Option<CellRef>>,
}

impl OccupancyLayer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![None; (width as usize) * (height as usize)],
        }
    }

    #[inline]
    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width as i32 && p.y >= 0 && p.y < self.height as i32
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if self.in_bounds(p) {
            Some((p.y as usize) * (self.width as usize) + p.x as usize)
        } else {
            None
        }
    }

    pub fn get(&self, p: Point) -> Option<CellRef> {
        self.index(p).and_then(|idx| self.cells[idx])
    }

    /// Out-of-bounds writes are ignored
    pub fn set(&mut self, p: Point, entry: Option<CellRef>) {
        if let Some(idx) = self.index(p) {
            self.cells[idx] = entry;
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Occupied cells with their coordinates
    pub fn iter_occupied(&self) -> impl Iterator<Item = (Point, CellRef)> + '_ {
        let width = self.width as usize;
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.map(|c| (Point::new((idx % width) as i32, (idx / width) as i32), c))
        })
    }
}

pub struct OccupancyMaps {
    pub matter: OccupancyLayer,
    pub energy: OccupancyLayer,
}

impl OccupancyMaps {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            matter: OccupancyLayer::new(width, height),
            energy: OccupancyLayer::new(width, height),
        }
    }

    #[inline]
    pub fn layer(&self, layer: Layer) -> &OccupancyLayer {
        match layer {
            Layer::Matter => &self.matter,
            Layer::Energy => &self.energy,
        }
    }

    #[inline]
    pub fn layer_mut(&mut self, layer: Layer) -> &mut OccupancyLayer {
        match layer {
            Layer::Matter => &mut self.matter,
            Layer::Energy => &mut self.energy,
        }
    }

    pub fn clear(&mut self) {
        self.matter.clear();
        self.energy.clear();
    }
}
