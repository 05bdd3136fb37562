//! Spatial - particle storage, occupancy layers and cursor sampling

pub mod occupancy;
pub mod particles;
pub mod sample;
pub mod world;
