//! Core - pure math shared by every tool

pub mod geometry;

pub use geometry::{cell_of, get_dist, project_point, Direction, Point};
