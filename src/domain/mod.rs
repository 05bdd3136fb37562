//! Domain - element classification, content, brushes and editor configuration

pub mod brush;
pub mod config;
pub mod content;
pub mod elements;
pub mod error;
pub mod filter_modes;
