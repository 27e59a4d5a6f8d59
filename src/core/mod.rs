//! Projection math, tile boxes and canvas planning.

pub mod builder;
pub mod config;
pub mod constants;
pub mod geo;
pub mod planner;
pub mod projection;
pub mod tile_box;
