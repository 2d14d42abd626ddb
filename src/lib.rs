//! Thornveil - Turn-Based Combat Resolution Engine

pub mod combat;
pub mod core;
