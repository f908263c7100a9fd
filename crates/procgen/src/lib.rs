//! Procedural generation for the flight world: scattered checkpoints and hazards.

pub mod world;

pub use world::*;
