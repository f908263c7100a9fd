//! Arcade flight physics for SkyGlitch: force integration and the resource/damage model.

pub mod damage;
pub mod dynamics;

pub use damage::*;
pub use dynamics::*;
