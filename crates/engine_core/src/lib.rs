//! Core flight types and utilities for SkyGlitch.
//!
//! This crate provides the foundational types used across all simulation systems:
//! - Aircraft orientation and the clamped percentage gauge
//! - Flight state and tunable flight constants
//! - Frame timing and `dt` sanitizing
//! - World object components stored in the ECS
//! - Discrete flight events consumed by HUD, audio, and the mission log

pub mod components;
pub mod error;
pub mod events;
pub mod flight;
pub mod time;
pub mod transform;

pub use components::*;
pub use error::*;
pub use events::*;
pub use flight::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Quat, Vec3};
pub use hecs::{Entity, World};
