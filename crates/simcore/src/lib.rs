//! Shared building blocks for the flywheel simulation crates
//!
//! This crate provides:
//! - Run timing configuration (`SimConfig`)
//! - The error type shared by every crate (`SimError`)
//! - Callback context and registration ids

pub mod config;
pub mod error;
pub mod math;
pub mod traits;

pub use config::*;
pub use error::*;
pub use math::*;
pub use traits::*;
