//! Control laws and target generation
//!
//! This crate provides:
//! - A PID controller with feedforward
//! - Cubic Hermite splines and numerical derivatives
//! - Motion profiles that turn time into targets

pub mod pid;
pub mod profile;
pub mod spline;
pub mod trajectory;

pub use pid::*;
pub use profile::*;
pub use spline::*;
pub use trajectory::*;
