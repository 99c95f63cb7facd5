//! # Domain Models
//!
//! Pure font-stylesheet types with minimal dependencies (`serde`, `strum`).
//! Keep it lean: no I/O or registry logic, just data, defaults, and lenient parsing.

pub mod config;
pub mod constants;
pub mod options;
pub mod status;
