//! I/O helpers for the checker binary and the verifier.

pub mod config;
pub mod feedback;
pub mod lines;
