//! Deterministic, pure logic shared by the checker.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! case windows and return deterministic outputs suitable for tests.

pub mod checker;
pub mod comparator;
pub mod diagnostics;
pub mod exact;
pub mod header;
pub mod permutation;
pub mod precision;
pub mod rational;
pub mod strategy;
pub mod types;
