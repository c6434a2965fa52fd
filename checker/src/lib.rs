//! Output verification engine for judged programming problems.
//!
//! Given a test input, a reference output and a candidate program's output,
//! the engine splits the outputs into `Case #<n>:` windows, applies a
//! configurable comparison policy to every case, and reduces the recorded
//! diagnostics to a single verdict. The architecture mirrors a strict split:
//!
//! - **[`core`]**: Pure, deterministic logic (comparators, strategies,
//!   diagnostics). No I/O, fully testable in isolation.
//! - **[`io`]**: Line reading, configuration and feedback files.
//!
//! Orchestration modules ([`segment`], [`verify`]) drive the per-case loop.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod segment;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod verify;
