//! Backend test support utilities
//!
//! Shared helpers for the engine's integration test binaries: unified logging
//! initialization, problem-details assertions and unique test identifiers.

pub mod problem_details;
pub mod test_logging;
pub mod unique_helpers;
