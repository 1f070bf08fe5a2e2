//! CLI command implementations.

pub mod eval;
pub mod job;
pub mod version;
