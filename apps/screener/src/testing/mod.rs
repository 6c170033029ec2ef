//! Test-only fixtures and in-memory collaborators.

pub mod fixtures;
pub mod memory;
