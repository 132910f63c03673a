//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (edulearn-infra) implements. The core crate never depends on any
//! specific storage technology.

pub mod api_key;
pub mod course;
pub mod lesson;
pub mod student;

#[cfg(test)]
pub(crate) mod memory;
