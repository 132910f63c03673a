//! Shared domain types for Edulearn.
//!
//! This crate contains the core domain types used across the Edulearn
//! platform: Course, Lesson, Student, the calling Actor, enrollment and
//! progress results, configuration and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod actor;
pub mod config;
pub mod course;
pub mod enrollment;
pub mod error;
pub mod lesson;
pub mod student;
