//! Business logic and repository trait definitions for Edulearn.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements. It depends only on `edulearn-types` -- never on
//! `edulearn-infra` or any database/IO crate.

pub mod repository;
pub mod service;
