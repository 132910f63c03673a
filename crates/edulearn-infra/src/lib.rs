//! Infrastructure layer for Edulearn.
//!
//! Contains implementations of the repository traits defined in `edulearn-core`:
//! SQLite storage for the catalog, students and API keys, plus the data
//! directory and `config.toml` loading.

pub mod config;
pub mod data_dir;
pub mod sqlite;
