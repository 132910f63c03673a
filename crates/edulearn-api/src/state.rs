//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! Services are generic over repository traits, but AppState pins them to the
//! SQLite implementations.

use std::path::PathBuf;
use std::sync::Arc;

use edulearn_core::service::catalog::CatalogService;
use edulearn_core::service::enrollment::EnrollmentService;
use edulearn_infra::sqlite::api_key::SqliteApiKeyRepository;
use edulearn_infra::sqlite::course::SqliteCourseRepository;
use edulearn_infra::sqlite::lesson::SqliteLessonRepository;
use edulearn_infra::sqlite::pool::{database_url, DatabasePool};
use edulearn_infra::sqlite::student::SqliteStudentRepository;
use edulearn_types::config::GlobalConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteCatalogService = CatalogService<SqliteCourseRepository, SqliteLessonRepository>;

pub type ConcreteEnrollmentService =
    EnrollmentService<SqliteCourseRepository, SqliteLessonRepository, SqliteStudentRepository>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ConcreteCatalogService>,
    pub enrollment: Arc<ConcreteEnrollmentService>,
    pub api_keys: SqliteApiKeyRepository,
    pub config: GlobalConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: connect to DB, wire services.
    ///
    /// `config` is loaded by the caller so tracing can be set up from it first.
    pub async fn init(data_dir: PathBuf, config: GlobalConfig) -> anyhow::Result<Self> {
        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_pool = DatabasePool::new(&database_url(&data_dir)).await?;

        Ok(Self::from_pool(db_pool, data_dir, config))
    }

    /// Wire services over an already-open pool.
    pub fn from_pool(db_pool: DatabasePool, data_dir: PathBuf, config: GlobalConfig) -> Self {
        let catalog = CatalogService::new(
            SqliteCourseRepository::new(db_pool.clone()),
            SqliteLessonRepository::new(db_pool.clone()),
        );
        let enrollment = EnrollmentService::new(
            SqliteCourseRepository::new(db_pool.clone()),
            SqliteLessonRepository::new(db_pool.clone()),
            SqliteStudentRepository::new(db_pool.clone()),
        );

        Self {
            catalog: Arc::new(catalog),
            enrollment: Arc::new(enrollment),
            api_keys: SqliteApiKeyRepository::new(db_pool),
            config,
            data_dir,
        }
    }
}

/// State over a fresh database in a temp dir. Keep the `TempDir` alive for
/// the duration of the test.
#[cfg(test)]
pub(crate) async fn test_state() -> (AppState, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let pool = DatabasePool::new(&database_url(dir.path())).await.unwrap();
    let state = AppState::from_pool(pool, dir.path().to_path_buf(), GlobalConfig::default());
    (state, dir)
}
