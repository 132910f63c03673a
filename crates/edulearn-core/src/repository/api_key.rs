//! API key store trait definition.
//!
//! Keys are bearer credentials that resolve to an [`Actor`]. Only a hash of
//! each key is persisted; the plaintext is returned once, at issue time.

use chrono::{DateTime, Utc};

use edulearn_types::actor::Actor;
use edulearn_types::error::RepositoryError;

/// Stored metadata for an issued key (never includes the key itself).
#[derive(Debug, Clone)]
pub struct ApiKeyRecord {
    pub id: String,
    pub email: String,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
}

pub trait ApiKeyRepository: Send + Sync {
    /// Issue a new key for `email`. Returns the plaintext key.
    fn issue(
        &self,
        email: &str,
        is_staff: bool,
    ) -> impl std::future::Future<Output = Result<String, RepositoryError>> + Send;

    /// Resolve a plaintext key to the actor it was issued for.
    fn resolve(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<Actor>, RepositoryError>> + Send;

    /// All issued keys, newest first.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<ApiKeyRecord>, RepositoryError>> + Send;
}
