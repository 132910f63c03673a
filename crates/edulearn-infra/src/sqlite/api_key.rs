//! SQLite API key store.
//!
//! Keys are SHA-256 hashed before storage; the plaintext only exists in the
//! return value of [`ApiKeyRepository::issue`].

use chrono::Utc;
use edulearn_core::repository::api_key::{ApiKeyRecord, ApiKeyRepository};
use edulearn_types::actor::Actor;
use edulearn_types::error::RepositoryError;
use sha2::{Digest, Sha256};
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// Prefix identifying Edulearn keys in logs and config files.
pub const KEY_PREFIX: &str = "edl_";

/// SQLite-backed implementation of `ApiKeyRepository`.
#[derive(Clone)]
pub struct SqliteApiKeyRepository {
    pool: DatabasePool,
}

impl SqliteApiKeyRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Compute SHA-256 hash of an API key (lowercase hex).
pub fn hash_api_key(key: &str) -> String {
    let digest = Sha256::digest(key.as_bytes());
    format!("{:x}", digest)
}

fn generate_key() -> String {
    // Two v4 UUIDs give 244 random bits.
    format!(
        "{KEY_PREFIX}{}{}",
        uuid::Uuid::new_v4().simple(),
        uuid::Uuid::new_v4().simple()
    )
}

impl ApiKeyRepository for SqliteApiKeyRepository {
    async fn issue(&self, email: &str, is_staff: bool) -> Result<String, RepositoryError> {
        let plaintext = generate_key();
        let id = uuid::Uuid::now_v7().to_string();

        sqlx::query(
            "INSERT INTO api_keys (id, key_hash, email, is_staff, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(hash_api_key(&plaintext))
        .bind(email)
        .bind(is_staff)
        .bind(format_datetime(&Utc::now()))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        tracing::info!(key_id = %id, is_staff, "api key issued");
        Ok(plaintext)
    }

    async fn resolve(&self, key: &str) -> Result<Option<Actor>, RepositoryError> {
        let row = sqlx::query("SELECT id, email, is_staff FROM api_keys WHERE key_hash = ?")
            .bind(hash_api_key(key))
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let id: String = row.try_get("id").map_err(|e| RepositoryError::Query(e.to_string()))?;
        let email: String = row
            .try_get("email")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let is_staff: bool = row
            .try_get("is_staff")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        // Best effort: a failed timestamp update must not fail the request.
        if let Err(e) = sqlx::query("UPDATE api_keys SET last_used_at = ? WHERE id = ?")
            .bind(format_datetime(&Utc::now()))
            .bind(&id)
            .execute(&self.pool.writer)
            .await
        {
            tracing::warn!(key_id = %id, error = %e, "failed to record api key use");
        }

        Ok(Some(Actor {
            email: Some(email),
            is_staff,
        }))
    }

    async fn list(&self) -> Result<Vec<ApiKeyRecord>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, email, is_staff, created_at, last_used_at FROM api_keys ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let map = |e: sqlx::Error| RepositoryError::Query(e.to_string());
        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            let created_at: String = row.try_get("created_at").map_err(map)?;
            let last_used_at: Option<String> = row.try_get("last_used_at").map_err(map)?;
            records.push(ApiKeyRecord {
                id: row.try_get("id").map_err(map)?,
                email: row.try_get("email").map_err(map)?,
                is_staff: row.try_get("is_staff").map_err(map)?,
                created_at: parse_datetime(&created_at)?,
                last_used_at: last_used_at.as_deref().map(parse_datetime).transpose()?,
            });
        }
        Ok(records)
    }
}
