use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;

/// Maximum length of a student's display name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of an email address (RFC 5321 path limit).
pub const MAX_EMAIL_LEN: usize = 254;

/// Unique identifier for a student (SQLite integer rowid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub i64);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A learner, identified by a unique email.
///
/// Created lazily on first enrollment and never deleted by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub email: String,
    pub name: Option<String>,
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => f.write_str(name),
            _ => f.write_str(&self.email),
        }
    }
}

/// A student enrolled in a course, with the time the enrollment was recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    pub student: Student,
    pub enrolled_at: DateTime<Utc>,
}

/// Trim and sanity-check an email address.
///
/// Only the shape is checked (a single `@` with non-empty local part and a
/// dotted domain); deliverability is not our concern.
pub fn normalize_email(raw: &str) -> Result<String, String> {
    let email = raw.trim();
    if email.is_empty() {
        return Err("email is required".to_string());
    }
    if email.chars().count() > MAX_EMAIL_LEN {
        return Err(format!("email must be at most {MAX_EMAIL_LEN} characters"));
    }
    if email.contains(char::is_whitespace) {
        return Err(format!("invalid email: '{email}'"));
    }
    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| format!("invalid email: '{email}'"))?;
    if local.is_empty()
        || domain.contains('@')
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
    {
        return Err(format!("invalid email: '{email}'"));
    }
    Ok(email.to_string())
}
