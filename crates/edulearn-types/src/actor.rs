//! The caller of a service operation.
//!
//! Role checks are explicit: every catalog mutation receives an `Actor` and
//! decides from its `is_staff` bit, instead of consulting ambient state.

use serde::{Deserialize, Serialize};

/// Who is performing an operation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Actor {
    /// Email of the authenticated user. `None` for anonymous callers.
    pub email: Option<String>,
    /// Staff users may create, update and delete courses and lessons.
    pub is_staff: bool,
}

impl Actor {
    /// An unauthenticated caller.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// An authenticated, non-staff user.
    pub fn user(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            is_staff: false,
        }
    }

    /// An authenticated staff user.
    pub fn staff(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            is_staff: true,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.email.is_some()
    }
}
