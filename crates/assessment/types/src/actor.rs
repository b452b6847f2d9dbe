//! Actor identity used to stamp decisions and authorize edits.

use serde::{Deserialize, Serialize};

/// Role of the actor performing an operation, as reported by the
/// authentication collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorRole {
    /// May create and edit their own assessments.
    Submitter,
    /// May decide the level they are assigned to.
    Approver,
    /// May edit any assessment; edits count as submitter edits for the
    /// reset policy.
    Admin,
}

/// The identity stamped onto decisions and audit fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Opaque identity from the auth collaborator.
    pub id: String,
    /// Display name recorded alongside decisions.
    pub name: String,
    /// Role used for authorization checks.
    pub role: ActorRole,
}

impl Actor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: ActorRole) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
        }
    }

    /// Check if this actor holds administrative privilege.
    pub fn is_admin(&self) -> bool {
        self.role == ActorRole::Admin
    }
}
