/// User model and identity types
///
/// Users carry one of two roles, assigned at registration and immutable
/// afterwards (no role-change operation exists anywhere in the system).
/// Authorization never needs more than the `(id, role)` pair, which is
/// what [`UserIdentity`] carries through a request.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE user_role AS ENUM ('admin', 'member');
///
/// CREATE TABLE users (
///     id UUID PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     email CITEXT NOT NULL UNIQUE,
///     role user_role NOT NULL,
///     password_hash VARCHAR(255) NOT NULL,
///     avatar_url VARCHAR(512),
///     created_at TIMESTAMPTZ NOT NULL,
///     updated_at TIMESTAMPTZ NOT NULL
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a user account
///
/// - **admin**: creates and owns projects, manages tasks and membership
/// - **member**: participates in projects it is added to and updates the
///   status of tasks assigned to it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Administrator: project owner and manager
    Admin,

    /// Member: project participant
    Member,
}

impl Role {
    /// Converts role to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Member => "member",
        }
    }

    /// Checks whether this is the administrator role
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// User account
///
/// Passwords are stored as Argon2id hashes, never in plaintext. The
/// avatar is a URL-shaped reference owned by the external file store;
/// this record only keeps the string.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address (unique, case-insensitive)
    pub email: String,

    /// Account role, immutable once set
    pub role: Role,

    /// Argon2id password hash, never serialized into responses
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Optional avatar reference (URL into the external file store)
    pub avatar_url: Option<String>,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user record with a fresh id and timestamps
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role, password_hash: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            role,
            password_hash: password_hash.into(),
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The identity pair used for policy decisions
    pub fn identity(&self) -> UserIdentity {
        UserIdentity::new(self.id, self.role)
    }
}

/// Immutable `(id, role)` pair carried through an authenticated request
///
/// Produced by the authentication collaborator (JWT middleware in the
/// API crate) and consumed by every policy decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Authenticated user ID
    pub id: Uuid,

    /// Role of the authenticated user
    pub role: Role,
}

impl UserIdentity {
    /// Creates a new identity pair
    pub fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }

    /// Checks whether the identity carries the administrator role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<&User> for UserIdentity {
    fn from(user: &User) -> Self {
        user.identity()
    }
}

/// Patch for updating a user record
///
/// All fields are optional; only provided fields are applied.
/// `avatar_url` uses a nested option so `Some(None)` clears the
/// reference while `None` leaves it untouched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    /// New display name
    pub name: Option<String>,

    /// New password hash
    pub password_hash: Option<String>,

    /// New avatar reference (use `Some(None)` to clear)
    pub avatar_url: Option<Option<String>>,
}

impl UserPatch {
    /// True when the patch would not change anything
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.password_hash.is_none() && self.avatar_url.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::Admin.as_str(), "admin");
        assert_eq!(Role::Member.as_str(), "member");
    }

    #[test]
    fn test_identity_from_user() {
        let user = User::new("Ada", "ada@example.com", Role::Admin, "$argon2id$x");
        let identity = user.identity();
        assert_eq!(identity.id, user.id);
        assert!(identity.is_admin());
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User::new("Ada", "ada@example.com", Role::Member, "$argon2id$x");
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "ada@example.com");
    }

    #[test]
    fn test_user_patch_is_empty() {
        assert!(UserPatch::default().is_empty());
        let patch = UserPatch {
            avatar_url: Some(None),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
