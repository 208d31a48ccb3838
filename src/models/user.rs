//! User model
//!
//! Defines the User entity and the role ladder used for permission
//! checks on the public site surface. Password handling and account
//! management live outside this crate; users arrive here already
//! authenticated through a session token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A registered user.
///
/// The public surface only ever reads users: the session middleware
/// resolves a token to a `User`, and comment creation snapshots the
/// author's name and avatar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: i64,
    /// Username (unique)
    pub username: String,
    /// Email address (unique)
    pub email: String,
    /// User role
    pub role: UserRole,
    /// User status (active/banned)
    pub status: UserStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, email: String, role: UserRole) -> Self {
        Self {
            id: 0, // Will be set by the database
            username,
            email,
            role,
            status: UserStatus::Active,
            created_at: Utc::now(),
        }
    }

    /// Check if the user holds at least the given role
    pub fn has_role(&self, required: UserRole) -> bool {
        self.role.at_least(required)
    }

    /// Check if the user may post comments.
    ///
    /// Requires an active account with at least subscriber role.
    pub fn can_comment(&self) -> bool {
        self.status == UserStatus::Active && self.has_role(UserRole::Subscriber)
    }

    pub fn is_banned(&self) -> bool {
        self.status == UserStatus::Banned
    }
}

/// User role for authorization.
///
/// Roles form a ladder: every role implies the permissions of the roles
/// below it. Subscriber is the lowest registered role and the minimum
/// required to comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Administrator - full access
    Admin,
    /// Editor - can edit all content
    Editor,
    /// Author - can publish own content
    Author,
    /// Subscriber - can read and comment
    Subscriber,
}

impl UserRole {
    /// Numeric rank, lower is more privileged
    fn rank(self) -> u8 {
        match self {
            UserRole::Admin => 0,
            UserRole::Editor => 1,
            UserRole::Author => 2,
            UserRole::Subscriber => 3,
        }
    }

    /// Check whether this role grants at least `required`'s privileges
    pub fn at_least(self, required: UserRole) -> bool {
        self.rank() <= required.rank()
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Subscriber
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::Editor => write!(f, "editor"),
            UserRole::Author => write!(f, "author"),
            UserRole::Subscriber => write!(f, "subscriber"),
        }
    }
}

impl FromStr for UserRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "editor" => Ok(UserRole::Editor),
            "author" => Ok(UserRole::Author),
            "subscriber" => Ok(UserRole::Subscriber),
            _ => Err(anyhow::anyhow!("Invalid user role: {}", s)),
        }
    }
}

/// User account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Active - normal access
    Active,
    /// Banned - cannot comment or sign in
    Banned,
}

impl Default for UserStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Banned => write!(f, "banned"),
        }
    }
}

impl FromStr for UserStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(UserStatus::Active),
            "banned" => Ok(UserStatus::Banned),
            _ => Err(anyhow::anyhow!("Invalid user status: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_role(role: UserRole) -> User {
        User::new("test".to_string(), "test@example.com".to_string(), role)
    }

    #[test]
    fn test_role_ladder() {
        assert!(UserRole::Admin.at_least(UserRole::Subscriber));
        assert!(UserRole::Editor.at_least(UserRole::Author));
        assert!(UserRole::Subscriber.at_least(UserRole::Subscriber));
        assert!(!UserRole::Subscriber.at_least(UserRole::Author));
        assert!(!UserRole::Author.at_least(UserRole::Editor));
    }

    #[test]
    fn test_can_comment_by_role() {
        assert!(user_with_role(UserRole::Admin).can_comment());
        assert!(user_with_role(UserRole::Editor).can_comment());
        assert!(user_with_role(UserRole::Author).can_comment());
        assert!(user_with_role(UserRole::Subscriber).can_comment());
    }

    #[test]
    fn test_banned_user_cannot_comment() {
        let mut user = user_with_role(UserRole::Admin);
        user.status = UserStatus::Banned;
        assert!(!user.can_comment());
        assert!(user.is_banned());
    }

    #[test]
    fn test_role_roundtrip() {
        for role in [
            UserRole::Admin,
            UserRole::Editor,
            UserRole::Author,
            UserRole::Subscriber,
        ] {
            assert_eq!(UserRole::from_str(&role.to_string()).unwrap(), role);
        }
        assert!(UserRole::from_str("guest").is_err());
    }

    #[test]
    fn test_role_default() {
        assert_eq!(UserRole::default(), UserRole::Subscriber);
    }
}
