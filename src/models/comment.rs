//! Comment model
//!
//! Comments attach to one of three reference kinds: an article, a wiki,
//! or a single wiki page. The kind is a closed enum so that dispatch on
//! it is exhaustive.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::User;

/// The kind of entity a comment is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentRefType {
    Article,
    Wiki,
    WikiPage,
}

impl CommentRefType {
    /// Database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentRefType::Article => "article",
            CommentRefType::Wiki => "wiki",
            CommentRefType::WikiPage => "wikipage",
        }
    }

    /// Parse from the database string representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "article" => Some(CommentRefType::Article),
            "wiki" => Some(CommentRefType::Wiki),
            "wikipage" => Some(CommentRefType::WikiPage),
            _ => None,
        }
    }
}

impl std::fmt::Display for CommentRefType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Comment entity.
///
/// The author's name and avatar are snapshotted at creation time so
/// that rendering a thread never needs a user lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub ref_type: CommentRefType,
    pub ref_id: i64,
    pub user_id: i64,
    pub username: String,
    /// Gravatar URL derived from the author's email
    pub user_image: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a comment
#[derive(Debug, Clone)]
pub struct CreateCommentInput {
    pub ref_type: CommentRefType,
    pub ref_id: i64,
    pub user_id: i64,
    pub username: String,
    pub user_image: String,
    pub content: String,
}

impl CreateCommentInput {
    /// Build the input for `user` commenting on the given reference
    pub fn from_user(ref_type: CommentRefType, ref_id: i64, user: &User, content: String) -> Self {
        Self {
            ref_type,
            ref_id,
            user_id: user.id,
            username: user.username.clone(),
            user_image: gravatar_url(&user.email),
            content,
        }
    }
}

/// Generate a Gravatar URL from an email address
pub fn gravatar_url(email: &str) -> String {
    if email.is_empty() {
        return "https://www.gravatar.com/avatar/?d=mp&s=80".to_string();
    }
    let hash = format!("{:x}", md5::compute(email.trim().to_lowercase()));
    format!("https://www.gravatar.com/avatar/{}?d=mp&s=80", hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;

    #[test]
    fn test_ref_type_roundtrip() {
        for rt in [
            CommentRefType::Article,
            CommentRefType::Wiki,
            CommentRefType::WikiPage,
        ] {
            assert_eq!(CommentRefType::parse(rt.as_str()), Some(rt));
        }
        assert_eq!(CommentRefType::parse("category"), None);
    }

    #[test]
    fn test_ref_type_serde_tags() {
        assert_eq!(
            serde_json::to_string(&CommentRefType::WikiPage).unwrap(),
            "\"wikipage\""
        );
    }

    #[test]
    fn test_input_snapshots_author() {
        let mut user = User::new(
            "alice".to_string(),
            "Alice@Example.com ".to_string(),
            UserRole::Subscriber,
        );
        user.id = 7;

        let input =
            CreateCommentInput::from_user(CommentRefType::Wiki, 3, &user, "nice".to_string());
        assert_eq!(input.user_id, 7);
        assert_eq!(input.username, "alice");
        assert_eq!(input.ref_id, 3);
        // Gravatar hashes the trimmed, lowercased address
        assert_eq!(input.user_image, gravatar_url("alice@example.com"));
    }

    #[test]
    fn test_gravatar_url_empty_email() {
        assert_eq!(
            gravatar_url(""),
            "https://www.gravatar.com/avatar/?d=mp&s=80"
        );
    }
}
