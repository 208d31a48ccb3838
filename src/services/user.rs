//! User service
//!
//! Session validation for the public surface. Session creation (login,
//! OAuth2 callbacks) lives elsewhere; this service only resolves an
//! existing token to its user.

use anyhow::Result;
use std::sync::Arc;

use crate::db::repositories::{SessionRepository, UserRepository};
use crate::models::User;

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>, session_repo: Arc<dyn SessionRepository>) -> Self {
        Self {
            user_repo,
            session_repo,
        }
    }

    /// Resolve a session token to its user.
    ///
    /// Returns None for unknown or expired tokens and for banned users.
    pub async fn validate_session(&self, token: &str) -> Result<Option<User>> {
        let session = match self.session_repo.get_by_id(token).await? {
            Some(session) if !session.is_expired() => session,
            _ => return Ok(None),
        };

        let user = match self.user_repo.get_by_id(session.user_id).await? {
            Some(user) if !user.is_banned() => user,
            _ => return Ok(None),
        };

        Ok(Some(user))
    }
}
