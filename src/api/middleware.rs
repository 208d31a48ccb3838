//! API middleware
//!
//! Contains the shared application state, the error type every handler
//! short-circuits into, and the session authentication middleware.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

use crate::models::User;
use crate::services::{
    ArticleService, CategoryService, CommentService, MarkdownRenderer, NavService, PageService,
    SettingsService, UserService, WikiService,
};
use crate::theme::ThemeEngine;

/// Application state containing shared services.
///
/// The sign-in provider list is computed once at startup from
/// configuration and is immutable afterwards.
#[derive(Clone)]
pub struct AppState {
    pub article_service: Arc<ArticleService>,
    pub category_service: Arc<CategoryService>,
    pub wiki_service: Arc<WikiService>,
    pub page_service: Arc<PageService>,
    pub comment_service: Arc<CommentService>,
    pub nav_service: Arc<NavService>,
    pub settings_service: Arc<SettingsService>,
    pub user_service: Arc<UserService>,
    pub markdown: Arc<MarkdownRenderer>,
    pub theme_engine: Arc<RwLock<ThemeEngine>>,
    /// Enabled external sign-in provider names
    pub signins: Arc<Vec<String>>,
}

/// Authenticated user extracted from the request
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Error response for API errors.
///
/// Every handler failure funnels through this type; `IntoResponse` maps
/// the error code to an HTTP status, which is the single place error
/// formatting happens.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new("FORBIDDEN", message)
    }

    pub fn not_found(resource: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} not found", resource))
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error.code.as_str() {
            "UNAUTHORIZED" => StatusCode::UNAUTHORIZED,
            "FORBIDDEN" => StatusCode::FORBIDDEN,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}

/// Extract the session token from the request
fn extract_session_token(request: &Request) -> Option<String> {
    if let Some(auth_header) = request.headers().get(header::AUTHORIZATION) {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }

    if let Some(cookie_header) = request.headers().get(header::COOKIE) {
        if let Ok(cookie_str) = cookie_header.to_str() {
            for cookie in cookie_str.split(';') {
                let cookie = cookie.trim();
                if let Some(token) = cookie.strip_prefix("session=") {
                    return Some(token.to_string());
                }
            }
        }
    }

    None
}

/// Optional authentication middleware.
///
/// The public surface never requires a login to read, so a missing or
/// invalid token simply leaves the request anonymous. Handlers that do
/// need a user (comment creation) check for the extension themselves.
pub async fn optional_auth(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    if let Some(token) = extract_session_token(&request) {
        if let Ok(Some(user)) = state.user_service.validate_session(&token).await {
            request.extensions_mut().insert(AuthenticatedUser(user));
        }
    }
    next.run(request).await
}
