//! API layer - HTTP handlers and routing
//!
//! The public surface is the theme router: server-rendered pages for
//! articles, categories, wikis and free-standing pages, plus the
//! comment-creation endpoints. Static theme assets are served from the
//! active theme's `static/` directory.

pub mod middleware;
pub mod theme;

use axum::{middleware as axum_middleware, Router};
use std::path::PathBuf;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub use middleware::{ApiError, AppState, AuthenticatedUser};

/// Build the complete router with middleware.
///
/// `theme_static` is the active theme's static asset directory,
/// resolved at startup before the engine goes behind its lock.
pub fn build_router(state: AppState, theme_static: PathBuf) -> Router {
    Router::new()
        .merge(theme::router())
        .nest_service("/static", ServeDir::new(theme_static))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::optional_auth,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
