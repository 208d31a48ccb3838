//! Theme routes
//!
//! The public site surface: every route fetches its entities through
//! the domain services, assembles a view model, and hands it to the
//! active theme for rendering. Comment creation is the one write path
//! and returns the created comment as data instead of a page.
//!
//! Handlers are linear pipelines: each awaited step either produces the
//! value the next step needs or short-circuits into [`ApiError`].

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::Html,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use tera::Context as TeraContext;

use crate::api::middleware::{ApiError, AppState, AuthenticatedUser};
use crate::models::{Comment, CommentRefType, ListParams, User};

/// Build the theme router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/category/{id}", get(category))
        .route("/article/{id}", get(article))
        .route("/article/{id}/comment", post(comment_on_article))
        .route("/page/{alias}", get(page))
        .route("/wiki/{wiki_id}", get(wiki))
        .route("/wiki/{wiki_id}/comment", post(comment_on_wiki))
        .route("/wiki/{wiki_id}/{page_id}", get(wiki_page))
        .route("/wikipage/{id}/comment", post(comment_on_wiki_page))
}

/// Query parameters for paginated listings
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

/// Request body for comment creation
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub content: Option<String>,
}

/// GET / - home page
///
/// Home content is owned by the theme: the index template is rendered
/// with the shared context only.
async fn home(
    State(state): State<AppState>,
    headers: HeaderMap,
    user: Option<Extension<AuthenticatedUser>>,
) -> Result<Html<String>, ApiError> {
    render_theme(&state, "index.html", TeraContext::new(), &headers, current_user(user)).await
}

/// GET /category/:id - paginated article listing for a category
async fn category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
    user: Option<Extension<AuthenticatedUser>>,
) -> Result<Html<String>, ApiError> {
    let category = state
        .category_service
        .get(id)
        .await
        .map_err(upstream)?
        .ok_or_else(|| ApiError::not_found("Category"))?;

    let per_page = state
        .settings_service
        .get_website_settings()
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?
        .articles_per_page;

    let result = state
        .article_service
        .list_by_category(category.id, ListParams::new(query.page, per_page))
        .await
        .map_err(upstream)?;

    let mut model = TeraContext::new();
    model.insert("category", &category);
    model.insert("articles", &result.items);
    model.insert("page", &result.page_info());
    render_theme(&state, "article/category.html", model, &headers, current_user(user)).await
}

/// GET /article/:id - single article with its category and comment thread
async fn article(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    user: Option<Extension<AuthenticatedUser>>,
) -> Result<Html<String>, ApiError> {
    let article = state
        .article_service
        .get(id)
        .await
        .map_err(upstream)?
        .ok_or_else(|| ApiError::not_found("Article"))?;

    let category = state
        .category_service
        .get(article.category_id)
        .await
        .map_err(upstream)?
        .ok_or_else(|| ApiError::not_found("Category"))?;

    let comments = state
        .comment_service
        .list_for(CommentRefType::Article, article.id)
        .await
        .map_err(upstream)?;

    let html_content = state.markdown.render(&article.content);

    let mut model = TeraContext::new();
    model.insert("article", &article);
    model.insert("category", &category);
    model.insert("comments", &comments);
    model.insert("html_content", &html_content);
    render_theme(&state, "article/article.html", model, &headers, current_user(user)).await
}

/// GET /page/:alias - free-standing page lookup by alias
async fn page(
    State(state): State<AppState>,
    Path(alias): Path<String>,
    headers: HeaderMap,
    user: Option<Extension<AuthenticatedUser>>,
) -> Result<Html<String>, ApiError> {
    let page = state
        .page_service
        .get_by_alias(&alias)
        .await
        .map_err(upstream)?
        .ok_or_else(|| ApiError::not_found("Page"))?;

    let html_content = state.markdown.render(&page.content);

    let mut model = TeraContext::new();
    model.insert("page", &page);
    model.insert("html_content", &html_content);
    render_theme(&state, "page/page.html", model, &headers, current_user(user)).await
}

/// GET /wiki/:id - wiki root with its page tree
async fn wiki(
    State(state): State<AppState>,
    Path(wiki_id): Path<i64>,
    headers: HeaderMap,
    user: Option<Extension<AuthenticatedUser>>,
) -> Result<Html<String>, ApiError> {
    let wiki = state
        .wiki_service
        .get_wiki(wiki_id)
        .await
        .map_err(upstream)?
        .ok_or_else(|| ApiError::not_found("Wiki"))?;

    let tree = state.wiki_service.get_tree(wiki.id).await.map_err(upstream)?;
    let html_content = state.markdown.render(&wiki.content);

    let mut model = TeraContext::new();
    model.insert("wiki", &wiki);
    model.insert("tree", &tree);
    model.insert("html_content", &html_content);
    render_theme(&state, "wiki/wiki.html", model, &headers, current_user(user)).await
}

/// GET /wiki/:wid/:pid - a wiki page within its wiki's tree.
///
/// The page's owning wiki must match the wiki id in the path; a
/// mismatch is treated as not found, never as a redirect.
async fn wiki_page(
    State(state): State<AppState>,
    Path((wiki_id, page_id)): Path<(i64, i64)>,
    headers: HeaderMap,
    user: Option<Extension<AuthenticatedUser>>,
) -> Result<Html<String>, ApiError> {
    let page = state
        .wiki_service
        .get_page(page_id)
        .await
        .map_err(upstream)?
        .ok_or_else(|| ApiError::not_found("Wiki page"))?;

    if page.wiki_id != wiki_id {
        return Err(ApiError::not_found("Wiki"));
    }

    let wiki = state
        .wiki_service
        .get_wiki(page.wiki_id)
        .await
        .map_err(upstream)?
        .ok_or_else(|| ApiError::not_found("Wiki"))?;

    let tree = state.wiki_service.get_tree(wiki.id).await.map_err(upstream)?;
    let html_content = state.markdown.render(&page.content);

    let mut model = TeraContext::new();
    model.insert("wiki", &wiki);
    model.insert("page", &page);
    model.insert("tree", &tree);
    model.insert("html_content", &html_content);
    render_theme(&state, "wiki/wiki.html", model, &headers, current_user(user)).await
}

/// POST /article/:id/comment
async fn comment_on_article(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    user: Option<Extension<AuthenticatedUser>>,
    Json(body): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    create_comment(&state, CommentRefType::Article, id, current_user(user), body).await
}

/// POST /wiki/:id/comment
async fn comment_on_wiki(
    State(state): State<AppState>,
    Path(wiki_id): Path<i64>,
    user: Option<Extension<AuthenticatedUser>>,
    Json(body): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    create_comment(&state, CommentRefType::Wiki, wiki_id, current_user(user), body).await
}

/// POST /wikipage/:id/comment
async fn comment_on_wiki_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    user: Option<Extension<AuthenticatedUser>>,
    Json(body): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    create_comment(&state, CommentRefType::WikiPage, id, current_user(user), body).await
}

/// Shared comment-creation pipeline.
///
/// Order matters: authorization, then content validation, then
/// reference resolution, and only then the write. A failure at any step
/// leaves no partial state behind.
async fn create_comment(
    state: &AppState,
    ref_type: CommentRefType,
    ref_id: i64,
    user: Option<User>,
    body: CreateCommentRequest,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let user = match user {
        Some(user) if user.can_comment() => user,
        _ => return Err(ApiError::forbidden("Permission denied")),
    };

    let content = body.content.as_deref().map(str::trim).unwrap_or_default();
    if content.is_empty() {
        return Err(ApiError::validation_error("Missing required field: content"));
    }

    resolve_reference(state, ref_type, ref_id).await?;

    let comment = state
        .comment_service
        .create(ref_type, ref_id, &user, content.to_string())
        .await
        .map_err(upstream)?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// Resolve a comment reference through the service that owns it.
///
/// This is the lookup table for [`CommentRefType`]: each kind names the
/// entity a comment may attach to, and the match is exhaustive.
async fn resolve_reference(
    state: &AppState,
    ref_type: CommentRefType,
    id: i64,
) -> Result<(), ApiError> {
    let found = match ref_type {
        CommentRefType::Article => state.article_service.get(id).await.map_err(upstream)?.is_some(),
        CommentRefType::Wiki => state.wiki_service.get_wiki(id).await.map_err(upstream)?.is_some(),
        CommentRefType::WikiPage => state.wiki_service.get_page(id).await.map_err(upstream)?.is_some(),
    };

    if found {
        Ok(())
    } else {
        let resource = match ref_type {
            CommentRefType::Article => "Article",
            CommentRefType::Wiki => "Wiki",
            CommentRefType::WikiPage => "Wiki page",
        };
        Err(ApiError::not_found(resource))
    }
}

/// Theme render step.
///
/// Enriches a handler-built view model with the context every template
/// receives: website settings merged with defaults, navigation entries,
/// the sign-in provider list, the current user (if any), the current
/// timestamp, and the request host. A failed settings or navigation
/// fetch aborts the render.
async fn render_theme(
    state: &AppState,
    view: &str,
    mut model: TeraContext,
    headers: &HeaderMap,
    user: Option<User>,
) -> Result<Html<String>, ApiError> {
    let website = state
        .settings_service
        .get_website_settings()
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    let navigations = state
        .nav_service
        .get_navigations()
        .await
        .map_err(upstream)?;

    model.insert("website", &website);
    model.insert("navigations", &navigations);
    model.insert("signins", state.signins.as_ref());
    if let Some(ref user) = user {
        model.insert("user", user);
    }
    model.insert("time", &Utc::now().timestamp_millis());
    model.insert(
        "request",
        &serde_json::json!({ "host": request_host(headers) }),
    );

    let engine = state
        .theme_engine
        .read()
        .map_err(|e| ApiError::internal_error(format!("Failed to acquire theme lock: {}", e)))?;

    let html = engine
        .render(view, &model)
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok(Html(html))
}

fn current_user(user: Option<Extension<AuthenticatedUser>>) -> Option<User> {
    user.map(|Extension(AuthenticatedUser(user))| user)
}

fn request_host(headers: &HeaderMap) -> String {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn upstream(e: anyhow::Error) -> ApiError {
    ApiError::internal_error(e.to_string())
}
