//! quillpress - A lightweight theme-driven CMS front end

use anyhow::Result;
use std::path::Path;
use std::sync::{Arc, RwLock};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quillpress::{
    api::{self, AppState},
    config::Config,
    db::{
        self,
        repositories::{
            SqlxArticleRepository, SqlxCategoryRepository, SqlxCommentRepository,
            SqlxNavItemRepository, SqlxPageRepository, SqlxSessionRepository,
            SqlxSettingsRepository, SqlxUserRepository, SqlxWikiRepository,
        },
    },
    services::{
        ArticleService, CategoryService, CommentService, MarkdownRenderer, NavService,
        PageService, SettingsService, UserService, WikiService,
    },
    theme::ThemeEngine,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quillpress=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting quillpress...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    // Sign-in provider list is fixed for the process lifetime
    let signins = Arc::new(config.signin_providers());
    if !signins.is_empty() {
        tracing::info!("Enabled sign-in providers: {}", signins.join(", "));
    }

    // Initialize database
    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected: {}", config.database.url);

    // Run migrations
    db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    // Create repositories
    let article_repo = SqlxArticleRepository::boxed(pool.clone());
    let category_repo = SqlxCategoryRepository::boxed(pool.clone());
    let wiki_repo = SqlxWikiRepository::boxed(pool.clone());
    let page_repo = SqlxPageRepository::boxed(pool.clone());
    let comment_repo = SqlxCommentRepository::boxed(pool.clone());
    let nav_repo = SqlxNavItemRepository::boxed(pool.clone());
    let settings_repo = SqlxSettingsRepository::boxed(pool.clone());
    let user_repo = SqlxUserRepository::boxed(pool.clone());
    let session_repo = SqlxSessionRepository::boxed(pool.clone());

    // Initialize services
    let article_service = Arc::new(ArticleService::new(article_repo));
    let category_service = Arc::new(CategoryService::new(category_repo));
    let wiki_service = Arc::new(WikiService::new(wiki_repo));
    let page_service = Arc::new(PageService::new(page_repo));
    let comment_service = Arc::new(CommentService::new(comment_repo));
    let nav_service = Arc::new(NavService::new(nav_repo));
    let settings_service = Arc::new(SettingsService::new(settings_repo));
    let user_service = Arc::new(UserService::new(user_repo, session_repo));
    let markdown = Arc::new(MarkdownRenderer::new());

    // Initialize theme engine
    let theme_engine = ThemeEngine::new(&config.theme.path, &config.theme.active)?;
    let theme_static = theme_engine.static_path();
    tracing::info!("Theme engine initialized: {}", config.theme.active);

    // Build application state
    let state = AppState {
        article_service,
        category_service,
        wiki_service,
        page_service,
        comment_service,
        nav_service,
        settings_service,
        user_service,
        markdown,
        theme_engine: Arc::new(RwLock::new(theme_engine)),
        signins,
    };

    // Build router
    let app = api::build_router(state, theme_static);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
