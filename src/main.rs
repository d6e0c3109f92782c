//! Converta Marketing Backend
//!
//! REST backend for the agency's public marketing site and its embedded
//! admin panel, with SQLite persistence and AI-assisted blog drafting.

mod ai;
mod api;
mod auth;
mod config;
mod content;
mod db;
mod errors;
mod models;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ai::Generator;
use config::Config;
use db::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub generator: Arc<Generator>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Converta Marketing Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Upload directory: {:?}", config.upload_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if the admin PSK is not configured
    if config.admin_psk.is_none() {
        tracing::warn!("No admin PSK configured (CONVERTA_ADMIN_PSK). Admin surface is open!");
    }
    if config.genai_api_key.is_none() {
        tracing::warn!("No generative-text API key configured (CONVERTA_GENAI_API_KEY). Draft generation is disabled.");
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Generative-text collaborator
    let generator = Arc::new(Generator::new(
        config.genai_base_url.clone(),
        config.genai_api_key.clone(),
    ));

    // Create application state
    let state = AppState {
        repo,
        generator,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone PSK for the auth layer
    let psk = state.config.admin_psk.clone();

    // Public surface: site content, catalog, blog, lead capture
    let public_routes = Router::new()
        .route("/content", get(api::get_content))
        .route("/catalog", get(api::get_catalog))
        .route("/blog", get(api::list_published_posts))
        .route("/blog/{slug}", get(api::get_post_by_slug))
        .route("/blog/{slug}/views", post(api::record_view))
        .route("/blog/{slug}/reactions", post(api::react_to_post))
        .route("/blog/{slug}/comments", get(api::list_post_comments))
        .route("/blog/{slug}/comments", post(api::create_post_comment))
        .route("/leads", post(api::create_lead))
        .route("/briefings", post(api::create_briefing));

    // Admin surface, PSK-gated
    let admin_routes = Router::new()
        .route("/snapshot", get(api::get_snapshot))
        .route("/revision", get(api::get_revision))
        .route("/config", put(api::update_config))
        // Services
        .route("/services", get(api::list_services))
        .route("/services", post(api::create_service))
        .route("/services/sync-defaults", post(api::sync_default_services))
        .route("/services/{id}", put(api::update_service))
        .route("/services/{id}", delete(api::delete_service))
        // Blog
        .route("/posts", get(api::list_posts))
        .route("/posts", post(api::create_post))
        .route("/posts/generate", post(api::generate_draft))
        .route("/posts/{id}", get(api::get_post))
        .route("/posts/{id}", put(api::update_post))
        .route("/posts/{id}", delete(api::delete_post))
        .route("/comments/{id}", delete(api::delete_comment))
        // Captured contacts
        .route("/leads", get(api::list_leads))
        .route("/briefings", get(api::list_briefings))
        // Images
        .route("/uploads", post(api::upload_image))
        // Apply PSK auth middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::admin_auth_layer(psk.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", public_routes)
        .nest("/api/admin", admin_routes)
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir))
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
