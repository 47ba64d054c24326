//! HTTP Server for the mediatrends API.
//!
//! Every view is a read-only GET route returning chart-ready JSON. The
//! static front end is served from the configured directory.
//!
//! # API Endpoints
//!
//! | Method | Path                     | Description                     |
//! |--------|--------------------------|---------------------------------|
//! | GET    | `/health`                | Health check                    |
//! | GET    | `/api/<catalog>/<view>`  | One view, see [`View::path`]    |
//! | GET    | `/api/*` (anything else) | 400 `{"error"}`                |
//! | GET    | `/`                      | `index.html` of the front end   |

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{Path as UrlPath, State},
    http::{header, Method},
    response::Json,
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::info;

use super::types::HealthResponse;
use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::views::{Engine, View, ViewOutput};

/// Build the router: one route per view, `/health`, and the static files.
pub fn router(engine: Arc<Engine>, static_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    let mut app = Router::new()
        .route("/health", get(health))
        .route("/api/{*rest}", get(unknown_view));
    for view in View::ALL {
        app = app.route(
            view.path(),
            get(move |State(engine): State<Arc<Engine>>| render_view(engine, view)),
        );
    }

    app.fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .with_state(engine)
}

/// Start the HTTP server
pub async fn start_server(engine: Arc<Engine>, config: &ServerConfig) -> ServerResult<()> {
    let app = router(engine, &config.static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    info!(
        port = config.port,
        static_dir = %config.static_dir.display(),
        views = View::ALL.len(),
        "mediatrends server running on http://localhost:{}",
        config.port
    );

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "mediatrends",
        version: env!("CARGO_PKG_VERSION"),
        views: View::ALL.len(),
    })
}

/// Any `/api/` path no view is registered on.
async fn unknown_view(UrlPath(rest): UrlPath<String>) -> ServerError {
    ServerError::BadRequest(format!("Unknown view '{}'", rest))
}

async fn render_view(engine: Arc<Engine>, view: View) -> ServerResult<Json<ViewOutput>> {
    Ok(Json(engine.render(view)?))
}
