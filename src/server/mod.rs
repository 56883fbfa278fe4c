//! HTTP server: pages resolved per request, preview images and static assets

use anyhow::Result;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::{ContentError, RendererTable};
use crate::og::{ImageRequest, OgImageSynthesizer, OgQuery};
use crate::{pages, Blog};

/// Server state
struct ServerState {
    blog: Blog,
    table: RendererTable,
    og: OgImageSynthesizer,
}

/// Build the application router
pub fn router(blog: &Blog) -> Result<Router> {
    let state = Arc::new(ServerState {
        blog: blog.clone(),
        table: blog.renderer_table(),
        og: blog.og_synthesizer()?,
    });

    let assets = ServeDir::new(&blog.public_dir).append_index_html_on_directories(true);

    Ok(Router::new()
        .route("/", get(home_handler))
        .route("/posts/:slug", get(post_handler))
        .route("/api/og", get(og_handler))
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16, open: bool) -> Result<()> {
    let app = router(blog)?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn home_handler(State(state): State<Arc<ServerState>>) -> Response {
    let result = tokio::task::spawn_blocking(move || pages::home_html(&state.blog)).await;
    match result {
        Ok(Ok(html)) => Html(html).into_response(),
        Ok(Err(e)) => content_error(e),
        Err(e) => internal_error(e),
    }
}

async fn post_handler(State(state): State<Arc<ServerState>>, Path(slug): Path<String>) -> Response {
    let result = tokio::task::spawn_blocking(move || {
        pages::post_html(&state.blog, &state.table, &slug)
            .map_err(|e| (e, pages::not_found_html(&state.blog, &slug)))
    })
    .await;

    match result {
        Ok(Ok(html)) => Html(html).into_response(),
        Ok(Err((ContentError::NotFound { slug }, page))) => {
            tracing::debug!("No post for slug {}", slug);
            (StatusCode::NOT_FOUND, Html(page)).into_response()
        }
        Ok(Err((e, _))) => content_error(e),
        Err(e) => internal_error(e),
    }
}

async fn og_handler(
    State(state): State<Arc<ServerState>>,
    query: Result<Query<OgQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                format!(
                    "invalid query: {}; expected optional string parameters title, bgImage, username, template",
                    rejection.body_text()
                ),
            )
                .into_response();
        }
    };

    let request = match ImageRequest::from_query(&query, state.og.config()) {
        Ok(request) => request,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    match state.og.synthesize(&request).await {
        Ok(png) => (
            [
                (header::CONTENT_TYPE, "image/png"),
                (header::CACHE_CONTROL, "public, max-age=86400, immutable"),
            ],
            png,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Preview synthesis failed for {:?}: {}", request.title, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render preview").into_response()
        }
    }
}

fn content_error(e: ContentError) -> Response {
    match e {
        ContentError::NotFound { .. } => (StatusCode::NOT_FOUND, "Not found").into_response(),
        ContentError::Malformed { .. } => {
            tracing::error!("Content authoring error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Post is malformed").into_response()
        }
        ContentError::Io(_) => {
            tracing::error!("Content read failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

fn internal_error(e: tokio::task::JoinError) -> Response {
    tracing::error!("Request task failed: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
