//! Static file server for local testing
//!
//! Files are streamed by `tower_http::services::ServeDir` (content type from
//! the extension, `index.html` for directories). Directories without an
//! index get a plain HTML listing instead of a 404.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Router;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Router serving everything below `root`
pub fn router(root: impl Into<PathBuf>) -> Router {
    let root: Arc<PathBuf> = Arc::new(root.into());
    Router::new()
        .fallback(serve_path)
        .with_state(root)
        .layer(TraceLayer::new_for_http())
}

/// Bind `addr` and serve `root` until the process is killed.
///
/// # Errors
///
/// Returns an error if the listener fails to bind or the server terminates unexpectedly.
pub async fn serve(root: PathBuf, addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Serving {} on http://{}", root.display(), addr);
    axum::serve(listener, router(root)).await
}

async fn serve_path(State(root): State<Arc<PathBuf>>, request: Request) -> Response {
    let uri_path = request.uri().path().to_string();

    if let Some(dir) = local_dir(&root, &uri_path).await {
        if !is_file(&dir.join("index.html")).await {
            if !uri_path.ends_with('/') {
                return Redirect::permanent(&redirect_target(&uri_path)).into_response();
            }
            return match render_listing(&dir, &uri_path).await {
                Ok(html) => Html(html).into_response(),
                Err(e) => {
                    tracing::warn!("Cannot list {}: {}", dir.display(), e);
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                }
            };
        }
    }

    ServeDir::new(root.as_path())
        .oneshot(request)
        .await
        .into_response()
}

/// Slash-terminated form of `uri_path`, never protocol-relative (`//host/`).
fn redirect_target(uri_path: &str) -> String {
    let trimmed = uri_path.trim_start_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}

/// Local path a request path maps to. `..` segments never resolve.
fn request_path(root: &Path, uri_path: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(uri_path).ok()?;
    let mut path = root.to_path_buf();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => return None,
            s if s.contains('\\') => return None,
            s => path.push(s),
        }
    }
    Some(path)
}

async fn local_dir(root: &Path, uri_path: &str) -> Option<PathBuf> {
    let path = request_path(root, uri_path)?;
    let metadata = tokio::fs::metadata(&path).await.ok()?;
    metadata.is_dir().then_some(path)
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

async fn render_listing(dir: &Path, uri_path: &str) -> std::io::Result<String> {
    let mut entries = Vec::new();
    let mut read_dir = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = read_dir.next_entry().await? {
        let is_dir = entry.file_type().await?.is_dir();
        entries.push((entry.file_name().to_string_lossy().into_owned(), is_dir));
    }
    entries.sort();

    let mut html = String::from("<!doctype html>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>Index of {}</title>\n<pre>\n", escape_html(uri_path)));
    for (name, is_dir) in entries {
        let suffix = if is_dir { "/" } else { "" };
        html.push_str(&format!(
            "<a href=\"{}{suffix}\">{}{suffix}</a>\n",
            urlencoding::encode(&name),
            escape_html(&name)
        ));
    }
    html.push_str("</pre>\n");
    Ok(html)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
