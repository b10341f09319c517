//! Static server for a finished production build.

use crate::assets::INDEX_HTML;
use crate::error::{CliError, Result};
use axum::{Router, http::StatusCode, response::IntoResponse};
use std::net::SocketAddr;
use std::path::Path;
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};

pub const NO_BUILD_MESSAGE: &str = "No build found. Run `lume build` to produce the dist/ folder.";

/// Router for `out_dir`.
///
/// Unknown paths fall back to `index.html` so client-side routes resolve.
/// Without an `index.html` every request fails with [`NO_BUILD_MESSAGE`].
pub fn router(out_dir: &Path) -> Router {
    let index = out_dir.join(INDEX_HTML);
    if !index.is_file() {
        tracing::warn!(dir = %out_dir.display(), "no build to serve");
        return Router::new().fallback(no_build);
    }

    Router::new().fallback_service(ServeDir::new(out_dir).fallback(ServeFile::new(index)))
}

async fn no_build() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, NO_BUILD_MESSAGE)
}

/// Bind `addr` and serve `out_dir` until the future is dropped.
pub async fn serve(out_dir: &Path, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| CliError::Server(format!("Failed to bind to {addr}: {e}")))?;

    crate::ui::success(&format!("Serving {} at http://{addr}", out_dir.display()));

    axum::serve(listener, router(out_dir))
        .await
        .map_err(|e| CliError::Server(format!("Server error: {e}")))
}
