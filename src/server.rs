use axum::{Extension, Router, routing::get};
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex};

use crate::{api, failure, types::PkceSession};

/// Serves `/health` and the OAuth callback on `callback_path` until aborted.
pub async fn start_api_server(
    listener: TcpListener,
    callback_path: String,
    state: Arc<Mutex<Option<PkceSession>>>,
) {
    let app = Router::new()
        .route("/health", get(api::health))
        .route(&callback_path, get(api::callback))
        .layer(Extension(state));

    if let Err(e) = axum::serve(listener, app).await {
        failure!("OAuth callback server stopped: {}", e);
    }
}
