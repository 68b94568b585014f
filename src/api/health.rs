use std::sync::Arc;

use axum::{Extension, response::Json};
use serde_json::{Value, json};
use tokio::sync::Mutex;

use crate::types::PkceSession;

pub async fn health(
    Extension(shared_state): Extension<Arc<Mutex<Option<PkceSession>>>>,
) -> Json<Value> {
    let authorized = shared_state
        .lock()
        .await
        .as_ref()
        .is_some_and(|session| session.token.is_some());

    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "authorized": authorized
    }))
}
