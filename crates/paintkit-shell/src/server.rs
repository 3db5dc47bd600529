//! Read-only HTTP view of the active canvas.
//!
//! One route (default `/canvas`) answers `GET` with the active tab as PNG.
//! Every other method on the route, `HEAD` included, gets 405; any failure
//! to capture or encode the snapshot is a 500.

use std::time::Duration;

use axum::extract::State;
use axum::http::header::{ALLOW, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use paintkit_canvas::encode_png;
use paintkit_settings::ServerSettings;
use tokio::net::TcpListener;

use crate::dispatcher::UiDispatcher;
use crate::error::SnapshotError;
use crate::workbench::Workbench;

#[derive(Clone)]
struct SnapshotState {
    dispatcher: UiDispatcher<Workbench>,
    timeout: Duration,
}

/// Router serving the active canvas at `route`.
pub fn router(dispatcher: UiDispatcher<Workbench>, route: &str, timeout: Duration) -> Router {
    Router::new()
        .route(
            route,
            get(canvas_png)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .with_state(SnapshotState {
            dispatcher,
            timeout,
        })
}

/// `GET <route>`: the active canvas as `image/png`.
async fn canvas_png(State(state): State<SnapshotState>) -> Response {
    match capture_png(&state).await {
        Ok(bytes) => ([(CONTENT_TYPE, "image/png")], bytes).into_response(),
        Err(e) => {
            tracing::warn!("Snapshot request failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Every method but `GET`, `HEAD` included.
async fn method_not_allowed() -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, [(ALLOW, "GET")]).into_response()
}

async fn capture_png(state: &SnapshotState) -> Result<Vec<u8>, SnapshotError> {
    let snapshot = state
        .dispatcher
        .call_async(|wb| wb.active_snapshot(), state.timeout)
        .await??;
    let bytes = tokio::task::spawn_blocking(move || encode_png(&snapshot)).await??;
    Ok(bytes)
}

pub async fn bind(settings: &ServerSettings) -> std::io::Result<TcpListener> {
    let listener =
        TcpListener::bind((settings.bind_address.as_str(), settings.port)).await?;
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Canvas snapshot served at http://{}{}", addr, settings.route);
    }
    Ok(listener)
}

/// Serve until the task is dropped or the listener fails.
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    axum::serve(listener, app).await
}
