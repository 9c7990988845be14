//! HTTP upload service.
//!
//! Accepts exports as request bodies, keeps every successfully parsed record
//! in memory, and renders the accumulated records back as wire rows. Parse
//! failures are reported as a JSON payload with a numeric code and the
//! positional error message.

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServeConfig;
use crate::constants::{ASSETS_PREFIX, DATA_PATH, SHUTDOWN_GRACE_SECS, UPLOAD_PATH};
use crate::error::{ErrorKind, Result, ScreeningError};
use crate::models::Record;
use crate::screening_parser::parse_bytes;

/// Records accumulated from every accepted upload, shared by all requests
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Arc<RwLock<Vec<Record>>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one document's records in a single step; returns the new total
    pub async fn append(&self, records: Vec<Record>) -> usize {
        let mut guard = self.records.write().await;
        guard.extend(records);
        guard.len()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Every record as a wire row, one per line
    pub async fn render(&self) -> String {
        let guard = self.records.read().await;
        let mut out = String::new();
        for record in guard.iter() {
            out.push_str(&record.to_wire_row());
            out.push('\n');
        }
        out
    }
}

#[derive(Debug, Serialize)]
struct UploadAccepted {
    message: String,
}

#[derive(Debug, Serialize)]
struct UploadRejected {
    code: u16,
    error: String,
}

/// Build the service routes around `store`
pub fn router(store: RecordStore, config: &ServeConfig) -> Router {
    let mut app = Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route(UPLOAD_PATH, post(upload))
        .route(DATA_PATH, get(render_data));

    if let Some(dir) = &config.assets_dir {
        app = app.nest_service(ASSETS_PREFIX, ServeDir::new(dir));
    }

    app.layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Run the service until Ctrl+C
pub async fn run(config: ServeConfig) -> Result<()> {
    config.validate()?;

    let listener = TcpListener::bind(config.bind).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    info!("Uploads accepted at {}", UPLOAD_PATH);
    if let Some(dir) = &config.assets_dir {
        info!("Assets from {} served under {}/", dir.display(), ASSETS_PREFIX);
    }

    let app = router(RecordStore::new(), &config);
    serve_with_shutdown(listener, app, shutdown_signal()).await
}

/// Serve `app` on `listener` until `shutdown` resolves
pub async fn serve_with_shutdown<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = stop_rx.await;
        })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => result?,
        _ = shutdown => {
            let _ = stop_tx.send(());
            match tokio::time::timeout(Duration::from_secs(SHUTDOWN_GRACE_SECS), &mut server).await {
                Ok(result) => result?,
                Err(_) => {
                    return Err(ScreeningError::Io(std::io::Error::new(
                        std::io::ErrorKind::TimedOut,
                        "server shutdown timed out",
                    )));
                }
            }
        }
    }

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C, shutting down");
}

async fn index() -> &'static str {
    "Hello world"
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

async fn upload(State(store): State<RecordStore>, body: Bytes) -> Response {
    let bytes = body.len();
    let parsed = tokio::task::spawn_blocking(move || parse_bytes(&body)).await;

    let document = match parsed {
        Ok(Ok(document)) => document,
        Ok(Err(e)) => {
            warn!("Rejected upload of {} bytes: {}", bytes, e);
            return rejected(e.kind().code(), e.to_string());
        }
        Err(e) => {
            warn!("Upload parse task failed: {}", e);
            return rejected(ErrorKind::Io.code(), e.to_string());
        }
    };

    let received = document.len();
    let total = store.append(document.into_records()).await;
    info!("Accepted upload: {} records ({} stored)", received, total);

    let message = format!(
        "Success. {} records received. Your results are now available at {}",
        received, DATA_PATH
    );
    (StatusCode::OK, Json(UploadAccepted { message })).into_response()
}

fn rejected(code: u16, error: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(UploadRejected { code, error }),
    )
        .into_response()
}

async fn render_data(State(store): State<RecordStore>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        store.render().await,
    )
        .into_response()
}
