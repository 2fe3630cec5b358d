//! HTTP request handling.
//!
//! The request body is the XML feed; the response is the iCalendar document
//! or a 400 naming the failure. Every request runs its own conversion.

use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use mxl2ics_core::{Clock, ConvertError, SystemClock, build_document};

use crate::config::ServerConfig;

/// MIME type of successful responses.
pub const CALENDAR_CONTENT_TYPE: &str = "text/calendar; charset=utf-8";

/// MIME type of error responses.
const ERROR_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Clock handle shared by request handlers.
pub type SharedClock = Arc<dyn Clock + Send + Sync>;

/// State passed to handlers. Holds no mutable data.
#[derive(Clone)]
pub struct AppState {
    clock: SharedClock,
}

impl AppState {
    /// Creates handler state reading time from `clock`.
    pub fn new(clock: SharedClock) -> Self {
        Self { clock }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

/// Converts a failed conversion into a 400 response.
pub struct ConvertRejection(ConvertError);

impl IntoResponse for ConvertRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            [(header::CONTENT_TYPE, ERROR_CONTENT_TYPE)],
            format!("Error: {}", self.0),
        )
            .into_response()
    }
}

impl From<ConvertError> for ConvertRejection {
    fn from(err: ConvertError) -> Self {
        Self(err)
    }
}

/// Builds the router with the given handler state.
pub fn router_with_state(config: &ServerConfig, state: AppState) -> Router {
    Router::new()
        .route("/", post(convert))
        .route("/convert", post(convert))
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
}

/// Decodes a request body as UTF-8, dropping invalid byte sequences.
fn decode_body(body: &[u8]) -> String {
    body.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// POST / and POST /convert
async fn convert(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ConvertRejection> {
    let xml = decode_body(&body);

    let document = build_document(&xml, state.clock.as_ref()).inspect_err(|e| {
        warn!(error = %e, bytes = body.len(), "Conversion failed");
    })?;

    info!(
        events = document.event_count(),
        bytes = body.len(),
        "Converted feed"
    );

    Ok((
        [(header::CONTENT_TYPE, CALENDAR_CONTENT_TYPE)],
        document.to_ics(),
    )
        .into_response())
}
