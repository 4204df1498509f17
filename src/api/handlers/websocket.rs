//! Websocket gateway connection lifecycle callback.

use axum::{body::Bytes, extract::State, http::HeaderMap, response::Json};
use tracing::debug;

use crate::{api::models::ApiResponse, lifecycle::WsEvent, AppState};

/// Header carrying the lifecycle event type.
pub const EVENT_TYPE_HEADER: &str = "x-tt-event-type";

/// Dispatch a gateway lifecycle event to the configured
/// [`ConnectionLifecycle`](crate::lifecycle::ConnectionLifecycle).
///
/// Unknown event types fall through with no action; the gateway only needs
/// the success envelope back.
pub async fn websocket_callback(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Json<ApiResponse> {
    let event_type = headers.get(EVENT_TYPE_HEADER).and_then(|v| v.to_str().ok());

    match event_type.map(str::parse::<WsEvent>) {
        Some(Ok(WsEvent::Connect)) => state.lifecycle.on_connect(&body).await,
        Some(Ok(WsEvent::Disconnect)) => state.lifecycle.on_disconnect(&body).await,
        Some(Ok(WsEvent::Uplink)) => state.lifecycle.on_uplink(&body).await,
        Some(Err(unknown)) => debug!(error = %unknown, "ignoring websocket event"),
        None => debug!("websocket callback without event type header"),
    }

    Json(ApiResponse::ok("success"))
}
