//! Session and live-data callbacks.

use axum::{extract::State, response::Json};
use tracing::{error, info, instrument};

use crate::{
    api::context::{AnchorContext, AnchorOpenId},
    api::models::ApiResponse,
    errors::Result,
    upstream::MsgType,
    AppState,
};

/// Start a live play session.
///
/// Called when a session begins. Opens a push task for every event category
/// so the platform starts delivering live-room data to
/// `/live_data_callback`. Per-category failures are logged and do not fail
/// the session start: the platform retries nothing, and a partially
/// subscribed session is still playable.
#[instrument(skip_all, fields(room_id = %ctx.room_id, anchor = %ctx.anchor_open_id))]
pub async fn start_game(State(state): State<AppState>, ctx: AnchorContext) -> Result<Json<ApiResponse>> {
    info!(app_id = %ctx.app_id, nickname = ?ctx.nickname, "starting live play session");

    for msg_type in MsgType::ALL {
        match state.task_client.start_task(&ctx.room_id, &ctx.app_id, msg_type).await {
            Ok(response) => info!(%msg_type, log_id = ?response.log_id, "push task started"),
            Err(e) => error!(%msg_type, error = %e, "failed to start push task"),
        }
    }

    Ok(Json(ApiResponse::ok("session started")))
}

/// Finish a live play session.
///
/// Game-over logic is integrator-supplied; the push tasks expire with the
/// live room, so there is nothing to tear down here.
pub async fn finish_game() -> Json<ApiResponse> {
    Json(ApiResponse::ok("session finished"))
}

/// Receive pushed live-room data and relay it to the anchor's client.
///
/// The body is opaque: it is wrapped as `{"data": <body>}` and forwarded
/// through the websocket gateway addressed to the anchor open id. Relay
/// failures are logged, not surfaced — the platform expects a success
/// envelope once the callback has been accepted.
#[instrument(skip_all, fields(anchor = %open_id.0))]
pub async fn live_data_callback(State(state): State<AppState>, open_id: AnchorOpenId, body: String) -> Result<Json<ApiResponse>> {
    let payload = serde_json::json!({ "data": body }).to_string();

    if let Err(e) = state.gateway_client.push_to_client(&open_id.0, payload).await {
        error!(error = %e, "failed to relay live data to client");
    }

    Ok(Json(ApiResponse::ok("success")))
}
