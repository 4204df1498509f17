//! HTTP handlers for the platform callback endpoints.
//!
//! - [`live`]: session start/finish and the live-data relay
//! - [`websocket`]: gateway connection lifecycle callback
//!
//! Every handler answers with the [`ApiResponse`](crate::api::models::ApiResponse)
//! envelope. Upstream failures never propagate into the envelope: the
//! platform does not retry callbacks, so the handlers log failures and
//! acknowledge receipt.

pub mod live;
pub mod websocket;
