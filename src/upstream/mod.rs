//! Typed clients for the two upstream platform services.
//!
//! Both services are reached over the cloud-internal network. Neither call
//! is retried; callers decide whether a failure is surfaced or logged.

mod gateway;
mod task;

pub use gateway::{GatewayClient, OPENIDS_HEADER};
pub use task::{MsgType, TaskClient, TaskStartResponse};

use reqwest::StatusCode;
use thiserror::Error;

/// Errors from outbound calls to the task API or the websocket gateway.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The upstream answered with a non-success HTTP status
    #[error("upstream returned HTTP {0}")]
    Status(StatusCode),

    /// HTTP 200, but the response body carried a business-level error code
    #[error("upstream rejected request: {err_msg} (err_no {err_no})")]
    Api { err_no: i64, err_msg: String },

    /// Connection, timeout, or body decoding failure
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}
