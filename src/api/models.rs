//! Response envelope shared by every callback endpoint.

use serde::{Deserialize, Serialize};

/// Uniform response envelope. The platform treats `err_no == 0` as success;
/// any other value is a business-level failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub err_no: i32,
    pub err_msg: String,
}

impl ApiResponse {
    pub fn ok(msg: impl Into<String>) -> Self {
        Self {
            err_no: 0,
            err_msg: msg.into(),
        }
    }

    pub fn error(err_no: i32, msg: impl Into<String>) -> Self {
        Self {
            err_no,
            err_msg: msg.into(),
        }
    }
}
