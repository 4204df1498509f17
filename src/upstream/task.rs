//! Client for the live-data task API.
//!
//! Opening a push task makes the platform deliver live-room events of one
//! category to this service's `/live_data_callback` endpoint. Tasks are
//! scoped to a room and expire with the live session, so there is no
//! corresponding stop call here.

use std::fmt;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use url::Url;

use super::UpstreamError;

/// Event categories a push task can be opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MsgType {
    #[serde(rename = "live_like")]
    Like,
    #[serde(rename = "live_comment")]
    Comment,
    #[serde(rename = "live_gift")]
    Gift,
    #[serde(rename = "live_fansclub")]
    FansClub,
}

impl MsgType {
    /// Every category a session subscribes to on start.
    pub const ALL: [MsgType; 4] = [MsgType::Like, MsgType::Comment, MsgType::Gift, MsgType::FansClub];

    pub fn as_str(&self) -> &'static str {
        match self {
            MsgType::Like => "live_like",
            MsgType::Comment => "live_comment",
            MsgType::Gift => "live_gift",
            MsgType::FansClub => "live_fansclub",
        }
    }
}

impl fmt::Display for MsgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire format of the task-start request body. The field names are fixed by
/// the upstream API.
#[derive(Debug, Serialize)]
struct TaskStartRequest<'a> {
    roomid: &'a str,
    appid: &'a str,
    msg_type: MsgType,
}

/// Task API response. `err_no == 0` means the task was started; any other
/// value is a business-level rejection despite the 200 status line.
#[derive(Debug, Deserialize)]
pub struct TaskStartResponse {
    pub err_no: i64,
    #[serde(default)]
    pub err_msg: String,
    #[serde(default)]
    pub log_id: Option<String>,
}

/// Client for the push-task endpoint of the live-data API.
#[derive(Clone)]
pub struct TaskClient {
    http: reqwest::Client,
    url: Url,
}

impl TaskClient {
    pub fn new(http: reqwest::Client, url: Url) -> Self {
        Self { http, url }
    }

    /// Open a push task for one event category of a room.
    #[instrument(skip(self))]
    pub async fn start_task(&self, room_id: &str, app_id: &str, msg_type: MsgType) -> Result<TaskStartResponse, UpstreamError> {
        let response = self
            .http
            .post(self.url.clone())
            .json(&TaskStartRequest {
                roomid: room_id,
                appid: app_id,
                msg_type,
            })
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(UpstreamError::Status(status));
        }

        let body: TaskStartResponse = response.json().await?;
        if body.err_no != 0 {
            return Err(UpstreamError::Api {
                err_no: body.err_no,
                err_msg: body.err_msg,
            });
        }

        Ok(body)
    }
}
