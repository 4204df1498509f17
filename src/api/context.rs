//! Platform-injected request context.
//!
//! The hosting environment terminates authentication and enriches every
//! callback with identity headers, so no token exchange happens here.
//! Handlers consume the headers through the extractors in this module
//! instead of reading them ad hoc: missing identifiers are rejected in one
//! place, and tests can supply fixture contexts.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::errors::{Error, Result};

pub const APP_ID_HEADER: &str = "X-TT-AppID";
pub const ROOM_ID_HEADER: &str = "X-Room-ID";
pub const ANCHOR_OPEN_ID_HEADER: &str = "X-Anchor-OpenID";
pub const AVATAR_URL_HEADER: &str = "X-Avatar-Url";
pub const NICKNAME_HEADER: &str = "X-Nick-Name";

/// Identity of the live room a callback originates from.
///
/// All values are platform-assigned opaque strings; the relay never
/// interprets them.
#[derive(Debug, Clone)]
pub struct AnchorContext {
    pub app_id: String,
    pub room_id: String,
    pub anchor_open_id: String,
    pub avatar_url: Option<String>,
    pub nickname: Option<String>,
}

fn required_header(parts: &Parts, name: &'static str) -> Result<String> {
    let value = parts.headers.get(name).ok_or(Error::MissingHeader { name })?;
    let value = value.to_str().map_err(|_| Error::InvalidHeader { name })?;
    if value.is_empty() {
        return Err(Error::MissingHeader { name });
    }
    Ok(value.to_string())
}

fn optional_header(parts: &Parts, name: &'static str) -> Option<String> {
    parts.headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
}

impl<S> FromRequestParts<S> for AnchorContext
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        Ok(Self {
            app_id: required_header(parts, APP_ID_HEADER)?,
            room_id: required_header(parts, ROOM_ID_HEADER)?,
            anchor_open_id: required_header(parts, ANCHOR_OPEN_ID_HEADER)?,
            avatar_url: optional_header(parts, AVATAR_URL_HEADER),
            nickname: optional_header(parts, NICKNAME_HEADER),
        })
    }
}

/// The anchor open id alone, for callbacks that only carry the addressing key.
#[derive(Debug, Clone)]
pub struct AnchorOpenId(pub String);

impl<S> FromRequestParts<S> for AnchorOpenId
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        required_header(parts, ANCHOR_OPEN_ID_HEADER).map(AnchorOpenId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_headers(headers: &[(&str, &str)]) -> Parts {
        let mut request = Request::builder();
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        request.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn full_context_extracts() {
        let mut parts = parts_with_headers(&[
            (APP_ID_HEADER, "app-1"),
            (ROOM_ID_HEADER, "room-1"),
            (ANCHOR_OPEN_ID_HEADER, "anchor-1"),
            (NICKNAME_HEADER, "streamer"),
        ]);

        let ctx = AnchorContext::from_request_parts(&mut parts, &()).await.unwrap();

        assert_eq!(ctx.app_id, "app-1");
        assert_eq!(ctx.room_id, "room-1");
        assert_eq!(ctx.anchor_open_id, "anchor-1");
        assert_eq!(ctx.nickname.as_deref(), Some("streamer"));
        assert_eq!(ctx.avatar_url, None);
    }

    #[tokio::test]
    async fn missing_identifier_is_rejected() {
        let mut parts = parts_with_headers(&[(APP_ID_HEADER, "app-1"), (ANCHOR_OPEN_ID_HEADER, "anchor-1")]);

        let error = AnchorContext::from_request_parts(&mut parts, &()).await.unwrap_err();

        assert!(matches!(error, Error::MissingHeader { name: ROOM_ID_HEADER }));
    }

    #[tokio::test]
    async fn empty_identifier_counts_as_missing() {
        let mut parts = parts_with_headers(&[(ANCHOR_OPEN_ID_HEADER, "")]);

        let error = AnchorOpenId::from_request_parts(&mut parts, &()).await.unwrap_err();

        assert!(matches!(error, Error::MissingHeader { .. }));
    }
}
