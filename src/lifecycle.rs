//! Extension point for websocket connection lifecycle events.
//!
//! The gateway invokes `/websocket_callback` whenever a client connects,
//! disconnects, or sends an uplink message. The relay itself has nothing to
//! do on these events; integrators supply a [`ConnectionLifecycle`]
//! implementation via [`Application::with_lifecycle`] to react to them.
//!
//! [`Application::with_lifecycle`]: crate::Application::with_lifecycle

use std::str::FromStr;

use async_trait::async_trait;

/// Connection lifecycle events delivered by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WsEvent {
    /// A client established a websocket connection
    Connect,
    /// A client connection was closed
    Disconnect,
    /// A connected client sent a message upstream
    Uplink,
}

/// Raised for event-type values this relay does not recognize.
#[derive(Debug, thiserror::Error)]
#[error("unknown websocket event type: {0}")]
pub struct UnknownEvent(pub String);

impl FromStr for WsEvent {
    type Err = UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "connect" => Ok(WsEvent::Connect),
            "disconnect" => Ok(WsEvent::Disconnect),
            "uplink" => Ok(WsEvent::Uplink),
            other => Err(UnknownEvent(other.to_string())),
        }
    }
}

/// One hook per lifecycle event, each receiving the raw callback body.
///
/// Implementations must be cheap or offload their work: the gateway waits
/// for the callback response.
#[async_trait]
pub trait ConnectionLifecycle: Send + Sync {
    async fn on_connect(&self, body: &[u8]);
    async fn on_disconnect(&self, body: &[u8]);
    async fn on_uplink(&self, body: &[u8]);
}

/// Default implementation: every event falls through with no action.
pub struct NoopLifecycle;

#[async_trait]
impl ConnectionLifecycle for NoopLifecycle {
    async fn on_connect(&self, _body: &[u8]) {}
    async fn on_disconnect(&self, _body: &[u8]) {}
    async fn on_uplink(&self, _body: &[u8]) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_event_types_parse() {
        assert_eq!("connect".parse::<WsEvent>().unwrap(), WsEvent::Connect);
        assert_eq!("disconnect".parse::<WsEvent>().unwrap(), WsEvent::Disconnect);
        assert_eq!("uplink".parse::<WsEvent>().unwrap(), WsEvent::Uplink);
    }

    #[test]
    fn unknown_event_types_are_rejected() {
        let error = "heartbeat".parse::<WsEvent>().unwrap_err();
        assert_eq!(error.0, "heartbeat");
    }
}
