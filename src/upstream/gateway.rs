//! Client for the websocket gateway.
//!
//! The gateway fans a payload out to the client connections registered for
//! the open ids named in the `X-TT-WS-OPENIDS` header. The relay only ever
//! addresses a single anchor, so the header always carries a one-element
//! list.

use tracing::{debug, instrument};
use url::Url;

use super::UpstreamError;

/// Header naming the target connections as a JSON list of open ids.
pub const OPENIDS_HEADER: &str = "X-TT-WS-OPENIDS";

/// Client for the gateway push endpoint.
#[derive(Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    url: Url,
}

impl GatewayClient {
    pub fn new(http: reqwest::Client, url: Url) -> Self {
        Self { http, url }
    }

    /// Push one opaque payload to the client connected for `open_id`.
    #[instrument(skip(self, payload))]
    pub async fn push_to_client(&self, open_id: &str, payload: String) -> Result<(), UpstreamError> {
        let response = self
            .http
            .post(self.url.clone())
            .header("Content-Type", "application/json")
            .header(OPENIDS_HEADER, serde_json::json!([open_id]).to_string())
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        debug!(status = %status, "gateway push dispatched");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GatewayClient {
        let url = format!("{}/ws/push_data", server.uri()).parse().unwrap();
        GatewayClient::new(reqwest::Client::new(), url)
    }

    #[tokio::test]
    async fn push_addresses_a_single_open_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ws/push_data"))
            .and(header(OPENIDS_HEADER, r#"["A1"]"#))
            .and(body_string(r#"{"data":"{\"x\":1}"}"#))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let payload = serde_json::json!({ "data": r#"{"x":1}"# }).to_string();
        client_for(&server).push_to_client("A1", payload).await.unwrap();
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let error = client_for(&server).push_to_client("A1", "{}".to_string()).await.unwrap_err();

        assert!(matches!(error, UpstreamError::Status(status) if status.as_u16() == 502));
    }

    #[tokio::test]
    async fn connection_refused_is_a_transport_error() {
        let url = "http://127.0.0.1:1/ws/push_data".parse().unwrap();
        let client = GatewayClient::new(reqwest::Client::new(), url);

        let error = client.push_to_client("A1", "{}".to_string()).await.unwrap_err();

        assert!(matches!(error, UpstreamError::Transport(_)));
    }
}
