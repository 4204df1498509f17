//! Shared helpers for handler tests.

use std::sync::Arc;

use axum_test::TestServer;
use wiremock::MockServer;

use crate::config::{Config, UpstreamConfig};
use crate::lifecycle::ConnectionLifecycle;
use crate::Application;

/// Config pointing both upstream services at one mock server, on the paths
/// the production endpoints use.
pub(crate) fn test_config(upstream: &MockServer) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        upstream: UpstreamConfig {
            task_start_url: format!("{}/api/live_data/task/start", upstream.uri()).parse().unwrap(),
            push_url: format!("{}/ws/push_data", upstream.uri()).parse().unwrap(),
        },
    }
}

pub(crate) fn test_server(config: Config) -> TestServer {
    Application::new(config).into_test_server()
}

pub(crate) fn test_server_with_lifecycle(config: Config, lifecycle: Arc<dyn ConnectionLifecycle>) -> TestServer {
    Application::with_lifecycle(config, lifecycle).into_test_server()
}
