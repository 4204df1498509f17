//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable
//! overrides. The configuration file path defaults to `config.yaml` but can
//! be specified via `-f` flag or `LIVERELAY_CONFIG` environment variable.
//!
//! ## Loading Priority
//!
//! Configuration sources are merged in the following order (later sources
//! override earlier ones):
//!
//! 1. **YAML config file** - Base configuration (default: `config.yaml`)
//! 2. **Environment variables** - Variables prefixed with `LIVERELAY_`
//!    override YAML values
//!
//! For nested config values, use double underscores in environment
//! variables. For example, `LIVERELAY_UPSTREAM__PUSH_URL=...` sets the
//! `upstream.push_url` field.
//!
//! ## Environment Variable Examples
//!
//! ```bash
//! # Override server port
//! LIVERELAY_PORT=9000
//!
//! # Point the relay at a staging gateway
//! LIVERELAY_UPSTREAM__PUSH_URL="http://ws-push.staging.service/ws/push_data"
//! ```

use clap::Parser;
use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use url::Url;

/// Simple CLI args - just for specifying config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "LIVERELAY_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    /// Useful for CI/CD pipelines to catch config errors before deployment.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
///
/// All fields have defaults matching the hosted production environment, so a
/// missing or empty config file is valid.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// Upstream platform service endpoints
    pub upstream: UpstreamConfig,
}

/// Endpoints of the two upstream platform services.
///
/// Both are reached over the cloud-internal network, which is why the
/// defaults are plain HTTP: the hosting environment terminates transport
/// security and authentication before traffic reaches these hosts.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpstreamConfig {
    /// Task API endpoint that opens live-data push tasks
    pub task_start_url: Url,
    /// Websocket gateway endpoint that pushes data to connected clients
    pub push_url: Url,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            task_start_url: Url::parse("http://webcast.bytedance.com/api/live_data/task/start").unwrap(),
            push_url: Url::parse("http://ws-push.dycloud-api.service/ws/push_data").unwrap(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            upstream: UpstreamConfig::default(),
        }
    }
}

impl Config {
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        Self::figment(args).extract()
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            // Load base config file
            .merge(Yaml::file(&args.config))
            // Environment variables can still override specific values
            .merge(Env::prefixed("LIVERELAY_").split("__"))
    }

    /// Get the full bind address as host:port
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_target_production_endpoints() {
        let config = Config::default();

        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(
            config.upstream.task_start_url.as_str(),
            "http://webcast.bytedance.com/api/live_data/task/start"
        );
        assert_eq!(config.upstream.push_url.as_str(), "http://ws-push.dycloud-api.service/ws/push_data");
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        Jail::expect_with(|_jail| {
            let args = Args {
                config: "does-not-exist.yaml".to_string(),
                validate: false,
            };

            let config = Config::load(&args)?;
            assert_eq!(config.port, 8080);
            Ok(())
        });
    }

    #[test]
    fn yaml_and_env_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r#"
port: 9000
upstream:
  push_url: http://localhost:9001/ws/push_data
"#,
            )?;
            jail.set_env("LIVERELAY_HOST", "127.0.0.1");
            jail.set_env("LIVERELAY_UPSTREAM__PUSH_URL", "http://localhost:9002/ws/push_data");

            let args = Args {
                config: "config.yaml".to_string(),
                validate: false,
            };

            let config = Config::load(&args)?;

            // env beats yaml, yaml beats defaults
            assert_eq!(config.host, "127.0.0.1");
            assert_eq!(config.port, 9000);
            assert_eq!(config.upstream.push_url.as_str(), "http://localhost:9002/ws/push_data");
            assert_eq!(
                config.upstream.task_start_url.as_str(),
                "http://webcast.bytedance.com/api/live_data/task/start"
            );
            Ok(())
        });
    }
}
