//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_image_placeholder_url() -> String {
    "/assets/img/image-not-found.svg".to_string()
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    pub secret: String,
    pub auth_service_url: String,
    /// Base URL of the loan REST backend.
    pub api_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Graphic shown in place of a customer image that fails to load.
    #[serde(default = "default_image_placeholder_url")]
    pub image_placeholder_url: String,
}
