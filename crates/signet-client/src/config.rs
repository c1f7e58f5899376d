//! Client configuration.
//!
//! | Variable                    | Default                         |
//! |-----------------------------|---------------------------------|
//! | `SIGNET_API_BASE_URL`       | `http://localhost:3000/api/v1`  |
//! | `SIGNET_PROCESSOR_BASE_URL` | `http://localhost:5678/webhook` |

use std::env;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api/v1";
pub const DEFAULT_PROCESSOR_BASE_URL: &str = "http://localhost:5678/webhook";

/// Where the dashboard reads from and where it uploads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the query layer, including the `/api/v1` prefix.
    pub api_base_url: String,
    /// Base URL of the external processor's webhook endpoints.
    pub processor_base_url: String,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>, processor_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: trim_base(api_base_url.into()),
            processor_base_url: trim_base(processor_base_url.into()),
        }
    }

    /// Load configuration from environment variables, falling back to the
    /// local development defaults.
    pub fn from_env() -> Self {
        Self::new(
            env::var("SIGNET_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.into()),
            env::var("SIGNET_PROCESSOR_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PROCESSOR_BASE_URL.into()),
        )
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL, DEFAULT_PROCESSOR_BASE_URL)
    }
}

/// Endpoints are appended as `/signatures`, so a trailing slash would double up.
fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_owned()
}
