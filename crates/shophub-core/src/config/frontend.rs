//! Frontend configuration.

use serde::{Deserialize, Serialize};

/// Where the storefront frontend is served from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontendConfig {
    /// Base URL, without trailing slash, used for reset links and CORS.
    #[serde(default = "default_url")]
    pub url: String,
}

impl FrontendConfig {
    /// Build the password reset link for a token.
    pub fn reset_link(&self, token: &str) -> String {
        format!("{}/reset?resetToken={token}", self.url.trim_end_matches('/'))
    }
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self { url: default_url() }
    }
}

fn default_url() -> String {
    "http://localhost:7777".to_string()
}
