use std::collections::BTreeMap;
use std::time::Duration;

use crate::url::DEFAULT_API_BASE_URL;

/// Identity attached to requests when no user is configured.
pub const DEFAULT_USER_ID: &str = "default_user";

/// Transport configuration for coaching API requests.
#[derive(Debug, Clone)]
pub struct CoachApiConfig {
    /// Base URL up to and including the `/api` mount point.
    pub base_url: String,
    /// Per-user identity carried on chat, upload, and analysis requests.
    pub user_id: String,
    /// Optional `User-Agent` override.
    pub user_agent: Option<String>,
    /// Additional headers merged into every request.
    pub extra_headers: BTreeMap<String, String>,
    /// Optional request timeout; none by default.
    pub timeout: Option<Duration>,
}

impl Default for CoachApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            user_agent: None,
            extra_headers: BTreeMap::new(),
            timeout: None,
        }
    }
}

impl CoachApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn insert_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }

    pub fn with_headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.extra_headers.extend(headers);
        self
    }
}
