//! API client configuration.

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the task API, without a trailing slash.
    pub base_url: String,
    /// Bearer token, if the deployment requires one.
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            token: None,
            timeout_secs: 30,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url = std::env::var("TASKDECK_API_URL")
            .map_err(|_| anyhow::anyhow!("TASKDECK_API_URL is not set"))?;
        let mut config = Self::new(base_url);

        if let Ok(token) = std::env::var("TASKDECK_API_TOKEN") {
            if !token.is_empty() {
                config.token = Some(token);
            }
        }

        if let Ok(timeout) = std::env::var("TASKDECK_API_TIMEOUT_SECS") {
            if let Ok(val) = timeout.parse::<u64>() {
                config.timeout_secs = val;
            }
        }

        Ok(config)
    }
}
