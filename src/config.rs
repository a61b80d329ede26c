use std::time::Duration;

/// Runtime settings for the validation pipeline.
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Base URL of the external structural validator service.
    pub validator_base_url: String,

    /// Timeout applied to every outbound request. Each fetch is a single
    /// attempt; there is no retry or backoff.
    pub request_timeout: Duration,

    /// Upper bound on manifest entries evaluated concurrently. Report order
    /// stays in manifest order regardless; `1` reproduces the sequential
    /// reference behavior exactly.
    pub max_concurrent_entries: usize,

    /// User agent sent on outbound requests.
    pub user_agent: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            validator_base_url: "http://validator_service:4567".to_string(),
            request_timeout: Duration::from_secs(30),
            max_concurrent_entries: num_cpus::get(),
            user_agent: concat!("udsplus-validator/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ValidatorConfig {
    /// Configuration matching the sequential reference behavior.
    pub fn sequential() -> Self {
        Self::default().with_max_concurrent_entries(1)
    }

    pub fn with_validator_base_url(mut self, url: impl Into<String>) -> Self {
        self.validator_base_url = url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_max_concurrent_entries(mut self, limit: usize) -> Self {
        self.max_concurrent_entries = limit.max(1);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
