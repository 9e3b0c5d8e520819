use std::env;
use std::fmt;
use std::time::Duration;

use arnipay::{ArnipayError, DEFAULT_BASE_URL, SANDBOX_BASE_URL};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Credentials and endpoint settings for the API client.
#[derive(Clone)]
pub struct ClientConfig {
    pub client_id: String,
    pub private_key: String,
    pub base_url: String,
    /// Verify the server's TLS certificate. Disable only for trusted local
    /// environments; when enabled the base URL must be `https://`.
    pub verify_ssl: bool,
    pub timeout: Duration,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("client_id", &self.client_id)
            .field("private_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("verify_ssl", &self.verify_ssl)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Production configuration with TLS verification on.
    pub fn new(client_id: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            private_key: private_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            verify_ssl: true,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Point the client at the sandbox environment.
    pub fn sandbox(mut self) -> Self {
        self.base_url = SANDBOX_BASE_URL.to_string();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>, verify_ssl: bool) -> Self {
        self.base_url = base_url.into();
        self.verify_ssl = verify_ssl;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<(), ArnipayError> {
        if self.client_id.trim().is_empty() {
            return Err(ArnipayError::Config("client id must not be empty".into()));
        }
        if self.private_key.is_empty() {
            return Err(ArnipayError::Config("private key must not be empty".into()));
        }
        if self.verify_ssl && !self.base_url.starts_with("https://") {
            return Err(ArnipayError::Config(
                "Base URL must use HTTPS when SSL verification is enabled.".into(),
            ));
        }
        if url::Url::parse(&self.base_url).is_err() {
            return Err(ArnipayError::Config(format!(
                "invalid base URL: {}",
                self.base_url
            )));
        }
        Ok(())
    }

    /// Load from the environment (and `.env`, if present).
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `ARNIPAY_CLIENT_ID` | required |
    /// | `ARNIPAY_PRIVATE_KEY` | required |
    /// | `ARNIPAY_SANDBOX` | `false` |
    /// | `ARNIPAY_BASE_URL` | production or sandbox URL |
    /// | `ARNIPAY_VERIFY_SSL` | `true` |
    /// | `ARNIPAY_TIMEOUT_SECS` | `30` |
    pub fn from_env() -> Result<Self, ArnipayError> {
        dotenvy::dotenv().ok();

        let client_id = required_var("ARNIPAY_CLIENT_ID")?;
        let private_key = required_var("ARNIPAY_PRIVATE_KEY")?;

        let mut config = Self::new(client_id, private_key);

        if flag_var("ARNIPAY_SANDBOX").unwrap_or(false) {
            config = config.sandbox();
        }
        if let Some(base_url) = env::var("ARNIPAY_BASE_URL").ok().filter(|s| !s.is_empty()) {
            config.base_url = base_url;
        }
        if let Some(verify_ssl) = flag_var("ARNIPAY_VERIFY_SSL") {
            if !verify_ssl {
                tracing::warn!("ARNIPAY_VERIFY_SSL=false: TLS certificates will NOT be verified");
            }
            config.verify_ssl = verify_ssl;
        }
        if let Some(secs) = env::var("ARNIPAY_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }
}

fn required_var(name: &str) -> Result<String, ArnipayError> {
    env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ArnipayError::Config(format!("{name} is required")))
}

fn flag_var(name: &str) -> Option<bool> {
    env::var(name)
        .ok()
        .map(|v| v == "true" || v == "1")
}
