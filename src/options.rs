use std::time::Duration;

/// Default SendPigeon API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.sendpigeon.dev";

/// Configures the API endpoint, per-attempt timeout and retry behavior.
///
/// Fields are private so the retry cap holds for every constructed value:
/// [`ClientOptions::with_max_retries`] clamps its input into
/// `0..=ClientOptions::MAX_RETRIES`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    base_url: String,
    timeout: Duration,
    max_retries: u32,
}

impl ClientOptions {
    /// Default per-attempt timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
    /// Default number of retries after the initial attempt.
    pub const DEFAULT_MAX_RETRIES: u32 = 2;
    /// Hard upper bound on retries.
    pub const MAX_RETRIES: u32 = 5;

    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the API base URL, e.g. for a staging endpoint or a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the wall-clock timeout applied to each attempt.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the retry budget.
    ///
    /// Values above [`ClientOptions::MAX_RETRIES`] are capped; negative values
    /// fall back to [`ClientOptions::DEFAULT_MAX_RETRIES`].
    pub fn with_max_retries(mut self, max_retries: i64) -> Self {
        self.max_retries = clamp_max_retries(max_retries);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Self::DEFAULT_TIMEOUT,
            max_retries: Self::DEFAULT_MAX_RETRIES,
        }
    }
}

fn clamp_max_retries(requested: i64) -> u32 {
    if requested < 0 {
        return ClientOptions::DEFAULT_MAX_RETRIES;
    }
    requested.min(i64::from(ClientOptions::MAX_RETRIES)) as u32
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{ClientOptions, DEFAULT_BASE_URL};

    #[test]
    fn defaults_match_api_contract() {
        let opts = ClientOptions::default();
        assert_eq!(opts.base_url(), DEFAULT_BASE_URL);
        assert_eq!(opts.timeout(), Duration::from_secs(30));
        assert_eq!(opts.max_retries(), 2);
    }

    #[test]
    fn max_retries_above_cap_is_clamped() {
        assert_eq!(ClientOptions::new().with_max_retries(9).max_retries(), 5);
        assert_eq!(
            ClientOptions::new().with_max_retries(i64::MAX).max_retries(),
            5
        );
    }

    #[test]
    fn negative_max_retries_falls_back_to_default() {
        assert_eq!(ClientOptions::new().with_max_retries(-1).max_retries(), 2);
    }

    #[test]
    fn max_retries_within_range_is_kept() {
        for n in 0..=5 {
            assert_eq!(
                ClientOptions::new().with_max_retries(n).max_retries(),
                n as u32
            );
        }
    }
}
