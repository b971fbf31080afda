//! Client configuration.

/// Base configuration for the REST API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Root URL of the API, without a trailing slash
    pub base_url: String,
}

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://norma.nomoreparties.space/api";

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }
}

impl ApiConfig {
    /// Configuration from the environment.
    ///
    /// `STELLAR_API_URL` overrides the production API root.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("STELLAR_API_URL")
            .ok()
            .map_or_else(|| DEFAULT_BASE_URL.to_owned(), |url| {
                url.trim_end_matches('/').to_owned()
            });
        Self { base_url }
    }
}
