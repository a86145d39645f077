/// User agent sent when `ISSUEFACET_USER_AGENT` is not set. GitHub rejects
/// API requests without one.
pub const DEFAULT_USER_AGENT: &str = concat!("issuefacet/", env!("CARGO_PKG_VERSION"));

/// GitHub client configuration from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubConfig {
    pub user_agent: String,
}

impl GithubConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::with_user_agent(std::env::var("ISSUEFACET_USER_AGENT").ok())
    }

    /// Blank or missing values fall back to [`DEFAULT_USER_AGENT`]
    pub fn with_user_agent(user_agent: Option<String>) -> Self {
        Self {
            user_agent: user_agent
                .map(|ua| ua.trim().to_string())
                .filter(|ua| !ua.is_empty())
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        }
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self::with_user_agent(None)
    }
}
