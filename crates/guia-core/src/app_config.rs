use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Absolute URL of the WordPress GraphQL endpoint.
    pub graphql_endpoint: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Time-to-live of cached GraphQL responses.
    pub cache_ttl_secs: u64,
    pub cache_max_entries: u64,
    /// Idle time after which a visitor's listing session is dropped.
    pub session_idle_secs: u64,
    pub max_sessions: u64,
    pub rate_limit_per_minute: usize,
}
