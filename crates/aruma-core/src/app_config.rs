use std::net::SocketAddr;
use std::path::PathBuf;

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

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub data_dir: PathBuf,
    pub watchlist_path: PathBuf,
    pub region: String,
    pub meta_access_token: Option<String>,
    pub refresh_interval_secs: u64,
    pub graph_request_timeout_secs: u64,
    pub graph_post_limit: u32,
    pub graph_inter_request_delay_ms: u64,
    pub collector_user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("data_dir", &self.data_dir)
            .field("watchlist_path", &self.watchlist_path)
            .field("region", &self.region)
            .field(
                "meta_access_token",
                &self.meta_access_token.as_ref().map(|_| "[redacted]"),
            )
            .field("refresh_interval_secs", &self.refresh_interval_secs)
            .field(
                "graph_request_timeout_secs",
                &self.graph_request_timeout_secs,
            )
            .field("graph_post_limit", &self.graph_post_limit)
            .field(
                "graph_inter_request_delay_ms",
                &self.graph_inter_request_delay_ms,
            )
            .field("collector_user_agent", &self.collector_user_agent)
            .finish()
    }
}
