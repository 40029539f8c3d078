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

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub youtube_api_key: String,
    pub youtube_timeout_secs: u64,
    pub youtube_max_retries: u32,
    pub youtube_retry_backoff_base_ms: u64,
    pub max_videos_default: u32,
    pub max_videos_cap: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("youtube_api_key", &"[redacted]")
            .field("youtube_timeout_secs", &self.youtube_timeout_secs)
            .field("youtube_max_retries", &self.youtube_max_retries)
            .field(
                "youtube_retry_backoff_base_ms",
                &self.youtube_retry_backoff_base_ms,
            )
            .field("max_videos_default", &self.max_videos_default)
            .field("max_videos_cap", &self.max_videos_cap)
            .finish()
    }
}
