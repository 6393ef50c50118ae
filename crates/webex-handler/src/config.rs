use std::time::Duration;

/// Everything one invocation needs, built once from the CLI and passed down
/// the pipeline.
#[derive(Debug, Clone)]
pub struct HandlerConfig {
    /// Room ID, or a person's email address for direct messages.
    pub room_id: String,
    pub token: String,
    pub api_host: String,
    pub timeout_secs: u64,
}

impl HandlerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
