//! Configuration types.

/// Server configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base URL of the bank API (the mock reports it in its call logs).
    pub bank_api_url: String,
    /// Address the HTTP listener binds to.
    pub bind_addr: String,
    /// Port the HTTP listener binds to.
    pub port: u16,
}

impl ServerConfig {
    /// Read configuration from the environment.
    ///
    /// Every setting has a hardcoded fallback; a missing or unparseable
    /// variable is never an error.
    pub fn from_env() -> Self {
        let bank_api_url = std::env::var("BANK_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8888/api/simulated".to_string());

        let bind_addr =
            std::env::var("CARD_ASSIST_BIND").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port: u16 = std::env::var("CARD_ASSIST_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5001);

        Self {
            bank_api_url,
            bind_addr,
            port,
        }
    }
}
