use serde::Serialize;
use std::time::Duration;

pub const CONFIG_SCHEMA_VERSION: &str = "1";

#[derive(Debug, Clone, Serialize)]
pub struct ApiConfig {
    pub max_body_bytes: usize,
    pub request_timeout: Duration,
    pub session_ttl: Duration,
    pub public_cache_ttl: Duration,
    pub require_auth_for_writes: bool,
    pub password_iterations: u32,
    pub demo_seed: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 256 * 1024,
            request_timeout: Duration::from_secs(5),
            session_ttl: Duration::from_secs(86_400),
            public_cache_ttl: Duration::from_secs(30),
            require_auth_for_writes: true,
            password_iterations: 10_000,
            demo_seed: false,
        }
    }
}

pub fn validate_startup_config_contract(api: &ApiConfig) -> Result<(), String> {
    if api.max_body_bytes == 0 {
        return Err("max body bytes must be > 0".to_string());
    }
    if api.request_timeout.is_zero() {
        return Err("request timeout must be > 0".to_string());
    }
    if api.session_ttl.is_zero() {
        return Err("session ttl must be > 0".to_string());
    }
    if api.password_iterations == 0 {
        return Err("password iterations must be > 0".to_string());
    }
    Ok(())
}
