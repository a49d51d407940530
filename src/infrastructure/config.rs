use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub internal_api: InternalApiConfig,
    pub server: ServerConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InternalApiConfig {
    pub base_url: String,
    /// Shared secret sent as `X-Secret-Token` on every internal API call.
    pub secret_token: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Reads configuration from the environment, falling back to defaults
    /// for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            internal_api: InternalApiConfig {
                base_url: env_or("INTERNAL_API_URL", defaults.internal_api.base_url),
                secret_token: env_or("INTERNAL_API_TOKEN", defaults.internal_api.secret_token),
                timeout_seconds: std::env::var("INTERNAL_API_TIMEOUT_SECONDS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.internal_api.timeout_seconds),
            },
            server: ServerConfig {
                host: env_or("SERVER_HOST", defaults.server.host),
                port: std::env::var("SERVER_PORT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.server.port),
            },
            cors: CorsConfig {
                allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                    .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
                    .unwrap_or(defaults.cors.allowed_origins),
            },
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            internal_api: InternalApiConfig {
                base_url: "https://internal-api.example.com".to_string(),
                secret_token: String::new(),
                timeout_seconds: 30,
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            cors: CorsConfig {
                allowed_origins: vec!["*".to_string()],
            },
        }
    }
}
