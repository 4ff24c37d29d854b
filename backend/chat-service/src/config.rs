use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub redis_url: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, crate::error::AppError> {
        dotenv().ok();
        let redis_url = env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".into());
        if redis_url.trim().is_empty() {
            return Err(crate::error::AppError::Config("REDIS_URL is empty".into()));
        }
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        Ok(Self { redis_url, port })
    }

    #[cfg(test)]
    pub fn test_defaults() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379/0".into(),
            port: 3000,
        }
    }
}
