use crate::error::{AppError, AppResult};
use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub database_url: String,
    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub database_min_connections: u32,
    #[serde(default = "default_connection_timeout")]
    pub database_connection_timeout: u64,

    pub redis_url: String,
    #[serde(default = "default_summary_cache_ttl")]
    pub summary_cache_ttl: u64,

    #[serde(default = "default_host")]
    pub server_host: String,
    #[serde(default = "default_port")]
    pub server_port: u16,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "default_access_token_expires")]
    pub jwt_access_token_expires_in: u64,

    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,

    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: String,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub access_token_expires_in: u64,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Clone, Debug)]
pub struct UploadsConfig {
    pub dir: String,
    pub max_bytes: usize,
}

// Default value functions
fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    2
}
fn default_connection_timeout() -> u64 {
    30
}
fn default_summary_cache_ttl() -> u64 {
    300
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_jwt_secret() -> String {
    "your-secret-key".to_string()
}
fn default_access_token_expires() -> u64 {
    86400
} // 1 day
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_uploads_dir() -> String {
    "uploads".to_string()
}
fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}
fn default_bcrypt_cost() -> u32 {
    10
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let config = envy::from_env::<Config>()
            .map_err(|e| AppError::Config(format!("Failed to load config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.database_max_connections == 0 {
            return Err(AppError::Config(
                "DATABASE_MAX_CONNECTIONS must be > 0".to_string(),
            ));
        }

        if self.database_min_connections > self.database_max_connections {
            return Err(AppError::Config(
                "DATABASE_MIN_CONNECTIONS cannot be greater than DATABASE_MAX_CONNECTIONS"
                    .to_string(),
            ));
        }

        if self.jwt_secret == "your-secret-key" {
            return Err(AppError::Config(
                "JWT_SECRET must be set to a secure value".to_string(),
            ));
        }

        if self.jwt_access_token_expires_in == 0 {
            return Err(AppError::Config(
                "JWT_ACCESS_TOKEN_EXPIRES_IN must be > 0".to_string(),
            ));
        }

        if self.max_upload_bytes == 0 {
            return Err(AppError::Config("MAX_UPLOAD_BYTES must be > 0".to_string()));
        }

        url::Url::parse(&self.redis_url)
            .map_err(|e| AppError::Config(format!("REDIS_URL is not a valid URL: {}", e)))?;

        for origin in self.cors_origins.iter().map(|o| o.trim()) {
            if origin != "*" && url::Url::parse(origin).is_err() {
                return Err(AppError::Config(format!(
                    "CORS_ORIGINS contains an invalid origin: {}",
                    origin
                )));
            }
        }

        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(AppError::Config(
                "BCRYPT_COST must be between 4 and 31".to_string(),
            ));
        }

        Ok(())
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn database(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database_url.clone(),
            max_connections: self.database_max_connections,
            min_connections: self.database_min_connections,
            connection_timeout: self.database_connection_timeout,
        }
    }

    pub fn server(&self) -> ServerConfig {
        ServerConfig {
            host: self.server_host.clone(),
            port: self.server_port,
            cors_origins: self.cors_origins.clone(),
        }
    }

    pub fn auth(&self) -> AuthConfig {
        AuthConfig {
            jwt_secret: self.jwt_secret.clone(),
            access_token_expires_in: self.jwt_access_token_expires_in,
        }
    }

    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            format: self.log_format.clone(),
        }
    }

    pub fn uploads(&self) -> UploadsConfig {
        UploadsConfig {
            dir: self.uploads_dir.clone(),
            max_bytes: self.max_upload_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config {
            database_url: "postgres://localhost/hr".to_string(),
            database_max_connections: 10,
            database_min_connections: 1,
            database_connection_timeout: 5,
            redis_url: "redis://127.0.0.1/".to_string(),
            summary_cache_ttl: 60,
            server_host: "127.0.0.1".to_string(),
            server_port: 8000,
            cors_origins: vec!["*".to_string()],
            jwt_secret: "unit-test-secret".to_string(),
            jwt_access_token_expires_in: 3600,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            uploads_dir: "uploads".to_string(),
            max_upload_bytes: 1024,
            bcrypt_cost: 4,
        }
    }

    #[test]
    fn test_validate_accepts_sane_config() {
        assert!(sample().validate().is_ok());
        assert_eq!(sample().server_address(), "127.0.0.1:8000");
    }

    #[test]
    fn test_validate_rejects_default_secret() {
        let mut config = sample();
        config.jwt_secret = default_jwt_secret();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_pool_bounds() {
        let mut config = sample();
        config.database_min_connections = 50;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let mut config = sample();
        config.redis_url = "not a url".to_string();
        assert!(config.validate().is_err());

        let mut config = sample();
        config.cors_origins = vec!["https://hr.example.com".to_string(), "nope".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bcrypt_cost_out_of_range() {
        let mut config = sample();
        config.bcrypt_cost = 2;
        assert!(config.validate().is_err());
    }
}
