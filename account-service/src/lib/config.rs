use std::env;
use std::time::Duration;

use auth::HashCost;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Database URL value that selects the in-memory account store.
pub const IN_MEMORY_DATABASE_URL: &str = "memory";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret: String,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: i64,
}

// Keeps the secret out of startup logs.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

/// Argon2id cost parameters used for new password hashes
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        let cost = HashCost::default();
        Self {
            memory_kib: cost.memory_kib,
            iterations: cost.iterations,
            parallelism: cost.parallelism,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            expiration_hours: default_expiration_hours(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_http_port() -> u16 {
    3000
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_expiration_hours() -> i64 {
    auth::TokenIssuer::DEFAULT_TTL_HOURS
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Flat variables `JWT_SECRET` and `DATABASE_URL`
    /// 2. Environment variables (DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    ///
    /// # Errors
    /// Fails when a source cannot be parsed or when no signing secret is set.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__"))
            .set_override_option("jwt.secret", env::var("JWT_SECRET").ok())?
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            .build()?;

        Self::from_sources(configuration)
    }

    /// Deserialize and validate an already layered configuration.
    pub fn from_sources(configuration: ConfigBuilder) -> Result<Self, ConfigError> {
        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must be set (JWT__SECRET or JWT_SECRET)".to_string(),
            ));
        }
        if self.jwt.expiration_hours <= 0 {
            return Err(ConfigError::Message(
                "jwt.expiration_hours must be positive".to_string(),
            ));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "server.request_timeout_secs must be positive".to_string(),
            ));
        }

        Ok(())
    }

    pub fn uses_in_memory_store(&self) -> bool {
        self.database.url == IN_MEMORY_DATABASE_URL
    }

    pub fn hash_cost(&self) -> HashCost {
        HashCost {
            memory_kib: self.password.memory_kib,
            iterations: self.password.iterations,
            parallelism: self.password.parallelism,
        }
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.jwt.expiration_hours)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn from_toml(toml: &str) -> Result<Config, ConfigError> {
        let configuration = ConfigBuilder::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Config::from_sources(configuration)
    }

    #[test]
    fn test_defaults_applied() {
        let config = from_toml(
            r#"
            [database]
            url = "memory"

            [jwt]
            secret = "a-secret"
            "#,
        )
        .expect("Config should load");

        assert!(config.uses_in_memory_store());
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.server.http_port, 3000);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.token_ttl(), chrono::Duration::hours(24));
        assert_eq!(config.hash_cost(), HashCost::default());
    }

    #[test]
    fn test_explicit_values() {
        let config = from_toml(
            r#"
            [database]
            url = "postgres://localhost/accounts"
            max_connections = 12

            [server]
            http_port = 8080
            request_timeout_secs = 3

            [jwt]
            secret = "a-secret"
            expiration_hours = 2

            [password]
            memory_kib = 4096
            iterations = 3
            parallelism = 2
            "#,
        )
        .expect("Config should load");

        assert!(!config.uses_in_memory_store());
        assert_eq!(config.database.max_connections, 12);
        assert_eq!(config.server.http_port, 8080);
        assert_eq!(config.token_ttl(), chrono::Duration::hours(2));
        assert_eq!(config.hash_cost().memory_kib, 4096);
        assert_eq!(config.hash_cost().parallelism, 2);
    }

    #[test]
    fn test_missing_secret_rejected() {
        let result = from_toml(
            r#"
            [database]
            url = "memory"

            [jwt]
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_secret_rejected() {
        let result = from_toml(
            r#"
            [database]
            url = "memory"

            [jwt]
            secret = "   "
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_secret_not_in_debug_output() {
        let config = from_toml(
            r#"
            [database]
            url = "memory"

            [jwt]
            secret = "do-not-print-me"
            "#,
        )
        .expect("Config should load");

        assert!(!format!("{:?}", config).contains("do-not-print-me"));
    }
}
