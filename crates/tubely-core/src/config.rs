//! Configuration module
//!
//! Runtime settings for the thumbnail service, read from the process environment
//! (optionally seeded from a `.env` file).

use std::env;

use crate::storage_types::ThumbnailBackend;

const SERVER_PORT: u16 = 8091;
const MAX_CONNECTIONS: u32 = 5;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_UPLOAD_SIZE_MB: usize = 10;
const DEFAULT_ASSETS_ROOT: &str = "./assets";
const MIN_JWT_SECRET_LEN: usize = 32;

/// Content types accepted by the filesystem backend when no allowlist is configured.
const FILESYSTEM_DEFAULT_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// Output format of the tracing subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    server_port: u16,
    environment: String,
    cors_origins: Vec<String>,
    jwt_secret: String,
    database_url: Option<String>,
    db_max_connections: u32,
    db_timeout_seconds: u64,
    thumbnail_backend: ThumbnailBackend,
    assets_root: String,
    public_base_url: String,
    max_upload_size_bytes: usize,
    // None accepts any declared content type
    allowed_content_types: Option<Vec<String>>,
    log_format: LogFormat,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let server_port: u16 = match var("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => SERVER_PORT,
        };

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let jwt_secret =
            var("JWT_SECRET").ok_or_else(|| anyhow::anyhow!("JWT_SECRET must be set"))?;

        let database_url = var("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let thumbnail_backend = match var("THUMBNAIL_BACKEND") {
            Some(raw) => raw.parse::<ThumbnailBackend>()?,
            None => ThumbnailBackend::Filesystem,
        };

        let max_upload_size_mb: usize = match var("MAX_UPLOAD_SIZE_MB") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be a whole number"))?,
            None => DEFAULT_MAX_UPLOAD_SIZE_MB,
        };
        let max_upload_size_bytes = max_upload_size_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB is too large"))?;

        let allowed_content_types = match var("THUMBNAIL_ALLOWED_CONTENT_TYPES") {
            Some(raw) => parse_content_type_list(&raw),
            None => default_content_types(thumbnail_backend),
        };

        let log_format = match var("LOG_FORMAT").map(|s| s.trim().to_lowercase()) {
            Some(ref f) if f == "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            server_port,
            environment,
            cors_origins,
            jwt_secret,
            database_url,
            db_max_connections: var("DB_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: var("DB_TIMEOUT_SECONDS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            thumbnail_backend,
            assets_root: var("ASSETS_ROOT").unwrap_or_else(|| DEFAULT_ASSETS_ROOT.to_string()),
            public_base_url: var("PUBLIC_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| format!("http://localhost:{}", server_port)),
            max_upload_size_bytes,
            allowed_content_types,
            log_format,
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LEN
            ));
        }

        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if let Some(url) = &self.database_url {
            if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                return Err(anyhow::anyhow!(
                    "DATABASE_URL must be a valid PostgreSQL connection string"
                ));
            }
        }

        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }

        if self.thumbnail_backend == ThumbnailBackend::Filesystem
            && self.assets_root.trim().is_empty()
        {
            return Err(anyhow::anyhow!(
                "ASSETS_ROOT must be set when using the filesystem thumbnail backend"
            ));
        }

        if let Some(types) = &self.allowed_content_types {
            if types.is_empty() {
                return Err(anyhow::anyhow!(
                    "THUMBNAIL_ALLOWED_CONTENT_TYPES lists no types; use '*' to accept any"
                ));
            }
            if let Some(bad) = types.iter().find(|t| !t.contains('/')) {
                return Err(anyhow::anyhow!(
                    "THUMBNAIL_ALLOWED_CONTENT_TYPES entry '{}' is not a type/subtype pair",
                    bad
                ));
            }
        }

        Ok(())
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.db_timeout_seconds
    }

    pub fn thumbnail_backend(&self) -> ThumbnailBackend {
        self.thumbnail_backend
    }

    pub fn assets_root(&self) -> &str {
        &self.assets_root
    }

    pub fn public_base_url(&self) -> &str {
        &self.public_base_url
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.max_upload_size_bytes
    }

    pub fn allowed_content_types(&self) -> Option<&[String]> {
        self.allowed_content_types.as_deref()
    }

    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

fn default_content_types(backend: ThumbnailBackend) -> Option<Vec<String>> {
    match backend {
        ThumbnailBackend::Filesystem => Some(
            FILESYSTEM_DEFAULT_CONTENT_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        ),
        ThumbnailBackend::Memory => None,
    }
}

fn parse_content_type_list(raw: &str) -> Option<Vec<String>> {
    if raw.trim() == "*" {
        return None;
    }
    Some(
        raw.split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, anyhow::Error> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("JWT_SECRET", SECRET)]).unwrap();
        assert_eq!(config.server_port(), 8091);
        assert_eq!(config.thumbnail_backend(), ThumbnailBackend::Filesystem);
        assert_eq!(config.assets_root(), "./assets");
        assert_eq!(config.public_base_url(), "http://localhost:8091");
        assert_eq!(config.max_upload_size_bytes(), 10 * 1024 * 1024);
        assert_eq!(config.database_url(), None);
        assert_eq!(config.log_format(), LogFormat::Pretty);
        assert_eq!(
            config.allowed_content_types(),
            Some(&["image/jpeg".to_string(), "image/png".to_string()][..])
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_memory_backend_accepts_any_type_by_default() {
        let config =
            config_from(&[("JWT_SECRET", SECRET), ("THUMBNAIL_BACKEND", "memory")]).unwrap();
        assert_eq!(config.thumbnail_backend(), ThumbnailBackend::Memory);
        assert!(config.allowed_content_types().is_none());
    }

    #[test]
    fn test_allowlist_override() {
        let config = config_from(&[
            ("JWT_SECRET", SECRET),
            ("THUMBNAIL_BACKEND", "memory"),
            ("THUMBNAIL_ALLOWED_CONTENT_TYPES", " image/PNG, image/webp ,"),
        ])
        .unwrap();
        assert_eq!(
            config.allowed_content_types(),
            Some(&["image/png".to_string(), "image/webp".to_string()][..])
        );

        let config =
            config_from(&[("JWT_SECRET", SECRET), ("THUMBNAIL_ALLOWED_CONTENT_TYPES", "*")])
                .unwrap();
        assert!(config.allowed_content_types().is_none());
    }

    #[test]
    fn test_missing_jwt_secret_fails() {
        let err = config_from(&[]).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn test_short_jwt_secret_fails_validation() {
        let config = config_from(&[("JWT_SECRET", "short")]).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_port_fails() {
        assert!(config_from(&[("JWT_SECRET", SECRET), ("PORT", "eighty")]).is_err());
    }

    #[test]
    fn test_invalid_upload_size_fails() {
        for bad in ["ten", "-1", "1.5"] {
            assert!(
                config_from(&[("JWT_SECRET", SECRET), ("MAX_UPLOAD_SIZE_MB", bad)]).is_err(),
                "MAX_UPLOAD_SIZE_MB={} was accepted",
                bad
            );
        }
    }

    #[test]
    fn test_upload_size_overflow_fails() {
        let huge = usize::MAX.to_string();
        let err = config_from(&[("JWT_SECRET", SECRET), ("MAX_UPLOAD_SIZE_MB", &huge)]).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_empty_allowlist_fails_validation() {
        let config = config_from(&[
            ("JWT_SECRET", SECRET),
            ("THUMBNAIL_ALLOWED_CONTENT_TYPES", " , ,"),
        ])
        .unwrap();
        assert_eq!(config.allowed_content_types(), Some(&[][..]));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_backend_fails() {
        assert!(config_from(&[("JWT_SECRET", SECRET), ("THUMBNAIL_BACKEND", "s3")]).is_err());
    }

    #[test]
    fn test_wildcard_cors_rejected_in_production() {
        let config = config_from(&[("JWT_SECRET", SECRET), ("ENVIRONMENT", "production")]).unwrap();
        assert!(config.is_production());
        assert!(config.validate().is_err());

        let config = config_from(&[
            ("JWT_SECRET", SECRET),
            ("APP_ENV", "prod"),
            ("CORS_ORIGINS", "https://tubely.example"),
        ])
        .unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_database_url_must_be_postgres() {
        let config =
            config_from(&[("JWT_SECRET", SECRET), ("DATABASE_URL", "mysql://localhost/db")])
                .unwrap();
        assert!(config.validate().is_err());

        let config = config_from(&[
            ("JWT_SECRET", SECRET),
            ("DATABASE_URL", "postgres://localhost/tubely"),
        ])
        .unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_public_base_url_trailing_slash_trimmed() {
        let config = config_from(&[
            ("JWT_SECRET", SECRET),
            ("PUBLIC_BASE_URL", "https://cdn.tubely.example/"),
        ])
        .unwrap();
        assert_eq!(config.public_base_url(), "https://cdn.tubely.example");
    }
}
