use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::validation::MAX_FILE_SIZE;

/// Which object store implementation receives uploads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    S3,
    Local,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "s3" | "minio" => Ok(Self::S3),
            "local" | "fs" => Ok(Self::Local),
            other => Err(format!("Unknown storage backend: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub storage_backend: StorageBackend,
    // Object store settings; the endpoint is also the base of public URLs
    pub storage_endpoint: String,
    pub storage_bucket: String,
    pub storage_region: String,
    pub storage_access_key: String,
    pub storage_secret_key: String,
    pub local_storage_root: PathBuf,
    pub durable_writes: bool,
    pub max_file_size: u64,
    /// When unset, upload metadata is not persisted
    pub database_url: Option<String>,
    // Database connection pool settings
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub db_idle_timeout_secs: u64,
    pub db_max_lifetime_secs: u64,
    pub log_format: LogFormat,
    /// Comma-separated; any origin when unset
    pub allowed_origins: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            storage_backend: StorageBackend::S3,
            storage_endpoint: "http://localhost:9000".to_string(),
            storage_bucket: "images".to_string(),
            storage_region: "us-east-1".to_string(),
            storage_access_key: "minioadmin".to_string(),
            storage_secret_key: "minioadmin".to_string(),
            local_storage_root: PathBuf::from("/data/images"),
            durable_writes: true,
            max_file_size: MAX_FILE_SIZE,
            database_url: None,
            db_max_connections: 20,
            db_min_connections: 5,
            db_acquire_timeout_secs: 30,
            db_idle_timeout_secs: 600,  // 10 minutes
            db_max_lifetime_secs: 1800, // 30 minutes
            log_format: LogFormat::Text,
            allowed_origins: None,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            listen_addr: env_or("LISTEN_ADDR", defaults.listen_addr),
            storage_backend: env_or("STORAGE_BACKEND", defaults.storage_backend),
            storage_endpoint: env_or("MINIO_ENDPOINT", defaults.storage_endpoint),
            storage_bucket: env_or("MINIO_BUCKET", defaults.storage_bucket),
            storage_region: env_or("MINIO_REGION", defaults.storage_region),
            storage_access_key: env_or("MINIO_ACCESS_KEY", defaults.storage_access_key),
            storage_secret_key: env_or("MINIO_SECRET_KEY", defaults.storage_secret_key),
            local_storage_root: std::env::var("LOCAL_STORAGE_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.local_storage_root),
            durable_writes: env_or("DURABLE_WRITES", defaults.durable_writes),
            max_file_size: env_or("MAX_FILE_SIZE", defaults.max_file_size),
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", defaults.db_max_connections),
            db_min_connections: env_or("DB_MIN_CONNECTIONS", defaults.db_min_connections),
            db_acquire_timeout_secs: env_or(
                "DB_ACQUIRE_TIMEOUT_SECS",
                defaults.db_acquire_timeout_secs,
            ),
            db_idle_timeout_secs: env_or("DB_IDLE_TIMEOUT_SECS", defaults.db_idle_timeout_secs),
            db_max_lifetime_secs: env_or("DB_MAX_LIFETIME_SECS", defaults.db_max_lifetime_secs),
            log_format: match std::env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },
            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .ok()
                .filter(|s| !s.trim().is_empty()),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.listen_addr.is_empty() {
            return Err("LISTEN_ADDR cannot be empty".to_string());
        }

        if !self.storage_endpoint.starts_with("http://")
            && !self.storage_endpoint.starts_with("https://")
        {
            return Err("MINIO_ENDPOINT must start with http:// or https://".to_string());
        }

        if self.storage_bucket.trim().is_empty() {
            return Err("MINIO_BUCKET cannot be empty".to_string());
        }

        if self.max_file_size == 0 {
            return Err("MAX_FILE_SIZE must be greater than zero".to_string());
        }

        if let Some(url) = &self.database_url {
            if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                return Err(
                    "DATABASE_URL must start with postgres:// or postgresql://".to_string(),
                );
            }
        }

        if self.db_min_connections > self.db_max_connections {
            return Err("DB_MIN_CONNECTIONS cannot exceed DB_MAX_CONNECTIONS".to_string());
        }

        Ok(())
    }
}
