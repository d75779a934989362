use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::api::router::AppState;
use crate::application::{
    ports::{ImageRepository, ObjectStore},
    use_cases::{UploadImageUseCase, UploadSettings},
};
use crate::config::{Config, StorageBackend};
use crate::domain::validation::UploadPolicy;
use crate::infrastructure::{
    persistence::{NoopImageRepository, PostgresImageRepository},
    storage::{LocalFilesystemStore, S3ObjectStore, S3Settings},
};

type BuildResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Application builder for clean dependency injection and setup
pub struct ApplicationBuilder {
    config: Config,
    pool: Option<PgPool>,
    object_store: Option<Arc<dyn ObjectStore>>,
    image_repo: Option<Arc<dyn ImageRepository>>,
}

impl ApplicationBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            pool: None,
            object_store: None,
            image_repo: None,
        }
    }

    /// Connect to PostgreSQL when `DATABASE_URL` is set, with retry and migrations.
    ///
    /// Without a database URL this is a no-op and metadata is not persisted.
    pub async fn with_database(mut self) -> BuildResult<Self> {
        let Some(database_url) = self.config.database_url.clone() else {
            info!("DATABASE_URL not set, image metadata will not be persisted");
            return Ok(self);
        };

        info!("Connecting to metadata database");

        // Retry connection with exponential backoff
        let mut retries = 3;
        let mut delay = Duration::from_secs(1);
        let pool = loop {
            match PgPoolOptions::new()
                .max_connections(self.config.db_max_connections)
                .min_connections(self.config.db_min_connections)
                .acquire_timeout(Duration::from_secs(self.config.db_acquire_timeout_secs))
                .idle_timeout(Some(Duration::from_secs(self.config.db_idle_timeout_secs)))
                .max_lifetime(Some(Duration::from_secs(self.config.db_max_lifetime_secs)))
                .connect(&database_url)
                .await
            {
                Ok(pool) => break pool,
                Err(e) if retries > 0 => {
                    retries -= 1;
                    tracing::warn!(
                        "Database connection failed, retrying in {:?} ({} retries left): {}",
                        delay,
                        retries,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => {
                    tracing::error!("Failed to connect to database after retries: {}", e);
                    return Err(Box::new(e));
                }
            }
        };

        info!(
            "Database pool configured: max={}, min={}, acquire_timeout={}s, idle_timeout={}s, max_lifetime={}s",
            self.config.db_max_connections,
            self.config.db_min_connections,
            self.config.db_acquire_timeout_secs,
            self.config.db_idle_timeout_secs,
            self.config.db_max_lifetime_secs
        );

        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to run migrations: {}", e);
                e
            })?;

        self.pool = Some(pool);
        Ok(self)
    }

    /// Initialize the object store selected by `STORAGE_BACKEND`
    pub async fn with_storage(mut self) -> BuildResult<Self> {
        let object_store: Arc<dyn ObjectStore> = match self.config.storage_backend {
            StorageBackend::S3 => {
                info!(
                    endpoint = %self.config.storage_endpoint,
                    bucket = %self.config.storage_bucket,
                    "Using S3-compatible object store"
                );
                Arc::new(S3ObjectStore::new(S3Settings {
                    endpoint: self.config.storage_endpoint.clone(),
                    region: self.config.storage_region.clone(),
                    access_key: self.config.storage_access_key.clone(),
                    secret_key: self.config.storage_secret_key.clone(),
                    path_style: true,
                })?)
            }
            StorageBackend::Local => {
                info!(root = ?self.config.local_storage_root, "Using local filesystem store");
                let store = LocalFilesystemStore::with_durability(
                    self.config.local_storage_root.clone(),
                    self.config.durable_writes,
                );
                store.init().await?;
                Arc::new(store)
            }
        };

        self.object_store = Some(object_store);
        Ok(self)
    }

    /// Replace the object store, e.g. with a fake in tests
    pub fn with_object_store(mut self, object_store: Arc<dyn ObjectStore>) -> Self {
        self.object_store = Some(object_store);
        self
    }

    /// Replace the metadata repository
    pub fn with_image_repository(mut self, image_repo: Arc<dyn ImageRepository>) -> Self {
        self.image_repo = Some(image_repo);
        self
    }

    /// Build application state with the upload use case
    pub fn build(self) -> BuildResult<AppState> {
        let object_store = self.object_store.ok_or("Object store not initialized")?;

        let image_repo: Arc<dyn ImageRepository> = match (self.image_repo, self.pool) {
            (Some(repo), _) => repo,
            (None, Some(pool)) => Arc::new(PostgresImageRepository::new(pool)),
            (None, None) => Arc::new(NoopImageRepository::new()),
        };

        let settings = UploadSettings {
            endpoint: self.config.storage_endpoint.clone(),
            bucket: self.config.storage_bucket.clone(),
            policy: UploadPolicy::new(self.config.max_file_size),
        };

        let upload_use_case = Arc::new(UploadImageUseCase::new(
            object_store,
            image_repo,
            settings,
        ));

        info!("Application layer initialized");

        Ok(AppState {
            upload_use_case,
            allowed_origins: self.config.allowed_origins.clone(),
        })
    }
}
