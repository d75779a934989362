//! Shared test fixtures for the integration tests
//!
//! In-memory stand-ins for the object store and metadata store, plus helpers
//! for building multipart requests against the router.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::Router;
use tokio::io::AsyncReadExt;

use image_upload::{
    api::create_router,
    application::builder::ApplicationBuilder,
    domain::entities::ImageRecord,
    ports::{ContentReader, ImageRepository, ObjectStore, RepositoryError, StorageError},
    Config,
};

pub const BOUNDARY: &str = "----image-upload-test-boundary";

/// Object captured by `RecordingStore`
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bucket: String,
    pub path: String,
    pub bytes: Vec<u8>,
    pub declared_size: u64,
    pub content_type: String,
}

/// Object store that keeps every write in memory
#[derive(Default)]
pub struct RecordingStore {
    objects: Mutex<Vec<StoredObject>>,
}

impl RecordingStore {
    pub fn objects(&self) -> Vec<StoredObject> {
        self.objects.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for RecordingStore {
    async fn put_object(
        &self,
        bucket: &str,
        path: &str,
        mut reader: ContentReader,
        size: u64,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;

        self.objects.lock().unwrap().push(StoredObject {
            bucket: bucket.to_string(),
            path: path.to_string(),
            bytes,
            declared_size: size,
            content_type: content_type.to_string(),
        });
        Ok(())
    }
}

/// Object store whose disk is always full
pub struct FailingStore;

#[async_trait]
impl ObjectStore for FailingStore {
    async fn put_object(
        &self,
        _bucket: &str,
        _path: &str,
        _reader: ContentReader,
        _size: u64,
        _content_type: &str,
    ) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::other("disk full")))
    }
}

/// Metadata store that keeps saved records in memory
#[derive(Default)]
pub struct RecordingRepository {
    records: Mutex<Vec<ImageRecord>>,
}

impl RecordingRepository {
    pub fn records(&self) -> Vec<ImageRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageRepository for RecordingRepository {
    async fn save(&self, record: ImageRecord) -> Result<ImageRecord, RepositoryError> {
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }
}

/// Router wired to the given stores with default settings
pub fn app_with(store: Arc<dyn ObjectStore>, repo: Arc<dyn ImageRepository>) -> Router {
    app_with_config(Config::default(), store, repo)
}

pub fn app_with_config(
    config: Config,
    store: Arc<dyn ObjectStore>,
    repo: Arc<dyn ImageRepository>,
) -> Router {
    let state = ApplicationBuilder::new(config)
        .with_object_store(store)
        .with_image_repository(repo)
        .build()
        .expect("Failed to build application state");

    create_router(state)
}

/// One part of a multipart form
pub struct Part<'a> {
    pub name: &'a str,
    pub file_name: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}

impl<'a> Part<'a> {
    pub fn file(file_name: &'a str, content_type: &'a str, data: &'a [u8]) -> Self {
        Self {
            name: "file",
            file_name: Some(file_name),
            content_type: Some(content_type),
            data,
        }
    }
}

/// Encode parts as a `multipart/form-data` body using `BOUNDARY`
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());

        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", part.name);
        if let Some(file_name) = part.file_name {
            disposition.push_str(&format!("; filename=\"{}\"", file_name));
        }
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"\r\n");

        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// Upload request builder, for adding headers before the body
pub fn upload_request() -> axum::http::request::Builder {
    Request::builder()
        .method("POST")
        .uri("/api/images/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
}

/// POST the parts to the upload endpoint
pub fn upload(parts: &[Part<'_>]) -> Request<Body> {
    upload_request()
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

/// Helper to extract JSON response
pub async fn extract_json_response(response: axum::response::Response) -> serde_json::Value {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}
