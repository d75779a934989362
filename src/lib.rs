//! # Image Upload Service
//!
//! Accepts image uploads over HTTP, stores them in an S3-compatible object
//! store (or a local directory) under a date-partitioned path, and returns the
//! public URL together with the upload metadata.
//!
//! ## Architecture Layers
//!
//! - **Domain**: Upload policy, value objects, the image record
//! - **Application**: The upload use case and its ports
//! - **Infrastructure**: Object store and metadata store adapters
//! - **API**: HTTP handlers and middleware
//!
//! ## Example Usage
//!
//! ```no_run
//! use image_upload::{api::create_router, application::builder::ApplicationBuilder, Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = ApplicationBuilder::new(Config::from_env())
//!     .with_database()
//!     .await?
//!     .with_storage()
//!     .await?
//!     .build()?;
//! let app = create_router(state);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use api::errors as api_errors;
pub use application::{dto, ports, use_cases};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::{entities, value_objects};
