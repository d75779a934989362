mod local_filesystem_store;
mod path_builder;
mod s3_object_store;
mod spooled_file;

pub use local_filesystem_store::LocalFilesystemStore;
pub use path_builder::PathBuilder;
pub use s3_object_store::{S3ObjectStore, S3Settings};
pub use spooled_file::{SpoolError, SpooledFile};
