mod content_type;
mod image_id;
mod storage_key;
mod storage_path;

pub use content_type::ContentType;
pub use image_id::ImageId;
pub use storage_key::{file_extension, StorageKey};
pub use storage_path::StoragePath;
