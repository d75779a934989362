mod image_repository;
mod object_store;

pub use image_repository::{ImageRepository, RepositoryError};
pub use object_store::{ContentReader, ContentSource, ObjectStore, StorageError};

#[cfg(test)]
pub use image_repository::MockImageRepository;
#[cfg(test)]
pub use object_store::MockObjectStore;
