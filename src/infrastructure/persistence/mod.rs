mod noop_image_repository;
mod postgres_image_repository;

pub use noop_image_repository::NoopImageRepository;
pub use postgres_image_repository::PostgresImageRepository;
