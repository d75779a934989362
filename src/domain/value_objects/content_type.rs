use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

const IMAGE_PREFIX: &str = "image/";

/// MIME type that is known to describe an image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentType(String);

impl ContentType {
    /// Accept only values starting with the literal `image/` prefix
    pub fn parse(value: Option<&str>) -> Result<Self, DomainError> {
        match value {
            Some(v) if v.starts_with(IMAGE_PREFIX) => Ok(Self(v.to_string())),
            other => Err(DomainError::UnsupportedContentType(
                other.map(|v| v.to_string()),
            )),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
