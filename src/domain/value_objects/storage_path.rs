use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::StorageKey;

const UPLOAD_PREFIX: &str = "uploads";

/// Full object key at the backend: `uploads/<year>/<month>/<key>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoragePath(String);

impl StoragePath {
    /// Partition by the current wall-clock month
    pub fn for_key(key: &StorageKey) -> Self {
        Self::at(key, Utc::now())
    }

    /// Partition by the month of `at`. The month is not zero-padded.
    pub fn at(key: &StorageKey, at: DateTime<Utc>) -> Self {
        Self(format!(
            "{}/{:04}/{}/{}",
            UPLOAD_PREFIX,
            at.year(),
            at.month(),
            key
        ))
    }

    pub fn from_string(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StoragePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_path_for_fixed_clock() {
        let at = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        let key = StorageKey::from_string("abc.jpg");

        assert_eq!(StoragePath::at(&key, at).as_str(), "uploads/2024/3/abc.jpg");
    }

    #[test]
    fn test_two_digit_month() {
        let at = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        let key = StorageKey::from_string("k");

        assert_eq!(StoragePath::at(&key, at).as_str(), "uploads/2025/12/k");
    }

    #[test]
    fn test_for_key_uses_current_year() {
        let key = StorageKey::from_string("now.gif");
        let path = StoragePath::for_key(&key);
        let expected_prefix = format!("uploads/{}/", Utc::now().year());

        assert!(path.as_str().starts_with(&expected_prefix));
        assert!(path.as_str().ends_with("/now.gif"));
    }
}
