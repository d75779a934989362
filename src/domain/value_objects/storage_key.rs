use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generated object name: a random UUID followed by the original file's extension.
///
/// The extension is copied from caller input without any normalisation, so
/// `photo.PNG` keeps `.PNG` and a name like `a.tar.gz` contributes only `.gz`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorageKey(String);

impl StorageKey {
    /// Generate a fresh key for an upload with the given original file name
    pub fn generate(original_file_name: Option<&str>) -> Self {
        Self(format!(
            "{}{}",
            Uuid::new_v4(),
            file_extension(original_file_name)
        ))
    }

    /// Rebuild a key read back from storage
    pub fn from_string(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything from the last `.` onwards, or `""` when there is none
pub fn file_extension(file_name: Option<&str>) -> &str {
    file_name
        .and_then(|name| name.rfind('.').map(|idx| &name[idx..]))
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_extension_preserves_case() {
        assert_eq!(file_extension(Some("photo.PNG")), ".PNG");
    }

    #[test]
    fn test_extension_without_dot_is_empty() {
        assert_eq!(file_extension(Some("noext")), "");
    }

    #[test]
    fn test_extension_of_missing_name_is_empty() {
        assert_eq!(file_extension(None), "");
    }

    #[test]
    fn test_extension_uses_last_dot() {
        assert_eq!(file_extension(Some("archive.tar.gz")), ".gz");
        assert_eq!(file_extension(Some("trailing.")), ".");
        assert_eq!(file_extension(Some(".hidden")), ".hidden");
    }

    #[test]
    fn test_generated_key_is_uuid_plus_extension() {
        let key = StorageKey::generate(Some("cat.png"));
        let (uuid_part, ext) = key.as_str().split_at(36);

        assert!(Uuid::parse_str(uuid_part).is_ok());
        assert_eq!(ext, ".png");
    }

    #[test]
    fn test_generated_key_without_extension_is_bare_uuid() {
        let key = StorageKey::generate(None);
        assert!(Uuid::parse_str(key.as_str()).is_ok());
    }

    #[test]
    fn test_generated_keys_do_not_collide() {
        let keys: HashSet<StorageKey> = (0..10_000)
            .map(|_| StorageKey::generate(Some("a.jpg")))
            .collect();
        assert_eq!(keys.len(), 10_000);
    }
}
