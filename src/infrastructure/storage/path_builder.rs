use std::path::{Component, Path, PathBuf};

/// Utility for generating on-disk paths for objects
pub struct PathBuilder {
    root: PathBuf,
}

impl PathBuilder {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Generate temp upload path: /root/.tmp/{uuid}
    pub fn temp_path(&self, id: uuid::Uuid) -> PathBuf {
        self.temp_dir().join(id.to_string())
    }

    pub fn temp_dir(&self) -> PathBuf {
        self.root.join(".tmp")
    }

    /// Generate final object path: /root/{bucket}/{key}
    ///
    /// Returns `None` if either part could resolve outside the root.
    pub fn object_path(&self, bucket: &str, key: &str) -> Option<PathBuf> {
        if !is_plain_relative(bucket) || !is_plain_relative(key) {
            return None;
        }
        Some(self.root.join(bucket).join(key))
    }
}

fn is_plain_relative(value: &str) -> bool {
    !value.is_empty()
        && Path::new(value)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}
