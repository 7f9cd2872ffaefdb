use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Relative paths resolve against the working directory.
    pub fn current_dir() -> Self {
        Self::new(".")
    }

    fn full_path(&self, path: &str) -> PathBuf {
        // 絕對路徑會直接取代 base_path
        self.base_path.join(path)
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.full_path(path);

        if let Some(parent) = full_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(full_path, data)?;
        Ok(())
    }

    fn locate(&self, path: &str) -> String {
        let full_path = self.full_path(path);
        fs::canonicalize(&full_path)
            .unwrap_or(full_path)
            .display()
            .to_string()
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::current_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage
            .write_file("nested/deeper/mentors.json", b"[]")
            .await
            .unwrap();

        let written = temp_dir.path().join("nested/deeper/mentors.json");
        assert_eq!(fs::read(&written).unwrap(), b"[]");
    }

    #[tokio::test]
    async fn test_locate_is_absolute_after_write() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage.write_file("mentors.json", b"[]").await.unwrap();

        let located = storage.locate("mentors.json");
        assert!(Path::new(&located).is_absolute());
        assert!(located.ends_with("mentors.json"));
    }

    #[tokio::test]
    async fn test_absolute_path_ignores_base() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("abs/mentors.json");
        let storage = LocalStorage::new("/nonexistent-base");

        storage
            .write_file(target.to_str().unwrap(), b"[]")
            .await
            .unwrap();

        assert!(target.exists());
    }
}
