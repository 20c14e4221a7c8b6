use std::{
    future::Future,
    io::ErrorKind,
    ops::Deref,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{anyhow, Context, Result};
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, warn};

/// Interface for abstracting where the serialized document lives.
pub trait DocumentStorage {
    /// Returns the stored bytes, or `None` if nothing has been stored yet.
    fn read(&self) -> impl Future<Output = Result<Option<Vec<u8>>>> + Send;

    /// Replaces whatever is stored with `contents`.
    fn write(&self, contents: Vec<u8>) -> impl Future<Output = Result<()>> + Send;

    /// Human readable location, used in command output.
    fn location(&self) -> String;
}

impl<T: Deref> DocumentStorage for T
where
    T::Target: DocumentStorage,
{
    fn read(&self) -> impl Future<Output = Result<Option<Vec<u8>>>> + Send {
        self.deref().read()
    }

    fn write(&self, contents: Vec<u8>) -> impl Future<Output = Result<()>> + Send {
        self.deref().write(contents)
    }

    fn location(&self) -> String {
        self.deref().location()
    }
}

/// The main realization of [DocumentStorage]. Stores the document in a single JSON file.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the new contents are written to before being renamed over the target.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|v| v.to_os_string())
            .unwrap_or_else(|| "chaoscatcher.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn replace_with(&self, staging: &Path, contents: &[u8]) -> Result<()> {
        let mut file = fs::File::create(staging)
            .await
            .with_context(|| format!("Failed to create {staging:?}"))?;
        file.write_all(contents)
            .await
            .with_context(|| format!("Failed to write {staging:?}"))?;
        file.sync_all()
            .await
            .with_context(|| format!("Failed to sync {staging:?}"))?;
        drop(file);

        fs::rename(staging, &self.path)
            .await
            .with_context(|| format!("Failed to replace {:?}", self.path))?;
        debug!("Replaced {:?}", self.path);
        Ok(())
    }
}

impl DocumentStorage for FileStorage {
    async fn read(&self) -> Result<Option<Vec<u8>>> {
        debug!("Reading {:?}", self.path);
        match fs::read(&self.path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {:?}", self.path)),
        }
    }

    async fn write(&self, contents: Vec<u8>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|v| !v.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory {parent:?}"))?;
        }

        // Rename is atomic on the same filesystem, so readers see either the old or the new file.
        let staging = self.staging_path();
        let result = self.replace_with(&staging, &contents).await;
        if result.is_err() {
            if let Err(e) = fs::remove_file(&staging).await {
                warn!("Failed to clean up {staging:?} {e:?}");
            }
        }
        result
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Keeps the document in memory. Useful for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    contents: Mutex<Option<Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: Mutex::new(Some(contents.into())),
        }
    }

    /// Snapshot of the stored bytes.
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.contents.lock().ok().and_then(|v| v.clone())
    }
}

impl DocumentStorage for MemoryStorage {
    async fn read(&self) -> Result<Option<Vec<u8>>> {
        let contents = self
            .contents
            .lock()
            .map_err(|_| anyhow!("Memory storage lock was poisoned"))?;
        Ok(contents.clone())
    }

    async fn write(&self, contents: Vec<u8>) -> Result<()> {
        let mut stored = self
            .contents
            .lock()
            .map_err(|_| anyhow!("Memory storage lock was poisoned"))?;
        *stored = Some(contents);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".into()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::Result;
    use tempfile::tempdir;

    use super::{DocumentStorage, FileStorage, MemoryStorage};

    #[tokio::test]
    async fn test_file_storage_missing_file() -> Result<()> {
        let dir = tempdir()?;
        let storage = FileStorage::new(dir.path().join("data.json"));
        assert_eq!(storage.read().await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_file_storage_replaces_contents() -> Result<()> {
        let dir = tempdir()?;
        let storage = FileStorage::new(dir.path().join("nested").join("data.json"));

        storage.write(b"{\"first\": true}".to_vec()).await?;
        storage.write(b"{}".to_vec()).await?;

        assert_eq!(storage.read().await?, Some(b"{}".to_vec()));
        let files = std::fs::read_dir(dir.path().join("nested"))?.count();
        assert_eq!(files, 1, "staging file should be renamed away");
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_replace_removes_staging_file() -> Result<()> {
        let dir = tempdir()?;
        let target = dir.path().join("data.json");
        std::fs::create_dir(&target)?;
        let storage = FileStorage::new(target);

        assert!(storage.write(b"{}".to_vec()).await.is_err());

        assert!(!dir.path().join("data.json.tmp").exists());
        assert!(storage.path().is_dir());
        Ok(())
    }

    #[tokio::test]
    async fn test_memory_storage_through_pointer() -> Result<()> {
        let storage = Arc::new(MemoryStorage::new());
        assert_eq!(storage.read().await?, None);

        storage.write(b"[]".to_vec()).await?;

        assert_eq!(storage.contents(), Some(b"[]".to_vec()));
        assert_eq!(storage.location(), "memory");
        Ok(())
    }
}
