use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::utils::is_valid_audio_filename;

/// Local directory holding audio downloaded for the current submission.
#[derive(Debug, Clone)]
pub struct AudioCache {
    dir: PathBuf,
    protected: Option<PathBuf>,
}

impl AudioCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            protected: None,
        }
    }

    /// Never clear `dir` when the cache resolves to it.
    ///
    /// Used for the server's own audio store.
    pub fn with_protected_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.protected = Some(dir.into());
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn is_protected(&self) -> std::io::Result<bool> {
        let Some(protected) = &self.protected else {
            return Ok(false);
        };
        if !tokio::fs::try_exists(protected).await? {
            return Ok(false);
        }
        let cache = tokio::fs::canonicalize(&self.dir).await?;
        Ok(cache == tokio::fs::canonicalize(protected).await?)
    }

    /// Delete every file in the cache directory, creating the directory if missing.
    ///
    /// Fails without deleting anything when the directory is the protected one.
    pub async fn clear(&self) -> std::io::Result<()> {
        if !tokio::fs::try_exists(&self.dir).await? {
            return tokio::fs::create_dir_all(&self.dir).await;
        }
        if self.is_protected().await? {
            return Err(Error::new(
                ErrorKind::PermissionDenied,
                format!(
                    "{} is the server audio directory and is never cleared",
                    self.dir.display()
                ),
            ));
        }

        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                debug!("Removing cached audio {}", entry.path().display());
                tokio::fs::remove_file(entry.path()).await?;
            }
        }
        Ok(())
    }

    /// Write downloaded audio under its server-side filename.
    ///
    /// The name must be a bare `.mp3` filename.
    pub async fn store(&self, filename: &str, data: &[u8]) -> std::io::Result<PathBuf> {
        if !is_valid_audio_filename(filename) {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("invalid audio filename: {filename:?}"),
            ));
        }
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(filename);
        tokio::fs::write(&path, data).await?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_clear_creates_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let cache = AudioCache::new(temp_dir.path().join("cache"));

        cache.clear().await.unwrap();
        assert!(cache.dir().is_dir());
    }

    #[tokio::test]
    async fn test_clear_removes_files() {
        let temp_dir = TempDir::new().unwrap();
        let cache = AudioCache::new(temp_dir.path());
        std::fs::write(temp_dir.path().join("old.mp3"), b"old").unwrap();
        std::fs::write(temp_dir.path().join("older.mp3"), b"older").unwrap();

        cache.clear().await.unwrap();
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_store() {
        let temp_dir = TempDir::new().unwrap();
        let cache = AudioCache::new(temp_dir.path().join("cache"));

        let path = cache.store("reply.mp3", b"ID3").await.unwrap();
        assert_eq!(path, temp_dir.path().join("cache").join("reply.mp3"));
        assert_eq!(std::fs::read(path).unwrap(), b"ID3");
    }

    #[tokio::test]
    async fn test_store_rejects_paths_outside_cache() {
        let temp_dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let cache = AudioCache::new(temp_dir.path().join("cache"));

        let absolute = outside.path().join("pwned.mp3");
        for name in [absolute.to_str().unwrap(), "../pwned.mp3", "nested/pwned.mp3"] {
            let err = cache.store(name, b"EVIL").await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
        }
        assert!(!absolute.exists());
        assert!(!temp_dir.path().join("pwned.mp3").exists());
    }

    #[tokio::test]
    async fn test_clear_refuses_protected_dir() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("served.mp3"), b"ID3").unwrap();
        // Same directory reached through a different path
        let cache = AudioCache::new(temp_dir.path().join("."))
            .with_protected_dir(temp_dir.path());

        let err = cache.clear().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
        assert!(temp_dir.path().join("served.mp3").exists());
    }

    #[tokio::test]
    async fn test_clear_with_distinct_protected_dir() {
        let temp_dir = TempDir::new().unwrap();
        let server_dir = temp_dir.path().join("audio");
        let cache_dir = temp_dir.path().join("downloads");
        std::fs::create_dir_all(&server_dir).unwrap();
        std::fs::create_dir_all(&cache_dir).unwrap();
        std::fs::write(server_dir.join("served.mp3"), b"ID3").unwrap();
        std::fs::write(cache_dir.join("old.mp3"), b"old").unwrap();

        let cache = AudioCache::new(&cache_dir).with_protected_dir(&server_dir);
        cache.clear().await.unwrap();

        assert!(!cache_dir.join("old.mp3").exists());
        assert!(server_dir.join("served.mp3").exists());
    }
}
