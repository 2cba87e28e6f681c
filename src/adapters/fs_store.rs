use crate::domain::ports::{ArtifactKey, ArtifactStore};
use crate::utils::error::Result;
use std::fs;
use std::path::PathBuf;

/// Filesystem-backed artifact store. Writes are keyed by (symbol, kind) and
/// overwrite any previous artifact for the same key.
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    base_path: PathBuf,
}

impl FsArtifactStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl ArtifactStore for FsArtifactStore {
    async fn write(&self, key: &ArtifactKey, data: &[u8]) -> Result<String> {
        let full_path = self.base_path.join(key.relative_path());

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, data)?;
        Ok(full_path.to_string_lossy().into_owned())
    }

    async fn read(&self, key: &ArtifactKey) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(key.relative_path());
        let data = fs::read(full_path)?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn write_then_read_roundtrips() {
        let dir = TempDir::new().unwrap();
        let store = FsArtifactStore::new(dir.path());
        let key = ArtifactKey::raw_image("NMB50", "jpg");

        let path = store.write(&key, b"image-bytes").await.unwrap();
        assert!(path.ends_with("images/NMB50.jpg"));
        assert_eq!(store.read(&key).await.unwrap(), b"image-bytes");
    }

    #[tokio::test]
    async fn write_overwrites_previous_artifact() {
        let dir = TempDir::new().unwrap();
        let store = FsArtifactStore::new(dir.path());
        let key = ArtifactKey::candidate_record("NMB50");

        store.write(&key, b"first").await.unwrap();
        store.write(&key, b"second").await.unwrap();
        assert_eq!(store.read(&key).await.unwrap(), b"second");
    }
}
