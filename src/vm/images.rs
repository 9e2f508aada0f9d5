//! Image cache storage.
//!
//! Every top-level entry of the cache directory is one cached image: a file,
//! or a directory holding an unpacked image.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::error::Result;
use crate::sys::{dir_size, is_dir};

/// A cached image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedImage {
    pub name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Summary of a prune.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneReport {
    pub removed: usize,
    pub freed_bytes: u64,
}

/// Cached images rooted at one directory.
#[derive(Debug, Clone)]
pub struct ImageCache {
    root: PathBuf,
}

impl ImageCache {
    /// Create a cache over `root`. Reading never creates the directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All cached images sorted by name. A missing cache is empty.
    pub async fn list(&self) -> Result<Vec<CachedImage>> {
        if !is_dir(&self.root).await? {
            return Ok(Vec::new());
        }

        let mut images = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let meta = entry.metadata().await?;
            let size_bytes = if meta.is_dir() {
                dir_size(&entry.path()).await?
            } else {
                meta.len()
            };
            images.push(CachedImage {
                name: entry.file_name().to_string_lossy().to_string(),
                path: entry.path(),
                size_bytes,
            });
        }

        images.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(images)
    }

    /// Remove every cached image, keeping the cache directory itself.
    pub async fn clear(&self) -> Result<PruneReport> {
        let mut report = PruneReport::default();
        for image in self.list().await? {
            if fs::symlink_metadata(&image.path).await?.is_dir() {
                fs::remove_dir_all(&image.path).await?;
            } else {
                fs::remove_file(&image.path).await?;
            }
            debug!(image = %image.name, "Removed cached image");
            report.removed += 1;
            report.freed_bytes += image.size_bytes;
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seeded() -> (TempDir, ImageCache) {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("cache");
        std::fs::create_dir_all(root.join("ubuntu")).unwrap();
        std::fs::write(root.join("ubuntu/disk.img"), vec![0u8; 300]).unwrap();
        std::fs::write(root.join("ubuntu/nvram.bin"), vec![0u8; 20]).unwrap();
        std::fs::write(root.join("alpine.img"), vec![0u8; 100]).unwrap();
        (temp, ImageCache::new(root))
    }

    #[tokio::test]
    async fn missing_cache_is_empty_and_not_created() {
        let temp = TempDir::new().unwrap();
        let cache = ImageCache::new(temp.path().join("nope"));
        assert!(cache.list().await.unwrap().is_empty());
        assert!(!cache.root().exists());
    }

    #[tokio::test]
    async fn lists_files_and_directories() {
        let (_temp, cache) = seeded();
        let images = cache.list().await.unwrap();

        let summary: Vec<_> = images
            .iter()
            .map(|i| (i.name.as_str(), i.size_bytes))
            .collect();
        assert_eq!(summary, [("alpine.img", 100), ("ubuntu", 320)]);
    }

    #[tokio::test]
    async fn clear_empties_but_keeps_root() {
        let (_temp, cache) = seeded();
        let report = cache.clear().await.unwrap();

        assert_eq!(report.removed, 2);
        assert_eq!(report.freed_bytes, 420);
        assert!(cache.root().is_dir());
        assert!(cache.list().await.unwrap().is_empty());
    }
}
