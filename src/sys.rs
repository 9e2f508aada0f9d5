//! Async filesystem helpers shared by the migration and the VM store.

use std::io;
use std::path::Path;
use tokio::fs;

/// Whether `path` is an existing directory. Missing paths are `false`.
pub async fn is_dir(path: &Path) -> io::Result<bool> {
    match fs::metadata(path).await {
        Ok(meta) => Ok(meta.is_dir()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Whether the directory has no entries.
pub async fn is_empty_dir(path: &Path) -> io::Result<bool> {
    let mut entries = fs::read_dir(path).await?;
    Ok(entries.next_entry().await?.is_none())
}

/// Recursively copy `from` into `to`, creating `to` as needed.
///
/// Symlinks are recreated as symlinks on unix and copied elsewhere.
pub async fn copy_dir_all(from: &Path, to: &Path) -> io::Result<()> {
    let mut pending = vec![(from.to_path_buf(), to.to_path_buf())];

    while let Some((src, dst)) = pending.pop() {
        fs::create_dir_all(&dst).await?;
        let mut entries = fs::read_dir(&src).await?;

        while let Some(entry) = entries.next_entry().await? {
            let file_type = entry.file_type().await?;
            let dest = dst.join(entry.file_name());

            if file_type.is_dir() {
                pending.push((entry.path(), dest));
            } else if file_type.is_symlink() {
                copy_symlink(&entry.path(), &dest).await?;
            } else {
                fs::copy(entry.path(), &dest).await?;
            }
        }
    }

    Ok(())
}

/// Total size in bytes of the regular files under `path`.
pub async fn dir_size(path: &Path) -> io::Result<u64> {
    let mut total = 0;
    let mut pending = vec![path.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut entries = fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let meta = entry.metadata().await?;
            if meta.is_dir() {
                pending.push(entry.path());
            } else if meta.is_file() {
                total += meta.len();
            }
        }
    }

    Ok(total)
}

#[cfg(unix)]
async fn copy_symlink(src: &Path, dest: &Path) -> io::Result<()> {
    let link = fs::read_link(src).await?;
    fs::symlink(link, dest).await
}

#[cfg(not(unix))]
async fn copy_symlink(src: &Path, dest: &Path) -> io::Result<()> {
    fs::copy(src, dest).await.map(|_| ())
}
