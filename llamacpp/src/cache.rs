//! Maintenance helpers for the local model-artifact cache.
//!
//! Model files downloaded for offline play accumulate in a cache
//! directory. `clear_model_cache` removes entries whose file names contain
//! a given substring, so a stale or corrupt model can be evicted without
//! touching unrelated artifacts.

use std::io;
use std::path::Path;

/// Delete cached files under `dir` whose names contain `needle`.
///
/// Returns the number of files removed. A missing cache directory counts
/// as an empty one. Subdirectories are left alone.
pub async fn clear_model_cache(dir: impl AsRef<Path>, needle: &str) -> io::Result<usize> {
    let dir = dir.as_ref();

    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    let mut removed = 0;
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let name = entry.file_name();
        if name.to_string_lossy().contains(needle) {
            tokio::fs::remove_file(entry.path()).await?;
            removed += 1;
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn scratch_dir(tag: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("llamacpp-cache-test-{tag}"));
        let _ = tokio::fs::remove_dir_all(&dir).await;
        tokio::fs::create_dir_all(&dir).await.unwrap();
        dir
    }

    #[tokio::test]
    async fn test_clear_matching_files() {
        let dir = scratch_dir("matching").await;
        tokio::fs::write(dir.join("tinyllama-q4.gguf"), b"x")
            .await
            .unwrap();
        tokio::fs::write(dir.join("tinyllama-q8.gguf"), b"x")
            .await
            .unwrap();
        tokio::fs::write(dir.join("notes.txt"), b"x").await.unwrap();

        let removed = clear_model_cache(&dir, "tinyllama").await.unwrap();
        assert_eq!(removed, 2);
        assert!(tokio::fs::metadata(dir.join("notes.txt")).await.is_ok());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_dir_is_empty() {
        let dir = std::env::temp_dir().join("llamacpp-cache-test-does-not-exist");
        let removed = clear_model_cache(&dir, "anything").await.unwrap();
        assert_eq!(removed, 0);
    }

    #[tokio::test]
    async fn test_no_matches() {
        let dir = scratch_dir("nomatch").await;
        tokio::fs::write(dir.join("keep.bin"), b"x").await.unwrap();

        let removed = clear_model_cache(&dir, "tinyllama").await.unwrap();
        assert_eq!(removed, 0);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
