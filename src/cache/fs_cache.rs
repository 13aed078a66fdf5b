use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use super::{CacheKey, PageCache};
use crate::error::{RegisterError, RegisterResult};

/// One file per cache key under a directory created on first write
///
/// File contents are the captured page markup exactly as captured.
#[derive(Debug, Clone)]
pub struct FsPageCache {
    dir: PathBuf,
}

impl FsPageCache {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File a key is stored in
    #[must_use]
    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(key.as_str())
    }
}

impl PageCache for FsPageCache {
    async fn get(&self, key: &CacheKey) -> RegisterResult<Option<String>> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(html) => {
                debug!("Cache hit for '{}' ({} bytes)", key, html.len());
                Ok(Some(html))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Cache miss for '{}'", key);
                Ok(None)
            }
            Err(e) => Err(RegisterError::storage(path, e)),
        }
    }

    async fn put(&self, key: &CacheKey, page: &str) -> RegisterResult<()> {
        let dir = self.dir.clone();
        let path = self.path_for(key);
        let content = page.to_owned();

        // Temp file in the same directory, then rename: readers see either
        // the old page or the new one, never a partial write.
        let task_path = path.clone();
        let written = tokio::task::spawn_blocking(move || -> RegisterResult<()> {
            std::fs::create_dir_all(&dir).map_err(|e| RegisterError::storage(&dir, e))?;

            let mut temp_file =
                NamedTempFile::new_in(&dir).map_err(|e| RegisterError::storage(&dir, e))?;
            temp_file
                .write_all(content.as_bytes())
                .and_then(|()| temp_file.as_file().sync_all())
                .map_err(|e| RegisterError::storage(temp_file.path(), e))?;

            temp_file
                .persist(&task_path)
                .map_err(|e| RegisterError::storage(&task_path, e.error))?;
            Ok(())
        })
        .await;

        match written {
            Ok(result) => result?,
            Err(join_err) => {
                return Err(RegisterError::storage(
                    path,
                    std::io::Error::other(format!("cache write task failed: {join_err}")),
                ));
            }
        }

        debug!("Cached {} bytes under '{}'", page.len(), key);
        Ok(())
    }
}
