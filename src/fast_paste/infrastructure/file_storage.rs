use super::error::InfrastructureError;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;

// Distinguishes temp files of overlapping saves within one process.
static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Reads and writes image containers on the local filesystem.
pub struct LocalFileStorage;

impl LocalFileStorage {
    pub fn new() -> Self {
        Self
    }

    pub async fn read_image_impl(&self, path: &Path) -> Result<Vec<u8>, InfrastructureError> {
        let data = fs::read(path).await.map_err(InfrastructureError::IoError)?;
        Ok(data)
    }

    /// Writes `data` to a sibling temp file and renames it over `path`, so a
    /// failed write never leaves a truncated image behind. Parent directories
    /// are not created.
    pub async fn save_image_impl(&self, path: &Path, data: &[u8]) -> Result<(), InfrastructureError> {
        let temp_path = temp_path_for(path)?;

        if let Err(e) = write_and_sync(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }

        if let Err(e) = fs::rename(&temp_path, path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(InfrastructureError::IoError(e));
        }
        Ok(())
    }
}

impl Default for LocalFileStorage {
    fn default() -> Self {
        Self::new()
    }
}

async fn write_and_sync(path: &Path, data: &[u8]) -> Result<(), InfrastructureError> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
        .map_err(InfrastructureError::IoError)?;
    file.write_all(data).await.map_err(InfrastructureError::IoError)?;
    file.sync_all().await.map_err(InfrastructureError::IoError)?;
    Ok(())
}

fn temp_path_for(path: &Path) -> Result<PathBuf, InfrastructureError> {
    let file_name = path.file_name().ok_or_else(|| {
        InfrastructureError::FileStorageError(format!("output path has no file name: {}", path.display()))
    })?;
    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(file_name);
    temp_name.push(format!(
        ".{}.{}.tmp",
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    Ok(path.with_file_name(temp_name))
}
