//! Logo uploads stored on local disk
//!
//! Files land in the configured directory as `<epochMillis>_<originalName>`.

use axum::extract::multipart::{Field, MultipartError};
use chrono::Utc;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::{fs, io::AsyncWriteExt};

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Failed to read upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Failed to write upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Upload directory handle
#[derive(Debug, Clone)]
pub struct UploadDir {
    root: PathBuf,
}

impl UploadDir {
    /// Use `root` for uploads, creating it if needed
    pub async fn create(root: impl Into<PathBuf>) -> Result<Self, UploadError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stream a multipart file field to disk and return the stored path
    pub async fn save_field(&self, mut field: Field<'_>) -> Result<String, UploadError> {
        let name = stored_file_name(Utc::now().timestamp_millis(), field.file_name());
        let path = self.root.join(&name);

        let mut file = open_new(&path).await?;
        let written = async {
            let mut total = 0usize;
            while let Some(chunk) = field.chunk().await? {
                file.write_all(&chunk).await?;
                total += chunk.len();
            }
            file.flush().await?;
            Ok::<_, UploadError>(total)
        }
        .await;

        match written {
            Ok(bytes) => {
                tracing::info!(path = %path.display(), bytes, "Saved upload");
                Ok(path.to_string_lossy().replace('\\', "/"))
            }
            Err(e) => {
                drop(file);
                if let Err(remove_err) = fs::remove_file(&path).await {
                    tracing::warn!(path = %path.display(), error = %remove_err, "Failed to remove partial upload");
                }
                Err(e)
            }
        }
    }
}

/// Create `path`, failing if a file is already there
async fn open_new(path: &Path) -> Result<fs::File, UploadError> {
    let file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    Ok(file)
}

/// `<millis>_<name>`, keeping only the last component of the client's file
/// name so it cannot point outside the upload directory.
pub fn stored_file_name(millis: i64, original: Option<&str>) -> String {
    let base = original
        .and_then(|name| name.rsplit(['/', '\\']).next())
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .unwrap_or("upload");

    format!("{millis}_{base}")
}
