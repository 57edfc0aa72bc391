// src/services/upload_service.rs

use axum::extract::multipart::Field;
use chrono::Utc;
use std::path::{Path, PathBuf};

use crate::common::error::AppError;

/// Hard cap on a single uploaded file.
pub const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

/// Stores a company logo under `{upload_dir}/company/` with a
/// timestamp-unique filename. Returns the stored filename, or `None` when
/// the submission carried no file.
pub async fn save_logo(upload_dir: &str, field: Field<'_>) -> Result<Option<String>, AppError> {
    let Some(ext) = extension(field.file_name()) else {
        return Ok(None);
    };
    let filename = format!("logo_{}{}", Utc::now().timestamp_millis(), ext);
    let dir = Path::new(upload_dir).join("company");
    persist(&dir, &filename, field).await?;

    Ok(Some(filename))
}

/// Stores a user avatar named after the account, overwriting any previous
/// one for that user.
pub async fn save_avatar(
    upload_dir: &str,
    username: &str,
    field: Field<'_>,
) -> Result<Option<String>, AppError> {
    let Some(ext) = extension(field.file_name()) else {
        return Ok(None);
    };
    let filename = format!("{username}{ext}");
    persist(Path::new(upload_dir), &filename, field).await?;

    Ok(Some(filename))
}

/// `.ext` (dot included) of the submitted filename. `None` means the file
/// input was left empty.
fn extension(file_name: Option<&str>) -> Option<String> {
    let file_name = file_name?.trim();
    if file_name.is_empty() {
        return None;
    }
    Some(
        PathBuf::from(file_name)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default(),
    )
}

async fn persist(dir: &Path, filename: &str, field: Field<'_>) -> Result<(), AppError> {
    let data = field.bytes().await?;
    if data.is_empty() {
        return Err(AppError::Validation("Empty file provided".to_string()));
    }
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(format!(
            "File too large, maximum size is {} MiB",
            MAX_UPLOAD_BYTES / 1024 / 1024
        )));
    }

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create upload directory: {e}"))?;
    tokio::fs::write(dir.join(filename), &data)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to save upload: {e}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_keeps_the_dot() {
        assert_eq!(extension(Some("logo.png")).as_deref(), Some(".png"));
        assert_eq!(extension(Some("a.b.JPG")).as_deref(), Some(".JPG"));
    }

    #[test]
    fn empty_file_inputs_mean_no_upload() {
        assert_eq!(extension(None), None);
        assert_eq!(extension(Some("")), None);
        assert_eq!(extension(Some("   ")), None);
    }

    #[test]
    fn extensionless_names_get_an_empty_suffix() {
        assert_eq!(extension(Some("logo")).as_deref(), Some(""));
    }
}
