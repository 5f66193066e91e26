use std::{path::PathBuf, sync::Arc};

use axum::body::Bytes;

use crate::{
    clock::IdGenerator,
    error::{AppError, AppResult},
};

pub const UPLOADS_ROUTE: &str = "/uploads";

#[derive(Debug)]
pub struct PendingImage {
    file_name: Option<String>,
    bytes: Bytes,
}

impl PendingImage {
    /// Rejects parts whose declared content type is not `image/*`.
    pub fn new(
        file_name: Option<String>,
        content_type: Option<String>,
        bytes: Bytes,
    ) -> AppResult<Self> {
        if let Some(mime) = content_type.filter(|m| !m.starts_with("image/")) {
            return Err(AppError::BadRequest(format!("unsupported image type {mime}")));
        }
        Ok(Self { file_name, bytes })
    }
}

#[derive(Clone)]
pub struct ImageStore {
    dir: PathBuf,
    ids: Arc<IdGenerator>,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>, ids: Arc<IdGenerator>) -> Self {
        Self {
            dir: dir.into(),
            ids,
        }
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    pub async fn save(&self, image: PendingImage) -> AppResult<String> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::Internal(e.into()))?;

        let file_name = format!(
            "{}-{}",
            self.ids.next_stamp(),
            sanitize_file_name(image.file_name.as_deref())
        );
        tokio::fs::write(self.dir.join(&file_name), &image.bytes)
            .await
            .map_err(|e| AppError::Internal(e.into()))?;

        tracing::info!(file = %file_name, size = image.bytes.len(), "image uploaded");
        Ok(format!("{UPLOADS_ROUTE}/{file_name}"))
    }
}

/// Last path component of the client's file name, safe to use as a URL path
/// segment. Falls back to `image`.
pub fn sanitize_file_name(name: Option<&str>) -> String {
    let base = name
        .and_then(|n| n.rsplit(['/', '\\']).next())
        .map(str::trim)
        .filter(|n| !n.is_empty() && *n != "." && *n != "..")
        .unwrap_or("image");
    base.chars()
        .map(|c| {
            if c.is_whitespace() || c.is_control() || "#?%&+:;=@[]!$'()*,\"<>^`{|}".contains(c) {
                '-'
            } else {
                c
            }
        })
        .collect()
}
