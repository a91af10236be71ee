//! File upload and management.

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::multipart::FilePart;

/// Response from an upload endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    /// Storage path of the uploaded file.
    pub path: String,
    /// Public URL, if the backend exposes one.
    #[serde(default)]
    pub url: Option<String>,
}

/// Metadata for a stored file.
#[derive(Debug, Clone, Deserialize)]
pub struct FileInfo {
    /// Storage path.
    pub path: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type, if known.
    #[serde(default)]
    pub mime: Option<String>,
}

/// Client for the admin file endpoints.
#[derive(Debug, Clone)]
pub struct FileApi {
    client: Arc<ApiClient>,
}

impl FileApi {
    /// Creates the client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Uploads an image. `kind` tells the backend what the image is for
    /// (`story` by default).
    pub async fn upload_image(
        &self,
        image: FilePart,
        kind: Option<&str>,
    ) -> Result<UploadResponse, ApiError> {
        let form = Form::new()
            .part("image", into_part(image)?)
            .text("type", kind.unwrap_or("story").to_string());
        self.client.post_multipart("admin/upload/image", form).await
    }

    /// Uploads a tabular data source file.
    pub async fn upload_data(&self, file: FilePart) -> Result<UploadResponse, ApiError> {
        let form = Form::new().part("data_file", into_part(file)?);
        self.client.post_multipart("admin/upload/data", form).await
    }

    /// Deletes a stored file by path.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.client
            .delete("admin/files", &[("path", path.to_string())])
            .await
    }

    /// Fetches metadata for a stored file.
    pub async fn info(&self, path: &str) -> Result<FileInfo, ApiError> {
        self.client
            .get("admin/files/info", &[("path", path.to_string())])
            .await
    }
}

fn into_part(file: FilePart) -> Result<Part, ApiError> {
    Part::bytes(file.bytes)
        .file_name(file.file_name)
        .mime_str(&file.mime)
        .map_err(|e| ApiError::Unexpected(format!("Invalid MIME type: {e}")))
}
