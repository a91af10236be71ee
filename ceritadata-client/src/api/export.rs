//! Story export and import.

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::multipart::FilePart;

/// Result of an import run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportSummary {
    /// Stories imported.
    #[serde(default)]
    pub imported: u64,
    /// Entries skipped (duplicates, invalid payloads).
    #[serde(default)]
    pub skipped: u64,
}

/// Client for the admin export/import endpoints.
#[derive(Debug, Clone)]
pub struct ExportApi {
    client: Arc<ApiClient>,
}

impl ExportApi {
    /// Creates the client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Exports one story as a document (`pdf` by default). Returns the
    /// raw file bytes.
    pub async fn export_story(&self, id: u64, format: Option<&str>) -> Result<Vec<u8>, ApiError> {
        let format = format.unwrap_or("pdf").to_string();
        self.client
            .get_bytes(&format!("admin/export/story/{id}"), &[("format", format)])
            .await
    }

    /// Exports every story as an archive (`zip` by default).
    pub async fn export_all(&self, format: Option<&str>) -> Result<Vec<u8>, ApiError> {
        let format = format.unwrap_or("zip").to_string();
        self.client
            .get_bytes("admin/export/stories", &[("format", format)])
            .await
    }

    /// Imports stories from a previously exported archive.
    pub async fn import(&self, file: FilePart) -> Result<ImportSummary, ApiError> {
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.mime)
            .map_err(|e| ApiError::Unexpected(format!("Invalid MIME type: {e}")))?;
        let form = Form::new().part("import_file", part);
        self.client.post_multipart("admin/import/stories", form).await
    }
}
