// src/api/materials.rs

//! Resource clients for materials and file uploads.

use std::path::Path;

use crate::api::ApiClient;
use crate::error::{AppError, Result};
use crate::models::{Material, MaterialData, StoredFile};
use crate::utils;

/// Client for `/materials` endpoints.
pub struct MaterialsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> MaterialsApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Material>> {
        self.client.get_data("/materials").await
    }

    pub async fn get(&self, id: &str) -> Result<Material> {
        self.client.get_data(&format!("/materials/{id}")).await
    }

    pub async fn by_subject(&self, subject_id: &str) -> Result<Vec<Material>> {
        self.client
            .get_data(&format!("/materials/subject/{subject_id}"))
            .await
    }

    pub async fn by_course(&self, course_id: &str) -> Result<Vec<Material>> {
        self.client
            .get_data(&format!("/materials/course/{course_id}"))
            .await
    }

    /// Create a material record referencing an already-uploaded file.
    pub async fn create(&self, data: &MaterialData) -> Result<Material> {
        self.client.post_data("/materials", data).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&format!("/materials/{id}")).await
    }
}

/// Client for `/files` endpoints.
pub struct FilesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> FilesApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `POST /files/upload`: multipart upload of a local file.
    ///
    /// The MIME type is derived from the file extension; validation against
    /// the configured allow-list happens in the upload wizard before this
    /// call is made.
    pub async fn upload(&self, path: &Path) -> Result<StoredFile> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::validation("file has no usable name"))?
            .to_string();
        let mime = utils::mime_for_path(path);
        let bytes = tokio::fs::read(path).await?;
        self.client
            .post_multipart("/files/upload", file_name, mime, bytes)
            .await
    }
}
