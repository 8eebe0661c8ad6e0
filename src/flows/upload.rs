// src/flows/upload.rs

//! Two-step material upload wizard: file first, details second.
//!
//! The file step validates the selection against the configured MIME
//! allow-list and size cap before any network call, then uploads it for a
//! stored-file id. The details step creates the material record referencing
//! that id. Going back discards entered details but keeps the uploaded file.

use std::path::Path;

use async_trait::async_trait;

use crate::api::{ApiClient, FilesApi, MaterialsApi};
use crate::error::{AppError, Result};
use crate::models::{Material, MaterialData, MaterialType, StoredFile, UploadConfig};
use crate::utils;

/// Backend boundary of the wizard, kept as a trait so the state machine
/// tests run without a network.
#[async_trait]
pub trait UploadBackend {
    async fn upload_file(&self, path: &Path) -> Result<StoredFile>;
    async fn create_material(&self, data: &MaterialData) -> Result<Material>;
}

/// Real backend over the resource clients.
pub struct ApiUploadBackend<'a> {
    client: &'a ApiClient,
}

impl<'a> ApiUploadBackend<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UploadBackend for ApiUploadBackend<'_> {
    async fn upload_file(&self, path: &Path) -> Result<StoredFile> {
        FilesApi::new(self.client).upload(path).await
    }

    async fn create_material(&self, data: &MaterialData) -> Result<Material> {
        MaterialsApi::new(self.client).create(data).await
    }
}

/// Wizard position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStep {
    File,
    Details,
}

/// Details entered in the second step.
#[derive(Debug, Clone)]
pub struct MaterialDetails {
    pub title: String,
    pub description: String,
    pub author: String,
    pub subject_id: String,
    pub kind: MaterialType,
}

impl Default for MaterialDetails {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            author: String::new(),
            subject_id: String::new(),
            kind: MaterialType::Outro,
        }
    }
}

/// The upload wizard state machine.
pub struct UploadWizard {
    limits: UploadConfig,
    step: UploadStep,
    file_id: Option<String>,
    suggested_kind: MaterialType,
    details: MaterialDetails,
}

impl UploadWizard {
    pub fn new(limits: UploadConfig) -> Self {
        Self {
            limits,
            step: UploadStep::File,
            file_id: None,
            suggested_kind: MaterialType::Outro,
            details: MaterialDetails::default(),
        }
    }

    pub fn step(&self) -> UploadStep {
        self.step
    }

    /// Id of the uploaded file, once the file step has completed.
    pub fn file_id(&self) -> Option<&str> {
        self.file_id.as_deref()
    }

    /// Material type guessed from the uploaded file's MIME type.
    pub fn suggested_kind(&self) -> MaterialType {
        self.suggested_kind
    }

    pub fn details_mut(&mut self) -> &mut MaterialDetails {
        &mut self.details
    }

    /// Validate and upload a file, advancing to the details step.
    ///
    /// Validation failures are resolved locally: the wizard stays in the
    /// file step and the backend is never called.
    pub async fn attach_file(&mut self, backend: &dyn UploadBackend, path: &Path) -> Result<()> {
        if self.step != UploadStep::File {
            return Err(AppError::validation("a file is already attached"));
        }

        let mime = utils::mime_for_path(path);
        if !self.limits.is_allowed_type(mime) {
            return Err(AppError::validation(format!(
                "unsupported file type: {mime}"
            )));
        }

        let size = tokio::fs::metadata(path).await?.len();
        if size > self.limits.max_file_size_bytes {
            return Err(AppError::validation(format!(
                "file too large: {} (limit {})",
                utils::format_file_size(size),
                utils::format_file_size(self.limits.max_file_size_bytes)
            )));
        }

        let stored = backend.upload_file(path).await?;
        self.suggested_kind = MaterialType::from_mime(&stored.content_type);
        self.file_id = Some(stored.id);
        self.details.kind = self.suggested_kind;
        self.step = UploadStep::Details;
        Ok(())
    }

    /// Return to the file step, discarding entered details. The uploaded
    /// file id is kept, so [`UploadWizard::proceed`] can move forward again
    /// without re-uploading.
    pub fn back(&mut self) {
        if self.step == UploadStep::Details {
            self.details = MaterialDetails {
                kind: self.suggested_kind,
                ..MaterialDetails::default()
            };
            self.step = UploadStep::File;
        }
    }

    /// Advance to the details step using the already-uploaded file.
    pub fn proceed(&mut self) -> Result<()> {
        if self.file_id.is_none() {
            return Err(AppError::validation("no file uploaded yet"));
        }
        self.step = UploadStep::Details;
        Ok(())
    }

    /// Create the material record. On failure the wizard stays in the
    /// details step with the entered data intact.
    pub async fn submit(&mut self, backend: &dyn UploadBackend) -> Result<Material> {
        if self.step != UploadStep::Details {
            return Err(AppError::validation("no file uploaded yet"));
        }
        let file_id = self
            .file_id
            .clone()
            .ok_or_else(|| AppError::validation("no file uploaded yet"))?;
        if self.details.title.trim().is_empty() {
            return Err(AppError::validation("title is required"));
        }
        if self.details.subject_id.trim().is_empty() {
            return Err(AppError::validation("a subject must be selected"));
        }

        let data = MaterialData {
            file_id,
            subject_id: self.details.subject_id.clone(),
            title: self.details.title.clone(),
            description: self.details.description.clone(),
            kind: self.details.kind,
            author: self.details.author.clone(),
        };
        backend.create_material(&data).await
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use super::*;

    struct MockBackend {
        fail_create: bool,
        uploads: Mutex<u32>,
    }

    impl MockBackend {
        fn new() -> Self {
            Self {
                fail_create: false,
                uploads: Mutex::new(0),
            }
        }

        fn upload_count(&self) -> u32 {
            *self.uploads.lock().unwrap()
        }
    }

    #[async_trait]
    impl UploadBackend for MockBackend {
        async fn upload_file(&self, path: &Path) -> Result<StoredFile> {
            *self.uploads.lock().unwrap() += 1;
            Ok(StoredFile {
                id: "f1".into(),
                designation: path
                    .file_name()
                    .unwrap()
                    .to_string_lossy()
                    .into_owned(),
                content_type: utils::mime_for_path(path).to_string(),
                path: "/files/f1".into(),
                created_at: String::new(),
                updated_at: String::new(),
                deleted_at: None,
            })
        }

        async fn create_material(&self, data: &MaterialData) -> Result<Material> {
            if self.fail_create {
                return Err(AppError::api(500, "backend down"));
            }
            Ok(Material {
                id: "m1".into(),
                title: data.title.clone(),
                description: data.description.clone(),
                author: data.author.clone(),
                kind: data.kind,
                created_at: String::new(),
                status: true,
                subject: String::new(),
                subject_id: Some(data.subject_id.clone()),
                year: None,
                semester: None,
                file: StoredFile {
                    id: data.file_id.clone(),
                    designation: "ficha.pdf".into(),
                    content_type: "application/pdf".into(),
                    path: "/files/f1".into(),
                    created_at: String::new(),
                    updated_at: String::new(),
                    deleted_at: None,
                },
            })
        }
    }

    fn temp_pdf(dir: &tempfile::TempDir, name: &str, bytes: usize) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&vec![0u8; bytes]).unwrap();
        path
    }

    #[tokio::test]
    async fn rejects_disallowed_type_before_upload() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_pdf(&dir, "malware.exe", 10);
        let backend = MockBackend::new();
        let mut wizard = UploadWizard::new(UploadConfig::default());

        let err = wizard.attach_file(&backend, &path).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(wizard.step(), UploadStep::File);
        assert_eq!(backend.upload_count(), 0);
    }

    #[tokio::test]
    async fn rejects_oversize_file_before_upload() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_pdf(&dir, "grande.pdf", 2048);
        let backend = MockBackend::new();
        let limits = UploadConfig {
            max_file_size_bytes: 1024,
            ..UploadConfig::default()
        };
        let mut wizard = UploadWizard::new(limits);

        let err = wizard.attach_file(&backend, &path).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(backend.upload_count(), 0);
    }

    #[tokio::test]
    async fn successful_upload_advances_and_suggests_kind() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_pdf(&dir, "ficha.pdf", 100);
        let backend = MockBackend::new();
        let mut wizard = UploadWizard::new(UploadConfig::default());

        wizard.attach_file(&backend, &path).await.unwrap();
        assert_eq!(wizard.step(), UploadStep::Details);
        assert_eq!(wizard.file_id(), Some("f1"));
        assert_eq!(wizard.suggested_kind(), MaterialType::Livro);
    }

    #[tokio::test]
    async fn back_discards_details_but_keeps_file_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_pdf(&dir, "ficha.pdf", 100);
        let backend = MockBackend::new();
        let mut wizard = UploadWizard::new(UploadConfig::default());

        wizard.attach_file(&backend, &path).await.unwrap();
        wizard.details_mut().title = "Ficha 1".into();
        wizard.back();

        assert_eq!(wizard.step(), UploadStep::File);
        assert_eq!(wizard.file_id(), Some("f1"));

        wizard.proceed().unwrap();
        assert_eq!(wizard.step(), UploadStep::Details);
        assert!(wizard.details_mut().title.is_empty());
        assert_eq!(backend.upload_count(), 1);
    }

    #[tokio::test]
    async fn submit_requires_title_and_subject() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_pdf(&dir, "ficha.pdf", 100);
        let backend = MockBackend::new();
        let mut wizard = UploadWizard::new(UploadConfig::default());

        wizard.attach_file(&backend, &path).await.unwrap();
        assert!(wizard.submit(&backend).await.unwrap_err().is_validation());

        wizard.details_mut().title = "Ficha 1".into();
        assert!(wizard.submit(&backend).await.unwrap_err().is_validation());

        wizard.details_mut().subject_id = "su1".into();
        let material = wizard.submit(&backend).await.unwrap();
        assert_eq!(material.title, "Ficha 1");
        assert_eq!(material.file.id, "f1");
    }

    #[tokio::test]
    async fn failed_submit_keeps_details_step_and_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_pdf(&dir, "ficha.pdf", 100);
        let mut backend = MockBackend::new();
        backend.fail_create = true;
        let mut wizard = UploadWizard::new(UploadConfig::default());

        wizard.attach_file(&backend, &path).await.unwrap();
        wizard.details_mut().title = "Ficha 1".into();
        wizard.details_mut().subject_id = "su1".into();

        let err = wizard.submit(&backend).await.unwrap_err();
        assert!(matches!(err, AppError::Api { status: 500, .. }));
        assert_eq!(wizard.step(), UploadStep::Details);
        assert_eq!(wizard.details_mut().title, "Ficha 1");
    }

    #[tokio::test]
    async fn submit_without_file_is_rejected() {
        let backend = MockBackend::new();
        let mut wizard = UploadWizard::new(UploadConfig::default());
        assert!(wizard.proceed().is_err());
        assert!(wizard.submit(&backend).await.unwrap_err().is_validation());
    }
}
