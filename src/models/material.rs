// src/models/material.rs

//! Material and stored-file data structures.

use serde::{Deserialize, Serialize};

/// Backend record of an uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub id: String,

    /// Original file name
    pub designation: String,

    /// MIME type as reported by the backend
    #[serde(rename = "type")]
    pub content_type: String,

    /// Download path/URL
    pub path: String,

    #[serde(default)]
    pub created_at: String,

    #[serde(default)]
    pub updated_at: String,

    #[serde(default)]
    pub deleted_at: Option<String>,
}

/// A study material associated with a subject.
///
/// The wire record carries denormalized display names (`subject`, `year`,
/// `semester`) rather than foreign keys; `subject_id` is present only on
/// some endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub author: String,

    #[serde(rename = "type")]
    pub kind: MaterialType,

    #[serde(default)]
    pub created_at: String,

    #[serde(default)]
    pub status: bool,

    /// Subject display name (denormalized)
    pub subject: String,

    /// Subject foreign key, when the endpoint supplies one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,

    /// Year display name (denormalized)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,

    /// Semester display name (denormalized)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,

    pub file: StoredFile,
}

impl Material {
    /// Title for display, falling back to the stored file name.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.file.designation
        } else {
            &self.title
        }
    }
}

/// Request body for creating a material record from an uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialData {
    pub file_id: String,
    pub subject_id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: MaterialType,
    pub author: String,
}

/// Closed set of material categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaterialType {
    Ficha,
    Livro,
    Ebook,
    Artigo,
    VideoAula,
    Slides,
    Teste,
    Exercicios,
    Imagem,
    Outro,
}

impl MaterialType {
    /// All variants, in display order.
    pub const ALL: [MaterialType; 10] = [
        MaterialType::Ficha,
        MaterialType::Livro,
        MaterialType::Ebook,
        MaterialType::Artigo,
        MaterialType::VideoAula,
        MaterialType::Slides,
        MaterialType::Teste,
        MaterialType::Exercicios,
        MaterialType::Imagem,
        MaterialType::Outro,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            MaterialType::Ficha => "Ficha",
            MaterialType::Livro => "Livro",
            MaterialType::Ebook => "E-book",
            MaterialType::Artigo => "Artigo",
            MaterialType::VideoAula => "Vídeo Aula",
            MaterialType::Slides => "Slides",
            MaterialType::Teste => "Teste",
            MaterialType::Exercicios => "Exercícios",
            MaterialType::Imagem => "Imagem",
            MaterialType::Outro => "Outro",
        }
    }

    /// Presentation color name.
    pub fn color(&self) -> &'static str {
        match self {
            MaterialType::Ficha => "blue",
            MaterialType::Livro => "purple",
            MaterialType::Ebook => "indigo",
            MaterialType::Artigo => "green",
            MaterialType::VideoAula => "red",
            MaterialType::Slides => "yellow",
            MaterialType::Teste => "orange",
            MaterialType::Exercicios => "pink",
            MaterialType::Imagem => "teal",
            MaterialType::Outro => "gray",
        }
    }

    /// Name used on the wire (matches the serde representation).
    pub fn wire_name(&self) -> &'static str {
        match self {
            MaterialType::Ficha => "FICHA",
            MaterialType::Livro => "LIVRO",
            MaterialType::Ebook => "EBOOK",
            MaterialType::Artigo => "ARTIGO",
            MaterialType::VideoAula => "VIDEO_AULA",
            MaterialType::Slides => "SLIDES",
            MaterialType::Teste => "TESTE",
            MaterialType::Exercicios => "EXERCICIOS",
            MaterialType::Imagem => "IMAGEM",
            MaterialType::Outro => "OUTRO",
        }
    }

    /// Parse a wire name (e.g. "VIDEO_AULA"), case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL.into_iter().find(|t| t.wire_name() == upper)
    }

    /// Suggest a category from a MIME type.
    pub fn from_mime(mime: &str) -> Self {
        if mime == "application/pdf" || mime.contains("word") {
            MaterialType::Livro
        } else if mime.starts_with("image/") {
            MaterialType::Imagem
        } else if mime.starts_with("video/") {
            MaterialType::VideoAula
        } else {
            MaterialType::Outro
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_type_round_trips_wire_names() {
        let json = r#""VIDEO_AULA""#;
        let kind: MaterialType = serde_json::from_str(json).unwrap();
        assert_eq!(kind, MaterialType::VideoAula);
        assert_eq!(serde_json::to_string(&kind).unwrap(), json);
    }

    #[test]
    fn parse_accepts_wire_names_case_insensitively() {
        assert_eq!(MaterialType::parse("slides"), Some(MaterialType::Slides));
        assert_eq!(
            MaterialType::parse(" video_aula "),
            Some(MaterialType::VideoAula)
        );
        assert_eq!(MaterialType::parse("desconhecido"), None);
        for kind in MaterialType::ALL {
            assert_eq!(
                serde_json::to_string(&kind).unwrap(),
                format!("\"{}\"", kind.wire_name())
            );
        }
    }

    #[test]
    fn from_mime_covers_known_families() {
        assert_eq!(
            MaterialType::from_mime("application/pdf"),
            MaterialType::Livro
        );
        assert_eq!(MaterialType::from_mime("image/png"), MaterialType::Imagem);
        assert_eq!(
            MaterialType::from_mime("video/mp4"),
            MaterialType::VideoAula
        );
        assert_eq!(
            MaterialType::from_mime("text/plain"),
            MaterialType::Outro
        );
    }

    #[test]
    fn material_without_optional_fields_deserializes() {
        let json = r#"{
            "id": "m1",
            "title": "Ficha 1",
            "type": "FICHA",
            "subject": "Cálculo I",
            "file": {
                "id": "f1",
                "designation": "ficha1.pdf",
                "type": "application/pdf",
                "path": "/files/f1"
            }
        }"#;
        let material: Material = serde_json::from_str(json).unwrap();
        assert_eq!(material.kind, MaterialType::Ficha);
        assert!(material.subject_id.is_none());
        assert!(material.year.is_none());
    }

    #[test]
    fn display_title_falls_back_to_file_name() {
        let json = r#"{
            "id": "m1",
            "title": "",
            "type": "OUTRO",
            "subject": "Cálculo I",
            "file": {"id": "f1", "designation": "apontamentos.pdf", "type": "application/pdf", "path": "/files/f1"}
        }"#;
        let material: Material = serde_json::from_str(json).unwrap();
        assert_eq!(material.display_title(), "apontamentos.pdf");
    }
}
