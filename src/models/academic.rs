// src/models/academic.rs

//! Year, Semester, Course, and Subject data structures.

use serde::{Deserialize, Serialize};

use crate::models::Material;

/// An academic year grouping (e.g., "1º Ano").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Year {
    /// Unique identifier
    pub id: String,

    /// Display name (e.g., "1º Ano")
    pub name: String,

    /// Positive integer used for display sequencing
    pub order: u32,

    #[serde(default)]
    pub created_at: String,

    #[serde(default)]
    pub updated_at: String,
}

/// A half-year division belonging to exactly one year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    pub id: String,

    /// Display name (e.g., "1º Semestre")
    pub name: String,

    /// Owning year
    pub year_id: String,

    #[serde(default)]
    pub created_at: String,

    #[serde(default)]
    pub updated_at: String,
}

/// A degree program grouping subjects.
///
/// Courses carry no direct year reference; their years are inferred
/// transitively through subjects' `semester_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub created_at: String,

    #[serde(default)]
    pub updated_at: String,
}

/// A taught unit belonging to one course and one semester.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,

    pub name: String,

    /// Credit value
    pub credits: u32,

    /// Owning course
    pub course_id: String,

    /// Owning semester
    pub semester_id: String,

    #[serde(default)]
    pub created_at: String,

    #[serde(default)]
    pub updated_at: String,
}

/// A year with its semesters, as nested inside [`CourseDetails`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearWithSemesters {
    pub name: String,

    pub order: u32,

    #[serde(default)]
    pub code: String,

    #[serde(default)]
    pub semesters: Vec<Semester>,
}

/// Nested payload of `GET /courses/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetails {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub code: String,

    #[serde(default)]
    pub status: bool,

    #[serde(default)]
    pub created_at: String,

    #[serde(default)]
    pub subjects: Vec<Subject>,

    #[serde(default)]
    pub years: Vec<YearWithSemesters>,

    /// Flat material list for the whole course
    #[serde(default)]
    pub material: Vec<Material>,
}

/// Request body for creating or updating a year.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearData {
    pub name: String,
    pub order: u32,
}

/// Request body for creating or updating a semester.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterData {
    pub name: String,
    pub year_id: String,
}

/// Request body for creating or updating a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseData {
    pub name: String,
}

/// Request body for creating or updating a subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectData {
    pub name: String,
    pub credits: u32,
    pub course_id: String,
    pub semester_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_deserializes_camel_case() {
        let json = r#"{
            "id": "y1",
            "name": "1º Ano",
            "order": 1,
            "createdAt": "2025-01-01T00:00:00.000Z",
            "updatedAt": "2025-01-01T00:00:00.000Z"
        }"#;
        let year: Year = serde_json::from_str(json).unwrap();
        assert_eq!(year.name, "1º Ano");
        assert_eq!(year.order, 1);
    }

    #[test]
    fn subject_carries_both_parents() {
        let json = r#"{
            "id": "su1",
            "name": "Cálculo I",
            "credits": 6,
            "courseId": "c1",
            "semesterId": "s1"
        }"#;
        let subject: Subject = serde_json::from_str(json).unwrap();
        assert_eq!(subject.course_id, "c1");
        assert_eq!(subject.semester_id, "s1");
    }

    #[test]
    fn course_details_defaults_empty_collections() {
        let json = r#"{"id": "c1", "name": "Engenharia Informática"}"#;
        let details: CourseDetails = serde_json::from_str(json).unwrap();
        assert!(details.subjects.is_empty());
        assert!(details.years.is_empty());
        assert!(details.material.is_empty());
    }
}
