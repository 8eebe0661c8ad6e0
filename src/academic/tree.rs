// src/academic/tree.rs

//! Nested academic-structure derivation.
//!
//! Joins flat year/semester/subject lists into the `Year → Semester →
//! Subject` tree every browse and admin view renders. The functions here are
//! pure: same inputs, same tree.

use serde::Serialize;

use crate::models::{Semester, Subject, Year};

/// A year with its attached semesters.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct YearNode {
    pub year: Year,
    pub semesters: Vec<SemesterNode>,
}

/// A semester with its attached subjects.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SemesterNode {
    pub semester: Semester,
    pub subjects: Vec<Subject>,
}

impl YearNode {
    /// Count subjects across all semesters of this year.
    pub fn subject_count(&self) -> usize {
        self.semesters.iter().map(|s| s.subjects.len()).sum()
    }

    /// Sum of credits across all subjects of this year.
    pub fn credit_total(&self) -> u32 {
        self.semesters
            .iter()
            .flat_map(|s| &s.subjects)
            .map(|su| su.credits)
            .sum()
    }

    /// Find a semester node by id.
    pub fn find_semester(&self, semester_id: &str) -> Option<&SemesterNode> {
        self.semesters.iter().find(|s| s.semester.id == semester_id)
    }

    /// Iterate over every subject under this year.
    pub fn subjects(&self) -> impl Iterator<Item = &Subject> {
        self.semesters.iter().flat_map(|s| s.subjects.iter())
    }
}

impl SemesterNode {
    /// Find a subject by id.
    pub fn find_subject(&self, subject_id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|su| su.id == subject_id)
    }
}

/// Build the nested tree from flat lists.
///
/// Every input year appears exactly once, ordered by ascending `order`
/// (input order preserved for ties). A year without semesters, or a semester
/// without subjects, yields an empty branch rather than being omitted.
/// Orphaned semesters and subjects (dangling foreign keys) are simply left
/// out; no error path exists here.
pub fn build_year_tree(
    years: &[Year],
    semesters: &[Semester],
    subjects: &[Subject],
) -> Vec<YearNode> {
    attach(years, semesters, subjects, None)
}

/// Build the nested tree for a single course: only subjects belonging to
/// `course_id` are attached, but every year and semester stays present.
///
/// A course's populated years are therefore whichever years have at least
/// one of its subjects; courses carry no direct year reference.
pub fn build_course_tree(
    years: &[Year],
    semesters: &[Semester],
    subjects: &[Subject],
    course_id: &str,
) -> Vec<YearNode> {
    attach(years, semesters, subjects, Some(course_id))
}

fn attach(
    years: &[Year],
    semesters: &[Semester],
    subjects: &[Subject],
    course_id: Option<&str>,
) -> Vec<YearNode> {
    let mut ordered: Vec<&Year> = years.iter().collect();
    ordered.sort_by_key(|y| y.order);

    ordered
        .into_iter()
        .map(|year| YearNode {
            year: year.clone(),
            semesters: semesters
                .iter()
                .filter(|s| s.year_id == year.id)
                .map(|semester| SemesterNode {
                    semester: semester.clone(),
                    subjects: subjects
                        .iter()
                        .filter(|su| su.semester_id == semester.id)
                        .filter(|su| course_id.is_none_or(|c| su.course_id == c))
                        .cloned()
                        .collect(),
                })
                .collect(),
        })
        .collect()
}
