// src/academic/mod.rs

//! Academic-structure derivation core.
//!
//! Pure functions that join flat resource lists into the nested
//! year/semester/subject tree, aggregate per-node counts, and apply the
//! cascading filter. No I/O, no error paths: mismatched ids produce empty
//! results.

pub mod counts;
pub mod filter;
pub mod tree;

pub use counts::{NodeCounts, material_belongs_to, semester_counts, year_counts};
pub use filter::{CascadeFilter, FilteredView, apply};
pub use tree::{SemesterNode, YearNode, build_course_tree, build_year_tree};
