// src/academic/filter.rs

//! Cascading year → semester → subject filter.
//!
//! [`CascadeFilter`] is the interactive selection state; [`apply`] narrows a
//! derived tree and the flat material list consistently under it. Filters
//! obey strict hierarchical precedence: a lower-level selection is honored
//! only when consistent with the level above it.

use serde::Serialize;

use crate::academic::YearNode;
use crate::models::Material;

/// Interactive filter state. `None` means "all" at that level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeFilter {
    year_id: Option<String>,
    semester_id: Option<String>,
    subject_id: Option<String>,
}

impl CascadeFilter {
    /// Start unfiltered.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn year_id(&self) -> Option<&str> {
        self.year_id.as_deref()
    }

    pub fn semester_id(&self) -> Option<&str> {
        self.semester_id.as_deref()
    }

    pub fn subject_id(&self) -> Option<&str> {
        self.subject_id.as_deref()
    }

    /// Select a year, clearing both dependent levels.
    pub fn select_year(&mut self, year_id: impl Into<String>) {
        self.year_id = Some(year_id.into());
        self.semester_id = None;
        self.subject_id = None;
    }

    /// Select a semester, clearing the subject. No-op while no year is
    /// selected.
    pub fn select_semester(&mut self, semester_id: impl Into<String>) {
        if self.year_id.is_none() {
            return;
        }
        self.semester_id = Some(semester_id.into());
        self.subject_id = None;
    }

    /// Select a subject. No-op while no semester is selected.
    pub fn select_subject(&mut self, subject_id: impl Into<String>) {
        if self.semester_id.is_none() {
            return;
        }
        self.subject_id = Some(subject_id.into());
    }

    /// Clear the year level; dependent levels reset too.
    pub fn clear_year(&mut self) {
        self.reset();
    }

    /// Clear the semester level; the subject resets too.
    pub fn clear_semester(&mut self) {
        self.semester_id = None;
        self.subject_id = None;
    }

    /// Clear only the subject level.
    pub fn clear_subject(&mut self) {
        self.subject_id = None;
    }

    /// Back to all-"all".
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Resolve the selections actually honored against a tree.
    ///
    /// A semester selection survives only if that semester sits under the
    /// selected year; a subject selection only if it sits under the honored
    /// semester. Inconsistent or unknown lower-level ids come back as unset.
    /// The year id is kept even when unknown: an unknown year filters
    /// everything out rather than being ignored.
    pub fn reconcile(&self, tree: &[YearNode]) -> CascadeFilter {
        let mut honored = CascadeFilter::default();
        let Some(year_id) = self.year_id.as_deref() else {
            return honored;
        };
        honored.year_id = Some(year_id.to_string());

        let Some(year_node) = tree.iter().find(|n| n.year.id == year_id) else {
            return honored;
        };
        let Some(semester_node) = self
            .semester_id
            .as_deref()
            .and_then(|id| year_node.find_semester(id))
        else {
            return honored;
        };
        honored.semester_id = Some(semester_node.semester.id.clone());

        if let Some(subject) = self
            .subject_id
            .as_deref()
            .and_then(|id| semester_node.find_subject(id))
        {
            honored.subject_id = Some(subject.id.clone());
        }
        honored
    }
}

/// A tree and material list narrowed by one filter state.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FilteredView {
    pub tree: Vec<YearNode>,
    pub materials: Vec<Material>,
}

/// Narrow `tree` and `materials` under `filter`.
///
/// The filtered tree keeps only the selected branch at each honored level.
/// Materials are matched from the full list by the display names resolved
/// from the filtered tree, because the wire record carries denormalized name
/// strings rather than foreign keys: subject level matches the subject name,
/// semester level matches year and semester names, year level matches the
/// year name. Unknown year ids yield empty results, never errors. Pure and
/// idempotent.
pub fn apply(tree: &[YearNode], materials: &[Material], filter: &CascadeFilter) -> FilteredView {
    let honored = filter.reconcile(tree);

    let Some(year_id) = honored.year_id() else {
        return FilteredView {
            tree: tree.to_vec(),
            materials: materials.to_vec(),
        };
    };

    let Some(year_node) = tree.iter().find(|n| n.year.id == year_id) else {
        return FilteredView {
            tree: Vec::new(),
            materials: Vec::new(),
        };
    };

    let mut year = year_node.clone();

    if let Some(semester_id) = honored.semester_id() {
        year.semesters.retain(|s| s.semester.id == semester_id);
        if let Some(subject_id) = honored.subject_id() {
            for semester in &mut year.semesters {
                semester.subjects.retain(|su| su.id == subject_id);
            }
        }
    }

    let materials = filtered_materials(&year, &honored, materials);
    FilteredView {
        tree: vec![year],
        materials,
    }
}

fn filtered_materials(
    year: &YearNode,
    honored: &CascadeFilter,
    materials: &[Material],
) -> Vec<Material> {
    let year_name = year.year.name.as_str();

    if honored.subject_id().is_some() {
        let Some(subject) = year
            .semesters
            .first()
            .and_then(|s| s.subjects.first())
        else {
            return Vec::new();
        };
        return materials
            .iter()
            .filter(|m| m.subject == subject.name)
            .cloned()
            .collect();
    }

    if honored.semester_id().is_some() {
        let Some(semester) = year.semesters.first().map(|s| &s.semester) else {
            return Vec::new();
        };
        return materials
            .iter()
            .filter(|m| {
                m.year.as_deref() == Some(year_name)
                    && m.semester.as_deref() == Some(semester.name.as_str())
            })
            .cloned()
            .collect();
    }

    materials
        .iter()
        .filter(|m| m.year.as_deref() == Some(year_name))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::academic::testing::{
        make_material, make_material_in, make_semester, make_subject, make_year,
    };
    use crate::academic::tree::build_year_tree;

    fn sample() -> (Vec<YearNode>, Vec<Material>) {
        let years = vec![make_year("y1", "1º Ano", 1), make_year("y2", "2º Ano", 2)];
        let semesters = vec![
            make_semester("s1", "1º Sem", "y1"),
            make_semester("s2", "2º Sem", "y1"),
            make_semester("s3", "1º Sem", "y2"),
        ];
        let subjects = vec![
            make_subject("su1", "Cálculo I", 6, "c1", "s1"),
            make_subject("su2", "Álgebra Linear", 5, "c1", "s2"),
            make_subject("su3", "Cálculo II", 6, "c1", "s3"),
        ];
        let materials = vec![
            make_material_in("m1", "Ficha 1", "Cálculo I", "1º Ano", "1º Sem"),
            make_material_in("m2", "Teste", "Álgebra Linear", "1º Ano", "2º Sem"),
            make_material_in("m3", "Ficha 2", "Cálculo II", "2º Ano", "1º Sem"),
        ];
        (build_year_tree(&years, &semesters, &subjects), materials)
    }

    #[test]
    fn unfiltered_view_passes_everything_through() {
        let (tree, materials) = sample();
        let view = apply(&tree, &materials, &CascadeFilter::new());
        assert_eq!(view.tree, tree);
        assert_eq!(view.materials.len(), 3);
    }

    #[test]
    fn year_filter_keeps_only_that_year() {
        let (tree, materials) = sample();
        let mut filter = CascadeFilter::new();
        filter.select_year("y1");

        let view = apply(&tree, &materials, &filter);
        assert_eq!(view.tree.len(), 1);
        assert_eq!(view.tree[0].year.id, "y1");
        // all semesters and subjects of the year stay
        assert_eq!(view.tree[0].semesters.len(), 2);
        assert_eq!(view.tree[0].subject_count(), 2);
        // materials narrowed by resolved year name
        let ids: Vec<&str> = view.materials.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2"]);
    }

    #[test]
    fn semester_filter_narrows_tree_and_materials() {
        let (tree, materials) = sample();
        let mut filter = CascadeFilter::new();
        filter.select_year("y1");
        filter.select_semester("s2");

        let view = apply(&tree, &materials, &filter);
        assert_eq!(view.tree[0].semesters.len(), 1);
        assert_eq!(view.tree[0].semesters[0].semester.id, "s2");
        assert_eq!(view.materials.len(), 1);
        assert_eq!(view.materials[0].id, "m2");
    }

    #[test]
    fn subject_filter_matches_by_name() {
        let (tree, materials) = sample();
        let mut filter = CascadeFilter::new();
        filter.select_year("y1");
        filter.select_semester("s1");
        filter.select_subject("su1");

        let view = apply(&tree, &materials, &filter);
        assert_eq!(view.tree[0].semesters[0].subjects.len(), 1);
        assert_eq!(view.materials.len(), 1);
        assert_eq!(view.materials[0].subject, "Cálculo I");
    }

    #[test]
    fn foreign_semester_is_not_honored() {
        let (tree, _) = sample();
        let mut filter = CascadeFilter::new();
        filter.select_year("y1");
        filter.select_semester("s3"); // belongs to y2

        let honored = filter.reconcile(&tree);
        assert_eq!(honored.year_id(), Some("y1"));
        assert_eq!(honored.semester_id(), None);
    }

    #[test]
    fn selecting_new_year_resets_lower_levels() {
        let mut filter = CascadeFilter::new();
        filter.select_year("y1");
        filter.select_semester("s1");
        filter.select_subject("su1");

        filter.select_year("y2");
        assert_eq!(filter.year_id(), Some("y2"));
        assert_eq!(filter.semester_id(), None);
        assert_eq!(filter.subject_id(), None);
    }

    #[test]
    fn lower_selects_are_noops_without_parents() {
        let mut filter = CascadeFilter::new();
        filter.select_semester("s1");
        assert_eq!(filter.semester_id(), None);

        filter.select_year("y1");
        filter.select_subject("su1");
        assert_eq!(filter.subject_id(), None);
    }

    #[test]
    fn clearing_a_level_cascades_down_only() {
        let mut filter = CascadeFilter::new();
        filter.select_year("y1");
        filter.select_semester("s1");
        filter.select_subject("su1");

        filter.clear_semester();
        assert_eq!(filter.year_id(), Some("y1"));
        assert_eq!(filter.semester_id(), None);
        assert_eq!(filter.subject_id(), None);
    }

    #[test]
    fn unknown_year_yields_empty_results() {
        let (tree, materials) = sample();
        let mut filter = CascadeFilter::new();
        filter.select_year("missing");

        let view = apply(&tree, &materials, &filter);
        assert!(view.tree.is_empty());
        assert!(view.materials.is_empty());
    }

    #[test]
    fn apply_is_idempotent() {
        let (tree, materials) = sample();
        let mut filter = CascadeFilter::new();
        filter.select_year("y1");
        filter.select_semester("s1");

        let first = apply(&tree, &materials, &filter);
        let second = apply(&tree, &materials, &filter);
        assert_eq!(first, second);
    }

    #[test]
    fn material_without_denormalized_names_is_dropped_by_year_filter() {
        let (tree, mut materials) = sample();
        materials.push(make_material("m4", "Solto", "Cálculo I"));

        let unfiltered = apply(&tree, &materials, &CascadeFilter::new());
        assert_eq!(unfiltered.materials.len(), 4);

        let mut filter = CascadeFilter::new();
        filter.select_year("y1");
        let view = apply(&tree, &materials, &filter);
        assert!(view.materials.iter().all(|m| m.id != "m4"));
    }
}
