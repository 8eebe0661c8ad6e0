// src/academic/counts.rs

//! Per-node aggregate counts over a derived tree and a flat material list.

use serde::Serialize;

use crate::academic::{SemesterNode, YearNode};
use crate::models::{Material, Subject};

/// Aggregates for one tree node.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct NodeCounts {
    pub subject_count: usize,
    pub material_count: usize,
    pub credit_total: u32,
}

/// Resolve whether a material belongs to a subject.
///
/// The wire record links materials to subjects by `subject_id` on some
/// endpoints and by a denormalized display name on others. The id wins when
/// present; otherwise this falls back to an exact, case-sensitive name
/// match. Two subjects sharing a name across courses are indistinguishable
/// on the name path, a known limitation of the wire format, kept as-is.
pub fn material_belongs_to(material: &Material, subject: &Subject) -> bool {
    match material.subject_id.as_deref() {
        Some(id) => id == subject.id,
        None => material.subject == subject.name,
    }
}

/// Aggregates for a semester node.
///
/// `material_count` counts materials resolving to any subject of the
/// semester, each material at most once. An empty material list yields
/// all-zero counts.
pub fn semester_counts(node: &SemesterNode, materials: &[Material]) -> NodeCounts {
    NodeCounts {
        subject_count: node.subjects.len(),
        material_count: materials
            .iter()
            .filter(|m| node.subjects.iter().any(|su| material_belongs_to(m, su)))
            .count(),
        credit_total: node.subjects.iter().map(|su| su.credits).sum(),
    }
}

/// Aggregates for a year node, rolled up over its semesters.
pub fn year_counts(node: &YearNode, materials: &[Material]) -> NodeCounts {
    NodeCounts {
        subject_count: node.subject_count(),
        material_count: materials
            .iter()
            .filter(|m| node.subjects().any(|su| material_belongs_to(m, su)))
            .count(),
        credit_total: node.credit_total(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::academic::testing::{make_material, make_semester, make_subject, make_year};
    use crate::academic::tree::build_year_tree;

    fn sample_tree() -> Vec<YearNode> {
        let years = vec![make_year("y1", "1º Ano", 1)];
        let semesters = vec![
            make_semester("s1", "1º Semestre", "y1"),
            make_semester("s2", "2º Semestre", "y1"),
        ];
        let subjects = vec![
            make_subject("su1", "Cálculo I", 6, "c1", "s1"),
            make_subject("su2", "Álgebra Linear", 5, "c1", "s2"),
        ];
        build_year_tree(&years, &semesters, &subjects)
    }

    #[test]
    fn single_subject_scenario() {
        let years = vec![make_year("y1", "1º Ano", 1)];
        let semesters = vec![make_semester("s1", "1º Sem", "y1")];
        let subjects = vec![make_subject("su1", "Cálculo I", 6, "c1", "s1")];
        let materials = vec![make_material("m1", "Ficha 1", "Cálculo I")];

        let tree = build_year_tree(&years, &semesters, &subjects);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].semesters.len(), 1);
        assert_eq!(tree[0].semesters[0].subjects.len(), 1);

        let counts = year_counts(&tree[0], &materials);
        assert_eq!(
            counts,
            NodeCounts {
                subject_count: 1,
                material_count: 1,
                credit_total: 6
            }
        );
    }

    #[test]
    fn empty_material_list_yields_zero_counts() {
        let tree = sample_tree();
        let counts = year_counts(&tree[0], &[]);
        assert_eq!(counts.material_count, 0);
        assert_eq!(counts.subject_count, 2);
        assert_eq!(counts.credit_total, 11);
        for semester in &tree[0].semesters {
            assert_eq!(semester_counts(semester, &[]).material_count, 0);
        }
    }

    #[test]
    fn unmatched_subject_name_is_excluded_from_counts() {
        let tree = sample_tree();
        let materials = vec![
            make_material("m1", "Ficha 1", "Cálculo I"),
            make_material("m2", "Resumo", "Disciplina Fantasma"),
        ];
        let counts = year_counts(&tree[0], &materials);
        assert_eq!(counts.material_count, 1);
        // the stray material still exists in the flat list
        assert_eq!(materials.len(), 2);
    }

    #[test]
    fn name_match_is_exact_and_case_sensitive() {
        let tree = sample_tree();
        let materials = vec![make_material("m1", "Ficha 1", "cálculo i")];
        assert_eq!(year_counts(&tree[0], &materials).material_count, 0);
    }

    #[test]
    fn subject_id_wins_over_name() {
        let subject = make_subject("su1", "Cálculo I", 6, "c1", "s1");
        let mut material = make_material("m1", "Ficha 1", "Cálculo I");
        material.subject_id = Some("other-subject".into());
        assert!(!material_belongs_to(&material, &subject));
        material.subject_id = Some("su1".into());
        assert!(material_belongs_to(&material, &subject));
    }

    #[test]
    fn material_counted_once_per_node() {
        // two same-named subjects in one semester; the material matches both
        // by name but is still counted once
        let years = vec![make_year("y1", "1º Ano", 1)];
        let semesters = vec![make_semester("s1", "1º Semestre", "y1")];
        let subjects = vec![
            make_subject("su1", "Cálculo I", 6, "c1", "s1"),
            make_subject("su2", "Cálculo I", 6, "c2", "s1"),
        ];
        let tree = build_year_tree(&years, &semesters, &subjects);
        let materials = vec![make_material("m1", "Ficha 1", "Cálculo I")];
        assert_eq!(year_counts(&tree[0], &materials).material_count, 1);
    }

    #[test]
    fn semester_counts_match_their_subjects() {
        let tree = sample_tree();
        let materials = vec![
            make_material("m1", "Ficha 1", "Cálculo I"),
            make_material("m2", "Teste 1", "Álgebra Linear"),
            make_material("m3", "Ficha 2", "Cálculo I"),
        ];
        let first = semester_counts(&tree[0].semesters[0], &materials);
        let second = semester_counts(&tree[0].semesters[1], &materials);
        assert_eq!(first.material_count, 2);
        assert_eq!(second.material_count, 1);
        assert_eq!(
            first.material_count + second.material_count,
            year_counts(&tree[0], &materials).material_count
        );
    }
}
