//! Validated input types for connectivity data.
//!
//! The raw artifacts are loosely nested mappings (subject → pipeline → list
//! of matrices). These types reject malformed nesting at the boundary so the
//! numeric code never has to re-check shapes deep inside a loop.

use std::collections::BTreeMap;

use ndarray::Array2;

use crate::error::{Error, Result};

/// One square symmetric similarity matrix for a (subject, pipeline,
/// repetition) triple.
///
/// Only the strict lower triangle carries unique information; symmetry and a
/// zero diagonal are assumed from the upstream parcellation, not validated.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectivityMatrix {
    data: Array2<f64>,
}

impl ConnectivityMatrix {
    /// Wrap a matrix, rejecting non-square input.
    pub fn new(data: Array2<f64>) -> Result<Self> {
        let (rows, cols) = data.dim();
        if rows != cols {
            return Err(Error::ShapeMismatch(format!(
                "connectivity matrix must be square, got {rows}x{cols}"
            )));
        }
        Ok(Self { data })
    }

    /// Number of parcellated regions (k).
    pub fn regions(&self) -> usize {
        self.data.nrows()
    }

    /// Value at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[[row, col]]
    }
}

/// Per-pipeline repetition sequences for one subject.
pub type PipelineMap = BTreeMap<String, Vec<ConnectivityMatrix>>;

/// All connectivity matrices recorded for one experimental condition.
///
/// The two-level mapping is ordered (`BTreeMap`), which fixes the
/// lexicographic subject/pipeline ordering the assembler depends on: the two
/// conditions being combined later must enumerate their axes identically.
#[derive(Debug, Clone)]
pub struct ConditionData {
    subjects: BTreeMap<String, PipelineMap>,
    regions: usize,
}

impl ConditionData {
    /// Validate a nested mapping.
    ///
    /// Rejects: an empty outer map, a subject with no pipelines, a
    /// (subject, pipeline) pair with zero repetitions, pipeline key sets
    /// that differ between subjects, and any matrix whose size disagrees
    /// with the rest of the input.
    pub fn new(subjects: BTreeMap<String, PipelineMap>) -> Result<Self> {
        let first = subjects
            .keys()
            .next()
            .ok_or_else(|| Error::ShapeMismatch("condition data has no subjects".into()))?;
        let reference: Vec<&String> = subjects[first].keys().collect();
        if reference.is_empty() {
            return Err(Error::ShapeMismatch(format!(
                "subject {first:?} has no pipelines"
            )));
        }

        let mut regions: Option<usize> = None;
        for (subject, pipelines) in &subjects {
            let keys: Vec<&String> = pipelines.keys().collect();
            if keys != reference {
                return Err(Error::ShapeMismatch(format!(
                    "subject {subject:?} has pipelines {keys:?}, expected {reference:?}"
                )));
            }
            for (pipeline, matrices) in pipelines {
                if matrices.is_empty() {
                    return Err(Error::ShapeMismatch(format!(
                        "subject {subject:?} pipeline {pipeline:?} has zero repetitions"
                    )));
                }
                for matrix in matrices {
                    let k = matrix.regions();
                    match regions {
                        None => regions = Some(k),
                        Some(expected) if expected != k => {
                            return Err(Error::ShapeMismatch(format!(
                                "matrix for subject {subject:?} pipeline {pipeline:?} \
                                 is {k}x{k}, expected {expected}x{expected}"
                            )));
                        }
                        Some(_) => {}
                    }
                }
            }
        }

        // Non-empty checks above guarantee at least one matrix was seen.
        let regions = regions.unwrap_or(0);
        Ok(Self { subjects, regions })
    }

    /// Matrix size k, uniform across the whole input.
    pub fn regions(&self) -> usize {
        self.regions
    }

    /// Subject names in lexicographic order.
    pub fn subjects(&self) -> impl Iterator<Item = &String> {
        self.subjects.keys()
    }

    /// Pipeline names in lexicographic order (identical for every subject).
    pub fn pipelines(&self) -> impl Iterator<Item = &String> {
        self.subjects
            .values()
            .next()
            .into_iter()
            .flat_map(|pipelines| pipelines.keys())
    }

    /// Minimum repetition count over all (subject, pipeline) pairs.
    ///
    /// Sequences longer than this are truncated by the assembler.
    pub fn min_repetitions(&self) -> usize {
        self.subjects
            .values()
            .flat_map(|pipelines| pipelines.values())
            .map(|matrices| matrices.len())
            .min()
            .unwrap_or(0)
    }

    /// Repetition sequence for a (subject, pipeline) pair.
    ///
    /// Both keys are guaranteed present for any name yielded by
    /// [`subjects`](Self::subjects) and [`pipelines`](Self::pipelines).
    pub fn matrices(&self, subject: &str, pipeline: &str) -> &[ConnectivityMatrix] {
        &self.subjects[subject][pipeline]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    fn square(k: usize, fill: f64) -> ConnectivityMatrix {
        ConnectivityMatrix::new(Array2::from_elem((k, k), fill)).unwrap()
    }

    #[test]
    fn rejects_non_square_matrix() {
        let result = ConnectivityMatrix::new(arr2(&[[0.0, 1.0, 2.0], [1.0, 0.0, 3.0]]));
        assert!(matches!(result, Err(Error::ShapeMismatch(_))));
    }

    #[test]
    fn rejects_empty_condition() {
        let result = ConditionData::new(BTreeMap::new());
        assert!(matches!(result, Err(Error::ShapeMismatch(_))));
    }

    #[test]
    fn rejects_zero_repetitions() {
        let mut subjects = BTreeMap::new();
        let mut pipelines = PipelineMap::new();
        pipelines.insert("fmriprep".into(), vec![]);
        subjects.insert("sub-01".into(), pipelines);
        let result = ConditionData::new(subjects);
        assert!(matches!(result, Err(Error::ShapeMismatch(_))));
    }

    #[test]
    fn rejects_heterogeneous_matrix_size() {
        let mut subjects = BTreeMap::new();
        let mut pipelines = PipelineMap::new();
        pipelines.insert("fmriprep".into(), vec![square(3, 0.5), square(4, 0.5)]);
        subjects.insert("sub-01".into(), pipelines);
        let result = ConditionData::new(subjects);
        assert!(matches!(result, Err(Error::ShapeMismatch(_))));
    }

    #[test]
    fn rejects_unequal_pipeline_sets() {
        let mut subjects = BTreeMap::new();
        let mut a = PipelineMap::new();
        a.insert("fmriprep".into(), vec![square(3, 0.1)]);
        subjects.insert("sub-01".into(), a);
        let mut b = PipelineMap::new();
        b.insert("spm".into(), vec![square(3, 0.2)]);
        subjects.insert("sub-02".into(), b);
        let result = ConditionData::new(subjects);
        assert!(matches!(result, Err(Error::ShapeMismatch(_))));
    }

    #[test]
    fn orders_keys_lexicographically() {
        let mut subjects = BTreeMap::new();
        for name in ["sub-10", "sub-02", "sub-01"] {
            let mut pipelines = PipelineMap::new();
            pipelines.insert("b-pipe".into(), vec![square(2, 0.0)]);
            pipelines.insert("a-pipe".into(), vec![square(2, 0.0)]);
            subjects.insert(name.into(), pipelines);
        }
        let data = ConditionData::new(subjects).unwrap();
        let ordered: Vec<&String> = data.subjects().collect();
        assert_eq!(ordered, ["sub-01", "sub-02", "sub-10"]);
        let pipes: Vec<&String> = data.pipelines().collect();
        assert_eq!(pipes, ["a-pipe", "b-pipe"]);
    }

    #[test]
    fn min_repetitions_over_all_pairs() {
        let mut subjects = BTreeMap::new();
        let mut a = PipelineMap::new();
        a.insert("p".into(), vec![square(2, 0.0); 5]);
        subjects.insert("s1".into(), a);
        let mut b = PipelineMap::new();
        b.insert("p".into(), vec![square(2, 0.0); 3]);
        subjects.insert("s2".into(), b);
        let data = ConditionData::new(subjects).unwrap();
        assert_eq!(data.min_repetitions(), 3);
    }
}
