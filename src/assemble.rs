//! Array Assembler: nested connectivity matrices → labeled 4-D dataset.

use ndarray::Array4;

use crate::atlas::{region_pair_labels, tril_indices, Atlas};
use crate::dataset::FcDataset;
use crate::error::{Error, Result};
use crate::types::ConditionData;

/// Assemble one condition's matrices into a labeled dataset.
///
/// Axis orderings come from the input's lexicographic key order, so two
/// conditions assembled from the same cohort produce identical cell,
/// pipeline, and subject coordinates and can be concatenated directly.
///
/// The repetition count is the minimum sequence length over all
/// (subject, pipeline) pairs; longer sequences are truncated, not padded.
/// Every slot of the iteration coordinate carries `condition`.
///
/// # Errors
///
/// `ShapeMismatch` when the atlas name count disagrees with the matrix size
/// k, or when the assembled coordinates fail the postcondition check against
/// the array extents.
pub fn assemble(data: &ConditionData, condition: &str, atlas: &dyn Atlas) -> Result<FcDataset> {
    let k = data.regions();
    let cells = region_pair_labels(atlas, k)?;
    let pairs = tril_indices(k);

    let subjects: Vec<String> = data.subjects().cloned().collect();
    let pipelines: Vec<String> = data.pipelines().cloned().collect();
    let repetitions = data.min_repetitions();

    let mut values = Array4::zeros((pairs.len(), repetitions, pipelines.len(), subjects.len()));
    for (s_idx, subject) in subjects.iter().enumerate() {
        for (p_idx, pipeline) in pipelines.iter().enumerate() {
            let matrices = data.matrices(subject, pipeline);
            for (r_idx, matrix) in matrices.iter().take(repetitions).enumerate() {
                for (c_idx, &(row, col)) in pairs.iter().enumerate() {
                    values[[c_idx, r_idx, p_idx, s_idx]] = matrix.get(row, col);
                }
            }
        }
    }

    let iterations = vec![condition.to_string(); repetitions];
    if iterations.len() != values.dim().1 {
        return Err(Error::ShapeMismatch(format!(
            "iteration mismatch: data extent {} vs labels {}",
            values.dim().1,
            iterations.len()
        )));
    }

    FcDataset::new(cells, iterations, pipelines, subjects, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::NamedAtlas;
    use crate::types::{ConnectivityMatrix, PipelineMap};
    use ndarray::arr2;
    use std::collections::BTreeMap;

    fn matrix(values: [[f64; 3]; 3]) -> ConnectivityMatrix {
        ConnectivityMatrix::new(arr2(&values)).unwrap()
    }

    /// Symmetric 3x3 matrix whose strict lower triangle is (a, b, c).
    fn from_triangle(a: f64, b: f64, c: f64) -> ConnectivityMatrix {
        matrix([[0.0, a, b], [a, 0.0, c], [b, c, 0.0]])
    }

    fn atlas3() -> NamedAtlas {
        NamedAtlas::new(vec!["Vis".into(), "SomMot".into(), "Default".into()])
    }

    fn one_subject(counts: &[usize]) -> ConditionData {
        let mut subjects = BTreeMap::new();
        let mut pipelines = PipelineMap::new();
        for (i, &count) in counts.iter().enumerate() {
            pipelines.insert(
                format!("pipe-{i}"),
                (0..count)
                    .map(|r| from_triangle(r as f64, 0.0, 0.0))
                    .collect(),
            );
        }
        subjects.insert("sub-01".into(), pipelines);
        ConditionData::new(subjects).unwrap()
    }

    #[test]
    fn cell_axis_length_and_labels() {
        let data = one_subject(&[1]);
        let ds = assemble(&data, "fm20", &atlas3()).unwrap();
        assert_eq!(ds.cells.len(), 3); // k=3 → 3 pairs
        assert_eq!(ds.cells, ["SomMot, Vis", "Default, Vis", "Default, SomMot"]);
    }

    #[test]
    fn truncates_to_minimum_repetitions() {
        let data = one_subject(&[3, 5, 4]);
        let ds = assemble(&data, "fm20", &atlas3()).unwrap();
        assert_eq!(ds.functional_connectivity.dim().1, 3);
        assert_eq!(ds.iterations, ["fm20", "fm20", "fm20"]);
    }

    #[test]
    fn lower_triangle_lands_in_tril_order() {
        let mut subjects = BTreeMap::new();
        let mut pipelines = PipelineMap::new();
        pipelines.insert("pipe".into(), vec![from_triangle(0.1, 0.2, 0.3)]);
        subjects.insert("sub-01".into(), pipelines);
        let data = ConditionData::new(subjects).unwrap();

        let ds = assemble(&data, "fm20", &atlas3()).unwrap();
        // tril order for k=3: (1,0), (2,0), (2,1)
        assert_eq!(ds.functional_connectivity[[0, 0, 0, 0]], 0.1);
        assert_eq!(ds.functional_connectivity[[1, 0, 0, 0]], 0.2);
        assert_eq!(ds.functional_connectivity[[2, 0, 0, 0]], 0.3);
    }

    #[test]
    fn deterministic_across_runs() {
        let data = one_subject(&[4, 2]);
        let first = assemble(&data, "fm24", &atlas3()).unwrap();
        let second = assemble(&data, "fm24", &atlas3()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_atlas_size_mismatch() {
        let data = one_subject(&[1]);
        let atlas = NamedAtlas::new(vec!["Vis".into(), "SomMot".into()]);
        let result = assemble(&data, "fm20", &atlas);
        assert!(matches!(result, Err(Error::ShapeMismatch(_))));
    }
}
