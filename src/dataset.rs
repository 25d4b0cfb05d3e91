//! Labeled multidimensional datasets.
//!
//! These mirror the NetCDF-style layout of the pipeline's artifacts: named
//! dimensions, explicit coordinate vectors, and one data variable each. A
//! single-condition dataset and the combined two-condition dataset share the
//! same type; the difference is how many distinct tags the `iteration`
//! coordinate carries.

use ndarray::{Array3, Array4, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Labeled 4-D functional-connectivity dataset.
///
/// Dimensions: `(cell, iteration, pipeline, subject)`. The `iteration`
/// coordinate holds the condition tag of each repetition slot, so a
/// combined dataset carries exactly two distinct tag values whose counts
/// are conserved through any relabeling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FcDataset {
    /// Region-pair labels, k·(k−1)/2 entries in strict-lower-triangle order.
    pub cells: Vec<String>,
    /// Condition tag per repetition slot.
    pub iterations: Vec<String>,
    /// Pipeline names, lexicographic.
    pub pipelines: Vec<String>,
    /// Subject names, lexicographic.
    pub subjects: Vec<String>,
    /// Data variable, indexed (cell, iteration, pipeline, subject).
    pub functional_connectivity: Array4<f64>,
}

impl FcDataset {
    /// Build a dataset, checking every coordinate against the array extents.
    pub fn new(
        cells: Vec<String>,
        iterations: Vec<String>,
        pipelines: Vec<String>,
        subjects: Vec<String>,
        functional_connectivity: Array4<f64>,
    ) -> Result<Self> {
        let shape = functional_connectivity.dim();
        let coords = (cells.len(), iterations.len(), pipelines.len(), subjects.len());
        if shape != coords {
            return Err(Error::ShapeMismatch(format!(
                "coordinate lengths {coords:?} do not match array shape {shape:?}"
            )));
        }
        Ok(Self {
            cells,
            iterations,
            pipelines,
            subjects,
            functional_connectivity,
        })
    }

    /// The two distinct condition tags of a combined dataset, in order of
    /// first appearance along the iteration axis.
    ///
    /// Fails with `ShapeMismatch` unless exactly two distinct tags are
    /// present: a single tag means nothing to compare, more than two means
    /// the artifact was not produced by [`combine`].
    pub fn condition_pair(&self) -> Result<(String, String)> {
        let mut distinct: Vec<&String> = Vec::new();
        for tag in &self.iterations {
            if !distinct.contains(&tag) {
                distinct.push(tag);
            }
        }
        match distinct.as_slice() {
            [a, b] => Ok(((*a).clone(), (*b).clone())),
            other => Err(Error::ShapeMismatch(format!(
                "expected exactly 2 condition tags on the iteration axis, found {}: {other:?}",
                other.len()
            ))),
        }
    }

    /// Occurrences of `tag` on the iteration axis.
    pub fn tag_count(&self, tag: &str) -> usize {
        self.iterations.iter().filter(|t| *t == tag).count()
    }
}

/// Concatenate two single-condition datasets along the iteration axis.
///
/// Both datasets must agree exactly on the cell, pipeline, and subject
/// coordinates (same atlas, same cohort), each must carry one uniform
/// condition tag, and the two tags must differ.
pub fn combine(a: &FcDataset, b: &FcDataset) -> Result<FcDataset> {
    for (name, left, right) in [
        ("cell", &a.cells, &b.cells),
        ("pipeline", &a.pipelines, &b.pipelines),
        ("subject", &a.subjects, &b.subjects),
    ] {
        if left != right {
            return Err(Error::ShapeMismatch(format!(
                "{name} coordinates differ between the two conditions"
            )));
        }
    }
    for ds in [a, b] {
        if ds.iterations.windows(2).any(|w| w[0] != w[1]) {
            return Err(Error::ShapeMismatch(
                "single-condition dataset carries more than one tag".into(),
            ));
        }
    }
    if a.iterations.first() == b.iterations.first() {
        return Err(Error::ShapeMismatch(format!(
            "both conditions are tagged {:?}",
            a.iterations.first()
        )));
    }

    let values = ndarray::concatenate(
        Axis(1),
        &[
            a.functional_connectivity.view(),
            b.functional_connectivity.view(),
        ],
    )
    .map_err(|err| Error::ShapeMismatch(format!("iteration-axis concatenation failed: {err}")))?;

    let mut iterations = a.iterations.clone();
    iterations.extend_from_slice(&b.iterations);

    FcDataset::new(
        a.cells.clone(),
        iterations,
        a.pipelines.clone(),
        a.subjects.clone(),
        values,
    )
}

/// One permutation sample: a Wasserstein distance per (cell, pipeline,
/// subject) triple.
///
/// Created fresh per run, persisted, never mutated afterwards. Coordinates
/// are inherited unchanged from the combined dataset the run consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermutationResult {
    /// Region-pair labels, same order as the input dataset.
    pub cells: Vec<String>,
    /// Pipeline names.
    pub pipelines: Vec<String>,
    /// Subject names.
    pub subjects: Vec<String>,
    /// Data variable, indexed (cell, pipeline, subject).
    pub wasserstein_distance: Array3<f64>,
}

impl PermutationResult {
    /// Build a result, checking coordinates against the array extents.
    pub fn new(
        cells: Vec<String>,
        pipelines: Vec<String>,
        subjects: Vec<String>,
        wasserstein_distance: Array3<f64>,
    ) -> Result<Self> {
        let shape = wasserstein_distance.dim();
        let coords = (cells.len(), pipelines.len(), subjects.len());
        if shape != coords {
            return Err(Error::ShapeMismatch(format!(
                "coordinate lengths {coords:?} do not match array shape {shape:?}"
            )));
        }
        Ok(Self {
            cells,
            pipelines,
            subjects,
            wasserstein_distance,
        })
    }
}
