//! Human-readable run summaries for the CLI.

use crate::dataset::{FcDataset, PermutationResult};

/// Format a short summary of an assembled/combined dataset.
pub fn format_dataset_summary(dataset: &FcDataset) -> String {
    let (cells, iterations, pipelines, subjects) = dataset.functional_connectivity.dim();
    let mut output = String::new();
    output.push_str(&format!(
        "dataset: {cells} cells x {iterations} iterations x {pipelines} pipelines x {subjects} subjects\n"
    ));
    match dataset.condition_pair() {
        Ok((a, b)) => output.push_str(&format!(
            "conditions: {a:?} ({} slots), {b:?} ({} slots)\n",
            dataset.tag_count(&a),
            dataset.tag_count(&b)
        )),
        Err(_) => {
            if let Some(tag) = dataset.iterations.first() {
                output.push_str(&format!("condition: {tag:?} ({iterations} slots)\n"));
            }
        }
    }
    output
}

/// Format a short summary of one permutation sample.
pub fn format_permutation_summary(result: &PermutationResult) -> String {
    let (cells, pipelines, subjects) = result.wasserstein_distance.dim();
    let count = cells * pipelines * subjects;
    if count == 0 {
        return format!(
            "permutation: {cells} cells x {pipelines} pipelines x {subjects} subjects, no values\n"
        );
    }
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for &d in result.wasserstein_distance.iter() {
        sum += d;
        if d > max {
            max = d;
        }
    }
    format!(
        "permutation: {cells} cells x {pipelines} pipelines x {subjects} subjects, \
         mean distance {:.6}, max {:.6}\n",
        sum / count as f64,
        max
    )
}
