//! Artifact reading and writing.
//!
//! Thin wrappers: datasets are serde-encoded with their dimension names and
//! coordinates intact, mirroring the NetCDF layout of the upstream pipeline
//! (`.nc` artifact names included, so scheduler scripts keep working). All
//! validation happens in the typed constructors, not here.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use ndarray::Array2;

use crate::dataset::{FcDataset, PermutationResult};
use crate::error::{Error, Result};
use crate::types::{ConditionData, ConnectivityMatrix, PipelineMap};

/// Raw on-disk form of a condition artifact: subject → pipeline → ordered
/// list of k×k matrices as row vectors.
type RawCondition = BTreeMap<String, BTreeMap<String, Vec<Vec<Vec<f64>>>>>;

fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::MissingInput {
        path: path.to_path_buf(),
        source,
    })
}

fn decode<T: serde::de::DeserializeOwned>(path: &Path, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|source| Error::MalformedInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and validate one condition's nested matrix mapping.
pub fn read_condition_data(path: &Path) -> Result<ConditionData> {
    let raw: RawCondition = decode(path, &read_to_string(path)?)?;

    let mut subjects = BTreeMap::new();
    for (subject, pipelines) in raw {
        let mut validated = PipelineMap::new();
        for (pipeline, matrices) in pipelines {
            let converted: Result<Vec<ConnectivityMatrix>> = matrices
                .into_iter()
                .map(|rows| matrix_from_rows(&subject, &pipeline, rows))
                .collect();
            validated.insert(pipeline, converted?);
        }
        subjects.insert(subject, validated);
    }
    ConditionData::new(subjects)
}

fn matrix_from_rows(subject: &str, pipeline: &str, rows: Vec<Vec<f64>>) -> Result<ConnectivityMatrix> {
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|row| row.len() != n_cols) {
        return Err(Error::ShapeMismatch(format!(
            "ragged matrix rows for subject {subject:?} pipeline {pipeline:?}"
        )));
    }
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    let array = Array2::from_shape_vec((n_rows, n_cols), flat).map_err(|err| {
        Error::ShapeMismatch(format!(
            "matrix for subject {subject:?} pipeline {pipeline:?}: {err}"
        ))
    })?;
    ConnectivityMatrix::new(array)
}

/// Read an atlas artifact: an ordered JSON array of region names.
pub fn read_atlas_names(path: &Path) -> Result<Vec<String>> {
    decode(path, &read_to_string(path)?)
}

/// Read a combined (or single-condition) labeled dataset.
pub fn read_dataset(path: &Path) -> Result<FcDataset> {
    decode(path, &read_to_string(path)?)
}

/// Write a labeled dataset.
pub fn write_dataset(path: &Path, dataset: &FcDataset) -> Result<()> {
    let encoded = serde_json::to_string(dataset).map_err(|source| Error::MalformedInput {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, encoded).map_err(|source| Error::OutputIo {
        path: path.to_path_buf(),
        source,
    })
}

/// Read one persisted permutation sample.
pub fn read_permutation(path: &Path) -> Result<PermutationResult> {
    decode(path, &read_to_string(path)?)
}

/// Persist one permutation sample as `permutation_<task_id>.nc` under
/// `output_dir`, creating the directory if absent.
///
/// Returns the written path. An existing directory is not an error; a
/// half-written artifact from a killed run is simply overwritten on re-run.
pub fn write_permutation(
    output_dir: &Path,
    task_id: u64,
    result: &PermutationResult,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).map_err(|source| Error::OutputIo {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let path = output_dir.join(format!("permutation_{task_id}.nc"));
    let encoded = serde_json::to_string(result).map_err(|source| Error::MalformedInput {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, encoded).map_err(|source| Error::OutputIo {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
