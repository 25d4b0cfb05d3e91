//! # fc-permute
//!
//! Label-permutation Wasserstein testing for functional-connectivity arrays.
//!
//! Two components, in pipeline order:
//!
//! 1. **Array Assembler** — turns a nested mapping
//!    (subject → pipeline → connectivity matrices) into a labeled 4-D
//!    dataset over `(cell, iteration, pipeline, subject)`, where a cell is
//!    one strict-lower-triangle region pair of a parcellated brain.
//! 2. **Permutation Engine** — given a combined two-condition dataset,
//!    shuffles the condition tags once, then computes the exact 1-D
//!    Wasserstein distance between the two groups for every
//!    (cell, pipeline, subject) triple.
//!
//! Each engine invocation is an independent unit of work: an array-job
//! scheduler runs one task per desired permutation sample and each task
//! writes its own `permutation_<task_id>.nc` artifact. Null-distribution
//! aggregation and p-values are downstream of this crate.
//!
//! ## Quick start
//!
//! ```ignore
//! use fc_permute::{assemble, combine, run_task, NamedAtlas};
//!
//! let atlas = NamedAtlas::new(region_names);
//! let ds_a = assemble(&data_fm20, "fm20", &atlas)?;
//! let ds_b = assemble(&data_fm24, "fm24", &atlas)?;
//! let combined = combine(&ds_a, &ds_b)?;
//!
//! // One independent permutation sample per scheduler task id.
//! let sample = run_task(&combined, task_id)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod assemble;
mod atlas;
mod dataset;
mod error;
pub mod io;
pub mod output;
mod permute;
pub mod statistics;
mod types;

pub use assemble::assemble;
pub use atlas::{region_pair_labels, tril_indices, Atlas, NamedAtlas};
pub use dataset::{combine, FcDataset, PermutationResult};
pub use error::{Error, Result};
pub use permute::{permute_once, run_task, task_seed};
pub use types::{ConditionData, ConnectivityMatrix, PipelineMap};
