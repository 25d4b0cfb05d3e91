//! Permutation Engine: one label shuffle, one Wasserstein sweep.
//!
//! Each invocation is a self-contained unit of work. There is no state
//! shared between runs; embarrassing parallelism comes from launching many
//! independent invocations (one per permutation sample) under an array-job
//! scheduler, each writing its own artifact.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::dataset::{FcDataset, PermutationResult};
use crate::error::{Error, Result};
use crate::statistics::wasserstein_1d;

/// Derive a well-distributed RNG seed from an array-job task identifier.
///
/// SplitMix64, so adjacent task ids (0, 1, 2, …) still produce
/// uncorrelated seeds. A task id fully determines its permutation sample.
#[inline]
pub fn task_seed(task_id: u64) -> u64 {
    let mut z = task_id.wrapping_mul(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Run one permutation sample seeded from an array-job task identifier.
///
/// Convenience wrapper around [`permute_once`] with a `Xoshiro256PlusPlus`
/// seeded through [`task_seed`].
pub fn run_task(combined: &FcDataset, task_id: u64) -> Result<PermutationResult> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(task_seed(task_id));
    permute_once(combined, &mut rng)
}

/// Draw one permutation sample from a combined two-condition dataset.
///
/// Shuffles the condition-tag coordinate (the connectivity values are never
/// moved, so tag counts are conserved), partitions the iteration axis into
/// the two groups, and computes the Wasserstein distance per
/// (cell, pipeline, subject) triple over the full Cartesian product.
///
/// The input dataset is only read; the shuffle happens on a copied tag
/// coordinate, so the caller can hand the same dataset to many runs.
///
/// # Errors
///
/// `ShapeMismatch` unless the iteration coordinate carries exactly two
/// distinct tags; `EmptyGroup` if a group ends up with zero members, which
/// conserved tag counts make unreachable for well-formed input but which is
/// validated rather than left to produce NaN distances.
pub fn permute_once<R: Rng + ?Sized>(
    combined: &FcDataset,
    rng: &mut R,
) -> Result<PermutationResult> {
    let (tag_a, tag_b) = combined.condition_pair()?;

    let shuffled = shuffle_tags(&combined.iterations, rng);

    let group_a = tag_indices(&shuffled, &tag_a);
    let group_b = tag_indices(&shuffled, &tag_b);
    if group_a.is_empty() {
        return Err(Error::EmptyGroup(tag_a));
    }
    if group_b.is_empty() {
        return Err(Error::EmptyGroup(tag_b));
    }

    let fc = &combined.functional_connectivity;
    let (cells, _, pipelines, subjects) = fc.dim();
    let mut distances = ndarray::Array3::zeros((cells, pipelines, subjects));

    // Reused gather buffers keep the hot loop allocation-free.
    let mut values_a = Vec::with_capacity(group_a.len());
    let mut values_b = Vec::with_capacity(group_b.len());

    for s_idx in 0..subjects {
        for p_idx in 0..pipelines {
            for c_idx in 0..cells {
                values_a.clear();
                values_a.extend(group_a.iter().map(|&r| fc[[c_idx, r, p_idx, s_idx]]));
                values_b.clear();
                values_b.extend(group_b.iter().map(|&r| fc[[c_idx, r, p_idx, s_idx]]));

                distances[[c_idx, p_idx, s_idx]] = wasserstein_1d(&values_a, &values_b);
            }
        }
    }

    PermutationResult::new(
        combined.cells.clone(),
        combined.pipelines.clone(),
        combined.subjects.clone(),
        distances,
    )
}

/// Draw one uniformly random permutation of the condition-tag coordinate.
///
/// Only the tag-to-slot assignment changes; since tags are rearranged and
/// never dropped or duplicated, the count of each tag is conserved exactly.
fn shuffle_tags<R: Rng + ?Sized>(tags: &[String], rng: &mut R) -> Vec<String> {
    let mut shuffled = tags.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

/// Iteration-axis indices whose shuffled tag equals `tag`.
fn tag_indices(tags: &[String], tag: &str) -> Vec<usize> {
    tags.iter()
        .enumerate()
        .filter(|(_, t)| *t == tag)
        .map(|(idx, _)| idx)
        .collect()
}
