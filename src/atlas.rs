//! Atlas collaborator and region-pair label construction.
//!
//! The atlas itself (region names for a parcellation, e.g. Schaefer-400) is
//! external: this crate only consumes an ordered name list. Labels for the
//! `cell` axis are a pure function of k and those names, so two conditions
//! assembled against the same atlas always agree on cell ordering.

use crate::error::{Error, Result};

/// Source of ordered region names for a parcellation.
///
/// Implementations are expected to be idempotent: repeated lookups must
/// return the same names in the same order.
pub trait Atlas {
    /// Ordered region names. Must contain exactly one name per region.
    fn region_names(&self) -> Result<Vec<String>>;
}

/// In-memory atlas backed by a fixed name list.
#[derive(Debug, Clone)]
pub struct NamedAtlas {
    names: Vec<String>,
}

impl NamedAtlas {
    /// Build from an ordered name list.
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }
}

impl Atlas for NamedAtlas {
    fn region_names(&self) -> Result<Vec<String>> {
        Ok(self.names.clone())
    }
}

/// Strict-lower-triangle index pairs for a k×k matrix.
///
/// Row-major enumeration, row index > column index:
/// (1,0), (2,0), (2,1), (3,0), (3,1), (3,2), … — k·(k−1)/2 pairs total.
/// Every lower-triangle extraction in the crate uses this order, and the
/// `cell` coordinate is built from it, so values and labels always align.
pub fn tril_indices(k: usize) -> Vec<(usize, usize)> {
    let mut pairs = Vec::with_capacity(k * k.saturating_sub(1) / 2);
    for row in 1..k {
        for col in 0..row {
            pairs.push((row, col));
        }
    }
    pairs
}

/// Build the `cell` coordinate labels for a k-region parcellation.
///
/// One label per unordered region pair, `"{row_name}, {col_name}"`, in
/// [`tril_indices`] order. The atlas must supply exactly k names.
pub fn region_pair_labels(atlas: &dyn Atlas, regions: usize) -> Result<Vec<String>> {
    let names = atlas.region_names()?;
    if names.len() != regions {
        return Err(Error::ShapeMismatch(format!(
            "atlas has {} region names, data has {} regions",
            names.len(),
            regions
        )));
    }
    Ok(tril_indices(regions)
        .into_iter()
        .map(|(row, col)| format!("{}, {}", names[row], names[col]))
        .collect())
}
