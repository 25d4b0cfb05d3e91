//! Statistical machinery for the permutation test.
//!
//! One statistic lives here by design: the exact 1-D Wasserstein distance
//! between two finite empirical distributions. The null distribution is
//! generated externally by aggregating many independent permutation runs.

mod wasserstein;

pub use wasserstein::wasserstein_1d;
