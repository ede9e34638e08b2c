//! Outlier-rejecting summary statistics.
//!
//! Degenerate collections never panic: the mean and std-dev of an empty
//! sample set are NaN, the std-dev of a singleton is 0.

use serde::Serialize;

/// Samples further than this many standard deviations from the mean are
/// rejected before reduction.
pub const OUTLIER_SIGMA: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stat {
    pub mean: f64,
    pub std: f64,
}

pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return f64::NAN;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Population standard deviation (ddof = 0).
pub fn std_dev(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return f64::NAN;
    }
    let mu = mean(xs);
    (xs.iter().map(|x| (x - mu).powi(2)).sum::<f64>() / xs.len() as f64).sqrt()
}

pub fn summarize(xs: &[f64]) -> Stat {
    Stat {
        mean: mean(xs),
        std: std_dev(xs),
    }
}

/// Single-pass outlier rejection: retain samples strictly within `m` standard
/// deviations of the mean, both computed from the original, unfiltered set.
/// Non-iterative, so a second application over the result may shrink it
/// further if the retained set has its own tails.
pub fn reject_outliers(xs: &[f64], m: f64) -> Vec<f64> {
    let mu = mean(xs);
    let sigma = std_dev(xs);
    xs.iter()
        .copied()
        .filter(|x| (x - mu).abs() < m * sigma)
        .collect()
}
