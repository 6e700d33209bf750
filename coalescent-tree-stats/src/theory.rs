//! Expected branch frequency spectra.
//!
//! Kingman spectra are computed in closed form.  Beta coalescent
//! spectra are tabulated for a handful of parameters and returned as
//! owned copies of an immutable table.

use crate::compare::normalize;
use crate::SpectrumError;

/// Parameters of Beta coalescents with a tabulated spectrum.
///
/// `alpha = 2` is the Kingman coalescent and is valid for every
/// sample size.
pub const BETA_ALPHAS: [f64; 5] = [1.1, 1.3, 1.5, 1.9, 2.0];

/// Sample sizes with a tabulated Beta spectrum.
pub const BETA_SAMPLE_SIZES: [usize; 1] = [10];

const ALPHA_TOLERANCE: f64 = 1e-9;

struct BetaSpectrum {
    alpha: f64,
    sample_size: usize,
    bfs: &'static [f64],
}

// Normalized expected branch lengths, entry i is for i + 1 descendants.
static BETA_SPECTRA: [BetaSpectrum; 4] = [
    BetaSpectrum {
        alpha: 1.1,
        sample_size: 10,
        bfs: &[
            0.580175, 0.119103, 0.066440, 0.047197, 0.038166, 0.033879, 0.032796, 0.035382,
            0.046863,
        ],
    },
    BetaSpectrum {
        alpha: 1.3,
        sample_size: 10,
        bfs: &[
            0.521296, 0.137166, 0.078487, 0.056070, 0.045115, 0.039481, 0.037258, 0.038479,
            0.046649,
        ],
    },
    BetaSpectrum {
        alpha: 1.5,
        sample_size: 10,
        bfs: &[
            0.467491, 0.152216, 0.090245, 0.065103, 0.052216, 0.045067, 0.041436, 0.040898,
            0.045330,
        ],
    },
    BetaSpectrum {
        alpha: 1.9,
        sample_size: 10,
        bfs: &[
            0.374086, 0.173264, 0.112565, 0.083644, 0.066914, 0.056165, 0.048856, 0.043826,
            0.040681,
        ],
    },
];

/// A coalescent model with a known branch frequency spectrum.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CoalescentModel {
    /// Binary mergers only
    Kingman,
    /// Beta(2 - alpha, alpha) multiple mergers
    Beta {
        /// Index of the Beta distribution, in `(1, 2]`
        alpha: f64,
    },
}

fn is_kingman_alpha(alpha: f64) -> bool {
    (alpha - 2.0).abs() < ALPHA_TOLERANCE
}

/// Expected branch frequency spectrum under the Kingman coalescent.
///
/// Entry `i` is `1 / (i + 1)`, the expected total length of branches
/// subtending `i + 1` of `sample_size` samples, up to a constant.
///
/// # Parameters
///
/// * `sample_size`: number of samples, at least 2.
/// * `normalized`: scale to unit L2 norm.
///
/// # Example
///
/// ```
/// let bfs = coalescent_tree_stats::bfs_kingman(6, false).unwrap();
/// assert_eq!(bfs, vec![1.0, 0.5, 1.0 / 3.0, 0.25, 0.2]);
/// ```
pub fn bfs_kingman(sample_size: usize, normalized: bool) -> Result<Vec<f64>, SpectrumError> {
    if sample_size < 2 {
        return Err(SpectrumError::SampleSizeTooSmall { sample_size });
    }
    let bfs: Vec<f64> = (1..sample_size).map(|i| 1.0 / i as f64).collect();
    if normalized {
        normalize(&bfs)
    } else {
        Ok(bfs)
    }
}

/// Expected branch frequency spectrum under a Beta coalescent.
///
/// `alpha = 2` delegates to [`bfs_kingman`].  Other parameters are
/// looked up among [`BETA_ALPHAS`] and [`BETA_SAMPLE_SIZES`].
///
/// # Errors
///
/// * [`SpectrumError::UnknownBetaParameter`] if `alpha` is not tabulated.
/// * [`SpectrumError::UnknownSampleSize`] if `sample_size` is not
///   tabulated for `alpha`.
pub fn bfs_beta(
    sample_size: usize,
    alpha: f64,
    normalized: bool,
) -> Result<Vec<f64>, SpectrumError> {
    if is_kingman_alpha(alpha) {
        return bfs_kingman(sample_size, normalized);
    }
    let mut candidates = BETA_SPECTRA
        .iter()
        .filter(|s| (s.alpha - alpha).abs() < ALPHA_TOLERANCE)
        .peekable();
    if candidates.peek().is_none() {
        return Err(SpectrumError::UnknownBetaParameter { alpha });
    }
    let entry = candidates
        .find(|s| s.sample_size == sample_size)
        .ok_or(SpectrumError::UnknownSampleSize { sample_size, alpha })?;
    if normalized {
        normalize(entry.bfs)
    } else {
        Ok(entry.bfs.to_vec())
    }
}

/// Expected branch frequency spectrum of `model`.
pub fn theoretical_bfs(
    model: CoalescentModel,
    sample_size: usize,
    normalized: bool,
) -> Result<Vec<f64>, SpectrumError> {
    match model {
        CoalescentModel::Kingman => bfs_kingman(sample_size, normalized),
        CoalescentModel::Beta { alpha } => bfs_beta(sample_size, alpha, normalized),
    }
}
