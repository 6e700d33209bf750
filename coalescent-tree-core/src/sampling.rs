use crate::{make_rng, CoalescentTreeError};
use rand::Rng;
use tskit::{NodeId, SimplificationOptions, TreeSequence};

/// Draw `k` of `samples` uniformly without replacement.
///
/// The chosen nodes are returned in the order they appear in `samples`.
///
/// # Errors
///
/// [`CoalescentTreeError::InvalidSampleSize`] unless `0 < k <= samples.len()`.
pub fn choose_samples<R: Rng + ?Sized>(
    samples: &[NodeId],
    k: usize,
    rng: &mut R,
) -> Result<Vec<NodeId>, CoalescentTreeError> {
    if k == 0 || k > samples.len() {
        return Err(CoalescentTreeError::InvalidSampleSize {
            requested: k,
            available: samples.len(),
        });
    }
    let mut chosen = rand::seq::index::sample(rng, samples.len(), k).into_vec();
    chosen.sort_unstable();
    Ok(chosen.into_iter().map(|i| samples[i]).collect())
}

/// Restrict a tree sequence to `k` randomly chosen samples.
///
/// The samples are drawn with [`choose_samples`] and the tree
/// sequence is simplified onto them, which relabels nodes and prunes
/// ancestors with no retained descendants.
///
/// # Parameters
///
/// * `ts`: input tree sequence.
/// * `k`: number of samples to keep.
/// * `seed`: seed for the draw. `None` seeds from the OS.
///
/// # Errors
///
/// * [`CoalescentTreeError::InvalidSampleSize`] unless
///   `0 < k <= ts.num_samples()`.  Nothing is simplified in that case.
/// * [`CoalescentTreeError::TskitError`] if simplification fails.
pub fn subsample(
    ts: &TreeSequence,
    k: usize,
    seed: Option<u64>,
) -> Result<TreeSequence, CoalescentTreeError> {
    let samples = ts.sample_nodes();
    if k == 0 || k > samples.len() {
        return Err(CoalescentTreeError::InvalidSampleSize {
            requested: k,
            available: samples.len(),
        });
    }
    let mut rng = make_rng(seed);
    let chosen = choose_samples(samples, k, &mut rng)?;
    log::debug!("keeping {} of {} samples", k, samples.len());
    let (simplified, _) = ts.simplify(&chosen, SimplificationOptions::default(), false)?;
    Ok(simplified)
}
