use coalescent_tree_core::{
    dump, filter_null_nodes, load, mutate, subsample, validate_coalescence, CoalescentTreeError,
    MutationRate,
};
use std::path::{Path, PathBuf};
use tskit::TreeSequence;

/// Where [`handle_haploid`] gets its tree sequence from.
pub enum TreeSource {
    /// A `.trees` file
    File(PathBuf),
    /// A tree sequence already in memory
    InMemory(TreeSequence),
}

impl TreeSource {
    /// Load the tree sequence, if needed.
    pub fn into_tree_sequence(self) -> Result<TreeSequence, CoalescentTreeError> {
        match self {
            Self::File(path) => load(path),
            Self::InMemory(ts) => Ok(ts),
        }
    }
}

impl From<TreeSequence> for TreeSource {
    fn from(value: TreeSequence) -> Self {
        Self::InMemory(value)
    }
}

impl From<PathBuf> for TreeSource {
    fn from(value: PathBuf) -> Self {
        Self::File(value)
    }
}

impl From<&Path> for TreeSource {
    fn from(value: &Path) -> Self {
        Self::File(value.to_path_buf())
    }
}

/// Options for [`handle_haploid`].
///
/// Every field is optional.  The default only removes placeholder
/// nodes.
///
/// # Default resolution
///
/// * `mutation_rate = None` skips mutation.  `Some(0.0)` still runs
///   the mutation step, and the coalescence check before it.
/// * The coalescence check runs when a mutation rate is given or
///   `check_coalescence` is set.
/// * `mutation_seed` and `sampling_seed` set to `None` draw a fresh
///   seed from the operating system on every call.
/// * `sample_size = None` keeps every sample.
/// * `output = None` writes nothing.
///
/// # Example
///
/// ```
/// use coalescent_tree::HaploidConfig;
///
/// let config = HaploidConfig::new()
///     .with_mutation_rate(1e-3)
///     .with_mutation_seed(42)
///     .with_sample_size(10);
/// assert!(config.validate().is_ok());
/// assert!(HaploidConfig::new().with_mutation_rate(-1.0).validate().is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HaploidConfig {
    /// Mean number of mutations per unit branch length per unit genome length
    pub mutation_rate: Option<f64>,
    /// Seed for the mutation step
    pub mutation_seed: Option<u64>,
    /// Check coalescence even without mutations
    pub check_coalescence: bool,
    /// Number of samples to keep
    pub sample_size: Option<usize>,
    /// Seed for the sampling step
    pub sampling_seed: Option<u64>,
    /// File to write the result to
    pub output: Option<PathBuf>,
}

impl HaploidConfig {
    /// Only remove placeholder nodes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add mutations at `rate`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = Some(rate);
        self
    }

    /// Seed the mutation step.
    pub fn with_mutation_seed(mut self, seed: u64) -> Self {
        self.mutation_seed = Some(seed);
        self
    }

    /// Require every local tree to have a single root.
    pub fn check_coalescence(mut self) -> Self {
        self.check_coalescence = true;
        self
    }

    /// Keep `k` random samples.
    pub fn with_sample_size(mut self, k: usize) -> Self {
        self.sample_size = Some(k);
        self
    }

    /// Seed the sampling step.
    pub fn with_sampling_seed(mut self, seed: u64) -> Self {
        self.sampling_seed = Some(seed);
        self
    }

    /// Write the result to `path`.
    pub fn with_output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Check the parameters that do not depend on the input.
    ///
    /// # Returns
    ///
    /// The validated mutation rate, if any.
    ///
    /// # Errors
    ///
    /// * [`CoalescentTreeError::InvalidMutationRate`] for a negative or
    ///   non-finite rate.
    /// * [`CoalescentTreeError::ZeroSampleSize`] for a sample size of zero.
    pub fn validate(&self) -> Result<Option<MutationRate>, CoalescentTreeError> {
        if self.sample_size == Some(0) {
            return Err(CoalescentTreeError::ZeroSampleSize);
        }
        self.mutation_rate.map(MutationRate::try_from).transpose()
    }

    fn needs_coalescence(&self) -> bool {
        self.mutation_rate.is_some() || self.check_coalescence
    }
}

/// Turn a SLiM haploid tree sequence into a haploid genealogy.
///
/// Stages run in a fixed order, each producing a new tree sequence:
///
/// 1. [`filter_null_nodes`]
/// 2. [`validate_coalescence`], if requested or if mutating
/// 3. [`mutate`], keeping existing mutations
/// 4. [`subsample`]
/// 5. [`dump`] to [`HaploidConfig::output`]
///
/// Mutations are placed before sampling so that they fall on the full
/// ancestry.
///
/// # Errors
///
/// * Any error of [`HaploidConfig::validate`], before the input is read.
/// * [`CoalescentTreeError::MalformedInput`] if a node lacks SLiM metadata.
/// * [`CoalescentTreeError::InvalidSampleSize`] if more samples are
///   requested than remain after filtering.  This is checked right
///   after filtering, before any other stage runs.
/// * [`CoalescentTreeError::NotCoalesced`] if a checked tree has zero or
///   several roots.
/// * [`CoalescentTreeError::TskitError`] for storage failures.
pub fn handle_haploid<S: Into<TreeSource>>(
    source: S,
    config: &HaploidConfig,
) -> Result<TreeSequence, CoalescentTreeError> {
    let rate = config.validate()?;
    let ts = source.into().into_tree_sequence()?;

    log::info!("removing null nodes");
    let mut ts = filter_null_nodes(&ts)?;

    if let Some(k) = config.sample_size {
        let available = ts.sample_nodes().len();
        if k > available {
            return Err(CoalescentTreeError::InvalidSampleSize {
                requested: k,
                available,
            });
        }
    }

    if config.needs_coalescence() {
        log::info!("checking coalescence");
        ts = validate_coalescence(ts)?;
    }

    if let Some(rate) = rate {
        log::info!("adding mutations at rate {}", f64::from(rate));
        ts = mutate(&ts, rate, config.mutation_seed, true)?;
    }

    if let Some(k) = config.sample_size {
        log::info!("sampling {} individuals", k);
        ts = subsample(&ts, k, config.sampling_seed)?;
    }

    if let Some(path) = &config.output {
        log::info!("writing {}", path.display());
        dump(&ts, path)?;
    }

    Ok(ts)
}
