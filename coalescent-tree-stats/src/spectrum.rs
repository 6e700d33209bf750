use crate::compare::normalize;
use crate::SpectrumError;
use streaming_iterator::StreamingIterator;
use tskit::{MutationId, NodeId, TreeFlags, TreeSequence};

/// What a frequency spectrum summarises.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SpectrumMode {
    /// Count mutations by the number of samples carrying them.
    Site,
    /// Sum branch lengths by the number of samples below them.
    Branch,
}

/// Options for [`allele_frequency_spectrum`].
///
/// The default is an unpolarised, span-normalised site spectrum.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SpectrumOptions {
    /// Site or branch statistic
    pub mode: SpectrumMode,
    /// Distinguish derived from ancestral states.
    /// When `false` the spectrum is folded.
    pub polarised: bool,
    /// Divide by the sequence length.
    pub span_normalise: bool,
}

impl Default for SpectrumOptions {
    fn default() -> Self {
        Self {
            mode: SpectrumMode::Site,
            polarised: false,
            span_normalise: true,
        }
    }
}

impl SpectrumOptions {
    /// Use `mode`.
    pub fn mode(mut self, mode: SpectrumMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set polarisation.
    pub fn polarised(mut self, polarised: bool) -> Self {
        self.polarised = polarised;
        self
    }

    /// Set span normalisation.
    pub fn span_normalise(mut self, span_normalise: bool) -> Self {
        self.span_normalise = span_normalise;
        self
    }
}

/// A frequency spectrum over `n` samples.
///
/// Entry `k`, for `k` in `0..=n`, is the statistic for `k` samples.
#[derive(Clone, Debug, PartialEq)]
pub struct FrequencySpectrum(Vec<f64>);

impl FrequencySpectrum {
    /// Number of samples.
    pub fn num_samples(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// All `n + 1` entries.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Entries `1..n`, dropping the monomorphic classes.
    ///
    /// For a branch spectrum this is the input expected by
    /// [`crate::compare_bfs`].
    pub fn interior(&self) -> &[f64] {
        match self.0.len() {
            0..=2 => &[],
            len => &self.0[1..len - 1],
        }
    }

    /// [`FrequencySpectrum::interior`] scaled to unit L2 norm.
    pub fn normalized(&self) -> Result<Vec<f64>, SpectrumError> {
        normalize(self.interior())
    }

    fn fold(&mut self) {
        let n = self.num_samples();
        for k in 0..self.0.len() {
            let folded = k.min(n - k);
            if folded != k {
                self.0[folded] += self.0[k];
                self.0[k] = 0.0;
            }
        }
    }
}

impl From<FrequencySpectrum> for Vec<f64> {
    fn from(value: FrequencySpectrum) -> Self {
        value.0
    }
}

struct MutationInfo {
    id: usize,
    node: usize,
    parent: Option<usize>,
    state: Vec<u8>,
}

struct SiteInfo {
    position: f64,
    ancestral_state: Vec<u8>,
    mutations: Vec<MutationInfo>,
}

// Number of samples below (and including) each node of the current tree.
fn count_samples(
    parents: &[NodeId],
    samples: &[usize],
    counts: &mut [usize],
) -> Result<(), SpectrumError> {
    counts.iter_mut().for_each(|c| *c = 0);
    for &s in samples {
        let mut u = s;
        loop {
            counts[u] += 1;
            let p = parents[u];
            if p == NodeId::NULL {
                break;
            }
            u = usize::try_from(p)?;
        }
    }
    Ok(())
}

// A mutation's state is carried by the samples below it minus those
// below its child mutations.  Mutations to the same state pool their
// carriers, and every state other than the ancestral one adds one
// entry.
fn add_site(site: &SiteInfo, counts: &[usize], afs: &mut [f64]) {
    let mut alleles: Vec<(&[u8], usize)> = vec![];
    for m in &site.mutations {
        let masked: usize = site
            .mutations
            .iter()
            .filter(|c| c.parent == Some(m.id))
            .map(|c| counts[c.node])
            .sum();
        let carriers = counts[m.node].saturating_sub(masked);
        match alleles.iter_mut().find(|(state, _)| *state == m.state.as_slice()) {
            Some((_, total)) => *total += carriers,
            None => alleles.push((m.state.as_slice(), carriers)),
        }
    }
    for (state, total) in alleles {
        if state != site.ancestral_state.as_slice() {
            afs[total] += 1.0;
        }
    }
}

/// Compute the allele frequency spectrum of a tree sequence.
///
/// The output has `n + 1` entries for `n` samples.
///
/// * In [`SpectrumMode::Site`], every non-ancestral allele of a site
///   adds one to the entry for the number of samples carrying it.
///   A mutation's state is carried by the samples below it, except
///   those below a later mutation at the same site.
/// * In [`SpectrumMode::Branch`], every branch adds
///   `length * span` to the entry for the number of samples below it.
///
/// An unpolarised spectrum moves entry `k` onto `min(k, n - k)`.
///
/// # Errors
///
/// [`SpectrumError::TskitError`] if the tables cannot be read or
/// trees cannot be iterated.
pub fn allele_frequency_spectrum(
    ts: &TreeSequence,
    options: SpectrumOptions,
) -> Result<FrequencySpectrum, SpectrumError> {
    let tables = ts.dump_tables()?;
    let node_times: Vec<f64> = tables.nodes().iter().map(|n| f64::from(n.time)).collect();
    let mut sites: Vec<SiteInfo> = tables
        .sites()
        .iter()
        .map(|s| SiteInfo {
            position: f64::from(s.position),
            ancestral_state: s.ancestral_state.unwrap_or_default(),
            mutations: vec![],
        })
        .collect();
    for m in tables.mutations().iter() {
        let parent = if m.parent == MutationId::NULL {
            None
        } else {
            Some(usize::try_from(m.parent)?)
        };
        sites[usize::try_from(m.site)?].mutations.push(MutationInfo {
            id: usize::try_from(m.id)?,
            node: usize::try_from(m.node)?,
            parent,
            state: m.derived_state.unwrap_or_default(),
        });
    }
    let samples = ts
        .sample_nodes()
        .iter()
        .map(|&s| usize::try_from(s))
        .collect::<Result<Vec<_>, _>>()?;
    let n = samples.len();
    log::debug!(
        "{:?} spectrum over {} samples and {} sites",
        options.mode,
        n,
        sites.len()
    );
    let mut afs = vec![0.0; n + 1];
    let mut counts = vec![0_usize; node_times.len()];

    let mut next_site = 0;
    let mut trees = ts.tree_iterator(TreeFlags::default())?;
    while let Some(tree) = trees.next() {
        let (left, right) = tree.interval();
        let (left, right) = (f64::from(left), f64::from(right));
        let parents = tree.parent_array();
        count_samples(parents, &samples, &mut counts)?;
        match options.mode {
            SpectrumMode::Branch => {
                let span = right - left;
                for (u, &p) in parents.iter().enumerate().take(node_times.len()) {
                    if p == NodeId::NULL {
                        continue;
                    }
                    let length = node_times[usize::try_from(p)?] - node_times[u];
                    afs[counts[u]] += length * span;
                }
            }
            SpectrumMode::Site => {
                while next_site < sites.len() && sites[next_site].position < right {
                    add_site(&sites[next_site], &counts, &mut afs);
                    next_site += 1;
                }
            }
        }
    }

    let mut rv = FrequencySpectrum(afs);
    if !options.polarised {
        rv.fold();
    }
    if options.span_normalise {
        let length = f64::from(tables.sequence_length());
        rv.0.iter_mut().for_each(|x| *x /= length);
    }
    Ok(rv)
}
