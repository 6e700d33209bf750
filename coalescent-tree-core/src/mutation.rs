use crate::subset::{subset_nodes, RetainOptions};
use crate::{make_rng, CoalescentTreeError};
use rand::Rng;
use rand_distr::Poisson;
use std::collections::HashSet;
use streaming_iterator::StreamingIterator;
use tskit::{
    MutationId, NodeId, TableCollection, TableSortOptions, TreeFlags, TreeSequence,
    TreeSequenceFlags,
};

const ANCESTRAL_STATE: &[u8] = b"0";
const DERIVED_STATE: &[u8] = b"1";

/// Mean number of mutations per unit of branch length per unit of
/// genome length.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct MutationRate(f64);

impl MutationRate {
    /// Create a new MutationRate
    ///
    /// # Returns
    ///
    /// * `Some` if `rate` is finite and non-negative
    /// * `None` otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// use coalescent_tree_core::MutationRate;
    /// assert!(MutationRate::new(0.0).is_some());
    /// assert!(MutationRate::new(1e-3).is_some());
    /// assert!(MutationRate::new(-1e-3).is_none());
    /// assert!(MutationRate::new(f64::NAN).is_none());
    /// ```
    pub fn new(rate: f64) -> Option<Self> {
        if rate.is_finite() && rate >= 0.0 {
            Some(Self(rate))
        } else {
            None
        }
    }
}

impl TryFrom<f64> for MutationRate {
    type Error = CoalescentTreeError;

    fn try_from(rate: f64) -> Result<Self, Self::Error> {
        Self::new(rate).ok_or(CoalescentTreeError::InvalidMutationRate { rate })
    }
}

impl From<MutationRate> for f64 {
    fn from(value: MutationRate) -> Self {
        value.0
    }
}

struct NewMutation {
    position: f64,
    node: NodeId,
    time: f64,
}

fn node_id(index: usize) -> Result<NodeId, CoalescentTreeError> {
    i32::try_from(index)
        .map(NodeId::from)
        .map_err(|_| CoalescentTreeError::IdOverflow(index))
}

// Uniform on [low, high).  Float `random_range` can round up to `high`,
// which would put a site at the end of a tree's interval or a mutation
// at its parent's time.
fn uniform_below<R: Rng>(rng: &mut R, low: f64, high: f64) -> f64 {
    loop {
        let x = rng.random_range(low..high);
        if x < high {
            return x;
        }
    }
}

// Infinite sites: a position already holding a site is redrawn.
fn place_mutations<R: Rng>(
    ts: &TreeSequence,
    node_times: &[f64],
    rate: MutationRate,
    occupied: &mut HashSet<u64>,
    rng: &mut R,
) -> Result<Vec<NewMutation>, CoalescentTreeError> {
    let mut rv = vec![];
    let mut trees = ts.tree_iterator(TreeFlags::default())?;
    while let Some(tree) = trees.next() {
        let (left, right) = tree.interval();
        let (left, right) = (f64::from(left), f64::from(right));
        let span = right - left;
        for (child, &parent) in tree
            .parent_array()
            .iter()
            .enumerate()
            .take(node_times.len())
        {
            if parent == NodeId::NULL {
                continue;
            }
            let child_time = node_times[child];
            let parent_time = node_times[usize::try_from(parent)?];
            let mean = rate.0 * (parent_time - child_time) * span;
            if mean <= 0.0 {
                continue;
            }
            let poisson = Poisson::new(mean)
                .map_err(|_| CoalescentTreeError::InvalidMutationRate { rate: rate.0 })?;
            let count = rng.sample(poisson) as u64;
            for _ in 0..count {
                let position = loop {
                    let x = uniform_below(rng, left, right);
                    if occupied.insert(x.to_bits()) {
                        break x;
                    }
                };
                rv.push(NewMutation {
                    position,
                    node: node_id(child)?,
                    time: uniform_below(rng, child_time, parent_time),
                });
            }
        }
    }
    Ok(rv)
}

/// Overlay neutral mutations on a tree sequence.
///
/// For every branch of every local tree, the number of new mutations
/// is Poisson with mean `rate * branch_length * span`.  Each mutation
/// gets its own site at a uniform position within the tree's interval,
/// a uniform time along the branch, ancestral state `"0"` and derived
/// state `"1"`.
///
/// # Parameters
///
/// * `ts`: input tree sequence, which is not modified.
/// * `rate`: see [`MutationRate`].
/// * `seed`: seed for the simulation. `None` seeds from the OS.
/// * `keep`: keep existing sites and mutations.  When `false`, they
///   are discarded first, along with individuals that no node
///   refers to.
///
/// # Errors
///
/// [`CoalescentTreeError::TskitError`] if the tables cannot be copied
/// or the output is not a valid tree sequence.
pub fn mutate(
    ts: &TreeSequence,
    rate: MutationRate,
    seed: Option<u64>,
    keep: bool,
) -> Result<TreeSequence, CoalescentTreeError> {
    let mut rng = make_rng(seed);
    let tables = ts.dump_tables()?;
    let node_times: Vec<f64> = tables.nodes().iter().map(|n| f64::from(n.time)).collect();

    let mut tables: TableCollection = if keep {
        tables
    } else {
        let all_nodes = (0..node_times.len())
            .map(node_id)
            .collect::<Result<Vec<_>, _>>()?;
        subset_nodes(&tables, &all_nodes, RetainOptions::default().drop_mutations())?
    };

    let mut occupied: HashSet<u64> = tables
        .sites()
        .iter()
        .map(|s| f64::from(s.position).to_bits())
        .collect();

    let new_mutations = place_mutations(ts, &node_times, rate, &mut occupied, &mut rng)?;
    log::debug!(
        "adding {} mutations at rate {}",
        new_mutations.len(),
        rate.0
    );

    for m in new_mutations {
        let site = tables.add_site(m.position, Some(ANCESTRAL_STATE))?;
        tables.add_mutation(site, m.node, MutationId::NULL, m.time, Some(DERIVED_STATE))?;
    }
    tables.full_sort(TableSortOptions::default())?;
    Ok(tables.tree_sequence(TreeSequenceFlags::BUILD_INDEXES)?)
}
