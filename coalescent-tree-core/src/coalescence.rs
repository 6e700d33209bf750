use crate::CoalescentTreeError;
use streaming_iterator::StreamingIterator;
use tskit::{TreeFlags, TreeSequence};

/// A half-open genomic interval `[left, right)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Interval {
    /// Left coordinate (inclusive)
    pub left: f64,
    /// Right coordinate (exclusive)
    pub right: f64,
}

/// Find the leftmost local tree that does not have exactly one root.
///
/// # Returns
///
/// * `Some((interval, num_roots))` for the first such tree
/// * `None` if every tree coalesced
///
/// # Errors
///
/// [`CoalescentTreeError::TskitError`] if the tree iterator cannot be
/// created.
pub fn first_uncoalesced_interval(
    ts: &TreeSequence,
) -> Result<Option<(Interval, usize)>, CoalescentTreeError> {
    let mut trees = ts.tree_iterator(TreeFlags::default())?;
    while let Some(tree) = trees.next() {
        let num_roots = tree.roots().count();
        if num_roots != 1 {
            let (left, right) = tree.interval();
            let interval = Interval {
                left: f64::from(left),
                right: f64::from(right),
            };
            return Ok(Some((interval, num_roots)));
        }
    }
    Ok(None)
}

/// Check that every local tree has exactly one root.
///
/// Validation is read-only: on success the input is handed back
/// unchanged.
///
/// # Errors
///
/// [`CoalescentTreeError::NotCoalesced`] carrying the interval of the
/// leftmost tree with zero or several roots.
///
/// # Example
///
/// ```
/// use coalescent_tree_core::{validate_coalescence, CoalescentTreeError};
///
/// // Two isolated samples: the only tree has two roots.
/// let mut tables = tskit::TableCollection::new(100.).unwrap();
/// tables.add_node(coalescent_tree_core::NodeFlags::IS_SAMPLE, 0.0, -1, -1).unwrap();
/// tables.add_node(coalescent_tree_core::NodeFlags::IS_SAMPLE, 0.0, -1, -1).unwrap();
/// let ts = tables
///     .tree_sequence(tskit::TreeSequenceFlags::BUILD_INDEXES)
///     .unwrap();
/// match validate_coalescence(ts) {
///     Err(CoalescentTreeError::NotCoalesced { left, right, num_roots }) => {
///         assert_eq!((left, right, num_roots), (0.0, 100.0, 2));
///     }
///     _ => panic!(),
/// }
/// ```
pub fn validate_coalescence(ts: TreeSequence) -> Result<TreeSequence, CoalescentTreeError> {
    match first_uncoalesced_interval(&ts)? {
        None => Ok(ts),
        Some((interval, num_roots)) => {
            log::error!(
                "tree over [{}, {}) has {} roots",
                interval.left,
                interval.right,
                num_roots
            );
            Err(CoalescentTreeError::NotCoalesced {
                left: interval.left,
                right: interval.right,
                num_roots,
            })
        }
    }
}
