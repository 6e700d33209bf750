//! Error handling
use thiserror::Error;

/// Primary error type.
///
/// [`tskit::TskitError`] converts into this type via ``From``,
/// which is how failures of the storage layer reach the caller.
#[derive(Error, Debug)]
pub enum CoalescentTreeError {
    /// Node metadata is missing or does not contain the `is_null` flag.
    #[error("malformed metadata for node {node}: {reason}")]
    MalformedInput {
        /// Row of the offending node
        node: usize,
        /// What was wrong with it
        reason: String,
    },
    /// A local tree does not have exactly one root.
    #[error("Tree not coalesced ! interval [{left}, {right}) has {num_roots} roots")]
    NotCoalesced {
        /// Left coordinate of the offending tree
        left: f64,
        /// Right coordinate of the offending tree
        right: f64,
        /// Number of roots found
        num_roots: usize,
    },
    /// Mutation rates must be finite and non-negative.
    #[error("invalid mutation rate: {rate}")]
    InvalidMutationRate {
        /// The rejected rate
        rate: f64,
    },
    /// Sample sizes must lie in `[1, available]`.
    #[error("invalid sample size {requested}: must be in [1, {available}]")]
    InvalidSampleSize {
        /// Requested number of samples
        requested: usize,
        /// Number of samples in the tree sequence
        available: usize,
    },
    /// A sample size of zero was requested.
    #[error("sample size must be at least 1")]
    ZeroSampleSize,
    /// A node id passed to a table transform is out of range or repeated.
    #[error("node {node:?} cannot be retained")]
    InvalidNode {
        /// The offending id
        node: tskit::NodeId,
    },
    /// File names must be valid UTF-8.
    #[error("path {path:?} is not valid UTF-8")]
    InvalidPath {
        /// The rejected path
        path: std::path::PathBuf,
    },
    /// A row index does not fit into a tskit id.
    #[error("row index {0} overflows tskit id type")]
    IdOverflow(usize),
    /// A redirection of a [``tskit::TskitError``]
    #[error("{value:?}")]
    TskitError {
        /// The redirected error
        #[from]
        value: tskit::TskitError,
    },
}
