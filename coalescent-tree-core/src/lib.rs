#![warn(missing_docs)]

//! Normalization and validation of haploid tree sequences.
//!
//! Tree sequences recorded by SLiM for haploid models contain one
//! placeholder ("null") genome per individual.  This crate removes
//! those nodes, checks that every local tree coalesced to a single
//! root, overlays neutral mutations and draws random subsamples.
//!
//! Every transforming operation takes a [`tskit::TreeSequence`] by
//! reference or by value and returns a new one.  Nothing is modified
//! in place.

mod coalescence;
mod error;
mod filter;
pub mod metadata;
mod mutation;
pub mod prelude;
mod rng;
mod sampling;
mod store;
mod subset;

pub use coalescence::{first_uncoalesced_interval, validate_coalescence, Interval};
pub use error::CoalescentTreeError;
pub use filter::{filter_null_nodes, non_null_nodes};
pub use mutation::{mutate, MutationRate};
pub use rng::make_rng;
pub use sampling::{choose_samples, subsample};
pub use store::{dump, load};
pub use subset::{subset_nodes, RetainOptions};

/// Node flags, including [`NodeFlags::IS_SAMPLE`].
pub use tskit::NodeFlags;
