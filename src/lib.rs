#![warn(missing_docs)]

//! Post-processing of haploid tree sequences recorded by SLiM.
//!
//! # Overview
//!
//! SLiM models haploids as diploids whose second genome is a
//! placeholder.  [`handle_haploid`] turns such a tree sequence into a
//! proper haploid genealogy:
//!
//! 1. placeholder nodes are removed,
//! 2. every local tree is checked to have coalesced,
//! 3. neutral mutations are added,
//! 4. a random subset of samples is kept.
//!
//! Only the first step is mandatory.  See [`HaploidConfig`].
//!
//! Site and branch frequency spectra of the result can be compared
//! with Kingman and Beta coalescent predictions, see [`SpectraReport`].

pub use coalescent_tree_core::*;
pub use coalescent_tree_stats::*;

mod error;
mod naming;
mod pipeline;
pub mod prelude;
mod report;

pub use error::ReportError;
pub use naming::TreeFileNames;
pub use pipeline::{handle_haploid, HaploidConfig, TreeSource};
pub use report::SpectraReport;

/// Get the coalescent-tree version number.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
