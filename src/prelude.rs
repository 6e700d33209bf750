//! The crate prelude
//!
//! # Example
//! ```
//! use coalescent_tree::prelude::*;
//! ```

pub use crate::{handle_haploid, HaploidConfig, SpectraReport, TreeFileNames, TreeSource};
pub use coalescent_tree_core::prelude::*;
pub use coalescent_tree_stats::{ComparisonOptions, SpectrumMode, SpectrumOptions};
