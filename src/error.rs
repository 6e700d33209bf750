//! Error handling
use coalescent_tree_core::CoalescentTreeError;
use coalescent_tree_stats::SpectrumError;
use thiserror::Error;

/// Errors building a [``crate::SpectraReport``].
#[derive(Error, Debug)]
pub enum ReportError {
    /// A redirection of a [``coalescent_tree_core::CoalescentTreeError``]
    #[error("{value:?}")]
    TreeError {
        /// The redirected error
        #[from]
        value: CoalescentTreeError,
    },
    /// A redirection of a [``coalescent_tree_stats::SpectrumError``]
    #[error("{value:?}")]
    SpectrumError {
        /// The redirected error
        #[from]
        value: SpectrumError,
    },
}

impl From<tskit::TskitError> for ReportError {
    fn from(value: tskit::TskitError) -> Self {
        Self::TreeError {
            value: value.into(),
        }
    }
}
