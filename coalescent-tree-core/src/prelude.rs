//! Export commonly-used types and functions.

pub use crate::metadata::{GenomeType, SlimNodeMetadata};
pub use crate::CoalescentTreeError;
pub use crate::Interval;
pub use crate::MutationRate;
pub use crate::NodeFlags;
