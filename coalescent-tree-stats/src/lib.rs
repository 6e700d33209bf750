//! Frequency spectra of tree sequences and their
//! theoretical expectations under Kingman and Beta coalescents.

mod compare;
mod error;
mod spectrum;
mod theory;

pub use compare::{compare_bfs, l2_distance, l2_norm, normalize};
pub use compare::{ComparisonOptions, SpectrumComparison};
pub use error::SpectrumError;
pub use spectrum::{allele_frequency_spectrum, FrequencySpectrum, SpectrumMode, SpectrumOptions};
pub use theory::{bfs_beta, bfs_kingman, theoretical_bfs, CoalescentModel};
pub use theory::{BETA_ALPHAS, BETA_SAMPLE_SIZES};
