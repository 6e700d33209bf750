use thiserror::Error;

/// Errors computing or comparing spectra.
#[derive(Error, Debug)]
pub enum SpectrumError {
    /// No tabulated Beta spectrum for this `alpha`.
    #[error("alpha = {alpha} not available, choose among {:?}", crate::BETA_ALPHAS)]
    UnknownBetaParameter {
        /// Requested parameter
        alpha: f64,
    },
    /// No tabulated Beta spectrum for this sample size.
    #[error("sample size {sample_size} not available for alpha = {alpha}, choose among {:?}", crate::BETA_SAMPLE_SIZES)]
    UnknownSampleSize {
        /// Requested sample size
        sample_size: usize,
        /// Requested parameter
        alpha: f64,
    },
    /// Branch frequency spectra need at least two samples.
    #[error("sample size {sample_size} is too small")]
    SampleSizeTooSmall {
        /// Requested sample size
        sample_size: usize,
    },
    /// Cannot normalize an empty or all-zero vector.
    #[error("spectrum has zero norm")]
    ZeroNorm,
    /// Spectra being compared differ in length.
    #[error("spectra have lengths {0} and {1}")]
    LengthMismatch(usize, usize),
    /// A redirection of a [``tskit::TskitError``]
    #[error("{value:?}")]
    TskitError {
        /// The redirected error
        #[from]
        value: tskit::TskitError,
    },
}
