use crate::{ReportError, TreeFileNames};
use coalescent_tree_core::load;
use coalescent_tree_stats::{
    allele_frequency_spectrum, compare_bfs, ComparisonOptions, FrequencySpectrum,
    SpectrumComparison, SpectrumMode, SpectrumOptions,
};
use tskit::{SimplificationOptions, TreeSequence};

/// Site and branch frequency spectra of one tree sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct SpectraReport {
    /// Label for plots
    pub title: String,
    /// Site frequency spectrum
    pub sfs: FrequencySpectrum,
    /// Branch frequency spectrum
    pub bfs: FrequencySpectrum,
}

impl SpectraReport {
    /// Spectra of `ts` after simplifying onto its samples.
    ///
    /// Spectra are not span-normalised.  When `polarised` is `false`
    /// they are folded.
    pub fn from_tree_sequence(
        ts: &TreeSequence,
        title: String,
        polarised: bool,
    ) -> Result<Self, ReportError> {
        let samples = ts.sample_nodes().to_vec();
        let (ts, _) = ts.simplify(&samples, SimplificationOptions::default(), false)?;
        let options = SpectrumOptions::default()
            .polarised(polarised)
            .span_normalise(false);
        let sfs = allele_frequency_spectrum(&ts, options.mode(SpectrumMode::Site))?;
        let bfs = allele_frequency_spectrum(&ts, options.mode(SpectrumMode::Branch))?;
        log::debug!(
            "{}: {} samples, {} segregating sites",
            title,
            sfs.num_samples(),
            sfs.interior().iter().sum::<f64>()
        );
        Ok(Self { title, sfs, bfs })
    }

    /// Spectra of the run's input file.
    ///
    /// The title defaults to the run name.
    pub fn from_file(
        names: &TreeFileNames,
        title: Option<&str>,
        polarised: bool,
    ) -> Result<Self, ReportError> {
        let ts = load(names.input())?;
        let title = match title {
            Some(t) => t.to_string(),
            None => names.name().display().to_string(),
        };
        Self::from_tree_sequence(&ts, title, polarised)
    }

    /// Compare the branch spectrum with coalescent theory.
    ///
    /// The comparison is only meaningful for polarised spectra.
    pub fn compare(&self, options: ComparisonOptions) -> Result<SpectrumComparison, ReportError> {
        Ok(compare_bfs(self.bfs.interior(), options)?)
    }
}
