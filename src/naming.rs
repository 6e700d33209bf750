use std::ffi::OsString;
use std::path::{Path, PathBuf};

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// File names derived from one simulation run.
///
/// A run named `name` is read from `name.trees`.  Derived files use
/// the output name, which defaults to the run name when it is
/// requested.
///
/// # Example
///
/// ```
/// use coalescent_tree::TreeFileNames;
/// use std::path::PathBuf;
///
/// let names = TreeFileNames::new("runs/tree_coalesced");
/// assert_eq!(names.input(), PathBuf::from("runs/tree_coalesced.trees"));
/// assert_eq!(names.mutated(), PathBuf::from("runs/tree_coalesced_mutated.trees"));
///
/// let names = names.with_output_name("figures/coalesced");
/// assert_eq!(names.image(), PathBuf::from("figures/coalesced.png"));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreeFileNames {
    name: PathBuf,
    output_name: Option<PathBuf>,
}

impl TreeFileNames {
    /// Names for the run `name`, without extension.
    pub fn new<P: Into<PathBuf>>(name: P) -> Self {
        Self {
            name: name.into(),
            output_name: None,
        }
    }

    /// Use `output_name` instead of the run name for derived files.
    pub fn with_output_name<P: Into<PathBuf>>(mut self, output_name: P) -> Self {
        self.output_name = Some(output_name.into());
        self
    }

    /// The run name.
    pub fn name(&self) -> &Path {
        &self.name
    }

    /// The name derived files are based on.
    pub fn output_name(&self) -> &Path {
        self.output_name.as_deref().unwrap_or(&self.name)
    }

    /// `<name>.trees`
    pub fn input(&self) -> PathBuf {
        with_suffix(&self.name, ".trees")
    }

    /// `<output_name>_mutated.trees`
    pub fn mutated(&self) -> PathBuf {
        with_suffix(self.output_name(), "_mutated.trees")
    }

    /// `<output_name>.png`
    pub fn image(&self) -> PathBuf {
        with_suffix(self.output_name(), ".png")
    }
}
