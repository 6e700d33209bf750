use crate::CoalescentTreeError;
use std::path::Path;
use tskit::{TableOutputOptions, TreeSequence};

fn path_str(path: &Path) -> Result<&str, CoalescentTreeError> {
    path.to_str().ok_or_else(|| CoalescentTreeError::InvalidPath {
        path: path.to_path_buf(),
    })
}

/// Load a tree sequence from a `.trees` file.
///
/// # Errors
///
/// * [`CoalescentTreeError::InvalidPath`] if `path` is not UTF-8.
/// * [`CoalescentTreeError::TskitError`] if the file cannot be read
///   or is not a valid tree sequence.
pub fn load<P: AsRef<Path>>(path: P) -> Result<TreeSequence, CoalescentTreeError> {
    let path = path_str(path.as_ref())?;
    log::debug!("loading tree sequence from {}", path);
    Ok(TreeSequence::load(path)?)
}

/// Write a tree sequence to a `.trees` file.
///
/// # Errors
///
/// * [`CoalescentTreeError::InvalidPath`] if `path` is not UTF-8.
/// * [`CoalescentTreeError::TskitError`] if the file cannot be written.
pub fn dump<P: AsRef<Path>>(ts: &TreeSequence, path: P) -> Result<(), CoalescentTreeError> {
    let path = path_str(path.as_ref())?;
    log::debug!("writing tree sequence to {}", path);
    ts.dump(path, TableOutputOptions::default())?;
    Ok(())
}
