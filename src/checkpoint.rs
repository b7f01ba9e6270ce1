/// Crate `checkpoint` provides the DFS checkpoint service: an opaque position record plus the
/// filename convention for saving and restoring it.
use crate::error::CoreError;
use crate::options::OptionsView;
use std::path::{Path, PathBuf};

/// An opaque, serializable marker of the symbolic executor's search frontier. The driver never
/// interprets its contents; it only hands it to the `SymexEngine` collaborator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DfsPosition(pub Vec<u8>);

impl DfsPosition {
    pub fn from_bytes(bytes: Vec<u8>) -> DfsPosition {
        DfsPosition(bytes)
    }

    pub fn read_from(path: &Path) -> Result<DfsPosition, CoreError> {
        Ok(DfsPosition(std::fs::read(path)?))
    }

    pub fn write_to(&self, path: &Path) -> Result<(), CoreError> {
        std::fs::write(path, &self.0)?;
        Ok(())
    }
}

/// Computes the checkpoint filename: `view.checkpoint_file()` if non-empty, else
/// `esbmc_checkpoint.<pid>`.
pub fn checkpoint_filename(view: &OptionsView) -> PathBuf {
    let configured = view.checkpoint_file();
    if configured.as_os_str().is_empty() {
        PathBuf::from(format!("esbmc_checkpoint.{}", std::process::id()))
    } else {
        configured.to_path_buf()
    }
}

/// Resolves the filename to restore from, or a configuration error if `from-checkpoint` was
/// requested with no filename (the original's `abort()` site).
pub fn checkpoint_restore_path(view: &OptionsView) -> Result<PathBuf, CoreError> {
    let configured = view.checkpoint_file();
    if configured.as_os_str().is_empty() {
        Err(CoreError::missing_checkpoint_file())
    } else {
        Ok(configured.to_path_buf())
    }
}
