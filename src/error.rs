//! Crate `error` provides the core's error taxonomy.
use thiserror::Error;

/// Errors the driver itself can raise or forward from a collaborator.
///
/// Every variant corresponds to one of the error kinds in the error handling design: a
/// configuration error aborts immediately, a collaborator failure or unsupported configuration is
/// caught at the VC-pipeline boundary and turned into a failing cycle, and a decision-procedure
/// failure is reported as-is.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A misconfiguration that makes the requested run meaningless, e.g. `from-checkpoint`
    /// with no `checkpoint-file`.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The symex or slicer collaborator raised a textual error.
    #[error("collaborator failure: {0}")]
    Collaborator(String),

    /// A requested backend or solver capability isn't available in this build.
    #[error("unsupported configuration: {0}")]
    UnsupportedConfiguration(String),

    /// The decision procedure returned something other than UNSAT/SAT/EMITTED.
    #[error("decision procedure failed: {0}")]
    DecisionProcedure(String),

    /// Step-1 duplicate-assignment diagnostic (`double-assign-check`).
    #[error("duplicate assignment to {lhs}")]
    DuplicateAssignment { lhs: String },

    /// Checkpoint or text-emission file I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Convenience constructor matching the original's `options.get_option("checkpoint-file") ==
    /// ""` abort site.
    pub fn missing_checkpoint_file() -> CoreError {
        CoreError::Configuration("please provide a checkpoint file".to_string())
    }
}
