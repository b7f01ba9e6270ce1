/// Crate `collaborators` declares the trait boundary to the symbolic executor and the slicer.
/// Both are genuine external collaborators (the C/C++ front end and the slicing algorithms are
/// out of scope for this crate); the driver only ever depends on these traits.
use crate::checkpoint::DfsPosition;
use crate::equation::{SymexResult, TargetEquation};
use crate::error::CoreError;
use crate::options::OptionsView;
use std::path::Path;

/// Supplied by the symbolic executor.
pub trait SymexEngine {
    /// Resets per-exploration state before the first formula of a run is requested.
    fn setup_for_new_explore(&mut self);

    /// Scheduler-mode entry point: produces the single schedule formula for this run.
    fn generate_schedule_formula(&mut self) -> Result<SymexResult, CoreError>;

    /// Enumeration-mode entry point: produces the formula for the current interleaving.
    fn get_next_formula(&mut self) -> Result<SymexResult, CoreError>;

    /// Advances to the next interleaving. Returns `false` when the search is exhausted.
    fn setup_next_formula(&mut self) -> bool;

    /// Restores a previously saved DFS position before the first enumeration step.
    fn restore_from_dfs_state(&mut self, position: &DfsPosition) -> Result<(), CoreError>;

    /// Serializes the current DFS position to `path`.
    fn save_checkpoint(&mut self, path: &Path) -> Result<(), CoreError>;
}

/// Supplied by the slicer.
pub trait SliceEngine {
    /// Full slicing: restricts the equation to steps causally relevant to a live assertion,
    /// dropping everything else. Only ever removes steps; never reorders them. Must honor
    /// `view.keep_unused()` by retaining assignments it would otherwise drop.
    fn full_slice(&self, equation: &mut TargetEquation, view: &OptionsView);

    /// Assertion-preserving, single-pass, minimal slice used when full slicing is disabled
    /// (`no-slice`). Must honor `view.keep_unused()` the same way `full_slice` does.
    fn simple_slice(&self, equation: &mut TargetEquation, view: &OptionsView);

    /// Restricts the equation to steps causally relevant to a named trace.
    fn slice_by_trace(&self, trace_name: &str, equation: &mut TargetEquation, view: &OptionsView);

    /// Rejects the equation if two SSA steps assign the same LHS symbol.
    fn check_for_duplicate_assigns(
        &self,
        equation: &TargetEquation,
        view: &OptionsView,
    ) -> Result<(), CoreError>;
}
