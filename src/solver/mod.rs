/// Crate `solver` declares the decision-procedure boundary and the three backend shapes the
/// driver can route an encoded equation through, along with the outcome metadata each backend
/// reports back.
mod in_process;
mod runtime_shared;
mod text_emitter;

pub use in_process::InProcessSolver;
pub use runtime_shared::RuntimeSharedSolver;
pub use text_emitter::TextEmitterSolver;

use crate::equation::TargetEquation;
use crate::error::CoreError;
use crate::options::OptionsView;
use crate::trace::Model;
use std::path::Path;

/// Construction-time configuration forwarded opaquely to a `DecisionProcedure` before its first
/// `encode`, mirroring the `(is_cpp, int_encoding, smt_text_mode, namespace)` parameters the
/// original passes to its concrete solver constructors (e.g. `z3_solver(*this, is_cpp, ns)`).
#[derive(Clone, Debug, Default)]
pub struct BackendConfig {
    pub is_cpp: bool,
    pub int_encoding: bool,
    pub smt_text_mode: bool,
    pub namespace: String,
}

/// Raw answer a VC cycle interprets. `Emitted`/`Error` only ever appear on a `BackendOutcome`, not
/// as a `DecisionProcedure::dec_solve` return value — a procedure only ever decides `Unsat`/`Sat`.
#[derive(Clone, Debug, PartialEq)]
pub enum Verdict {
    Unsat,
    Sat,
    Emitted,
    Error(String),
}

/// Supplied by the SAT/SMT decision procedure. The core never implements one; it only encodes
/// against this trait and interprets what comes back.
pub trait DecisionProcedure {
    /// Encodes `equation` into the procedure's internal formula representation.
    fn encode(&mut self, equation: &TargetEquation) -> Result<(), CoreError>;

    /// Runs the procedure against the already-encoded formula. Implementors only ever return
    /// `Verdict::Unsat` or `Verdict::Sat`.
    fn dec_solve(&mut self) -> Result<Verdict, CoreError>;

    /// Drops cached solver state between runs. `InProcessSolver` calls this unconditionally after
    /// every run so peak memory stays bounded across a long exploration loop.
    fn clear_cache(&mut self);

    /// Routes emitted formula text to this path instead of solving in-process, where the backend
    /// supports it.
    fn set_filename(&mut self, path: &Path);

    /// Requests that the procedure track an unsat core of at most `n` assumptions.
    fn set_core_size(&mut self, n: usize);

    /// Size of the unsat core from the most recent `dec_solve` call.
    fn get_unsat_core_size(&self) -> usize;

    /// Number of assumption literals active in the most recent `dec_solve` call.
    fn get_number_of_assumptions(&self) -> usize;

    /// The satisfying model from the most recent `Sat` verdict, if one is available.
    fn model(&self) -> Option<&Model>;

    /// Renders the encoded formula as text, for `TextEmitterSolver`.
    fn formula_text(&self) -> String;

    /// Forwards backend construction config to the procedure before the first `encode`. Default
    /// no-op; procedures that care about `is_cpp`/`int_encoding`/`smt_text_mode`/`namespace`
    /// override it.
    fn configure(&mut self, _config: &BackendConfig) {}
}

/// Timing and sizing metadata a backend reports alongside its verdict, independent of which
/// concrete `DecisionProcedure` it wraps. `model` is cloned out of the procedure on a `Sat`
/// verdict so callers can build a trace without holding a borrow of the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct BackendOutcome {
    pub verdict: Verdict,
    pub encode_time: std::time::Duration,
    pub solve_time: std::time::Duration,
    pub unsat_core_size: usize,
    pub number_of_assumptions: usize,
    pub model: Option<Model>,
}

/// A solver backend: a strategy for getting an equation to a `DecisionProcedure` and a verdict
/// back out. The three implementations in this module (`InProcessSolver`, `RuntimeSharedSolver`,
/// `TextEmitterSolver`) correspond to the three routing shapes a BMC driver distinguishes:
/// solving in-process, sharing one long-lived procedure instance across runs, and emitting text
/// instead of solving at all.
pub trait SolverBackend {
    fn run(
        &mut self,
        equation: &TargetEquation,
        view: &OptionsView,
    ) -> Result<BackendOutcome, CoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::VerificationOptions;
    use std::cell::Cell;

    /// A scripted decision procedure for tests: returns a fixed verdict, never touches the
    /// equation contents.
    struct ScriptedProcedure {
        verdict: Verdict,
        core_size: usize,
        encoded: Cell<bool>,
    }

    impl ScriptedProcedure {
        fn new(verdict: Verdict) -> ScriptedProcedure {
            ScriptedProcedure {
                verdict,
                core_size: 0,
                encoded: Cell::new(false),
            }
        }
    }

    impl DecisionProcedure for ScriptedProcedure {
        fn encode(&mut self, _equation: &TargetEquation) -> Result<(), CoreError> {
            self.encoded.set(true);
            Ok(())
        }

        fn dec_solve(&mut self) -> Result<Verdict, CoreError> {
            assert!(self.encoded.get(), "dec_solve() called before encode()");
            Ok(self.verdict.clone())
        }

        fn clear_cache(&mut self) {}
        fn set_filename(&mut self, _path: &Path) {}
        fn set_core_size(&mut self, n: usize) {
            self.core_size = n;
        }
        fn get_unsat_core_size(&self) -> usize {
            self.core_size
        }
        fn get_number_of_assumptions(&self) -> usize {
            0
        }
        fn model(&self) -> Option<&Model> {
            None
        }
        fn formula_text(&self) -> String {
            String::new()
        }
    }

    #[test]
    fn in_process_backend_runs_scripted_procedure() {
        let mut backend = InProcessSolver::new(ScriptedProcedure::new(Verdict::Sat), BackendConfig::default());
        let eq = TargetEquation::new(vec![]);
        let opts = VerificationOptions::default();
        let view = OptionsView::new(&opts);
        let outcome = backend.run(&eq, &view).unwrap();
        assert_eq!(outcome.verdict, Verdict::Sat);
    }
}
