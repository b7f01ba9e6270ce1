/// The plain backend: owns a `DecisionProcedure` outright and runs it in-process, timing the
/// encode and solve phases separately the way the original's `run_decision_procedure` does, then
/// always clearing cached solver state so peak memory stays bounded across a long exploration
/// loop even when nobody reads the metrics back.
use super::{BackendConfig, BackendOutcome, DecisionProcedure, SolverBackend, Verdict};
use crate::equation::TargetEquation;
use crate::error::CoreError;
use crate::options::OptionsView;
use std::time::Instant;
use tracing::debug;

pub struct InProcessSolver<D> {
    procedure: D,
    config: BackendConfig,
}

impl<D: DecisionProcedure> InProcessSolver<D> {
    pub fn new(procedure: D, config: BackendConfig) -> InProcessSolver<D> {
        InProcessSolver { procedure, config }
    }

    pub fn into_inner(self) -> D {
        self.procedure
    }
}

impl<D: DecisionProcedure> SolverBackend for InProcessSolver<D> {
    fn run(
        &mut self,
        equation: &TargetEquation,
        view: &OptionsView,
    ) -> Result<BackendOutcome, CoreError> {
        self.procedure.configure(&self.config);
        self.procedure.set_core_size(view.core_size());
        self.procedure.set_filename(view.outfile());

        let encode_start = Instant::now();
        self.procedure.encode(equation)?;
        let encode_time = encode_start.elapsed();

        let solve_start = Instant::now();
        let verdict = self.procedure.dec_solve();
        let solve_time = solve_start.elapsed();

        let outcome = match verdict {
            Ok(verdict) => {
                let model = self.procedure.model().cloned();
                BackendOutcome {
                    verdict,
                    encode_time,
                    solve_time,
                    unsat_core_size: self.procedure.get_unsat_core_size(),
                    number_of_assumptions: self.procedure.get_number_of_assumptions(),
                    model,
                }
            }
            Err(err) => {
                self.procedure.clear_cache();
                return Err(err);
            }
        };

        debug!(?encode_time, ?solve_time, "in-process solve complete");
        self.procedure.clear_cache();
        Ok(outcome)
    }
}
