/// A backend that holds only a borrow of a decision procedure shared across several runs of the
/// exploration loop (one long-lived procedure stood up once and reused across interleavings in
/// the original's "SMT during symex" mode), instead of owning a fresh one per run. Never clears
/// the procedure's cache — its lifecycle belongs to the caller.
use super::{BackendOutcome, DecisionProcedure, SolverBackend};
use crate::equation::TargetEquation;
use crate::error::CoreError;
use crate::options::OptionsView;
use std::time::Instant;

pub struct RuntimeSharedSolver<'a, D> {
    procedure: &'a mut D,
}

impl<'a, D: DecisionProcedure> RuntimeSharedSolver<'a, D> {
    pub fn new(procedure: &'a mut D) -> RuntimeSharedSolver<'a, D> {
        RuntimeSharedSolver { procedure }
    }
}

impl<'a, D: DecisionProcedure> SolverBackend for RuntimeSharedSolver<'a, D> {
    fn run(
        &mut self,
        equation: &TargetEquation,
        view: &OptionsView,
    ) -> Result<BackendOutcome, CoreError> {
        self.procedure.set_core_size(view.core_size());
        self.procedure.set_filename(view.outfile());

        let encode_start = Instant::now();
        self.procedure.encode(equation)?;
        let encode_time = encode_start.elapsed();

        let solve_start = Instant::now();
        let verdict = self.procedure.dec_solve()?;
        let solve_time = solve_start.elapsed();
        let model = self.procedure.model().cloned();

        Ok(BackendOutcome {
            verdict,
            encode_time,
            solve_time,
            unsat_core_size: self.procedure.get_unsat_core_size(),
            number_of_assumptions: self.procedure.get_number_of_assumptions(),
            model,
        })
    }
}
