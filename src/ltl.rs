/// Crate `ltl` is the LTL tri-state driver (C6): three sequential solver queries over the same
/// equation, distinguished by which assertions are masked live at each stage.
use crate::equation::{StepKind, TargetEquation};
use crate::error::CoreError;
use crate::solver::{SolverBackend, Verdict};
use crate::ui::StatusSink;

/// Severity order `Bad < Failing < Succeeding < Good`, matching the original's "lowest outcome"
/// reporting across runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LtlOutcome {
    Bad,
    Failing,
    Succeeding,
    Good,
}

const STAGES: [(&str, LtlOutcome); 3] = [
    ("LTL_BAD", LtlOutcome::Bad),
    ("LTL_FAILING", LtlOutcome::Failing),
    ("LTL_SUCCEEDING", LtlOutcome::Succeeding),
];

/// Masks every assertion whose comment does not equal `keep_tag` to `Skip` for the duration of
/// the guard's scope, restoring every mutated step's original kind on drop — on *every* exit path,
/// including an early return from inside the scope. This is a deliberate correction of the
/// original's early-return-while-masked behavior: the multiset of step kinds before and after an
/// LTL stage must be equal (see the round-trip property this exists to uphold).
struct MaskGuard<'a> {
    equation: &'a mut TargetEquation,
    restore: Vec<(usize, StepKind)>,
}

impl<'a> MaskGuard<'a> {
    fn apply(equation: &'a mut TargetEquation, keep_tag: &str) -> MaskGuard<'a> {
        let mut restore = Vec::new();
        for (index, step) in equation.steps.iter_mut().enumerate() {
            if step.kind().is_assert() && !step.comment_is(keep_tag) {
                restore.push((index, step.kind()));
                step.set_kind(StepKind::Skip);
            }
        }
        MaskGuard { equation, restore }
    }

    fn has_live_assert_tagged(&self, tag: &str) -> bool {
        self.equation
            .steps
            .iter()
            .any(|step| step.kind().is_assert() && step.comment_is(tag))
    }
}

impl<'a> Drop for MaskGuard<'a> {
    fn drop(&mut self) {
        for (index, original_kind) in self.restore.drain(..) {
            self.equation.steps[index].set_kind(original_kind);
        }
    }
}

/// Runs the tri-state protocol. `solve_stage` is handed the masked equation and must return a
/// fresh solve verdict for it (callers construct a new `SolverBackend`/`DecisionProcedure` pair
/// per stage, per the invariant that no two stages share solver state).
pub fn run(
    equation: &mut TargetEquation,
    sink: &mut dyn StatusSink,
    mut solve_stage: impl FnMut(&TargetEquation, &mut dyn SolverBackend) -> Result<Verdict, CoreError>,
    mut backend_factory: impl FnMut() -> Box<dyn SolverBackend>,
) -> Result<LtlOutcome, CoreError> {
    for (tag, outcome) in STAGES {
        let guard = MaskGuard::apply(equation, tag);
        if !guard.has_live_assert_tagged(tag) {
            sink.warn(&format!("no assertion tagged {} found; skipping stage", tag));
            drop(guard);
            continue;
        }
        let verdict = {
            let mut backend = backend_factory();
            solve_stage(guard.equation, backend.as_mut())?
        };
        drop(guard);
        if verdict == Verdict::Sat {
            sink.status(&format!("Checking for {}", tag));
            return Ok(outcome);
        }
    }
    Ok(LtlOutcome::Good)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equation::{Condition, SsaStep};
    use crate::options::{OptionsView, VerificationOptions};
    use crate::solver::{BackendConfig, BackendOutcome, DecisionProcedure, InProcessSolver};
    use crate::trace::Model;
    use crate::ui::{ConsoleSink, UiMode};

    fn tagged_assert(tag: &str) -> SsaStep {
        SsaStep::new(StepKind::Assert, Condition::new("p")).with_comment(tag)
    }

    struct FixedProcedure {
        verdict: Verdict,
    }

    impl DecisionProcedure for FixedProcedure {
        fn encode(&mut self, _equation: &TargetEquation) -> Result<(), CoreError> {
            Ok(())
        }
        fn dec_solve(&mut self) -> Result<Verdict, CoreError> {
            Ok(self.verdict.clone())
        }
        fn clear_cache(&mut self) {}
        fn set_filename(&mut self, _path: &std::path::Path) {}
        fn set_core_size(&mut self, _n: usize) {}
        fn get_unsat_core_size(&self) -> usize {
            0
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

    fn solve_stage(
        equation: &TargetEquation,
        view: &OptionsView,
        backend: &mut dyn SolverBackend,
    ) -> Result<Verdict, CoreError> {
        let outcome: BackendOutcome = backend.run(equation, view)?;
        Ok(outcome.verdict)
    }

    #[test]
    fn mask_guard_restores_kinds_on_match_and_non_match() {
        let mut eq = TargetEquation::new(vec![
            tagged_assert("LTL_BAD"),
            tagged_assert("LTL_FAILING"),
        ]);
        let mut sink = ConsoleSink::new(UiMode::Plain, Vec::new());
        let opts = VerificationOptions::default();
        let view = OptionsView::new(&opts);
        let result = run(
            &mut eq,
            &mut sink,
            |eq, backend| solve_stage(eq, &view, backend),
            || {
                Box::new(InProcessSolver::new(
                    FixedProcedure { verdict: Verdict::Sat },
                    BackendConfig::default(),
                ))
            },
        )
        .unwrap();
        assert_eq!(result, LtlOutcome::Bad);
        // every assertion must be restored to `Assert`, matching the pre-stage multiset
        assert!(eq.steps.iter().all(|s| s.kind().is_assert()));
    }

    #[test]
    fn all_unsat_reports_good() {
        let mut eq = TargetEquation::new(vec![
            tagged_assert("LTL_BAD"),
            tagged_assert("LTL_FAILING"),
            tagged_assert("LTL_SUCCEEDING"),
        ]);
        let mut sink = ConsoleSink::new(UiMode::Plain, Vec::new());
        let opts = VerificationOptions::default();
        let view = OptionsView::new(&opts);
        let result = run(
            &mut eq,
            &mut sink,
            |eq, backend| solve_stage(eq, &view, backend),
            || {
                Box::new(InProcessSolver::new(
                    FixedProcedure { verdict: Verdict::Unsat },
                    BackendConfig::default(),
                ))
            },
        )
        .unwrap();
        assert_eq!(result, LtlOutcome::Good);
        assert!(eq.steps.iter().all(|s| s.kind().is_assert()));
    }

    #[test]
    fn missing_tag_warns_and_continues_to_next_stage() {
        let mut eq = TargetEquation::new(vec![tagged_assert("LTL_SUCCEEDING")]);
        let mut sink = ConsoleSink::new(UiMode::Plain, Vec::new());
        let opts = VerificationOptions::default();
        let view = OptionsView::new(&opts);
        let result = run(
            &mut eq,
            &mut sink,
            |eq, backend| solve_stage(eq, &view, backend),
            || {
                Box::new(InProcessSolver::new(
                    FixedProcedure { verdict: Verdict::Sat },
                    BackendConfig::default(),
                ))
            },
        )
        .unwrap();
        assert_eq!(result, LtlOutcome::Succeeding);
    }
}
