//! End-to-end scenarios driving `explore::Driver` against scripted collaborators, matching the
//! literal scenarios in SPEC_FULL.md's testable-properties section. No real C/C++ front end or
//! SMT/SAT solver is involved; those are external collaborators out of scope for this crate.
use bmc_core::checkpoint::DfsPosition;
use bmc_core::equation::{Condition, SsaStep, StepKind, SymexResult, TargetEquation};
use bmc_core::explore::Driver;
use bmc_core::ltl::LtlOutcome;
use bmc_core::options::{OptionsView, VerificationOptions};
use bmc_core::signal::CheckpointFlag;
use bmc_core::slicer::ReferenceSlicer;
use bmc_core::solver::{BackendConfig, DecisionProcedure, InProcessSolver, Verdict};
use bmc_core::trace::Model;
use bmc_core::ui::{ConsoleSink, UiMode};
use bmc_core::CoreError;
use std::cell::Cell;
use std::path::Path;

/// A scripted symbolic executor that yields equations from a fixed, pre-built queue and reports
/// the search exhausted once it's empty.
struct ScriptedSymex {
    queue: Vec<TargetEquation>,
}

impl ScriptedSymex {
    fn one(equation: TargetEquation) -> ScriptedSymex {
        ScriptedSymex { queue: vec![equation] }
    }
}

impl bmc_core::SymexEngine for ScriptedSymex {
    fn setup_for_new_explore(&mut self) {}

    fn generate_schedule_formula(&mut self) -> Result<SymexResult, CoreError> {
        Ok(SymexResult::new(self.queue.first().cloned().unwrap_or_default()))
    }

    fn get_next_formula(&mut self) -> Result<SymexResult, CoreError> {
        if self.queue.is_empty() {
            return Ok(SymexResult::new(TargetEquation::default()));
        }
        Ok(SymexResult::new(self.queue.remove(0)))
    }

    fn setup_next_formula(&mut self) -> bool {
        !self.queue.is_empty()
    }

    fn restore_from_dfs_state(&mut self, _position: &DfsPosition) -> Result<(), CoreError> {
        Ok(())
    }

    fn save_checkpoint(&mut self, _path: &Path) -> Result<(), CoreError> {
        Ok(())
    }
}

/// A decision procedure whose verdict and unsat-core size are fixed at construction.
struct FixedProcedure {
    verdict: Verdict,
    core_size: usize,
    model: Option<Model>,
}

impl FixedProcedure {
    fn new(verdict: Verdict) -> FixedProcedure {
        FixedProcedure {
            verdict,
            core_size: 0,
            model: None,
        }
    }

    fn with_model(mut self, model: Model) -> FixedProcedure {
        self.model = Some(model);
        self
    }
}

impl DecisionProcedure for FixedProcedure {
    fn encode(&mut self, _equation: &TargetEquation) -> Result<(), CoreError> {
        Ok(())
    }
    fn dec_solve(&mut self) -> Result<Verdict, CoreError> {
        Ok(self.verdict.clone())
    }
    fn clear_cache(&mut self) {}
    fn set_filename(&mut self, _path: &Path) {}
    fn set_core_size(&mut self, _n: usize) {}
    fn get_unsat_core_size(&self) -> usize {
        self.core_size
    }
    fn get_number_of_assumptions(&self) -> usize {
        0
    }
    fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }
    fn formula_text(&self) -> String {
        String::new()
    }
}

fn plain_sink() -> ConsoleSink<Vec<u8>> {
    ConsoleSink::new(UiMode::Plain, Vec::new())
}

fn single_assert(text: &str) -> TargetEquation {
    TargetEquation::new(vec![SsaStep::new(StepKind::Assert, Condition::new(text))])
}

#[test]
fn zero_claims_is_a_trivial_success() {
    let mut symex = ScriptedSymex::one(TargetEquation::default());
    let opts = VerificationOptions::default();
    let view = OptionsView::new(&opts);
    let mut sink = plain_sink();
    let flag = CheckpointFlag::new();
    let failing = Driver::new()
        .run(&mut symex, &ReferenceSlicer, &view, &mut sink, &flag, || {
            Box::new(InProcessSolver::new(
                FixedProcedure::new(Verdict::Unsat),
                BackendConfig::default(),
            ))
        })
        .unwrap();
    assert!(!failing);
}

#[test]
fn sat_with_no_options_is_a_failing_counterexample() {
    let mut symex = ScriptedSymex::one(single_assert("bad"));
    let opts = VerificationOptions::default();
    let view = OptionsView::new(&opts);
    let mut sink = plain_sink();
    let flag = CheckpointFlag::new();
    let failing = Driver::new()
        .run(&mut symex, &ReferenceSlicer, &view, &mut sink, &flag, || {
            Box::new(InProcessSolver::new(
                FixedProcedure::new(Verdict::Sat).with_model(Model::default()),
                BackendConfig::default(),
            ))
        })
        .unwrap();
    assert!(failing);
}

#[test]
fn unsat_with_base_case_reports_no_bug_found_in_base_case() {
    let mut symex = ScriptedSymex::one(single_assert("ok"));
    let mut opts = VerificationOptions::default();
    opts.base_case = true;
    let view = OptionsView::new(&opts);
    let mut sink = plain_sink();
    let flag = CheckpointFlag::new();
    let failing = Driver::new()
        .run(&mut symex, &ReferenceSlicer, &view, &mut sink, &flag, || {
            Box::new(InProcessSolver::new(
                FixedProcedure::new(Verdict::Unsat),
                BackendConfig::default(),
            ))
        })
        .unwrap();
    assert!(!failing, "base-case UNSAT never claims a bug was found");
}

#[test]
fn sat_with_inductive_step_and_show_counter_example_prints_trace_but_does_not_fail() {
    let mut symex = ScriptedSymex::one(single_assert("inductive hypothesis violated"));
    let mut opts = VerificationOptions::default();
    opts.inductive_step = true;
    opts.show_counter_example = true;
    let view = OptionsView::new(&opts);
    let mut sink = plain_sink();
    let flag = CheckpointFlag::new();
    let failing = Driver::new()
        .run(&mut symex, &ReferenceSlicer, &view, &mut sink, &flag, || {
            Box::new(InProcessSolver::new(
                FixedProcedure::new(Verdict::Sat).with_model(Model::default()),
                BackendConfig::default(),
            ))
        })
        .unwrap();
    assert!(!failing, "inductive-step SAT proves the hypothesis, not the program");
}

#[test]
fn ltl_three_stage_unsat_unsat_sat_reports_succeeding() {
    let equation = TargetEquation::new(vec![
        SsaStep::new(StepKind::Assert, Condition::new("p")).with_comment("LTL_BAD"),
        SsaStep::new(StepKind::Assert, Condition::new("p")).with_comment("LTL_FAILING"),
        SsaStep::new(StepKind::Assert, Condition::new("p")).with_comment("LTL_SUCCEEDING"),
    ]);
    let mut symex = ScriptedSymex::one(equation);
    let mut opts = VerificationOptions::default();
    opts.ltl = true;
    let view = OptionsView::new(&opts);
    let mut sink = plain_sink();
    let flag = CheckpointFlag::new();

    // Unsat, Unsat, Sat: BAD stage misses, FAILING stage misses, SUCCEEDING stage hits. Each LTL
    // stage constructs its own fresh decision procedure, so the factory hands out one fixed
    // verdict per call rather than a shared running sequence.
    let verdicts = vec![Verdict::Unsat, Verdict::Unsat, Verdict::Sat];
    let call = Cell::new(0usize);
    let mut driver = Driver::new();
    let failing = driver
        .run(&mut symex, &ReferenceSlicer, &view, &mut sink, &flag, || {
            let i = call.get();
            call.set(i + 1);
            let verdict = verdicts.get(i).cloned().unwrap_or(Verdict::Unsat);
            Box::new(InProcessSolver::new(
                FixedProcedure::new(verdict),
                BackendConfig::default(),
            ))
        })
        .unwrap();
    assert!(!failing, "the ltl branch always returns non-failing");
    assert_eq!(
        driver.counters.ltl_results_seen[LtlOutcome::Succeeding as usize],
        1
    );
}

#[test]
fn scheduler_uw_loop_runs_until_unsat_core_reaches_zero() {
    let mut symex = ScriptedSymex::one(single_assert("ok"));
    let mut opts = VerificationOptions::default();
    opts.schedule = true;
    opts.uw_model = true;
    let view = OptionsView::new(&opts);
    let mut sink = plain_sink();
    let flag = CheckpointFlag::new();

    // Each UW iteration constructs a fresh backend; scripting {5, 2, 0} across three iterations
    // means the third iteration's zero core size is what stops the loop.
    let core_sizes = vec![5usize, 2, 0];
    let call = Cell::new(0usize);
    let mut driver = Driver::new();
    let failing = driver
        .run(&mut symex, &ReferenceSlicer, &view, &mut sink, &flag, || {
            let i = call.get();
            call.set(i + 1);
            let size = core_sizes.get(i).copied().unwrap_or(0);
            Box::new(InProcessSolver::new(
                FixedProcedure {
                    verdict: Verdict::Unsat,
                    core_size: size,
                    model: None,
                },
                BackendConfig::default(),
            ))
        })
        .unwrap();
    assert!(!failing);
    assert_eq!(
        driver.counters.uw_loop,
        3,
        "three iterations means uw_loop was incremented three times (pre-increment, including the last)"
    );
    assert_eq!(call.get(), 3);
}

/// A scripted symbolic executor whose `get_next_formula` fails on its first call, then succeeds
/// on the second. Used to exercise the collaborator-error-recovery path in enumeration mode.
struct FlakySymex {
    queue: Vec<TargetEquation>,
    failed_once: Cell<bool>,
}

impl FlakySymex {
    fn one(equation: TargetEquation) -> FlakySymex {
        FlakySymex {
            queue: vec![equation],
            failed_once: Cell::new(false),
        }
    }
}

impl bmc_core::SymexEngine for FlakySymex {
    fn setup_for_new_explore(&mut self) {}

    fn generate_schedule_formula(&mut self) -> Result<SymexResult, CoreError> {
        Ok(SymexResult::new(self.queue.first().cloned().unwrap_or_default()))
    }

    fn get_next_formula(&mut self) -> Result<SymexResult, CoreError> {
        if !self.failed_once.get() {
            self.failed_once.set(true);
            return Err(CoreError::Collaborator("symex front end hiccup".to_string()));
        }
        if self.queue.is_empty() {
            return Ok(SymexResult::new(TargetEquation::default()));
        }
        Ok(SymexResult::new(self.queue.remove(0)))
    }

    fn setup_next_formula(&mut self) -> bool {
        !self.queue.is_empty()
    }

    fn restore_from_dfs_state(&mut self, _position: &DfsPosition) -> Result<(), CoreError> {
        Ok(())
    }

    fn save_checkpoint(&mut self, _path: &Path) -> Result<(), CoreError> {
        Ok(())
    }
}

#[test]
fn symex_error_is_logged_and_all_runs_continues_to_the_next_interleaving() {
    let mut symex = FlakySymex::one(single_assert("ok"));
    let mut opts = VerificationOptions::default();
    opts.all_runs = true;
    let view = OptionsView::new(&opts);
    let mut buf = Vec::new();
    let mut sink = ConsoleSink::new(UiMode::Plain, &mut buf);
    let flag = CheckpointFlag::new();
    let failing = Driver::new()
        .run(&mut symex, &ReferenceSlicer, &view, &mut sink, &flag, || {
            Box::new(InProcessSolver::new(
                FixedProcedure::new(Verdict::Unsat),
                BackendConfig::default(),
            ))
        })
        .unwrap();
    assert!(!failing, "the one scripted interleaving after the hiccup is a clean UNSAT");
    let written = String::from_utf8(buf).unwrap();
    assert!(written.contains("symex front end hiccup"), "the collaborator error must reach the sink");
}

#[test]
fn symex_error_without_all_runs_aborts_the_invocation() {
    let mut symex = FlakySymex::one(single_assert("ok"));
    let opts = VerificationOptions::default();
    let view = OptionsView::new(&opts);
    let mut buf = Vec::new();
    let mut sink = ConsoleSink::new(UiMode::Plain, &mut buf);
    let flag = CheckpointFlag::new();
    let failing = Driver::new()
        .run(&mut symex, &ReferenceSlicer, &view, &mut sink, &flag, || {
            Box::new(InProcessSolver::new(
                FixedProcedure::new(Verdict::Unsat),
                BackendConfig::default(),
            ))
        })
        .unwrap();
    assert!(failing, "without all-runs a collaborator error aborts the invocation as failing");
}
