/// Crate `explore` is the top-level per-run loop (C7): interleaving enumeration or scheduler-mode
/// UW refinement, checkpoint persistence, and totals/LTL reporting.
use crate::checkpoint::{self, DfsPosition};
use crate::collaborators::{SliceEngine, SymexEngine};
use crate::error::CoreError;
use crate::ltl::{self, LtlOutcome};
use crate::options::OptionsView;
use crate::signal::CheckpointFlag;
use crate::solver::{SolverBackend, Verdict};
use crate::ui::StatusSink;
use crate::vc::{self, PrepOutcome};

/// Process-local, monotonic counters the loop accumulates across its lifetime.
#[derive(Clone, Debug, Default)]
pub struct Counters {
    pub interleaving_number: u32,
    pub interleaving_failed: u32,
    pub uw_loop: u32,
    pub ltl_results_seen: [u32; 4],
}

impl Counters {
    fn record_ltl(&mut self, outcome: LtlOutcome) {
        self.ltl_results_seen[outcome as usize] += 1;
    }

    fn lowest_ltl_outcome(&self) -> Option<LtlOutcome> {
        [
            LtlOutcome::Bad,
            LtlOutcome::Failing,
            LtlOutcome::Succeeding,
            LtlOutcome::Good,
        ]
        .into_iter()
        .find(|outcome| self.ltl_results_seen[*outcome as usize] > 0)
    }
}

/// The top-level exploration driver. Owns nothing but the counters; every collaborator is passed
/// in by the caller per cycle, so the driver never outlives a single invocation's borrows.
pub struct Driver {
    pub counters: Counters,
}

impl Driver {
    pub fn new() -> Driver {
        Driver {
            counters: Counters::default(),
        }
    }

    /// Runs one invocation end-to-end. Returns `true` if the process should report failure.
    pub fn run(
        &mut self,
        symex: &mut dyn SymexEngine,
        slicer: &dyn SliceEngine,
        view: &OptionsView,
        sink: &mut dyn StatusSink,
        checkpoint_flag: &CheckpointFlag,
        mut backend_factory: impl FnMut() -> Box<dyn SolverBackend>,
    ) -> Result<bool, CoreError> {
        if view.from_checkpoint() {
            let path = checkpoint::checkpoint_restore_path(view)?;
            let position = DfsPosition::read_from(&path)?;
            symex.restore_from_dfs_state(&position)?;
        }

        symex.setup_for_new_explore();

        if view.schedule() {
            self.run_scheduler(symex, slicer, view, sink, &mut backend_factory)
        } else {
            self.run_enumeration(symex, slicer, view, sink, checkpoint_flag, &mut backend_factory)
        }
    }

    fn run_scheduler(
        &mut self,
        symex: &mut dyn SymexEngine,
        slicer: &dyn SliceEngine,
        view: &OptionsView,
        sink: &mut dyn StatusSink,
        backend_factory: &mut dyn FnMut() -> Box<dyn SolverBackend>,
    ) -> Result<bool, CoreError> {
        let mut first_uw = true;
        loop {
            if view.uw_model() {
                self.counters.uw_loop += 1;
                sink.status(&format!("*** UW loop {} ***", self.counters.uw_loop));
            }

            let symex_result = match symex.generate_schedule_formula() {
                Ok(result) => result,
                Err(err) => {
                    sink.error(&err.to_string());
                    if !view.all_runs() {
                        return Ok(true);
                    }
                    continue;
                }
            };
            let mut equation = symex_result.equation;
            let prep = match vc::prepare_equation(&mut equation, view, slicer, sink) {
                Ok(prep) => prep,
                Err(err) => {
                    sink.error(&err.to_string());
                    if !view.all_runs() {
                        return Ok(true);
                    }
                    continue;
                }
            };

            let (failing, core_size) = match prep {
                PrepOutcome::TrivialSuccess => {
                    sink.success();
                    (false, 0)
                }
                PrepOutcome::EmittedArtifact => (false, 0),
                PrepOutcome::Ready => {
                    let mut backend = backend_factory();
                    let cycle = vc::run_vc_cycle(&equation, view, backend.as_mut(), sink)?;
                    if view.uw_model() && !first_uw {
                        sink.status(&format!(
                            "unsat core size {} after UW loop {}",
                            cycle.unsat_core_size, self.counters.uw_loop
                        ));
                    }
                    (cycle.failing, cycle.unsat_core_size)
                }
            };
            first_uw = false;

            if !view.uw_model() || core_size == 0 {
                return Ok(failing);
            }
        }
    }

    fn run_enumeration(
        &mut self,
        symex: &mut dyn SymexEngine,
        slicer: &dyn SliceEngine,
        view: &OptionsView,
        sink: &mut dyn StatusSink,
        checkpoint_flag: &CheckpointFlag,
        backend_factory: &mut dyn FnMut() -> Box<dyn SolverBackend>,
    ) -> Result<bool, CoreError> {
        loop {
            let symex_result = match symex.get_next_formula() {
                Ok(result) => result,
                Err(err) => {
                    sink.error(&err.to_string());
                    if !view.all_runs() {
                        return Ok(true);
                    }
                    if checkpoint_flag.take() {
                        self.persist_checkpoint(symex, view)?;
                    }
                    if view.interactive_ileaves() {
                        break;
                    }
                    if !symex.setup_next_formula() {
                        break;
                    }
                    continue;
                }
            };
            self.counters.interleaving_number += 1;
            if !view.k_induction() && self.counters.interleaving_number > 1 {
                sink.status(&format!(
                    "*** Thread interleavings {} ***",
                    self.counters.interleaving_number
                ));
            }

            let mut equation = symex_result.equation;
            let prep = match vc::prepare_equation(&mut equation, view, slicer, sink) {
                Ok(prep) => prep,
                Err(err) => {
                    sink.error(&err.to_string());
                    self.counters.interleaving_failed += 1;
                    if view.checkpoint_on_cex() {
                        self.persist_checkpoint(symex, view)?;
                    }
                    if !view.all_runs() {
                        return Ok(true);
                    }
                    if checkpoint_flag.take() {
                        self.persist_checkpoint(symex, view)?;
                    }
                    if view.interactive_ileaves() {
                        break;
                    }
                    if !symex.setup_next_formula() {
                        break;
                    }
                    continue;
                }
            };
            let failing = match prep {
                PrepOutcome::TrivialSuccess => {
                    sink.success();
                    false
                }
                PrepOutcome::EmittedArtifact => false,
                PrepOutcome::Ready => {
                    if view.ltl() {
                        let outcome = ltl::run(
                            &mut equation,
                            sink,
                            |eq, backend| {
                                let cycle_outcome = backend.run(eq, view)?;
                                Ok(cycle_outcome.verdict)
                            },
                            || backend_factory(),
                        )?;
                        self.counters.record_ltl(outcome);
                        false
                    } else if view.smt() && !smtlib_interleaving_matches(view, self.counters.interleaving_number) {
                        false
                    } else {
                        let mut backend = backend_factory();
                        vc::run_vc_cycle(&equation, view, backend.as_mut(), sink)?.failing
                    }
                }
            };

            if failing {
                self.counters.interleaving_failed += 1;
                if view.checkpoint_on_cex() {
                    self.persist_checkpoint(symex, view)?;
                }
                if !view.all_runs() {
                    return Ok(true);
                }
            }

            if checkpoint_flag.take() {
                self.persist_checkpoint(symex, view)?;
            }

            if view.interactive_ileaves() {
                break;
            }

            if !symex.setup_next_formula() {
                break;
            }
        }

        if view.all_runs() {
            sink.status(&format!(
                "*** number of generated interleavings: {} ***",
                self.counters.interleaving_number
            ));
            sink.status(&format!(
                "*** number of failed interleavings: {} ***",
                self.counters.interleaving_failed
            ));
        }

        if view.ltl() {
            match self.counters.lowest_ltl_outcome() {
                Some(outcome) => {
                    sink.status(&format!("Final lowest outcome: {:?}", outcome));
                }
                None => sink.status("No traces seen, apparently"),
            }
            return Ok(false);
        }

        Ok(false)
    }

    fn persist_checkpoint(
        &self,
        symex: &mut dyn SymexEngine,
        view: &OptionsView,
    ) -> Result<(), CoreError> {
        let path = checkpoint::checkpoint_filename(view);
        symex.save_checkpoint(&path)
    }
}

/// Whether `smtlib-ileave-num` names this interleaving. A malformed or absent value never
/// matches, mirroring the original's `strtol` default of 0 combined with interleaving numbers
/// starting at 1.
fn smtlib_interleaving_matches(view: &OptionsView, interleaving_number: u32) -> bool {
    view.smtlib_ileave_num()
        .parse::<u32>()
        .map_or(false, |n| n == interleaving_number)
}

impl Default for Driver {
    fn default() -> Driver {
        Driver::new()
    }
}
