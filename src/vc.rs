/// Crate `vc` is the VC pipeline (C4): equation preparation, then one solve-and-interpret cycle.
use crate::collaborators::SliceEngine;
use crate::equation::{StepKind, TargetEquation};
use crate::error::CoreError;
use crate::options::OptionsView;
use crate::solver::{BackendOutcome, SolverBackend, Verdict};
use crate::trace;
use crate::ui::StatusSink;

/// Result of §4.2 preparation, before any decision procedure is invoked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrepOutcome {
    /// Slicing is done and claims remain; proceed to encode and solve.
    Ready,
    /// A program/subgoal/VCC artifact was emitted; the cycle ends here without solving.
    EmittedArtifact,
    /// No claims remain after slicing; the cycle reports success without constructing a backend.
    TrivialSuccess,
}

/// Whether a completed VC cycle should be treated as a failing run by the exploration loop, plus
/// the unsat-core size the UW loop needs to decide whether to continue refining.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleOutcome {
    pub failing: bool,
    pub unsat_core_size: usize,
}

/// Renders every live assignment/assert/assume as a numbered constraint line, restarting
/// numbering at 1 and counting only non-`Skip` steps, matching the original's `show_program`.
pub fn show_program(equation: &TargetEquation) -> String {
    let mut rendered = String::new();
    let mut n = 1usize;
    for step in equation.live_steps() {
        let prefix = match step.kind() {
            StepKind::Assert => "(assert) ",
            StepKind::Assume => "(assume) ",
            StepKind::Assignment => "",
            _ => continue,
        };
        rendered.push_str(&format!("{:>4}  {}{}\n", n, prefix, step.condition));
        n += 1;
    }
    rendered
}

/// Equation preparation: duplicate-assignment check, slicing, artifact emission, trivial-success
/// short-circuit. See SPEC_FULL.md §4.2 for the exact ordering this must preserve.
pub fn prepare_equation(
    equation: &mut TargetEquation,
    view: &OptionsView,
    slicer: &dyn SliceEngine,
    sink: &mut dyn StatusSink,
) -> Result<PrepOutcome, CoreError> {
    if view.double_assign_check() {
        slicer.check_for_duplicate_assigns(equation, view)?;
    }

    if let Some(trace_name) = view.slice_by_trace() {
        slicer.slice_by_trace(trace_name, equation, view);
    }

    if view.no_slice() {
        slicer.simple_slice(equation, view);
    } else {
        slicer.full_slice(equation, view);
    }

    if view.program_only() || view.program_too() {
        sink.program(&show_program(equation));
        if view.program_only() {
            return Ok(PrepOutcome::EmittedArtifact);
        }
    }

    if view.document_subgoals() || view.show_vcc() {
        sink.program(&show_program(equation));
        return Ok(PrepOutcome::EmittedArtifact);
    }

    if equation.remaining_claims == 0 {
        return Ok(PrepOutcome::TrivialSuccess);
    }

    Ok(PrepOutcome::Ready)
}

/// Runs one encode-solve-interpret cycle against an already-prepared equation, per the
/// interpretation table in SPEC_FULL.md §4.3.
pub fn run_vc_cycle(
    equation: &TargetEquation,
    view: &OptionsView,
    backend: &mut dyn SolverBackend,
    sink: &mut dyn StatusSink,
) -> Result<CycleOutcome, CoreError> {
    let report_timings = !(view.smt() || view.btor());
    if report_timings {
        let logic = if view.uses_integer_logic() {
            "integer/real arithmetic"
        } else {
            "bit-vector arithmetic"
        };
        sink.status(&format!("Encoding remaining VCC(s) using {}", logic));
    }

    let outcome = match backend.run(equation, view) {
        Ok(outcome) => outcome,
        Err(err) => {
            sink.error(&err.to_string());
            return Ok(CycleOutcome { failing: true, unsat_core_size: 0 });
        }
    };

    if report_timings {
        sink.status(&format!(
            "Encoding to solver time: {:?}s",
            outcome.encode_time.as_secs_f64()
        ));
        sink.status(&format!(
            "Runtime decision procedure: {:?}s",
            outcome.solve_time.as_secs_f64()
        ));
    }

    let unsat_core_size = outcome.unsat_core_size;
    let mut result = interpret(equation, view, &outcome, sink);
    result.unsat_core_size = unsat_core_size;
    Ok(result)
}

fn interpret(
    equation: &TargetEquation,
    view: &OptionsView,
    outcome: &BackendOutcome,
    sink: &mut dyn StatusSink,
) -> CycleOutcome {
    match &outcome.verdict {
        Verdict::Unsat => {
            if view.base_case() {
                sink.status("No bug has been found in the base case");
            } else {
                sink.success();
            }
            CycleOutcome { failing: false, unsat_core_size: 0 }
        }
        Verdict::Sat => interpret_sat(equation, view, outcome, sink),
        Verdict::Emitted => CycleOutcome { failing: true, unsat_core_size: 0 },
        Verdict::Error(message) => {
            sink.error(message);
            CycleOutcome { failing: true, unsat_core_size: 0 }
        }
    }
}

fn interpret_sat(
    equation: &TargetEquation,
    view: &OptionsView,
    outcome: &BackendOutcome,
    sink: &mut dyn StatusSink,
) -> CycleOutcome {
    if view.inductive_step() && view.show_counter_example() {
        if let Some(model) = &outcome.model {
            let rendered = trace::build_trace(equation, model, view.llvm_metadata());
            sink.counterexample(&rendered);
        }
        sink.failure();
        return CycleOutcome { failing: false, unsat_core_size: 0 };
    }

    if view.inductive_step() {
        sink.status("The inductive step is unable to prove the property");
        return CycleOutcome { failing: false, unsat_core_size: 0 };
    }

    if view.forward_condition() {
        sink.status("The forward condition is unable to prove the property");
        return CycleOutcome { failing: false, unsat_core_size: 0 };
    }

    if let Some(model) = &outcome.model {
        let rendered = trace::build_trace(equation, model, view.llvm_metadata());
        sink.counterexample(&rendered);
    }
    sink.failure();
    CycleOutcome { failing: true, unsat_core_size: 0 }
}
