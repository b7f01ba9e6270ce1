/// Crate `slicer` provides the reference [`SliceEngine`] implementation used by the crate's
/// tests and demo binary. The slicing *algorithms* proper are an out-of-scope collaborator; this
/// is a small, honest backward-reachability pass over the `reads`/`writes` symbols a `Condition`
/// carries, not a claim of production-quality slicing.
use crate::collaborators::SliceEngine;
use crate::equation::{StepKind, Symbol, TargetEquation};
use crate::error::CoreError;
use crate::options::OptionsView;
use std::collections::HashSet;

/// A backward-reachability slicer: keeps every live `Assert`/`Assume`, and keeps an `Assignment`
/// iff something reachable from a live `Assert`/`Assume` transitively reads its written symbol.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReferenceSlicer;

impl SliceEngine for ReferenceSlicer {
    fn full_slice(&self, equation: &mut TargetEquation, view: &OptionsView) {
        let mut needed: HashSet<Symbol> = HashSet::new();
        for step in equation.steps.iter_mut().rev() {
            match step.kind() {
                StepKind::Skip => {}
                StepKind::Assert | StepKind::Assume | StepKind::Renumber | StepKind::Output => {
                    needed.extend(step.condition.reads.iter().cloned());
                }
                StepKind::Assignment => {
                    let keep = view.keep_unused()
                        || step
                            .condition
                            .writes
                            .as_ref()
                            .map_or(true, |w| needed.contains(w));
                    if keep {
                        needed.extend(step.condition.reads.iter().cloned());
                    } else {
                        step.set_kind(StepKind::Skip);
                    }
                }
            }
        }
        equation.recount_remaining_claims();
    }

    fn simple_slice(&self, equation: &mut TargetEquation, view: &OptionsView) {
        let mut needed: HashSet<Symbol> = HashSet::new();
        for step in &equation.steps {
            if matches!(step.kind(), StepKind::Assert | StepKind::Assume) {
                needed.extend(step.condition.reads.iter().cloned());
            }
        }
        for step in equation.steps.iter_mut() {
            if step.kind() == StepKind::Assignment {
                let keep = view.keep_unused()
                    || step
                        .condition
                        .writes
                        .as_ref()
                        .map_or(true, |w| needed.contains(w));
                if !keep {
                    step.set_kind(StepKind::Skip);
                }
            }
        }
        equation.recount_remaining_claims();
    }

    fn slice_by_trace(&self, trace_name: &str, equation: &mut TargetEquation, _view: &OptionsView) {
        for step in equation.steps.iter_mut() {
            if let Some(tag) = &step.thread_trace {
                if tag != trace_name {
                    step.set_kind(StepKind::Skip);
                }
            }
        }
        equation.recount_remaining_claims();
    }

    fn check_for_duplicate_assigns(
        &self,
        equation: &TargetEquation,
        _view: &OptionsView,
    ) -> Result<(), CoreError> {
        let mut seen: HashSet<&Symbol> = HashSet::new();
        for step in &equation.steps {
            if step.kind() == StepKind::Assignment {
                if let Some(lhs) = &step.condition.writes {
                    if !seen.insert(lhs) {
                        return Err(CoreError::DuplicateAssignment {
                            lhs: lhs.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
