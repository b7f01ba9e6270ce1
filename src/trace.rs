/// Crate `trace` reconstructs a concrete counterexample from a SAT model: the trace
/// reconstructor (C5). The model itself is owned by whatever `DecisionProcedure` produced it; this
/// module only knows how to walk it into an ordered, renderable step sequence.
use crate::equation::{Location, Symbol};

/// A SAT model: an assignment of concrete values to symbols, as produced by a decision procedure.
/// The crate treats values as opaque display strings — it never interprets or type-checks them,
/// mirroring the original's `get_symbol_value` stringification.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Model {
    pub assignments: Vec<(Symbol, String)>,
}

impl Model {
    pub fn new(assignments: Vec<(Symbol, String)>) -> Model {
        Model { assignments }
    }

    pub fn value_of(&self, symbol: &Symbol) -> Option<&str> {
        self.assignments
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, v)| v.as_str())
    }
}

/// One step of a reconstructed counterexample.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceStep {
    pub location: Location,
    pub symbol: Symbol,
    pub value: String,
}

/// A full counterexample: an ordered step sequence plus the counterexample metadata filename, if
/// one was configured (`OptionsView::llvm_metadata`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GotoTrace {
    pub steps: Vec<TraceStep>,
    pub metadata_filename: Option<String>,
}

/// Walks `equation`'s live assignment steps in order, pulling each assigned symbol's concrete
/// value out of `model`. Steps whose written symbol has no model entry are skipped — the decision
/// procedure did not need to constrain them to satisfy the formula.
pub fn build_trace(
    equation: &crate::equation::TargetEquation,
    model: &Model,
    metadata_filename: Option<&str>,
) -> GotoTrace {
    let mut steps = Vec::new();
    for step in equation.live_steps() {
        if !step.kind().is_assignment() {
            continue;
        }
        if let Some(symbol) = &step.condition.writes {
            if let Some(value) = model.value_of(symbol) {
                steps.push(TraceStep {
                    location: step.location.clone(),
                    symbol: symbol.clone(),
                    value: value.to_string(),
                });
            }
        }
    }
    GotoTrace {
        steps,
        metadata_filename: metadata_filename.map(|s| s.to_string()),
    }
}
