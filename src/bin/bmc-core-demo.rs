// Smoke-test harness for the bmc-core driver: wires a scripted in-memory `SymexEngine` and a toy
// `DecisionProcedure` to `explore::Driver`. Not a C/C++ front end or a real solver.
use bmc_core::{
    checkpoint::DfsPosition,
    equation::{Condition, SsaStep, StepKind, SymexResult, TargetEquation},
    explore::Driver,
    options::{OptionsView, VerificationOptions},
    signal,
    slicer::ReferenceSlicer,
    solver::{BackendConfig, DecisionProcedure, InProcessSolver, Verdict},
    trace::Model,
    ui::{ConsoleSink, UiMode},
    CoreError, SymexEngine,
};
use std::path::Path;
use structopt::StructOpt;

const RED: &str = "\x1B[001m\x1B[031m";
const GREEN: &str = "\x1B[001m\x1B[032m";
const RESET: &str = "\x1B[000m";

/// A single hand-built "program": `assert(x == 1)` where the toy decision procedure always finds
/// `x == 1` satisfiable, producing a one-assertion counterexample.
struct ToyProgram {
    equation: Option<TargetEquation>,
}

impl ToyProgram {
    fn new() -> ToyProgram {
        let equation = TargetEquation::new(vec![
            SsaStep::new(
                StepKind::Assignment,
                Condition::new("x!1 := 1").writing("x!1"),
            ),
            SsaStep::new(
                StepKind::Assert,
                Condition::new("x!1 == 1").reading(vec!["x!1".into()]),
            ),
        ]);
        ToyProgram {
            equation: Some(equation),
        }
    }
}

impl SymexEngine for ToyProgram {
    fn setup_for_new_explore(&mut self) {}

    fn generate_schedule_formula(&mut self) -> Result<SymexResult, CoreError> {
        Ok(SymexResult::new(self.equation.take().unwrap_or_default()))
    }

    fn get_next_formula(&mut self) -> Result<SymexResult, CoreError> {
        Ok(SymexResult::new(self.equation.take().unwrap_or_default()))
    }

    fn setup_next_formula(&mut self) -> bool {
        false
    }

    fn restore_from_dfs_state(&mut self, _position: &DfsPosition) -> Result<(), CoreError> {
        Ok(())
    }

    fn save_checkpoint(&mut self, _path: &Path) -> Result<(), CoreError> {
        Ok(())
    }
}

/// A toy decision procedure: always reports the program's single assertion satisfiable, with the
/// obvious model. Stands in for a real SMT/SAT binding, which is out of scope for this crate.
struct ToyProcedure {
    model: Model,
}

impl ToyProcedure {
    fn new() -> ToyProcedure {
        ToyProcedure {
            model: Model::new(vec![("x!1".into(), "1".to_string())]),
        }
    }
}

impl DecisionProcedure for ToyProcedure {
    fn encode(&mut self, _equation: &TargetEquation) -> Result<(), CoreError> {
        Ok(())
    }

    fn dec_solve(&mut self) -> Result<Verdict, CoreError> {
        Ok(Verdict::Sat)
    }

    fn clear_cache(&mut self) {}
    fn set_filename(&mut self, _path: &Path) {}
    fn set_core_size(&mut self, _n: usize) {}

    fn get_unsat_core_size(&self) -> usize {
        0
    }

    fn get_number_of_assumptions(&self) -> usize {
        0
    }

    fn model(&self) -> Option<&Model> {
        Some(&self.model)
    }

    fn formula_text(&self) -> String {
        "(assert (= x!1 1))".to_string()
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let opts = VerificationOptions::from_args().override_args();
    let view = OptionsView::new(&opts);

    let mut symex = ToyProgram::new();
    let mut sink = ConsoleSink::new(UiMode::Plain, std::io::stdout());
    let flag = signal::install_checkpoint_handler().unwrap_or_else(|_| signal::CheckpointFlag::new());
    let mut driver = Driver::new();

    let failing = driver
        .run(&mut symex, &ReferenceSlicer, &view, &mut sink, &flag, || {
            Box::new(InProcessSolver::new(ToyProcedure::new(), BackendConfig::default()))
        })
        .unwrap_or_else(|err| {
            eprintln!("{}error:{} {}", RED, RESET, err);
            true
        });

    if failing {
        eprintln!("{}demo run reported a counterexample{}", RED, RESET);
        std::process::exit(1);
    } else {
        println!("{}demo run found no counterexample{}", GREEN, RESET);
    }
}
