//! A bounded model checking driver core: takes a symbolic-execution target equation, slices it,
//! encodes it to a decision procedure, interprets the verdict, and coordinates the exploration
//! strategies (thread-interleaving enumeration, underapproximation-widening refinement, k-induction
//! staging, LTL tri-state checking, DFS checkpoint/resume) layered on top of one VC cycle.
//!
//! The C/C++ front end, the symbolic executor, concrete slicing algorithms, and concrete SMT/SAT
//! solver bindings are external collaborators reached only through the traits in [`collaborators`]
//! and [`solver`]; this crate drives them, it does not implement them.

pub mod checkpoint;
pub mod collaborators;
pub mod equation;
pub mod error;
pub mod explore;
pub mod ltl;
pub mod options;
pub mod signal;
pub mod slicer;
pub mod solver;
pub mod trace;
pub mod ui;
pub mod vc;

pub use checkpoint::DfsPosition;
pub use collaborators::{SliceEngine, SymexEngine};
pub use equation::{Condition, SsaStep, StepKind, Symbol, SymexResult, TargetEquation};
pub use error::CoreError;
pub use explore::{Counters, Driver};
pub use ltl::LtlOutcome;
pub use options::{OptionsView, VerificationOptions};
pub use solver::{BackendOutcome, DecisionProcedure, SolverBackend, Verdict};
pub use ui::{StatusSink, UiMode};
