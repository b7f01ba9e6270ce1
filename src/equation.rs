/// Crate `equation` provides the target equation: an ordered SSA step sequence, and the handles
/// used to slice, encode, and mutate it.
use std::fmt;

/// A symbol (SSA-renamed program variable), e.g. `x!2`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(pub String);

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<S: Into<String>> From<S> for Symbol {
    fn from(s: S) -> Symbol {
        Symbol(s.into())
    }
}

/// An opaque condition expression. The core never interprets the arithmetic inside `text`; it
/// only needs to know which symbols a step reads and (for assignments) which one it writes, so
/// the reference slicer can do backward reachability and the duplicate-assignment check can find
/// collisions.
#[derive(Clone, Debug, Default)]
pub struct Condition {
    pub text: String,
    pub reads: Vec<Symbol>,
    pub writes: Option<Symbol>,
}

impl Condition {
    pub fn new(text: impl Into<String>) -> Condition {
        Condition {
            text: text.into(),
            reads: Vec::new(),
            writes: None,
        }
    }

    pub fn reading(mut self, symbols: impl IntoIterator<Item = Symbol>) -> Condition {
        self.reads.extend(symbols);
        self
    }

    pub fn writing(mut self, symbol: impl Into<Symbol>) -> Condition {
        self.writes = Some(symbol.into());
        self
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Source-location metadata attached to a step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    pub file: String,
    pub line: u32,
}

/// The kind of one SSA step. Mutable on [`SsaStep`]; everything else on the step is not.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepKind {
    Assignment,
    Assume,
    Assert,
    Renumber,
    Output,
    Skip,
}

impl StepKind {
    pub fn is_assert(&self) -> bool {
        matches!(self, StepKind::Assert)
    }
    pub fn is_assume(&self) -> bool {
        matches!(self, StepKind::Assume)
    }
    pub fn is_assignment(&self) -> bool {
        matches!(self, StepKind::Assignment)
    }
    pub fn is_skip(&self) -> bool {
        matches!(self, StepKind::Skip)
    }
}

/// One entry in a target equation.
#[derive(Clone, Debug)]
pub struct SsaStep {
    kind: StepKind,
    pub condition: Condition,
    pub comment: Option<String>,
    pub location: Location,
    /// Which thread interleaving trace produced this step, if the symex collaborator tags one.
    /// `slice_by_trace` keeps only steps tagged with the requested name (untagged steps are
    /// treated as common to every trace and always kept).
    pub thread_trace: Option<String>,
}

impl SsaStep {
    pub fn new(kind: StepKind, condition: Condition) -> SsaStep {
        SsaStep {
            kind,
            condition,
            comment: None,
            location: Location::default(),
            thread_trace: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> SsaStep {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_location(mut self, location: Location) -> SsaStep {
        self.location = location;
        self
    }

    pub fn with_trace(mut self, trace_name: impl Into<String>) -> SsaStep {
        self.thread_trace = Some(trace_name.into());
        self
    }

    pub fn kind(&self) -> StepKind {
        self.kind
    }

    /// Mutates the step's kind. Live per the invariant in the data model: `Skip` → `Assert` is
    /// only legal while no encoding is in flight, which callers enforce by holding exclusive
    /// `&mut TargetEquation` access for the duration of any such transition (e.g. `ltl::MaskGuard`).
    pub fn set_kind(&mut self, kind: StepKind) {
        self.kind = kind;
    }

    pub fn comment_is(&self, tag: &str) -> bool {
        self.comment.as_deref() == Some(tag)
    }
}

/// An ordered SSA step sequence plus claim counts.
#[derive(Clone, Debug, Default)]
pub struct TargetEquation {
    pub steps: Vec<SsaStep>,
    pub total_claims: usize,
    pub remaining_claims: usize,
}

impl TargetEquation {
    pub fn new(steps: Vec<SsaStep>) -> TargetEquation {
        let total_claims = steps.iter().filter(|s| s.kind().is_assert()).count();
        TargetEquation {
            steps,
            total_claims,
            remaining_claims: total_claims,
        }
    }

    /// Recomputes `remaining_claims` from the live (non-`Skip`) assertions. Called after slicing.
    pub fn recount_remaining_claims(&mut self) {
        self.remaining_claims = self
            .steps
            .iter()
            .filter(|s| s.kind().is_assert())
            .count();
    }

    pub fn live_steps(&self) -> impl Iterator<Item = &SsaStep> {
        self.steps.iter().filter(|s| !s.kind().is_skip())
    }
}

/// Pairs an equation with the claim counts symex reported for it.
pub struct SymexResult {
    pub equation: TargetEquation,
    pub total_claims: usize,
    pub remaining_claims: usize,
}

impl SymexResult {
    pub fn new(equation: TargetEquation) -> SymexResult {
        let total_claims = equation.total_claims;
        let remaining_claims = equation.remaining_claims;
        SymexResult {
            equation,
            total_claims,
            remaining_claims,
        }
    }
}
