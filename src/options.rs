/// Crate `options` provides the driver's configuration and CLI, and a read-only view over it.
use std::path::PathBuf;
use structopt::StructOpt;

/// Core version number.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Verification options parsed from the command line.
///
/// One field per recognized flag from the specification; mirrors the way the teacher's
/// `Config` groups CLI switches by section.
#[derive(Clone, Debug, StructOpt)]
#[structopt(name = "bmc-core", about, author)]
pub struct VerificationOptions {
    //
    //## scheduling / exploration
    //
    /// Run in single-equation scheduler mode
    #[structopt(long = "schedule")]
    pub schedule: bool,

    /// Enable underapproximation-widening refinement
    #[structopt(long = "uw-model")]
    pub uw_model: bool,

    /// Do not stop on first counterexample
    #[structopt(long = "all-runs")]
    pub all_runs: bool,

    /// Run at most one interleaving per invocation
    #[structopt(long = "interactive-ileaves")]
    pub interactive_ileaves: bool,

    //
    //## checkpointing
    //
    /// Restore DFS position from `checkpoint-file` before the first run
    #[structopt(long = "from-checkpoint")]
    pub from_checkpoint: bool,

    /// Checkpoint file path; default pattern is `esbmc_checkpoint.<pid>` when empty
    #[structopt(long = "checkpoint-file", default_value = "", parse(from_os_str))]
    pub checkpoint_file: PathBuf,

    /// Persist DFS position when a counterexample is found
    #[structopt(long = "checkpoint-on-cex")]
    pub checkpoint_on_cex: bool,

    //
    //## k-induction
    //
    #[structopt(long = "k-induction")]
    pub k_induction: bool,

    #[structopt(long = "base-case")]
    pub base_case: bool,

    #[structopt(long = "forward-condition")]
    pub forward_condition: bool,

    #[structopt(long = "inductive-step")]
    pub inductive_step: bool,

    /// Print a counterexample even when `inductive-step` would normally suppress it
    #[structopt(long = "show-counter-example")]
    pub show_counter_example: bool,

    //
    //## LTL
    //
    #[structopt(long = "ltl")]
    pub ltl: bool,

    //
    //## slicing
    //
    #[structopt(long = "no-slice")]
    pub no_slice: bool,

    /// Restrict the equation to steps causally relevant to this trace name
    #[structopt(long = "slice-by-trace", default_value = "")]
    pub slice_by_trace: String,

    /// Reject equations with two SSA steps assigning the same LHS
    #[structopt(long = "double-assign-check")]
    pub double_assign_check: bool,

    /// Retain unreferenced symbols during slicing
    #[structopt(long = "keep-unused")]
    pub keep_unused: bool,

    //
    //## artifact emission
    //
    #[structopt(long = "program-only")]
    pub program_only: bool,

    #[structopt(long = "program-too")]
    pub program_too: bool,

    #[structopt(long = "show-vcc")]
    pub show_vcc: bool,

    #[structopt(long = "document-subgoals")]
    pub document_subgoals: bool,

    //
    //## encoding / solver routing
    //
    /// Use integer/real arithmetic rather than bit-vectors
    #[structopt(long = "int-encoding")]
    pub int_encoding: bool,

    #[structopt(long = "bl-bv")]
    pub bl_bv: bool,

    #[structopt(long = "z3-bv")]
    pub z3_bv: bool,

    /// Route the encoded formula to a text file instead of solving in-process
    #[structopt(long = "smt")]
    pub smt: bool,

    #[structopt(long = "btor")]
    pub btor: bool,

    /// Only emit the formula for this interleaving number (parsed leniently; malformed or absent
    /// values mean "no interleaving matches", matching the observed original behavior)
    #[structopt(long = "smtlib-ileave-num", default_value = "")]
    pub smtlib_ileave_num: String,

    #[structopt(long = "outfile", default_value = "", parse(from_os_str))]
    pub outfile: PathBuf,

    /// Maximum unsat-core size requested from the backend
    #[structopt(long = "core-size", default_value = "0")]
    pub core_size: usize,

    //
    //## misc / passthrough
    //
    /// Verbosity threshold for `print(n, ...)`-style diagnostics
    #[structopt(long = "verbosity", short = "v", default_value = "0")]
    pub verbosity: u8,

    /// Unwind bound, forwarded opaquely to the symex collaborator
    #[structopt(long = "unwind")]
    pub unwind: Option<u64>,

    /// Counterexample metadata filename, forwarded to the trace reconstructor
    #[structopt(long = "llvm-metadata", default_value = "")]
    pub llvm_metadata: String,
}

impl Default for VerificationOptions {
    fn default() -> VerificationOptions {
        VerificationOptions {
            schedule: false,
            uw_model: false,
            all_runs: false,
            interactive_ileaves: false,
            from_checkpoint: false,
            checkpoint_file: PathBuf::new(),
            checkpoint_on_cex: false,
            k_induction: false,
            base_case: false,
            forward_condition: false,
            inductive_step: false,
            show_counter_example: false,
            ltl: false,
            no_slice: false,
            slice_by_trace: String::new(),
            double_assign_check: false,
            keep_unused: false,
            program_only: false,
            program_too: false,
            show_vcc: false,
            document_subgoals: false,
            int_encoding: false,
            bl_bv: false,
            z3_bv: false,
            smt: false,
            btor: false,
            smtlib_ileave_num: String::new(),
            outfile: PathBuf::new(),
            core_size: 0,
            verbosity: 0,
            unwind: None,
            llvm_metadata: String::new(),
        }
    }
}

impl VerificationOptions {
    /// Seam for post-parse normalization, mirroring `splr::config::Config::override_args`.
    #[allow(unused_mut)]
    pub fn override_args(mut self) -> VerificationOptions {
        self
    }
}

/// Read-only typed view over [`VerificationOptions`]. Every other component receives this
/// instead of the options struct itself, so there is no hidden global configuration singleton.
#[derive(Clone, Copy)]
pub struct OptionsView<'a> {
    opts: &'a VerificationOptions,
}

impl<'a> OptionsView<'a> {
    pub fn new(opts: &'a VerificationOptions) -> OptionsView<'a> {
        OptionsView { opts }
    }

    pub fn schedule(&self) -> bool {
        self.opts.schedule
    }
    pub fn uw_model(&self) -> bool {
        self.opts.uw_model
    }
    pub fn all_runs(&self) -> bool {
        self.opts.all_runs
    }
    pub fn interactive_ileaves(&self) -> bool {
        self.opts.interactive_ileaves
    }
    pub fn from_checkpoint(&self) -> bool {
        self.opts.from_checkpoint
    }
    pub fn checkpoint_file(&self) -> &std::path::Path {
        &self.opts.checkpoint_file
    }
    pub fn checkpoint_on_cex(&self) -> bool {
        self.opts.checkpoint_on_cex
    }
    pub fn k_induction(&self) -> bool {
        self.opts.k_induction
    }
    pub fn base_case(&self) -> bool {
        self.opts.base_case
    }
    pub fn forward_condition(&self) -> bool {
        self.opts.forward_condition
    }
    pub fn inductive_step(&self) -> bool {
        self.opts.inductive_step
    }
    pub fn show_counter_example(&self) -> bool {
        self.opts.show_counter_example
    }
    pub fn ltl(&self) -> bool {
        self.opts.ltl
    }
    pub fn no_slice(&self) -> bool {
        self.opts.no_slice
    }
    pub fn slice_by_trace(&self) -> Option<&str> {
        if self.opts.slice_by_trace.is_empty() {
            None
        } else {
            Some(&self.opts.slice_by_trace)
        }
    }
    pub fn double_assign_check(&self) -> bool {
        self.opts.double_assign_check
    }
    pub fn keep_unused(&self) -> bool {
        self.opts.keep_unused
    }
    pub fn program_only(&self) -> bool {
        self.opts.program_only
    }
    pub fn program_too(&self) -> bool {
        self.opts.program_too
    }
    pub fn show_vcc(&self) -> bool {
        self.opts.show_vcc
    }
    pub fn document_subgoals(&self) -> bool {
        self.opts.document_subgoals
    }
    pub fn int_encoding(&self) -> bool {
        self.opts.int_encoding
    }
    pub fn bl_bv(&self) -> bool {
        self.opts.bl_bv
    }
    pub fn z3_bv(&self) -> bool {
        self.opts.z3_bv
    }
    pub fn smt(&self) -> bool {
        self.opts.smt
    }
    pub fn btor(&self) -> bool {
        self.opts.btor
    }
    pub fn smtlib_ileave_num(&self) -> &str {
        &self.opts.smtlib_ileave_num
    }
    pub fn outfile(&self) -> &std::path::Path {
        &self.opts.outfile
    }
    pub fn core_size(&self) -> usize {
        self.opts.core_size
    }
    pub fn verbosity(&self) -> u8 {
        self.opts.verbosity
    }
    pub fn unwind(&self) -> Option<u64> {
        self.opts.unwind
    }
    pub fn llvm_metadata(&self) -> Option<&str> {
        if self.opts.llvm_metadata.is_empty() {
            None
        } else {
            Some(&self.opts.llvm_metadata)
        }
    }

    /// `true` when the logic-selection label should say "integer/real arithmetic" rather than
    /// "bit-vector arithmetic" — does not change solver behavior, only messaging.
    pub fn uses_integer_logic(&self) -> bool {
        !(self.opts.bl_bv || self.opts.z3_bv) && self.opts.int_encoding
    }
}
