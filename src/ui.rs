/// Crate `ui` renders status lines and counterexamples (C9). Three render modes, matching the
/// original's plain/`--gui`/`--xml-ui` trio: `Plain` text, `OldGui` fixed-line blocks for the
/// legacy GUI wrapper, and `Xml` a single hand-built `cprover-status` document (no XML crate is
/// worth pulling in for three elements and an attribute).
use crate::trace::GotoTrace;
use std::io::Write;
use tracing::{error, info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiMode {
    Plain,
    OldGui,
    Xml,
}

/// The status/verdict/counterexample sink every component reports through. Every method both
/// writes a UI-mode-specific line to the configured output and emits a `tracing` event, so the
/// same call site feeds a human console and a structured log.
pub trait StatusSink {
    fn status(&mut self, message: &str);
    fn warn(&mut self, message: &str);
    fn error(&mut self, message: &str);
    fn success(&mut self);
    fn failure(&mut self);
    fn counterexample(&mut self, trace: &GotoTrace);
    fn program(&mut self, rendered: &str);
}

/// The sink used outside of tests: writes to an owned `Write` target (normally stdout) in the
/// configured [`UiMode`], and to `tracing` unconditionally.
pub struct ConsoleSink<W> {
    mode: UiMode,
    out: W,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(mode: UiMode, out: W) -> ConsoleSink<W> {
        ConsoleSink { mode, out }
    }
}

impl<W: Write> StatusSink for ConsoleSink<W> {
    fn status(&mut self, message: &str) {
        info!("{}", message);
        let _ = writeln!(self.out, "{}", message);
    }

    fn warn(&mut self, message: &str) {
        warn!("{}", message);
        let _ = writeln!(self.out, "{}", message);
    }

    fn error(&mut self, message: &str) {
        error!("{}", message);
        let _ = writeln!(self.out, "{}", message);
    }

    fn success(&mut self) {
        info!("verification successful");
        match self.mode {
            UiMode::Plain => {
                let _ = writeln!(self.out, "VERIFICATION SUCCESSFUL");
            }
            UiMode::OldGui => {
                let _ = writeln!(self.out, "SUCCESS\n");
            }
            UiMode::Xml => {
                let _ = writeln!(self.out, "<cprover-status status=\"SUCCESS\"/>");
            }
        }
    }

    fn failure(&mut self) {
        info!("verification failed");
        match self.mode {
            UiMode::Plain => {
                let _ = writeln!(self.out, "VERIFICATION FAILED");
            }
            UiMode::OldGui => {
                let _ = writeln!(self.out, "FAILURE\n");
            }
            UiMode::Xml => {
                let _ = writeln!(self.out, "<cprover-status status=\"FAILURE\"/>");
            }
        }
    }

    fn counterexample(&mut self, trace: &GotoTrace) {
        match self.mode {
            UiMode::Plain => {
                let _ = writeln!(self.out, "Counterexample:");
                for step in &trace.steps {
                    let _ = writeln!(
                        self.out,
                        "  {}:{} {} = {}",
                        step.location.file, step.location.line, step.symbol, step.value
                    );
                }
            }
            UiMode::OldGui => {
                for step in &trace.steps {
                    let _ = writeln!(self.out, "State {}", step.symbol);
                    let _ = writeln!(self.out, "{} = {}", step.symbol, step.value);
                    let _ = writeln!(self.out);
                }
            }
            UiMode::Xml => {
                let _ = writeln!(self.out, "<cprover-status status=\"FAILURE\">");
                let _ = writeln!(self.out, "  <goto-trace>");
                for step in &trace.steps {
                    let _ = writeln!(
                        self.out,
                        "    <step symbol=\"{}\" value=\"{}\" file=\"{}\" line=\"{}\"/>",
                        step.symbol, step.value, step.location.file, step.location.line
                    );
                }
                let _ = writeln!(self.out, "  </goto-trace>");
                let _ = writeln!(self.out, "</cprover-status>");
            }
        }
    }

    fn program(&mut self, rendered: &str) {
        let _ = write!(self.out, "{}", rendered);
    }
}
