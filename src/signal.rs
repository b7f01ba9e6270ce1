/// Crate `signal` owns the one piece of process-wide state the core keeps: the checkpoint-request
/// flag set asynchronously by a Unix signal handler and polled at safe points by the exploration
/// loop.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cloneable handle to the flag. Cloning shares the same underlying `AtomicBool`.
#[derive(Clone, Debug, Default)]
pub struct CheckpointFlag(Arc<AtomicBool>);

impl CheckpointFlag {
    pub fn new() -> CheckpointFlag {
        CheckpointFlag(Arc::new(AtomicBool::new(false)))
    }

    /// Reads and clears the flag in one step; the exploration loop calls this once per iteration.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }
}

#[cfg(unix)]
pub fn install_checkpoint_handler() -> std::io::Result<CheckpointFlag> {
    let flag = CheckpointFlag::new();
    signal_hook::flag::register(signal_hook::consts::SIGUSR1, flag.0.clone())?;
    Ok(flag)
}

/// On non-Unix targets there is no signal source; the flag exists but nothing ever sets it.
#[cfg(not(unix))]
pub fn install_checkpoint_handler() -> std::io::Result<CheckpointFlag> {
    Ok(CheckpointFlag::new())
}
