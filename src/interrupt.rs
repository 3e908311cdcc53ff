//! Process-wide cooperative cancellation.
//!
//! A SIGINT/SIGTERM handler stores into a static atomic; blocking work polls
//! [`requested`] at natural suspension points (before a request, inside the
//! download read loop) and unwinds with `BinError::Interrupted`.

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

extern "C" fn handler(_sig: i32) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Registers SIGINT and SIGTERM handlers that raise the cancellation flag.
pub fn install_signal_handlers() -> Result<()> {
    use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};

    let action = SigAction::new(SigHandler::Handler(handler), SaFlags::empty(), SigSet::empty());
    for sig in [Signal::SIGINT, Signal::SIGTERM] {
        unsafe { signal::sigaction(sig, &action) }
            .map_err(|e| anyhow::anyhow!("failed to register {sig:?} handler: {e}"))?;
    }
    Ok(())
}

/// True once cancellation has been requested.
pub fn requested() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Raises the cancellation flag, as the signal handler would.
pub fn request() {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Lowers the flag again. Used by tests; the CLI never resumes after a signal.
pub fn clear() {
    INTERRUPTED.store(false, Ordering::SeqCst);
}
