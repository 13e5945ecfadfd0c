//! Process interrupt capture
//!
//! Ctrl-C is recorded into a shared flag rather than killing the process,
//! so the pipeline can stop at the next gate (or mid-poll) and run its
//! cleanup before exiting.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Install the interrupt handler and return the shared flag
///
/// May only be called once per process.
pub fn install() -> anyhow::Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&flag);
    ctrlc::set_handler(move || {
        handler_flag.store(true, Ordering::SeqCst);
    })?;
    Ok(flag)
}
