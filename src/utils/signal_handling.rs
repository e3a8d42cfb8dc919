//! Cooperative termination: the handler only raises a flag which long running algorithms poll
//! between steps (see [`crate::algorithm::IterativeAlgorithm::run_while`]).

use log::{info, warn};
use std::sync::{
    Once,
    atomic::{AtomicBool, Ordering},
};

static RECEIVED_CTRL_C: AtomicBool = AtomicBool::new(false);
static INIT: Once = Once::new();

/// Installs the Ctrl-C / SIGTERM handler. Calling it more than once is harmless.
pub fn initialize() {
    INIT.call_once(|| {
        if let Err(e) = ctrlc::set_handler(|| {
            info!("Received termination signal; stopping at the next step");
            RECEIVED_CTRL_C.store(true, Ordering::SeqCst);
        }) {
            warn!("Cannot install signal handler: {e}");
        }
    });
}

/// Returns true iff a termination signal was received since [`initialize`] was called
pub fn received_ctrl_c() -> bool {
    RECEIVED_CTRL_C.load(Ordering::SeqCst)
}
