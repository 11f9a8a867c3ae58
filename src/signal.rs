use log::warn;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Flag raised by Ctrl-C. The menu checks it between operations, so a
/// running import always completes.
#[must_use]
pub fn setup_shutdown_signal() -> Arc<AtomicBool> {
    let shutdown_signal = Arc::new(AtomicBool::new(false));
    let signal_clone = Arc::clone(&shutdown_signal);

    if let Err(e) = ctrlc::set_handler(move || {
        signal_clone.store(true, Ordering::SeqCst);
        eprintln!("\nInterrupt received, exiting after the current operation...");
    }) {
        warn!("Unable to install Ctrl-C handler: {e}");
    }

    shutdown_signal
}
