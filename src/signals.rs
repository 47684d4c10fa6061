use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Installs a ctrl-c handler and returns the flag it raises. The flag is the
/// cancellation signal the solvers poll between frontier pops.
pub fn initialize() -> Arc<AtomicBool> {
    let flag = Arc::new(AtomicBool::new(false));
    let handle = flag.clone();
    ctrlc::set_handler(move || {
        handle.store(true, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");
    flag
}
