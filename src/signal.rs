//! Run flag and termination signal listeners.
//!
//! The dashboard loop checks a [`RunFlag`] once per iteration. The flag starts
//! out running and is cleared exactly once, by a termination signal (or by an
//! interrupt key read while the terminal is in raw mode). Nothing else about
//! the controller is touched from the signal path.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::signal::unix::{signal, SignalKind};

/// Signals converted into a graceful shutdown request.
const SHUTDOWN_SIGNALS: [(&str, fn() -> SignalKind); 4] = [
    ("SIGTERM", SignalKind::terminate),
    ("SIGINT", SignalKind::interrupt),
    ("SIGHUP", SignalKind::hangup),
    ("SIGQUIT", SignalKind::quit),
];

/// Shared, lock-free flag deciding whether the dashboard loop keeps running.
#[derive(Debug, Clone)]
pub struct RunFlag(Arc<AtomicBool>);

impl RunFlag {
    /// Creates a flag in the running state.
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// Returns `true` until [`RunFlag::stop`] has been called.
    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Requests shutdown. There is no way back to running.
    pub fn stop(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Default for RunFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Installs listeners for SIGTERM, SIGINT, SIGHUP and SIGQUIT that clear `flag`.
///
/// Listeners run as tasks on the tokio runtime of the calling context, which
/// must be a multi-thread runtime: the dashboard loop itself blocks the thread
/// it runs on. Returns `Ok(false)` without installing anything when called
/// outside a runtime.
pub fn install_handlers(flag: &RunFlag) -> io::Result<bool> {
    let Ok(handle) = Handle::try_current() else {
        return Ok(false);
    };

    // Register every stream before spawning so a failure leaves nothing behind.
    let mut streams = Vec::with_capacity(SHUTDOWN_SIGNALS.len());
    for (name, kind) in SHUTDOWN_SIGNALS {
        streams.push((name, signal(kind())?));
    }

    for (name, mut stream) in streams {
        let flag = flag.clone();
        handle.spawn(async move {
            while stream.recv().await.is_some() {
                tracing::info!(signal = name, "signal received, stopping dashboard");
                flag.stop();
            }
        });
    }
    Ok(true)
}
