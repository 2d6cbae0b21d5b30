//! Graceful stop for automatic runs.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Flag an automatic run checks at each phase boundary.
///
/// Signal handlers are installed only by [`arm`](Self::arm), so Ctrl-C keeps
/// its default behaviour while the operator is answering prompts.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    flag: Arc<AtomicBool>,
    handle_signals: bool,
}

impl StopSignal {
    /// A stop raised by SIGINT or SIGTERM once armed.
    pub fn from_signals() -> Self {
        Self {
            flag: Arc::default(),
            handle_signals: true,
        }
    }

    /// A stop raised only through [`request`](Self::request).
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_requested(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    pub fn flag(&self) -> &AtomicBool {
        &self.flag
    }

    /// Installs the signal handlers. A second signal exits at once.
    pub fn arm(&self) -> std::io::Result<()> {
        if !self.handle_signals {
            return Ok(());
        }
        #[cfg(unix)]
        {
            use signal_hook::consts::{SIGINT, SIGTERM};
            use signal_hook::flag;

            // Registered first, so it sees the flag as it was before this signal.
            for signal in [SIGINT, SIGTERM] {
                flag::register_conditional_shutdown(signal, 130, Arc::clone(&self.flag))?;
                flag::register(signal, Arc::clone(&self.flag))?;
            }
            tracing::debug!("interrupt handlers installed");
        }
        Ok(())
    }
}
