//! Prints notifications as `[title] message` lines.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::domain::Notification;
use crate::domain::ports::Notifier;
use crate::outbound::notifications::TracingNotifier;

/// Writes each notification to `W` and mirrors it to the log.
#[derive(Debug)]
pub struct TerminalNotifier<W> {
    out: Mutex<W>,
    log: TracingNotifier,
}

impl<W> TerminalNotifier<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            log: TracingNotifier,
        }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W> Notifier for TerminalNotifier<W>
where
    W: Write,
{
    fn notify(&self, notification: &Notification) {
        self.log.notify(notification);
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(error) = writeln!(out, "{notification}") {
            debug!(%error, "notification dropped");
        }
    }
}
