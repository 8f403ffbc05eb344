//! Notification adapters.

use tracing::{info, warn};

use crate::domain::Notification;
use crate::domain::ports::Notifier;

/// Writes every notification to the log.
///
/// Destructive notifications log at `warn`, the rest at `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        if notification.is_destructive() {
            warn!(
                title = notification.title(),
                message = notification.message(),
                "notification"
            );
        } else {
            info!(
                title = notification.title(),
                message = notification.message(),
                "notification"
            );
        }
    }
}
