//! Driven port for the toast surface.

use crate::domain::Notification;

/// Shows notifications to whoever is using the portal.
///
/// Delivery is fire-and-forget: a notifier that cannot display a message
/// drops it.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    fn notify(&self, notification: &Notification);
}
