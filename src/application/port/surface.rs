// SPDX-License-Identifier: MPL-2.0
//! Notification surface port definitions.

use crate::domain::notification::{NotificationId, NotificationRequest};

/// The mount point notifications are rendered into.
///
/// The surface plays the exit transition and reports its completion back
/// to the manager (`exit_transition_ended`); the manager never removes an
/// instance before that report.
pub trait NotificationSurface {
    /// Appends a new instance at the end of the stack.
    fn mount(&mut self, id: NotificationId, request: &NotificationRequest);

    /// Starts the exit transition of a mounted instance.
    fn begin_exit(&mut self, id: NotificationId);

    /// Detaches an instance whose exit transition has completed.
    fn unmount(&mut self, id: NotificationId);
}

/// Anything that accepts notification requests.
///
/// The session glue reports its outcomes through this trait so it does not
/// depend on the concrete manager.
pub trait Notifier {
    /// Submits a request. Returns the new instance id, or `None` when the
    /// request was dropped.
    fn notify(&mut self, request: NotificationRequest) -> Option<NotificationId>;
}
