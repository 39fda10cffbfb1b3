//! The blocking dialog collaborator. Every rejected operation is reported to
//! the user through [`DialogBackend::alert`] before the typed error is
//! returned; destructive operations gate on [`DialogBackend::confirm`].

/// Synchronous yes/no and informational prompts, as the host UI provides
/// them.
pub trait DialogBackend {
    /// Blocking informational message.
    fn alert(&self, message: &str);

    /// Synchronous yes/no prompt; `true` confirms the action.
    fn confirm(&self, message: &str) -> bool;
}

/// Delivers alerts as desktop notifications.
///
/// A notification cannot collect an answer, so `confirm` declines every
/// request; interactive hosts should implement [`DialogBackend`] over their
/// own dialog stack instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationDialogs;

impl DialogBackend for NotificationDialogs {
    fn alert(&self, message: &str) {
        crate::notification::send(message);
    }

    fn confirm(&self, message: &str) -> bool {
        tracing::warn!(message, "confirm requested without an interactive dialog backend; declining");
        false
    }
}
