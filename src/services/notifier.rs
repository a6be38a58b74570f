//! Notification helper: builds auto-dismissing toasts with the configured timings.

use crate::types::settings::NotificationSettings;
use crate::types::view::Toast;

#[derive(Debug, Clone)]
pub struct Notifier {
    fade_after_ms: u64,
    dismiss_after_ms: u64,
}

impl Notifier {
    pub fn new(settings: &NotificationSettings) -> Self {
        Self {
            fade_after_ms: settings.fade_after_ms,
            // A toast cannot disappear before it starts fading.
            dismiss_after_ms: settings.dismiss_after_ms.max(settings.fade_after_ms),
        }
    }

    pub fn toast(&self, message: &str) -> Toast {
        Toast {
            message: message.to_string(),
            fade_after_ms: self.fade_after_ms,
            dismiss_after_ms: self.dismiss_after_ms,
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(&NotificationSettings::default())
    }
}
