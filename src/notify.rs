//! Operator notifications.
//!
//! The pipeline and the menu only see the [`Notifier`] trait; the desktop
//! adapter goes through `notify-rust`.

use std::sync::Once;

/// Ensure macOS notification application is set (once per process).
static MACOS_APP_INIT: Once = Once::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: Option<String>,
    pub kind: NotificationKind,
}

impl Notification {
    /// Shown when a render starts inside the host app.
    pub fn render_starting() -> Self {
        Self {
            title: "稍等片刻".to_string(),
            body: Some("小部件渲染中...".to_string()),
            kind: NotificationKind::Info,
        }
    }

    /// Shown when the usage fetch fails upstream.
    pub fn fetch_failed(detail: &str) -> Self {
        Self {
            title: "failed to retrieve account info".to_string(),
            body: Some(format!("check network or re-authenticate ({})", detail)),
            kind: NotificationKind::Failure,
        }
    }

    pub fn success(title: &str) -> Self {
        Self {
            title: title.to_string(),
            body: None,
            kind: NotificationKind::Success,
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// OS-native notifications. Failures to display are logged and dropped.
pub struct DesktopNotifier;

fn ensure_notifications_initialized() {
    MACOS_APP_INIT.call_once(|| {
        #[cfg(target_os = "macos")]
        {
            if let Err(e) = notify_rust::set_application("com.apple.Terminal") {
                tracing::warn!("Failed to set notification application: {}", e);
            }
        }
    });
}

impl Notifier for DesktopNotifier {
    fn notify(&self, notification: &Notification) {
        ensure_notifications_initialized();

        let timeout = match notification.kind {
            NotificationKind::Failure => notify_rust::Timeout::Never,
            _ => notify_rust::Timeout::Milliseconds(5000),
        };

        let mut desktop = notify_rust::Notification::new();
        desktop
            .appname("unicom-usage")
            .summary(&notification.title)
            .timeout(timeout);
        if let Some(body) = &notification.body {
            desktop.body(body);
        }

        // Urgency only exists for freedesktop notifications
        #[cfg(target_os = "linux")]
        {
            let urgency = if notification.kind == NotificationKind::Failure {
                notify_rust::Urgency::Critical
            } else {
                notify_rust::Urgency::Normal
            };
            desktop.urgency(urgency);
        }

        if let Err(e) = desktop.show() {
            tracing::warn!("Could not send notification: {}", e);
        }
    }
}

/// Collects notifications in memory.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: std::sync::Mutex<Vec<Notification>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn taken(&self) -> Vec<Notification> {
        self.sent.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(notification.clone());
        }
    }
}
