//! Rendering of the outbound alert message.

use chrono::{DateTime, Utc};

use hg_core::entities::Alert;

/// Render the message body sent over SMS and WhatsApp.
///
/// `sent_at` is shown in UTC as `M/D/YYYY, h:mm:ss AM`.
#[must_use]
pub fn render_alert_message(alert: &Alert, signature: &str, sent_at: DateTime<Utc>) -> String {
    format!(
        "🚨 HEALTH ALERT 🚨\n\n{title}\n\n{message}\n\nLocation: {location}\nSeverity: {severity}\nTime: {time}\n\n- {signature}",
        title = alert.title,
        message = alert.message,
        location = alert.location,
        severity = alert.severity.as_str().to_uppercase(),
        time = sent_at.format("%-m/%-d/%Y, %-I:%M:%S %p"),
    )
}
