//! User-facing notices, kept apart from `tracing` logs.

use dioxus::prelude::*;
use store::NotesError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub timestamp: String,
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct NoticeLog {
    pub entries: Vec<Notice>,
}

pub fn use_notices() -> Signal<NoticeLog> {
    use_context::<Signal<NoticeLog>>()
}

pub fn push_notice(log: &mut Signal<NoticeLog>, level: NoticeLevel, message: impl Into<String>) {
    log.write().entries.push(Notice {
        timestamp: current_time(),
        level,
        message: message.into(),
    });
}

/// Report a failed or partially failed action. Oversize attachments also get
/// a blocking alert in the browser.
pub fn report_error(log: &mut Signal<NoticeLog>, error: &NotesError) {
    let level = match error {
        NotesError::NotFound(id) => {
            tracing::debug!(%id, "action on a missing note ignored");
            return;
        }
        NotesError::Validation(_) | NotesError::StorageUnavailable(_) => NoticeLevel::Warning,
        NotesError::OversizeAttachment { .. } | NotesError::InvalidImage(_) => NoticeLevel::Error,
    };
    if matches!(error, NotesError::OversizeAttachment { .. }) {
        alert(&error.to_string());
    }
    push_notice(log, level, error.to_string());
}

#[cfg(target_arch = "wasm32")]
fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn alert(message: &str) {
    tracing::warn!(message, "alert");
}

#[cfg(target_arch = "wasm32")]
fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    let s = date.get_seconds();
    format!("{h:02}:{m:02}:{s:02}")
}

/// UTC wall-clock time.
#[cfg(not(target_arch = "wasm32"))]
fn current_time() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    clock_time(secs)
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_time(unix_secs: u64) -> String {
    let of_day = unix_secs % 86_400;
    format!("{:02}:{:02}:{:02}", of_day / 3600, of_day % 3600 / 60, of_day % 60)
}

#[component]
pub fn NoticePanel() -> Element {
    let mut log = use_notices();
    let entries = log().entries.clone();

    if entries.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "notice-panel",
            div {
                class: "notice-header",
                span { "Notices" }
                button {
                    onclick: move |_| log.write().entries.clear(),
                    "Dismiss"
                }
            }
            for entry in entries.iter().rev() {
                div {
                    class: match entry.level {
                        NoticeLevel::Error => "notice error",
                        NoticeLevel::Warning => "notice warning",
                        NoticeLevel::Info => "notice info",
                    },
                    span { class: "notice-time", "{entry.timestamp}" }
                    span { " {entry.message}" }
                }
            }
        }
    }
}
