//! This crate contains all shared UI for Quick Notes.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod platform;
pub use platform::{make_store, PlatformStore};

pub mod views;

mod download;
pub use download::offer_download;

mod timing;

mod notices;
pub use notices::{push_notice, report_error, use_notices, Notice, NoticeLevel, NoticeLog, NoticePanel};

mod theme_toggle;
pub use theme_toggle::{apply_theme, ThemeToggle};

mod note_board;
pub use note_board::{ImageTile, NoteBoard};

mod note_dialog;
pub use note_dialog::NoteDialog;
