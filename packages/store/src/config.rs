//! # Application configuration — `quicknotes.toml`
//!
//! The web binary embeds a `quicknotes.toml` and parses it at startup with
//! [`QuickNotesConfig::from_toml`]. Every section and field has a default, so a
//! missing or partial file is equivalent to the default configuration.
//!
//! ## Structure
//!
//! ```toml
//! [storage]
//! notes_key = "quickNotes"   # localStorage key holding the notes JSON array
//! theme_key = "theme"        # localStorage key holding "light" / "dark"
//!
//! [attachments]
//! max_images = 5
//! max_image_bytes = 2097152  # 2 MiB
//!
//! [export]
//! max_images = 3             # images beyond this are left out of the PDF
//! image_width_mm = 180.0
//!
//! [ui]
//! animation_ms = 300
//! log_level = "info"
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`QuickNotesConfig`] | Top-level config, TOML (de)serialisation and the canonical filename. |
//! | [`StorageConfig`] | Storage keys for notes and theme. |
//! | [`AttachmentLimits`] | Image count cap and per-image size ceiling. |
//! | [`ExportConfig`] | PDF page geometry, fonts and image placement. |
//! | [`UiConfig`] | Animation timing and log level. |

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `quicknotes.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QuickNotesConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub attachments: AttachmentLimits,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub notes_key: String,
    pub theme_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            notes_key: "quickNotes".to_string(),
            theme_key: "theme".to_string(),
        }
    }
}

/// Limits applied when staging images for a note.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentLimits {
    pub max_images: usize,
    pub max_image_bytes: u64,
}

impl Default for AttachmentLimits {
    fn default() -> Self {
        Self {
            max_images: 5,
            max_image_bytes: 2 * 1024 * 1024,
        }
    }
}

/// PDF export geometry. Lengths are millimetres, font sizes points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub max_images: usize,
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub text_width_mm: f32,
    pub image_width_mm: f32,
    pub spacing_mm: f32,
    pub title_font_size: f32,
    pub body_font_size: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            max_images: 3,
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 10.0,
            text_width_mm: 180.0,
            image_width_mm: 180.0,
            spacing_mm: 10.0,
            title_font_size: 20.0,
            body_font_size: 12.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Duration of dialog and card enter/exit animations.
    pub animation_ms: u32,
    /// `tracing` level name: "trace", "debug", "info", "warn" or "error".
    pub log_level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            animation_ms: 300,
            log_level: "info".to_string(),
        }
    }
}

impl QuickNotesConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "quicknotes.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Builder method to change the attachment limits.
    pub fn with_attachments(mut self, limits: AttachmentLimits) -> Self {
        self.attachments = limits;
        self
    }
}
