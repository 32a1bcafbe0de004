//! # Domain models for notes
//!
//! Defines the persisted [`Note`] entity and the value types it is built from.
//! Everything here is `Serialize + Deserialize` and matches the JSON layout kept
//! under the notes key:
//!
//! ```json
//! [{"id": "1718000000000", "title": "Groceries", "content": "milk, eggs",
//!   "color": "green", "images": ["data:image/png;base64,..."]}]
//! ```
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`NoteId`] | Opaque, immutable id assigned at creation (millisecond timestamp string). |
//! | [`NoteColor`] | The fixed set of color tags. Unknown persisted values read back as `default`. |
//! | [`ImagePayload`] | An inline `data:` URL holding one image, base64 encoded. |
//! | [`Note`] | The only persisted entity. |
//! | [`NoteForm`] | Title, content and color as typed into the editor dialog. |

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::errors::{NotesError, Result};

/// Opaque note identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Color tag of a note card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteColor {
    Blue,
    Green,
    Yellow,
    Pink,
    Purple,
    /// Also catches unknown persisted values.
    #[default]
    #[serde(other)]
    Default,
}

impl NoteColor {
    pub const ALL: [NoteColor; 6] = [
        NoteColor::Default,
        NoteColor::Blue,
        NoteColor::Green,
        NoteColor::Yellow,
        NoteColor::Pink,
        NoteColor::Purple,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NoteColor::Default => "default",
            NoteColor::Blue => "blue",
            NoteColor::Green => "green",
            NoteColor::Yellow => "yellow",
            NoteColor::Pink => "pink",
            NoteColor::Purple => "purple",
        }
    }

    /// Parse a form value; anything unrecognised is the default tag.
    pub fn from_value(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == value)
            .unwrap_or_default()
    }
}

impl fmt::Display for NoteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An image stored inline as a `data:<mime>;base64,<payload>` URL.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImagePayload(String);

impl ImagePayload {
    /// Encode raw image bytes into a data URL.
    pub fn from_bytes(bytes: &[u8], mime: &str) -> Self {
        Self(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
    }

    /// Wrap an existing data URL without inspecting it.
    pub fn from_data_url(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_data_url(&self) -> &str {
        &self.0
    }

    /// MIME type declared in the URL header, if the URL is well formed.
    pub fn mime_type(&self) -> Option<&str> {
        let (header, _) = self.split()?;
        header.strip_suffix(";base64")
    }

    /// Decode the base64 body back into raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        let (_, body) = self
            .split()
            .ok_or_else(|| NotesError::InvalidImage("not a base64 data URL".to_string()))?;
        STANDARD
            .decode(body)
            .map_err(|e| NotesError::InvalidImage(e.to_string()))
    }

    /// Size of the decoded image in bytes, computed from the base64 length.
    pub fn decoded_len(&self) -> u64 {
        let Some((_, body)) = self.split() else {
            return self.0.len() as u64;
        };
        let padding = body.bytes().rev().take_while(|b| *b == b'=').count();
        ((body.len() / 4) * 3).saturating_sub(padding) as u64
    }

    fn split(&self) -> Option<(&str, &str)> {
        let rest = self.0.strip_prefix("data:")?;
        let (header, body) = rest.split_once(',')?;
        header.ends_with(";base64").then_some((header, body))
    }
}

/// A user-authored note.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub color: NoteColor,
    #[serde(default)]
    pub images: Vec<ImagePayload>,
}

/// Text fields of the editor dialog, untrimmed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoteForm {
    pub title: String,
    pub content: String,
    pub color: NoteColor,
}

impl NoteForm {
    pub fn new(title: impl Into<String>, content: impl Into<String>, color: NoteColor) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_roundtrip() {
        let bytes = vec![0x89, b'P', b'N', b'G', 1, 2, 3];
        let payload = ImagePayload::from_bytes(&bytes, "image/png");

        assert!(payload.as_data_url().starts_with("data:image/png;base64,"));
        assert_eq!(payload.mime_type(), Some("image/png"));
        assert_eq!(payload.decode().unwrap(), bytes);
        assert_eq!(payload.decoded_len(), bytes.len() as u64);
    }

    #[test]
    fn test_decoded_len_matches_for_every_padding() {
        for len in 0..8 {
            let bytes = vec![7u8; len];
            let payload = ImagePayload::from_bytes(&bytes, "image/gif");
            assert_eq!(payload.decoded_len(), len as u64);
        }
    }

    #[test]
    fn test_invalid_payload() {
        let payload = ImagePayload::from_data_url("https://example.com/cat.png");
        assert!(payload.mime_type().is_none());
        assert!(matches!(payload.decode(), Err(NotesError::InvalidImage(_))));
    }

    #[test]
    fn test_note_json_layout() {
        let note = Note {
            id: NoteId::from("1700000000000"),
            title: "Groceries".to_string(),
            content: "milk, eggs".to_string(),
            color: NoteColor::Green,
            images: vec![],
        };
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "1700000000000",
                "title": "Groceries",
                "content": "milk, eggs",
                "color": "green",
                "images": []
            })
        );
    }

    #[test]
    fn test_legacy_note_without_images_and_unknown_color() {
        let note: Note = serde_json::from_str(
            r#"{"id":"1","title":"t","content":"c","color":"orange"}"#,
        )
        .unwrap();
        assert_eq!(note.color, NoteColor::Default);
        assert!(note.images.is_empty());
    }

    #[test]
    fn test_color_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&NoteColor::Default).unwrap(), r#""default""#);
        assert_eq!(serde_json::to_string(&NoteColor::Purple).unwrap(), r#""purple""#);
        let color: NoteColor = serde_json::from_str(r#""default""#).unwrap();
        assert_eq!(color, NoteColor::Default);
    }

    #[test]
    fn test_color_from_value() {
        assert_eq!(NoteColor::from_value("pink"), NoteColor::Pink);
        assert_eq!(NoteColor::from_value("teal"), NoteColor::Default);
    }
}
