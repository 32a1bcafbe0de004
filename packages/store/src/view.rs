//! Presentation projection.
//!
//! Turns repository and editor state into plain view structs that the Dioxus
//! components draw. Every interactive element carries the [`NoteAction`] it
//! triggers, so components stay free of behavior.

use crate::actions::NoteAction;
use crate::models::{Note, NoteColor, NoteId};
use crate::staging::StagingBuffer;

/// Stagger between successive cards' entry animations.
pub const CARD_ANIMATION_STAGGER_MS: u64 = 100;

#[derive(Clone, Debug, PartialEq)]
pub struct NoteCardView {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub color: NoteColor,
    /// DOM id of the card element.
    pub dom_id: String,
    pub images: Vec<ImageTileView>,
    pub edit: NoteAction,
    pub delete: NoteAction,
    pub export: NoteAction,
    pub animation_delay_ms: u64,
}

impl NoteCardView {
    pub fn class(&self) -> String {
        format!("note-card {}", self.color.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImageTileView {
    pub src: String,
    pub alt: String,
    pub remove: NoteAction,
}

pub fn render_notes(notes: &[Note]) -> Vec<NoteCardView> {
    notes
        .iter()
        .enumerate()
        .map(|(position, note)| NoteCardView {
            id: note.id.clone(),
            title: note.title.clone(),
            content: note.content.clone(),
            color: note.color,
            dom_id: format!("note-{}", note.id),
            images: note
                .images
                .iter()
                .enumerate()
                .map(|(index, image)| ImageTileView {
                    src: image.as_data_url().to_string(),
                    alt: format!("Note image {}", index + 1),
                    remove: NoteAction::RemoveImage {
                        note: note.id.clone(),
                        index,
                    },
                })
                .collect(),
            edit: NoteAction::Edit(note.id.clone()),
            delete: NoteAction::Delete(note.id.clone()),
            export: NoteAction::ExportPdf(note.id.clone()),
            animation_delay_ms: position as u64 * CARD_ANIMATION_STAGGER_MS,
        })
        .collect()
}

/// Pending-attachment previews shown inside the editor dialog.
pub fn render_previews(staging: &StagingBuffer) -> Vec<ImageTileView> {
    staging
        .images()
        .iter()
        .enumerate()
        .map(|(index, staged)| ImageTileView {
            src: staged.payload().as_data_url().to_string(),
            alt: "Preview".to_string(),
            remove: NoteAction::RemoveStagedImage(index),
        })
        .collect()
}
