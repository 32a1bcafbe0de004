//! # Note repository — the in-memory collection
//!
//! [`NoteRepository`] owns the ordered list of notes (newest first) and is the
//! only place notes are mutated. Persisting is the caller's job: after every
//! successful mutation the session flushes [`NoteRepository::list`] through
//! [`crate::NoteStore::save`].
//!
//! ## Operations
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`create`](NoteRepository::create) | Validates, assigns a fresh id, prepends. |
//! | [`update`](NoteRepository::update) | Replaces fields in place and merges images (see below). |
//! | [`delete`](NoteRepository::delete) | Idempotent removal; `false` when nothing matched. |
//! | [`remove_image`](NoteRepository::remove_image) | Drops one image by position; no-op when absent. |
//! | [`list`](NoteRepository::list) / [`find`](NoteRepository::find) | Read access. |
//!
//! ## Image merge on update
//!
//! The final image list is every [`StagedImage::Persisted`] entry that is still
//! staged, in the note's original order and at most once each, followed by the
//! [`StagedImage::Fresh`] entries in staging order. Persisted entries are matched
//! by original index, so two identical pictures are never confused.
//!
//! ## Ids
//!
//! Ids are the current time in milliseconds. [`current_timestamp_millis`] uses
//! `js_sys::Date::now()` on WASM and `std::time::SystemTime` on native. When a
//! timestamp is already taken (two notes in the same millisecond) it is bumped
//! until it is free.

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, warn};

use crate::config::AttachmentLimits;
use crate::errors::{NotesError, Result, ValidationError};
use crate::models::{ImagePayload, Note, NoteForm, NoteId};
use crate::staging::StagedImage;

#[derive(Clone, Debug, PartialEq)]
pub struct NoteRepository {
    notes: Vec<Note>,
    limits: AttachmentLimits,
}

impl NoteRepository {
    pub fn new(limits: AttachmentLimits) -> Self {
        Self {
            notes: Vec::new(),
            limits,
        }
    }

    /// Build a repository from loaded notes, repairing what breaks the
    /// collection invariants: later duplicates of an id are dropped and image
    /// lists are cut to the configured maximum.
    pub fn from_notes(notes: Vec<Note>, limits: AttachmentLimits) -> Self {
        let mut seen = HashSet::new();
        let notes = notes
            .into_iter()
            .filter(|note| {
                let fresh = seen.insert(note.id.clone());
                if !fresh {
                    warn!(id = %note.id, "dropping note with duplicate id");
                }
                fresh
            })
            .map(|mut note| {
                if note.images.len() > limits.max_images {
                    warn!(id = %note.id, count = note.images.len(), "truncating image list");
                    note.images.truncate(limits.max_images);
                }
                note
            })
            .collect();
        Self { notes, limits }
    }

    pub fn limits(&self) -> AttachmentLimits {
        self.limits
    }

    /// Newest-first snapshot of the collection.
    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn find(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| &note.id == id)
    }

    /// Create a note from the form and staged images and put it first.
    pub fn create(&mut self, form: &NoteForm, images: Vec<ImagePayload>) -> Result<Note> {
        let (title, content) = validate_form(form)?;
        self.validate_images(&images)?;

        let note = Note {
            id: self.next_id(),
            title,
            content,
            color: form.color,
            images,
        };
        debug!(id = %note.id, "created note");
        self.notes.insert(0, note.clone());
        Ok(note)
    }

    /// Replace the editable fields of note `id`, keeping its position.
    pub fn update(&mut self, id: &NoteId, form: &NoteForm, staged: Vec<StagedImage>) -> Result<Note> {
        let position = self
            .notes
            .iter()
            .position(|note| &note.id == id)
            .ok_or_else(|| NotesError::NotFound(id.clone()))?;
        let (title, content) = validate_form(form)?;
        let images = merge_images(&self.notes[position].images, staged);
        self.validate_images(&images)?;

        let note = &mut self.notes[position];
        note.title = title;
        note.content = content;
        note.color = form.color;
        note.images = images;
        debug!(id = %note.id, "updated note");
        Ok(note.clone())
    }

    /// Remove note `id`. Deleting an absent id does nothing and returns `false`.
    pub fn delete(&mut self, id: &NoteId) -> bool {
        let before = self.notes.len();
        self.notes.retain(|note| &note.id != id);
        let removed = self.notes.len() != before;
        if !removed {
            debug!(id = %id, "delete of unknown note ignored");
        }
        removed
    }

    /// Remove the image at `index` from note `id`. Returns `false` when either
    /// the note or the image does not exist.
    pub fn remove_image(&mut self, id: &NoteId, index: usize) -> bool {
        let Some(note) = self.notes.iter_mut().find(|note| &note.id == id) else {
            debug!(id = %id, "image removal on unknown note ignored");
            return false;
        };
        if index >= note.images.len() {
            return false;
        }
        note.images.remove(index);
        true
    }

    fn validate_images(&self, images: &[ImagePayload]) -> Result<()> {
        if images.len() > self.limits.max_images {
            return Err(ValidationError::TooManyImages {
                max: self.limits.max_images,
            }
            .into());
        }
        if let Some((position, image)) = images
            .iter()
            .enumerate()
            .find(|(_, image)| image.decoded_len() > self.limits.max_image_bytes)
        {
            return Err(NotesError::OversizeAttachment {
                name: format!("image {}", position + 1),
                size: image.decoded_len(),
                limit: self.limits.max_image_bytes,
            });
        }
        Ok(())
    }

    fn next_id(&self) -> NoteId {
        let taken: HashSet<&str> = self.notes.iter().map(|note| note.id.as_str()).collect();
        let mut stamp = current_timestamp_millis();
        loop {
            let candidate = stamp.to_string();
            if !taken.contains(candidate.as_str()) {
                return NoteId::from(candidate);
            }
            stamp += 1;
        }
    }
}

fn validate_form(form: &NoteForm) -> Result<(String, String)> {
    let title = form.title.trim();
    let content = form.content.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle.into());
    }
    if content.is_empty() {
        return Err(ValidationError::EmptyContent.into());
    }
    Ok((title.to_string(), content.to_string()))
}

fn merge_images(existing: &[ImagePayload], staged: Vec<StagedImage>) -> Vec<ImagePayload> {
    let mut kept = BTreeSet::new();
    let mut fresh = Vec::new();
    for image in staged {
        match image {
            StagedImage::Persisted { index, .. } if index < existing.len() => {
                kept.insert(index);
            }
            StagedImage::Persisted { index, .. } => {
                warn!(index, "staged image refers to a missing position");
            }
            StagedImage::Fresh(payload) => fresh.push(payload),
        }
    }
    kept.into_iter()
        .map(|index| existing[index].clone())
        .chain(fresh)
        .collect()
}

/// Milliseconds since the Unix epoch.
#[cfg(target_arch = "wasm32")]
pub fn current_timestamp_millis() -> u64 {
    js_sys::Date::now() as u64
}

/// Milliseconds since the Unix epoch.
#[cfg(not(target_arch = "wasm32"))]
pub fn current_timestamp_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
