//! # Image staging buffer
//!
//! Holds the images attached to the note currently open in the editor. The
//! buffer lives exactly as long as one editor session and is cleared when the
//! dialog closes, whether by submit or cancel.
//!
//! Entries remember where they came from: [`StagedImage::Persisted`] entries
//! were seeded from the note being edited and carry their original position,
//! [`StagedImage::Fresh`] entries were read from files picked in this session.
//! [`crate::NoteRepository::update`] uses that tag to merge images without
//! comparing payloads.
//!
//! ## Attachment policy
//!
//! - A file larger than [`AttachmentLimits::max_image_bytes`] is rejected with
//!   [`NotesError::OversizeAttachment`] and the buffer is left untouched.
//! - A batch only gets `max(0, max_images - len)` slots, counted before any file
//!   is inspected. Files past that point are ignored, not queued.

use tracing::debug;

use crate::config::AttachmentLimits;
use crate::errors::NotesError;
use crate::models::{ImagePayload, Note};

/// A file picked by the user, already read into memory.
#[derive(Clone, Debug, PartialEq)]
pub struct IncomingFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl IncomingFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StagedImage {
    /// Already part of the edited note, at `index` in its image list.
    Persisted { index: usize, payload: ImagePayload },
    /// Read during this editor session.
    Fresh(ImagePayload),
}

impl StagedImage {
    pub fn payload(&self) -> &ImagePayload {
        match self {
            StagedImage::Persisted { payload, .. } | StagedImage::Fresh(payload) => payload,
        }
    }
}

/// What happened to one batch of picked files.
#[derive(Debug, Default, PartialEq)]
pub struct BatchOutcome {
    pub accepted: usize,
    pub ignored: usize,
    pub rejected: Vec<NotesError>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StagingBuffer {
    images: Vec<StagedImage>,
    limits: AttachmentLimits,
}

impl StagingBuffer {
    pub fn new(limits: AttachmentLimits) -> Self {
        Self {
            images: Vec::new(),
            limits,
        }
    }

    pub fn images(&self) -> &[StagedImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn remaining_capacity(&self) -> usize {
        self.limits.max_images.saturating_sub(self.images.len())
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }

    /// Replace the contents with `note`'s images, in order.
    pub fn seed_from(&mut self, note: &Note) {
        self.images = note
            .images
            .iter()
            .cloned()
            .enumerate()
            .map(|(index, payload)| StagedImage::Persisted { index, payload })
            .collect();
    }

    /// Stage one file. Returns `Ok(false)` when the buffer is already full.
    pub fn accept(&mut self, file: IncomingFile) -> Result<bool, NotesError> {
        if self.remaining_capacity() == 0 {
            debug!(name = %file.name, "staging buffer full, ignoring file");
            return Ok(false);
        }
        let payload = self.encode(file)?;
        self.images.push(StagedImage::Fresh(payload));
        Ok(true)
    }

    /// Stage a batch of files under the per-batch cap.
    pub fn accept_batch(&mut self, files: Vec<IncomingFile>) -> BatchOutcome {
        let slots = self.remaining_capacity();
        let mut outcome = BatchOutcome {
            ignored: files.len().saturating_sub(slots),
            ..BatchOutcome::default()
        };
        for file in files.into_iter().take(slots) {
            match self.encode(file) {
                Ok(payload) => {
                    self.images.push(StagedImage::Fresh(payload));
                    outcome.accepted += 1;
                }
                Err(e) => outcome.rejected.push(e),
            }
        }
        outcome
    }

    /// Remove the entry at `index`, if present.
    pub fn remove(&mut self, index: usize) -> Option<StagedImage> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }

    /// Hand the staged images over, leaving the buffer empty.
    pub fn take(&mut self) -> Vec<StagedImage> {
        std::mem::take(&mut self.images)
    }

    fn encode(&self, file: IncomingFile) -> Result<ImagePayload, NotesError> {
        if file.size() > self.limits.max_image_bytes {
            return Err(NotesError::OversizeAttachment {
                size: file.size(),
                name: file.name,
                limit: self.limits.max_image_bytes,
            });
        }
        Ok(ImagePayload::from_bytes(&file.bytes, sniff_mime(&file.bytes)))
    }
}

/// Guess an image MIME type from the leading bytes.
pub fn sniff_mime(bytes: &[u8]) -> &'static str {
    const SIGNATURES: &[(&[u8], &str)] = &[
        (b"\x89PNG\r\n\x1a\n", "image/png"),
        (b"\xff\xd8\xff", "image/jpeg"),
        (b"GIF87a", "image/gif"),
        (b"GIF89a", "image/gif"),
        (b"BM", "image/bmp"),
    ];
    if let Some((_, mime)) = SIGNATURES.iter().find(|(sig, _)| bytes.starts_with(sig)) {
        return *mime;
    }
    if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return "image/webp";
    }
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(256)]);
    let head = head.trim_start();
    if head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg")) {
        return "image/svg+xml";
    }
    "application/octet-stream"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NoteColor, NoteId};

    const MIB: usize = 1024 * 1024;

    fn png(len: usize) -> Vec<u8> {
        let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
        bytes.resize(len.max(8), 0);
        bytes
    }

    fn buffer() -> StagingBuffer {
        StagingBuffer::new(AttachmentLimits::default())
    }

    #[test]
    fn test_accept_encodes_data_url() {
        let mut staging = buffer();
        assert!(staging.accept(IncomingFile::new("a.png", png(16))).unwrap());

        let payload = staging.images()[0].payload();
        assert_eq!(payload.mime_type(), Some("image/png"));
        assert_eq!(payload.decode().unwrap(), png(16));
    }

    #[test]
    fn test_oversize_file_leaves_buffer_unchanged() {
        let mut staging = buffer();
        staging.accept(IncomingFile::new("ok.png", png(MIB))).unwrap();
        let before = staging.clone();

        let err = staging
            .accept(IncomingFile::new("huge.png", png(3 * MIB)))
            .unwrap_err();

        assert_eq!(
            err,
            NotesError::OversizeAttachment {
                name: "huge.png".to_string(),
                size: (3 * MIB) as u64,
                limit: (2 * MIB) as u64,
            }
        );
        assert_eq!(staging, before);
    }

    #[test]
    fn test_exactly_two_mib_is_accepted() {
        let mut staging = buffer();
        assert!(staging.accept(IncomingFile::new("edge.png", png(2 * MIB))).unwrap());
    }

    #[test]
    fn test_batch_cap_counts_from_current_length() {
        let mut staging = buffer();
        staging.accept(IncomingFile::new("1.png", png(8))).unwrap();
        staging.accept(IncomingFile::new("2.png", png(8))).unwrap();

        let files = (0..6)
            .map(|i| IncomingFile::new(format!("{i}.png"), png(8)))
            .collect();
        let outcome = staging.accept_batch(files);

        assert_eq!(outcome.accepted, 3);
        assert_eq!(outcome.ignored, 3);
        assert!(outcome.rejected.is_empty());
        assert_eq!(staging.len(), 5);
        assert!(!staging.accept(IncomingFile::new("late.png", png(8))).unwrap());
        assert_eq!(staging.len(), 5);
    }

    #[test]
    fn test_oversize_file_in_batch_does_not_block_others() {
        let mut staging = buffer();
        let outcome = staging.accept_batch(vec![
            IncomingFile::new("a.png", png(8)),
            IncomingFile::new("big.png", png(3 * MIB)),
            IncomingFile::new("c.png", png(8)),
        ]);

        assert_eq!(outcome.accepted, 2);
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(staging.len(), 2);
    }

    #[test]
    fn test_seed_and_remove_by_position() {
        let note = Note {
            id: NoteId::from("1"),
            title: "t".to_string(),
            content: "c".to_string(),
            color: NoteColor::Default,
            images: vec![
                ImagePayload::from_bytes(b"one", "image/png"),
                ImagePayload::from_bytes(b"two", "image/png"),
            ],
        };
        let mut staging = buffer();
        staging.seed_from(&note);

        let removed = staging.remove(0).unwrap();
        assert_eq!(removed.payload(), &note.images[0]);
        assert_eq!(
            staging.images(),
            &[StagedImage::Persisted {
                index: 1,
                payload: note.images[1].clone()
            }]
        );
        assert!(staging.remove(7).is_none());
    }

    #[test]
    fn test_sniff_mime() {
        assert_eq!(sniff_mime(b"\xff\xd8\xff\xe0rest"), "image/jpeg");
        assert_eq!(sniff_mime(b"GIF89a..."), "image/gif");
        assert_eq!(sniff_mime(b"RIFF\0\0\0\0WEBPVP8 "), "image/webp");
        assert_eq!(sniff_mime(b"  <svg xmlns=\"\"/>"), "image/svg+xml");
        assert_eq!(sniff_mime(b"plain text"), "application/octet-stream");
    }
}
