//! Editor dialog state machine.
//!
//! ```text
//!            open_for_create            submit (valid) / cancel
//!   Closed ─────────────────▶ OpenForCreate ─────────────────▶ Closed
//!      │      open_for_edit(id)                                  ▲
//!      └────────────────────▶ OpenForEdit(id) ───────────────────┘
//! ```
//!
//! Opening while already open replaces the current session. A failed submit
//! keeps the dialog open with its staged images.

use tracing::debug;

use crate::config::AttachmentLimits;
use crate::errors::{NotesError, Result};
use crate::models::{Note, NoteForm, NoteId};
use crate::repo::NoteRepository;
use crate::staging::{BatchOutcome, IncomingFile, StagingBuffer};

#[derive(Clone, Debug, Default, PartialEq)]
pub enum DialogMode {
    #[default]
    Closed,
    OpenForCreate,
    OpenForEdit(NoteId),
}

impl DialogMode {
    pub fn is_open(&self) -> bool {
        !matches!(self, DialogMode::Closed)
    }

    /// Dialog heading for the mode.
    pub fn heading(&self) -> &'static str {
        match self {
            DialogMode::OpenForEdit(_) => "Edit Note",
            _ => "Add New Note",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EditorSession {
    mode: DialogMode,
    form: NoteForm,
    staging: StagingBuffer,
}

impl EditorSession {
    pub fn new(limits: AttachmentLimits) -> Self {
        Self {
            mode: DialogMode::Closed,
            form: NoteForm::default(),
            staging: StagingBuffer::new(limits),
        }
    }

    pub fn mode(&self) -> &DialogMode {
        &self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode.is_open()
    }

    /// Field values the dialog opened with.
    pub fn form(&self) -> &NoteForm {
        &self.form
    }

    pub fn staging(&self) -> &StagingBuffer {
        &self.staging
    }

    pub fn open_for_create(&mut self) {
        self.staging.clear();
        self.form = NoteForm::default();
        self.mode = DialogMode::OpenForCreate;
    }

    /// Open the dialog on an existing note. An unknown id leaves the current
    /// state untouched.
    pub fn open_for_edit(&mut self, repo: &NoteRepository, id: &NoteId) -> Result<()> {
        let note = repo
            .find(id)
            .ok_or_else(|| NotesError::NotFound(id.clone()))?;
        self.form = NoteForm::new(note.title.clone(), note.content.clone(), note.color);
        self.staging.seed_from(note);
        self.mode = DialogMode::OpenForEdit(id.clone());
        Ok(())
    }

    pub fn stage_files(&mut self, files: Vec<IncomingFile>) -> BatchOutcome {
        self.staging.accept_batch(files)
    }

    pub fn remove_staged(&mut self, index: usize) -> bool {
        self.staging.remove(index).is_some()
    }

    /// Validate `form` and write it to the repository, then close.
    ///
    /// Submitting while closed is a no-op returning `Ok(None)`.
    pub fn submit(&mut self, form: NoteForm, repo: &mut NoteRepository) -> Result<Option<Note>> {
        let note = match &self.mode {
            DialogMode::Closed => {
                debug!("submit without an open dialog ignored");
                return Ok(None);
            }
            DialogMode::OpenForCreate => {
                let images = self
                    .staging
                    .images()
                    .iter()
                    .map(|staged| staged.payload().clone())
                    .collect();
                repo.create(&form, images)?
            }
            DialogMode::OpenForEdit(id) => {
                repo.update(id, &form, self.staging.images().to_vec())?
            }
        };
        self.close();
        Ok(Some(note))
    }

    /// Discard staged images and field edits.
    pub fn cancel(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        self.staging.clear();
        self.form = NoteForm::default();
        self.mode = DialogMode::Closed;
    }
}
