//! # Notes session — the application context
//!
//! [`NotesSession`] owns all state of a running app: the repository, the
//! persistent store adapter, the editor dialog, the theme preference and the
//! queue of warnings waiting to be shown. The UI keeps one session inside a
//! signal and calls [`NotesSession::dispatch`] for every user action.
//!
//! ## Persistence
//!
//! Every action that changes notes ends with one full save. A failed save never
//! fails the action: the in-memory state stays authoritative for the rest of the
//! session and a [`NotesError::StorageUnavailable`] warning is queued for
//! [`NotesSession::take_warnings`].

use tracing::{debug, info, warn};

use crate::actions::{Effect, NoteAction};
use crate::config::QuickNotesConfig;
use crate::editor::{DialogMode, EditorSession};
use crate::errors::{NotesError, Result};
use crate::models::{Note, NoteId};
use crate::repo::NoteRepository;
use crate::staging::{BatchOutcome, IncomingFile};
use crate::storage::{KeyValueStore, NoteStore};
use crate::theme::{Theme, ThemeController};
use crate::view::{render_notes, render_previews, ImageTileView, NoteCardView};

pub struct NotesSession<S: KeyValueStore> {
    config: QuickNotesConfig,
    repo: NoteRepository,
    store: NoteStore<S>,
    editor: EditorSession,
    theme: ThemeController<S>,
    warnings: Vec<NotesError>,
}

impl<S: KeyValueStore + Clone> NotesSession<S> {
    /// Load notes and theme from `backend`.
    pub fn open(backend: S, config: QuickNotesConfig) -> Self {
        let limits = config.attachments;
        let store = NoteStore::new(backend.clone(), config.storage.notes_key.clone());
        let theme = ThemeController::load(backend, config.storage.theme_key.clone());
        let mut warnings = Vec::new();

        let notes = store.load().unwrap_or_else(|e| {
            warn!(error = %e, "could not read notes, starting empty");
            warnings.push(NotesError::StorageUnavailable(e));
            Vec::new()
        });
        info!(count = notes.len(), theme = %theme.theme(), "session opened");

        Self {
            repo: NoteRepository::from_notes(notes, limits),
            editor: EditorSession::new(limits),
            store,
            theme,
            warnings,
            config,
        }
    }
}

impl<S: KeyValueStore> NotesSession<S> {
    pub fn config(&self) -> &QuickNotesConfig {
        &self.config
    }

    pub fn notes(&self) -> &[Note] {
        self.repo.list()
    }

    pub fn editor(&self) -> &EditorSession {
        &self.editor
    }

    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    pub fn cards(&self) -> Vec<NoteCardView> {
        render_notes(self.repo.list())
    }

    pub fn previews(&self) -> Vec<ImageTileView> {
        render_previews(self.editor.staging())
    }

    /// Drain warnings queued by earlier actions.
    pub fn take_warnings(&mut self) -> Vec<NotesError> {
        std::mem::take(&mut self.warnings)
    }

    /// Apply one user action.
    pub fn dispatch(&mut self, action: NoteAction) -> Result<Effect> {
        debug!(?action, "dispatch");
        match action {
            NoteAction::AddNote => {
                self.editor.open_for_create();
                Ok(Effect::DialogOpened)
            }
            NoteAction::Edit(id) => {
                self.editor.open_for_edit(&self.repo, &id)?;
                Ok(Effect::DialogOpened)
            }
            NoteAction::Delete(id) => {
                let removed = self.repo.delete(&id);
                let effect = self.persist_if(removed);
                Ok(self.close_editor_for(&id).unwrap_or(effect))
            }
            NoteAction::ExportPdf(id) => self
                .repo
                .find(&id)
                .cloned()
                .map(Effect::Export)
                .ok_or(NotesError::NotFound(id)),
            NoteAction::RemoveImage { note, index } => {
                let removed = self.repo.remove_image(&note, index);
                let effect = self.persist_if(removed);
                if !removed {
                    return Ok(effect);
                }
                Ok(self.close_editor_for(&note).unwrap_or(effect))
            }
            NoteAction::RemoveStagedImage(index) => Ok(if self.editor.remove_staged(index) {
                Effect::Rerender
            } else {
                Effect::None
            }),
            NoteAction::Submit(form) => match self.editor.submit(form, &mut self.repo)? {
                Some(_) => {
                    self.persist();
                    Ok(Effect::DialogClosed { saved: true })
                }
                None => Ok(Effect::None),
            },
            NoteAction::Cancel => {
                self.editor.cancel();
                Ok(Effect::DialogClosed { saved: false })
            }
            NoteAction::ToggleTheme => {
                let (theme, failure) = self.theme.toggle();
                if let Some(e) = failure {
                    self.warnings.push(e.into());
                }
                Ok(Effect::ThemeChanged(theme))
            }
        }
    }

    /// Stage picked files into the open editor.
    pub fn stage_files(&mut self, files: Vec<IncomingFile>) -> BatchOutcome {
        if !self.editor.is_open() {
            debug!(count = files.len(), "files picked without an open dialog");
            return BatchOutcome {
                ignored: files.len(),
                ..BatchOutcome::default()
            };
        }
        self.editor.stage_files(files)
    }

    /// Staged entries of an open edit refer to the stored note by position,
    /// so a change underneath them closes the dialog unsaved.
    fn close_editor_for(&mut self, id: &NoteId) -> Option<Effect> {
        if !matches!(self.editor.mode(), DialogMode::OpenForEdit(editing) if editing == id) {
            return None;
        }
        debug!(%id, "closing editor on a note changed underneath it");
        self.editor.cancel();
        Some(Effect::DialogClosed { saved: false })
    }

    fn persist_if(&mut self, changed: bool) -> Effect {
        if !changed {
            return Effect::None;
        }
        self.persist();
        Effect::Rerender
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(self.repo.list()) {
            warn!(error = %e, "could not save notes, keeping them in memory");
            self.warnings.push(e.into());
        }
    }
}
