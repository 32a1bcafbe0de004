//! User actions and their effects.
//!
//! Rendered views carry [`NoteAction`] values instead of callbacks. The UI hands
//! whatever action an element holds to [`crate::NotesSession::dispatch`], which
//! owns the table from action type to behavior.

use crate::models::{Note, NoteForm, NoteId};
use crate::theme::Theme;

#[derive(Clone, Debug, PartialEq)]
pub enum NoteAction {
    /// Open the editor on a blank note.
    AddNote,
    /// Open the editor on an existing note.
    Edit(NoteId),
    Delete(NoteId),
    ExportPdf(NoteId),
    /// Remove an image from a saved note.
    RemoveImage { note: NoteId, index: usize },
    /// Remove an image from the editor's pending attachments.
    RemoveStagedImage(usize),
    Submit(NoteForm),
    Cancel,
    ToggleTheme,
}

/// What the UI has to do after an action was applied.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Nothing changed.
    None,
    /// Notes changed and were flushed; redraw the board.
    Rerender,
    DialogOpened,
    /// The dialog closed; `saved` tells whether notes changed with it.
    DialogClosed { saved: bool },
    /// Produce a PDF for this note.
    Export(Note),
    ThemeChanged(Theme),
}
