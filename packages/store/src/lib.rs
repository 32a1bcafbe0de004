//! Domain core of Quick Notes: notes, their persistence, the editor dialog
//! state machine and the theme preference. Free of any UI code so it runs
//! natively under `cargo test` as well as in the browser.

pub mod actions;
pub mod config;
pub mod editor;
pub mod errors;
pub mod models;
pub mod repo;
pub mod session;
pub mod staging;
pub mod storage;
pub mod theme;
pub mod view;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorage;

pub use actions::{Effect, NoteAction};
pub use config::{AttachmentLimits, ExportConfig, QuickNotesConfig};
pub use editor::{DialogMode, EditorSession};
pub use errors::{NotesError, Result, StorageError, ValidationError};
pub use models::{ImagePayload, Note, NoteColor, NoteForm, NoteId};
pub use repo::NoteRepository;
pub use session::NotesSession;
pub use staging::{BatchOutcome, IncomingFile, StagedImage, StagingBuffer};
pub use storage::{KeyValueStore, NoteStore};
pub use theme::{Theme, ThemeController, ThemeIndicator};
pub use view::{ImageTileView, NoteCardView};
