use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::FaPlus;
use dioxus_free_icons::Icon;
use export::{export_note, PayloadDecoder};
use store::{Effect, IncomingFile, Note, NoteAction, NoteId, NotesSession};
use tracing::{error, info};

use crate::download::offer_download;
use crate::note_board::NoteBoard;
use crate::note_dialog::NoteDialog;
use crate::notices::{push_notice, report_error, use_notices, NoticeLevel, NoticeLog, NoticePanel};
use crate::platform::PlatformStore;
use crate::theme_toggle::{apply_theme, ThemeToggle};
use crate::timing::sleep_ms;

/// Signals behind the notes page.
#[derive(Clone, Copy)]
struct NotesState {
    session: Signal<NotesSession<PlatformStore>>,
    notices: Signal<NoticeLog>,
    /// The dialog plays its exit animation.
    closing: Signal<bool>,
    /// Card currently playing its removal animation.
    removing: Signal<Option<NoteId>>,
    heading: Signal<&'static str>,
    /// Bumped on every opening so the dialog remounts with fresh fields.
    opened: Signal<u32>,
}

impl NotesState {
    fn animation_ms(&self) -> u32 {
        self.session.read().config().ui.animation_ms
    }

    fn handle(self, action: NoteAction) {
        match action {
            NoteAction::Delete(id) => {
                let mut removing = self.removing;
                removing.set(Some(id.clone()));
                let ms = self.animation_ms();
                spawn(async move {
                    sleep_ms(ms).await;
                    self.apply(NoteAction::Delete(id));
                    removing.set(None);
                });
            }
            other => self.apply(other),
        }
    }

    fn apply(mut self, action: NoteAction) {
        let result = self.session.write().dispatch(action);
        self.flush_warnings();

        match result {
            Ok(Effect::DialogOpened) => {
                let heading = self.session.read().editor().mode().heading();
                self.heading.set(heading);
                self.closing.set(false);
                *self.opened.write() += 1;
            }
            Ok(Effect::DialogClosed { saved }) => {
                if saved {
                    info!("note saved");
                }
                self.closing.set(true);
                let ms = self.animation_ms();
                let mut closing = self.closing;
                spawn(async move {
                    sleep_ms(ms).await;
                    closing.set(false);
                });
            }
            Ok(Effect::ThemeChanged(theme)) => apply_theme(theme),
            Ok(Effect::Export(note)) => self.export(note),
            Ok(Effect::None | Effect::Rerender) => {}
            Err(e) => report_error(&mut self.notices, &e),
        }
    }

    fn stage(mut self, files: Vec<IncomingFile>) {
        let outcome = self.session.write().stage_files(files);
        for e in &outcome.rejected {
            report_error(&mut self.notices, e);
        }
        if outcome.ignored > 0 {
            push_notice(
                &mut self.notices,
                NoticeLevel::Info,
                format!("{} image(s) over the per-note limit were ignored", outcome.ignored),
            );
        }
    }

    fn export(self, note: Note) {
        let config = self.session.read().config().export.clone();
        let mut notices = self.notices;
        spawn(async move {
            match export_note(&note, &PayloadDecoder, &config).await {
                Ok(pdf) => {
                    if pdf.skipped > 0 {
                        push_notice(
                            &mut notices,
                            NoticeLevel::Warning,
                            format!("{} image(s) could not be added to the PDF", pdf.skipped),
                        );
                    }
                    if let Err(e) = offer_download(&pdf.file_name, "application/pdf", &pdf.bytes) {
                        error!(error = %e, "could not offer PDF download");
                        push_notice(&mut notices, NoticeLevel::Error, format!("Download failed: {e}"));
                    }
                }
                Err(e) => {
                    error!(note = %note.id, error = %e, "PDF export failed");
                    push_notice(&mut notices, NoticeLevel::Error, format!("PDF export failed: {e}"));
                }
            }
        });
    }

    fn flush_warnings(&mut self) {
        let warnings = self.session.write().take_warnings();
        for warning in &warnings {
            report_error(&mut self.notices, warning);
        }
    }
}

/// The whole Quick Notes page: header, note grid and editor dialog.
#[component]
pub fn NotesView() -> Element {
    let session = use_context::<Signal<NotesSession<PlatformStore>>>();
    let state = NotesState {
        session,
        notices: use_notices(),
        closing: use_signal(|| false),
        removing: use_signal(|| None),
        heading: use_signal(|| "Add New Note"),
        opened: use_signal(|| 0),
    };

    use_hook(move || {
        let mut state = state;
        apply_theme(session.read().theme());
        state.flush_warnings();
    });

    let on_action = use_callback(move |action: NoteAction| state.handle(action));
    let on_files = use_callback(move |files: Vec<IncomingFile>| state.stage(files));

    let current = session.read();
    let cards = current.cards();
    let editor = current.editor();
    let dialog_open = editor.is_open();
    let form = editor.form().clone();
    let previews = current.previews();
    let remaining = editor.staging().remaining_capacity();
    let max_image_bytes = current.config().attachments.max_image_bytes;
    let theme = current.theme();
    drop(current);

    let show_dialog = dialog_open || (state.closing)();
    let opened = (state.opened)();

    rsx! {
        header {
            class: "app-header",
            h1 { "Quick Notes" }
            div {
                class: "header-actions",
                button {
                    class: "add-note-btn",
                    onclick: move |_| on_action.call(NoteAction::AddNote),
                    Icon { icon: FaPlus, width: 14, height: 14 }
                    span { "Add Note" }
                }
                ThemeToggle {
                    theme: theme,
                    on_toggle: move |_| on_action.call(NoteAction::ToggleTheme),
                }
            }
        }

        main {
            NoteBoard {
                cards: cards,
                removing: (state.removing)(),
                on_action: on_action,
            }
        }

        if show_dialog {
            NoteDialog {
                key: "{opened}",
                heading: (state.heading)(),
                form: form,
                previews: previews,
                remaining: remaining,
                max_image_bytes: max_image_bytes,
                closing: !dialog_open,
                on_action: on_action,
                on_files: on_files,
            }
        }

        NoticePanel {}
    }
}
