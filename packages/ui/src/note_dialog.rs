use dioxus::html::FileEngine;
use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::FaXmark;
use dioxus_free_icons::Icon;
use store::{ImageTileView, IncomingFile, NoteAction, NoteColor, NoteForm};

use crate::note_board::ImageTile;

/// Modal editor for creating or editing a note.
///
/// Mounted once per opening, so its fields start from `form`. While `closing`
/// is set it only plays the exit animation. Clicking the backdrop cancels.
#[component]
pub fn NoteDialog(
    heading: &'static str,
    form: NoteForm,
    previews: Vec<ImageTileView>,
    remaining: usize,
    max_image_bytes: u64,
    closing: bool,
    on_action: EventHandler<NoteAction>,
    on_files: EventHandler<Vec<IncomingFile>>,
) -> Element {
    let mut title = use_signal(|| form.title.clone());
    let mut content = use_signal(|| form.content.clone());
    let mut color = use_signal(|| form.color);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        on_action.call(NoteAction::Submit(NoteForm::new(title(), content(), color())));
    };

    let handle_files = move |evt: FormEvent| {
        let Some(engine) = evt.files() else {
            return;
        };
        spawn(async move {
            let mut files = Vec::new();
            for name in engine.files() {
                match engine.read_file(&name).await {
                    Some(bytes) => files.push(IncomingFile::new(name, bytes)),
                    None => tracing::warn!(file = %name, "could not read picked file"),
                }
            }
            if !files.is_empty() {
                on_files.call(files);
            }
        });
    };

    let max_mb = max_image_bytes / (1024 * 1024);
    let animation = if closing { "dialog-animate-out" } else { "dialog-animate-in" };

    rsx! {
        div {
            class: "dialog-backdrop",
            onclick: move |_| on_action.call(NoteAction::Cancel),
            div {
                id: "noteDialog",
                class: "note-dialog {animation}",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),

                div {
                    class: "dialog-header",
                    h2 { id: "dialogTitle", "{heading}" }
                    button {
                        class: "close-btn",
                        r#type: "button",
                        title: "Close",
                        onclick: move |_| on_action.call(NoteAction::Cancel),
                        Icon { icon: FaXmark, width: 16, height: 16 }
                    }
                }

                form {
                    id: "noteForm",
                    onsubmit: handle_submit,

                    div {
                        class: "form-group",
                        label { r#for: "noteTitle", "Title" }
                        input {
                            id: "noteTitle",
                            r#type: "text",
                            placeholder: "Note title",
                            autofocus: true,
                            value: title(),
                            oninput: move |evt: FormEvent| title.set(evt.value()),
                        }
                    }

                    div {
                        class: "form-group",
                        label { r#for: "noteContent", "Content" }
                        textarea {
                            id: "noteContent",
                            rows: 6,
                            placeholder: "Write your note...",
                            value: content(),
                            oninput: move |evt: FormEvent| content.set(evt.value()),
                        }
                    }

                    div {
                        class: "form-group",
                        span { class: "form-label", "Color" }
                        div {
                            class: "color-options",
                            for option in NoteColor::ALL {
                                label {
                                    key: "{option}",
                                    class: "color-option {option}",
                                    input {
                                        id: "color-{option}",
                                        r#type: "radio",
                                        name: "noteColor",
                                        value: option.as_str(),
                                        checked: color() == option,
                                        onchange: move |_| color.set(option),
                                    }
                                    span { class: "color-swatch" }
                                }
                            }
                        }
                    }

                    div {
                        class: "form-group",
                        label { r#for: "noteImages", "Images" }
                        input {
                            id: "noteImages",
                            r#type: "file",
                            accept: "image/*",
                            multiple: true,
                            disabled: remaining == 0,
                            onchange: handle_files,
                        }
                        span { class: "form-hint", "{remaining} more allowed, up to {max_mb} MB each" }
                        div {
                            id: "imagePreviewContainer",
                            class: "image-preview-container",
                            for (index, tile) in previews.into_iter().enumerate() {
                                ImageTile {
                                    key: "{index}",
                                    tile: tile,
                                    container_class: "image-preview-item",
                                    image_class: "preview-image",
                                    on_action: on_action,
                                }
                            }
                        }
                    }

                    div {
                        class: "dialog-actions",
                        button {
                            class: "cancel-btn",
                            r#type: "button",
                            onclick: move |_| on_action.call(NoteAction::Cancel),
                            "Cancel"
                        }
                        button { class: "save-btn", r#type: "submit", "Save Note" }
                    }
                }
            }
        }
    }
}
