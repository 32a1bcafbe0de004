use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaDownload, FaPen, FaTrashCan, FaXmark};
use dioxus_free_icons::Icon;
use store::{ImageTileView, NoteAction, NoteCardView, NoteId};

/// Grid of note cards. Every button hands its action to `on_action`.
#[component]
pub fn NoteBoard(
    cards: Vec<NoteCardView>,
    removing: Option<NoteId>,
    on_action: EventHandler<NoteAction>,
) -> Element {
    rsx! {
        div {
            id: "notesContainer",
            class: "notes-container",
            for card in cards {
                NoteCard {
                    key: "{card.id}",
                    removing: removing.as_ref() == Some(&card.id),
                    card: card,
                    on_action: on_action,
                }
            }
        }
    }
}

#[component]
fn NoteCard(card: NoteCardView, removing: bool, on_action: EventHandler<NoteAction>) -> Element {
    let class = if removing {
        format!("{} removing", card.class())
    } else {
        card.class()
    };
    let edit = card.edit.clone();
    let delete = card.delete.clone();
    let export = card.export.clone();

    rsx! {
        div {
            id: "{card.dom_id}",
            class: "{class}",
            style: "animation-delay: {card.animation_delay_ms}ms",
            h3 { class: "note-title", "{card.title}" }
            p { class: "note-content", "{card.content}" }

            if !card.images.is_empty() {
                div {
                    class: "note-images-grid",
                    for (index, tile) in card.images.iter().cloned().enumerate() {
                        ImageTile {
                            key: "{index}",
                            tile: tile,
                            container_class: "note-image-container",
                            image_class: "note-image",
                            on_action: on_action,
                        }
                    }
                }
            }

            div {
                class: "note-actions",
                button {
                    class: "edit-btn",
                    title: "Edit Note",
                    onclick: move |_| on_action.call(edit.clone()),
                    Icon { icon: FaPen, width: 14, height: 14 }
                }
                button {
                    class: "delete-btn",
                    title: "Delete Note",
                    onclick: move |_| on_action.call(delete.clone()),
                    Icon { icon: FaTrashCan, width: 14, height: 14 }
                }
                button {
                    class: "download-btn",
                    title: "Download as PDF",
                    onclick: move |_| on_action.call(export.clone()),
                    Icon { icon: FaDownload, width: 14, height: 14 }
                }
            }
        }
    }
}

/// One image with a remove button, used on cards and in the dialog preview.
#[component]
pub fn ImageTile(
    tile: ImageTileView,
    container_class: &'static str,
    image_class: &'static str,
    on_action: EventHandler<NoteAction>,
) -> Element {
    let remove = tile.remove.clone();

    rsx! {
        div {
            class: container_class,
            img { class: image_class, src: "{tile.src}", alt: "{tile.alt}" }
            button {
                class: "delete-image-btn",
                r#type: "button",
                title: "Remove image",
                onclick: move |evt: Event<MouseData>| {
                    evt.stop_propagation();
                    on_action.call(remove.clone());
                },
                Icon { icon: FaXmark, width: 12, height: 12 }
            }
        }
    }
}
