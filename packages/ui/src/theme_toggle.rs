use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaMoon, FaSun};
use dioxus_free_icons::Icon;
use store::{Theme, ThemeIndicator};

/// Put or remove the dark-theme class on `<body>`.
pub fn apply_theme(theme: Theme) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(body) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
        else {
            return;
        };
        let class_list = body.class_list();
        let result = match theme.body_class() {
            Some(class) => class_list.add_1(class),
            None => class_list.remove_1("dark-theme"),
        };
        if let Err(e) = result {
            tracing::warn!(?e, "could not update body class");
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!(%theme, "theme applied");
    }
}

#[component]
pub fn ThemeToggle(theme: Theme, on_toggle: EventHandler<()>) -> Element {
    let (title, icon) = match theme.indicator() {
        ThemeIndicator::Moon => ("Switch to dark theme", rsx! { Icon { icon: FaMoon, width: 16, height: 16 } }),
        ThemeIndicator::Sun => ("Switch to light theme", rsx! { Icon { icon: FaSun, width: 16, height: 16 } }),
    };

    rsx! {
        button {
            id: "themeToggleBtn",
            class: "theme-toggle",
            title: title,
            onclick: move |_| on_toggle.call(()),
            {icon}
        }
    }
}
