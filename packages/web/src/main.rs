use dioxus::prelude::*;
use store::{NotesSession, QuickNotesConfig};
use ui::views::NotesView;
use ui::{make_store, NoticeLog};

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Settings baked into the bundle; the browser has no config directory.
const CONFIG_TOML: &str = include_str!("../quicknotes.toml");

fn main() {
    let (config, parse_error) = match QuickNotesConfig::from_toml(CONFIG_TOML) {
        Ok(config) => (config, None),
        Err(e) => (QuickNotesConfig::default(), Some(e)),
    };

    let level = config
        .ui
        .log_level
        .parse()
        .unwrap_or(tracing::Level::INFO);
    if let Err(e) = dioxus::logger::init(level) {
        eprintln!("logger already initialized: {e}");
    }
    if let Some(e) = parse_error {
        tracing::warn!(error = %e, "invalid {}, using defaults", QuickNotesConfig::filename());
    }

    LaunchBuilder::new().with_context(config).launch(App);
}

#[component]
fn App() -> Element {
    let config = use_context::<QuickNotesConfig>();
    use_context_provider(|| Signal::new(NotesSession::open(make_store(), config)));
    use_context_provider(|| Signal::new(NoticeLog::default()));

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        NotesView {}
    }
}
