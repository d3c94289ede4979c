use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

/// Terminal presentation preferences, fixed once at startup.
#[derive(Clone, Copy, Debug, Default)]
pub struct UiPrefs {
    pub progress: bool,
    pub term_width: Option<usize>,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let _ = UI_PREFS.set(resolve(flags, std::io::stderr().is_terminal()));
}

/// Progress bars only on an interactive terminal, never in quiet or JSON mode.
fn resolve(flags: &GlobalFlags, is_tty: bool) -> UiPrefs {
    let term_width = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40);

    UiPrefs {
        progress: is_tty && !flags.quiet && flags.format != OutputFormat::Json,
        term_width,
    }
}

#[must_use]
pub fn prefs() -> UiPrefs {
    UI_PREFS.get().copied().unwrap_or_default()
}
