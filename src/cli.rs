use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::{DEFAULT_STORAGE_KEY, DEFAULT_TOAST_MS, PageConfig};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// HTML page to load. Defaults to a built-in demo page.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Where to write the resulting HTML. Defaults to stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// JSON file backing the preference store. In-memory when omitted.
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Storage key holding the theme preference.
    #[arg(long, default_value = DEFAULT_STORAGE_KEY)]
    pub storage_key: String,

    /// Select this theme in the page's theme control (`light`, `dark` or `system`).
    #[arg(long)]
    pub theme: Option<String>,

    /// Click the copy-enabled element at this index (repeatable). Runs after
    /// the HTML has been written.
    #[arg(long = "copy", value_name = "INDEX")]
    pub copy: Vec<usize>,

    /// Clipboard program and arguments, e.g. `xclip -selection clipboard`.
    ///
    /// Defaults to `pbcopy` on macOS, `wl-copy` under Wayland, otherwise `xclip`.
    #[arg(long)]
    pub clipboard_command: Option<String>,

    /// How long a toast stays visible, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_TOAST_MS)]
    pub toast_ms: u64,
}

impl Args {
    pub fn page_config(&self) -> PageConfig {
        PageConfig {
            storage_key: self.storage_key.clone(),
            toast_duration: Duration::from_millis(self.toast_ms),
            ..PageConfig::default()
        }
    }
}
