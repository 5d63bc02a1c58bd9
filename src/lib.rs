mod cli;
mod config;
mod copy;
mod dom;
mod events;
mod images;
mod page;
mod storage;
mod theme;
mod toast;

pub mod clipboard;
pub mod markup;

use std::io::Write as _;
use std::rc::Rc;

use anyhow::Context as _;

pub use cli::Args as CliArgs;
pub use clipboard::{Clipboard, CommandClipboard, MemoryClipboard};
pub use config::PageConfig;
pub use copy::{CopyButtons, CopyOutcome};
pub use dom::{control_value, get_attr, has_attr, has_class, style_property};
pub use events::{Event, EventBus, EventKind};
pub use images::fix_images;
pub use page::{Booted, Page};
pub use storage::{FileStore, MemoryStore, PreferenceStore};
pub use theme::{ThemeController, ThemePreference};
pub use toast::Toast;

/// Loads the page, boots its scripts, applies the requested theme, writes the
/// document, then performs the requested copies.
pub async fn run(args: CliArgs) -> anyhow::Result<()> {
    tokio::task::LocalSet::new().run_until(run_page(args)).await
}

async fn run_page(args: CliArgs) -> anyhow::Result<()> {
    let html = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?,
        None => markup::demo_page(),
    };

    let store: Rc<dyn PreferenceStore> = match &args.store {
        Some(path) => Rc::new(FileStore::open(path)?),
        None => Rc::new(MemoryStore::new()),
    };
    let clipboard = Rc::new(match &args.clipboard_command {
        Some(cmd) => CommandClipboard::from_command_line(cmd)?,
        None => CommandClipboard::detect(),
    });

    let page = Page::parse(&html, args.page_config());
    let booted = page.boot(store, clipboard);
    tracing::info!(
        theme = %booted.initial_theme,
        copy_buttons = booted.copy_buttons,
        images = booted.images_fixed,
        "page loaded"
    );

    if let Some(theme) = &args.theme {
        match booted.theme.toggle() {
            Some(toggle) => {
                page.change(toggle, theme);
                if dom::control_value(toggle).as_deref() != Some(theme.as_str()) {
                    tracing::warn!("theme control has no {theme} option; applying it directly");
                    booted.theme.apply(&ThemePreference::from(theme.as_str()));
                }
            }
            None => {
                tracing::warn!("page has no theme control; applying {theme} directly");
                booted.theme.apply(&ThemePreference::from(theme.as_str()));
            }
        }
        tracing::info!(theme = %booted.theme.current(), "theme selected");
    }

    let rendered = page.to_html()?;
    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("create {}", parent.display()))?;
                }
            }
            std::fs::write(path, rendered).with_context(|| format!("write {}", path.display()))?;
        }
        None => std::io::stdout()
            .lock()
            .write_all(rendered.as_bytes())
            .context("write stdout")?,
    }

    let buttons = page.copy_buttons();
    for &index in &args.copy {
        let button = buttons.get(index).with_context(|| {
            format!(
                "no copy-enabled element at index {index} ({} on page)",
                buttons.len()
            )
        })?;
        let outcome = booted.copy.copy(button).await;
        tracing::info!(
            index,
            ?outcome,
            toast = %booted.toast().text().unwrap_or_default(),
            "copy"
        );
    }

    Ok(())
}
