use std::rc::Rc;

use anyhow::Context as _;
use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink as _;

use crate::clipboard::Clipboard;
use crate::config::{COPY_SELECTOR, PageConfig, THEME_TOGGLE_SELECTOR, TOAST_SELECTOR};
use crate::copy::CopyButtons;
use crate::dom;
use crate::events::{EventBus, EventKind};
use crate::images;
use crate::storage::PreferenceStore;
use crate::theme::{ThemeController, ThemePreference};
use crate::toast::Toast;

/// A parsed document plus the event bus its scripts listen on.
pub struct Page {
    document: NodeRef,
    events: EventBus,
    config: PageConfig,
}

/// Handles to the components `Page::boot` wired up.
pub struct Booted<C> {
    pub theme: Rc<ThemeController>,
    pub initial_theme: ThemePreference,
    pub copy: Rc<CopyButtons<C>>,
    pub copy_buttons: usize,
    pub images_fixed: usize,
}

impl<C> Booted<C> {
    pub fn toast(&self) -> &Toast {
        self.copy.toast()
    }
}

impl Page {
    pub fn parse(html: &str, config: PageConfig) -> Self {
        Self {
            document: kuchiki::parse_html().one(html),
            events: EventBus::new(),
            config,
        }
    }

    pub fn document(&self) -> &NodeRef {
        &self.document
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// The `<html>` element.
    pub fn root(&self) -> NodeRef {
        self.query("html").unwrap_or_else(|| self.document.clone())
    }

    pub fn query(&self, selector: &str) -> Option<NodeRef> {
        self.document
            .select_first(selector)
            .ok()
            .map(|n| n.as_node().clone())
    }

    pub fn query_all(&self, selector: &str) -> Vec<NodeRef> {
        self.document
            .select(selector)
            .map(|nodes| nodes.map(|n| n.as_node().clone()).collect())
            .unwrap_or_default()
    }

    pub fn copy_buttons(&self) -> Vec<NodeRef> {
        self.query_all(COPY_SELECTOR)
    }

    /// Runs the app script (theme, toast, copy buttons) and then the scale
    /// fix, in page load order. Elements are resolved once, here.
    pub fn boot<C: Clipboard + 'static>(
        &self,
        store: Rc<dyn PreferenceStore>,
        clipboard: Rc<C>,
    ) -> Booted<C> {
        let theme = Rc::new(ThemeController::new(
            self.root(),
            self.query(THEME_TOGGLE_SELECTOR),
            store,
            &self.config,
        ));
        let initial_theme = theme.init(&self.events);

        let toast = Toast::new(self.query(TOAST_SELECTOR), &self.config);
        let copy = Rc::new(CopyButtons::new(clipboard, toast, &self.config));
        let copy_buttons = copy.attach(&self.document, &self.events);

        let images_fixed = images::fix_images(&self.document);

        tracing::debug!(
            theme = %initial_theme,
            copy_buttons,
            images_fixed,
            "page booted"
        );
        Booted {
            theme,
            initial_theme,
            copy,
            copy_buttons,
            images_fixed,
        }
    }

    /// Clicks `target`. Copy listeners spawn onto the current `LocalSet`.
    ///
    /// # Panics
    ///
    /// Panics when a copy listener fires outside a `tokio::task::LocalSet`,
    /// as `tokio::task::spawn_local` does.
    pub fn click(&self, target: &NodeRef) -> usize {
        self.events.dispatch(target, EventKind::Click)
    }

    /// Sets a control's value and fires `change`, as a user selection would.
    pub fn change(&self, target: &NodeRef, value: &str) -> usize {
        dom::set_control_value(target, value);
        self.events.dispatch(target, EventKind::Change)
    }

    pub fn to_html(&self) -> anyhow::Result<String> {
        let mut out = Vec::new();
        self.document
            .serialize(&mut out)
            .context("serialize document")?;
        String::from_utf8(out).context("document html not utf-8")
    }
}
