use std::fmt;
use std::rc::Rc;

use kuchiki::NodeRef;

use crate::config::{PageConfig, THEME_ATTR};
use crate::dom;
use crate::events::{Event, EventBus, EventKind};
use crate::storage::PreferenceStore;

/// A persisted theme choice. Unrecognized values are carried verbatim and
/// applied as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemePreference {
    Light,
    Dark,
    /// No explicit override; styling follows the OS/browser.
    System,
    Other(String),
}

impl ThemePreference {
    pub fn as_str(&self) -> &str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::System => "system",
            ThemePreference::Other(v) => v,
        }
    }
}

impl From<&str> for ThemePreference {
    fn from(value: &str) -> Self {
        match value {
            "light" => ThemePreference::Light,
            "dark" => ThemePreference::Dark,
            "system" => ThemePreference::System,
            other => ThemePreference::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct ThemeController {
    root: NodeRef,
    toggle: Option<NodeRef>,
    store: Rc<dyn PreferenceStore>,
    storage_key: String,
}

impl ThemeController {
    pub fn new(
        root: NodeRef,
        toggle: Option<NodeRef>,
        store: Rc<dyn PreferenceStore>,
        config: &PageConfig,
    ) -> Self {
        Self {
            root,
            toggle,
            store,
            storage_key: config.storage_key.clone(),
        }
    }

    pub fn toggle(&self) -> Option<&NodeRef> {
        self.toggle.as_ref()
    }

    /// Reflects `theme` on the root element and persists it, `system`
    /// included. Storage failures are logged and dropped.
    pub fn apply(&self, theme: &ThemePreference) {
        match theme {
            ThemePreference::System => {
                dom::remove_attr(&self.root, THEME_ATTR);
            }
            other => {
                dom::set_attr(&self.root, THEME_ATTR, other.as_str());
            }
        }
        if let Err(e) = self.store.set_item(&self.storage_key, theme.as_str()) {
            tracing::warn!(key = %self.storage_key, %theme, "persist theme failed: {e:#}");
        }
        tracing::debug!(%theme, "theme applied");
    }

    /// The persisted preference, `system` when missing, empty or unreadable.
    pub fn stored(&self) -> ThemePreference {
        match self.store.get_item(&self.storage_key) {
            Ok(Some(v)) if !v.is_empty() => ThemePreference::from(v.as_str()),
            Ok(_) => ThemePreference::System,
            Err(e) => {
                tracing::debug!(key = %self.storage_key, "read theme failed: {e:#}");
                ThemePreference::System
            }
        }
    }

    /// The preference the root element currently reflects.
    pub fn current(&self) -> ThemePreference {
        dom::get_attr(&self.root, THEME_ATTR)
            .map(|v| ThemePreference::from(v.as_str()))
            .unwrap_or(ThemePreference::System)
    }

    /// Applies the stored preference, then brings the toggle control in line
    /// with it and subscribes to the control's changes.
    pub fn init(self: &Rc<Self>, events: &EventBus) -> ThemePreference {
        let theme = self.stored();
        self.apply(&theme);

        if let Some(toggle) = &self.toggle {
            dom::set_control_value(toggle, theme.as_str());
            let controller = Rc::clone(self);
            events.add_listener(
                toggle,
                EventKind::Change,
                Rc::new(move |event: &Event| {
                    let value = dom::control_value(&event.target).unwrap_or_default();
                    controller.apply(&ThemePreference::from(value.as_str()));
                }),
            );
        }
        theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use kuchiki::traits::TendrilSink as _;

    fn root_of(html: &str) -> NodeRef {
        let doc = kuchiki::parse_html().one(html);
        doc.select_first("html").unwrap().as_node().clone()
    }

    #[test]
    fn preference_round_trips_unknown_values() {
        assert_eq!(ThemePreference::from("dark"), ThemePreference::Dark);
        assert_eq!(ThemePreference::from("sepia").as_str(), "sepia");
    }

    #[test]
    fn apply_sets_and_clears_override() {
        let root = root_of("<p>x</p>");
        let store = Rc::new(MemoryStore::new());
        let controller =
            ThemeController::new(root.clone(), None, store.clone(), &PageConfig::default());

        for theme in [ThemePreference::Light, ThemePreference::Dark] {
            controller.apply(&theme);
            assert_eq!(
                dom::get_attr(&root, "data-theme").as_deref(),
                Some(theme.as_str())
            );
            assert_eq!(
                store.get_item("apphub-theme").unwrap().as_deref(),
                Some(theme.as_str())
            );
        }

        controller.apply(&ThemePreference::System);
        assert!(!dom::has_attr(&root, "data-theme"));
        assert_eq!(
            store.get_item("apphub-theme").unwrap().as_deref(),
            Some("system")
        );
        assert_eq!(controller.current(), ThemePreference::System);
    }

    #[test]
    fn empty_stored_value_means_system() {
        let root = root_of("");
        let store = Rc::new(MemoryStore::with_item("apphub-theme", ""));
        let controller = ThemeController::new(root, None, store, &PageConfig::default());
        assert_eq!(controller.stored(), ThemePreference::System);
    }

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get_item(&self, _key: &str) -> anyhow::Result<Option<String>> {
            anyhow::bail!("storage disabled")
        }

        fn set_item(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
            anyhow::bail!("quota exceeded")
        }
    }

    #[test]
    fn storage_failures_are_swallowed() {
        let root = root_of("");
        let controller = Rc::new(ThemeController::new(
            root.clone(),
            None,
            Rc::new(BrokenStore),
            &PageConfig::default(),
        ));
        assert_eq!(controller.init(&EventBus::new()), ThemePreference::System);
        controller.apply(&ThemePreference::Dark);
        assert_eq!(dom::get_attr(&root, "data-theme").as_deref(), Some("dark"));
    }
}
