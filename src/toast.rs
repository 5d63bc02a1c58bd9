use std::time::Duration;

use kuchiki::NodeRef;

use crate::config::PageConfig;
use crate::dom;

/// The transient status surface. A page without one gets a toast that
/// silently ignores every `show`.
#[derive(Clone)]
pub struct Toast {
    surface: Option<NodeRef>,
    active_class: String,
    hide_after: Duration,
}

impl Toast {
    pub fn new(surface: Option<NodeRef>, config: &PageConfig) -> Self {
        Self {
            surface,
            active_class: config.toast_active_class.clone(),
            hide_after: config.toast_duration,
        }
    }

    pub fn surface(&self) -> Option<&NodeRef> {
        self.surface.as_ref()
    }

    /// Replaces the text, marks the surface visible and schedules the hide.
    ///
    /// Hide timers are never cancelled: an earlier timer still hides a
    /// later message. Returns `false` when there is no surface.
    ///
    /// # Panics
    ///
    /// Panics outside a `tokio::task::LocalSet` when there is a surface to
    /// schedule the hide for.
    pub fn show(&self, message: &str) -> bool {
        let Some(surface) = &self.surface else {
            return false;
        };
        dom::set_text_content(surface, message);
        dom::add_class(surface, &self.active_class);
        tracing::debug!(text = message, "toast shown");

        let surface = surface.clone();
        let class = self.active_class.clone();
        let hide_after = self.hide_after;
        tokio::task::spawn_local(async move {
            tokio::time::sleep(hide_after).await;
            dom::remove_class(&surface, &class);
        });
        true
    }

    pub fn is_active(&self) -> bool {
        self.surface
            .as_ref()
            .map(|s| dom::has_class(s, &self.active_class))
            .unwrap_or(false)
    }

    pub fn text(&self) -> Option<String> {
        self.surface.as_ref().map(|s| s.text_contents())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuchiki::traits::TendrilSink as _;
    use tokio::task::LocalSet;

    fn surface() -> NodeRef {
        let doc = kuchiki::parse_html().one(r#"<div class="toast"></div>"#);
        doc.select_first(".toast").unwrap().as_node().clone()
    }

    #[tokio::test(start_paused = true)]
    async fn hides_after_duration() {
        LocalSet::new()
            .run_until(async {
                let toast = Toast::new(Some(surface()), &PageConfig::default());
                assert!(toast.show("Copied to clipboard"));
                assert!(toast.is_active());

                tokio::time::sleep(Duration::from_millis(2399)).await;
                assert!(toast.is_active());
                tokio::time::sleep(Duration::from_millis(2)).await;
                assert!(!toast.is_active());
                assert_eq!(toast.text().as_deref(), Some("Copied to clipboard"));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn first_timer_hides_newer_message() {
        LocalSet::new()
            .run_until(async {
                let toast = Toast::new(Some(surface()), &PageConfig::default());
                toast.show("first");
                tokio::time::sleep(Duration::from_millis(1000)).await;
                toast.show("second");
                assert_eq!(toast.text().as_deref(), Some("second"));

                tokio::time::sleep(Duration::from_millis(1401)).await;
                assert!(!toast.is_active());
                assert_eq!(toast.text().as_deref(), Some("second"));
            })
            .await;
    }

    #[test]
    fn missing_surface_is_a_no_op() {
        let toast = Toast::new(None, &PageConfig::default());
        assert!(!toast.show("Copy failed"));
        assert!(!toast.is_active());
        assert_eq!(toast.text(), None);
    }
}
