use std::rc::Rc;

use kuchiki::NodeRef;

use crate::clipboard::Clipboard;
use crate::config::{COPY_ATTR, COPY_SELECTOR, PageConfig};
use crate::dom;
use crate::events::{Event, EventBus, EventKind};
use crate::toast::Toast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed,
}

/// Wires `[data-copy]` elements to the clipboard and reports through the toast.
pub struct CopyButtons<C> {
    clipboard: Rc<C>,
    toast: Toast,
    copied_message: String,
    failed_message: String,
}

impl<C> CopyButtons<C> {
    pub fn toast(&self) -> &Toast {
        &self.toast
    }
}

impl<C: Clipboard + 'static> CopyButtons<C> {
    pub fn new(clipboard: Rc<C>, toast: Toast, config: &PageConfig) -> Self {
        Self {
            clipboard,
            toast,
            copied_message: config.copied_message.clone(),
            failed_message: config.failed_message.clone(),
        }
    }

    /// Attaches a click listener to every copy-enabled element currently in
    /// `document`. Each click spawns its own copy on the local set.
    ///
    /// # Panics
    ///
    /// The listeners panic when a click is dispatched outside a
    /// `tokio::task::LocalSet`.
    pub fn attach(self: &Rc<Self>, document: &NodeRef, events: &EventBus) -> usize {
        let Ok(buttons) = document.select(COPY_SELECTOR) else {
            return 0;
        };
        let mut attached = 0;
        for button in buttons {
            let copier = Rc::clone(self);
            events.add_listener(
                button.as_node(),
                EventKind::Click,
                Rc::new(move |event: &Event| {
                    let copier = Rc::clone(&copier);
                    let button = event.current_target.clone();
                    tokio::task::spawn_local(async move {
                        copier.copy(&button).await;
                    });
                }),
            );
            attached += 1;
        }
        tracing::debug!(attached, "copy buttons attached");
        attached
    }

    /// Copies the button's payload, read at call time, and shows the outcome.
    /// Failures of any cause become the failure toast and go no further.
    pub async fn copy(&self, button: &NodeRef) -> CopyOutcome {
        let outcome = match dom::get_attr(button, COPY_ATTR) {
            Some(value) => match self.clipboard.write_text(&value).await {
                Ok(()) => CopyOutcome::Copied,
                Err(e) => {
                    tracing::debug!("clipboard write failed: {e:#}");
                    CopyOutcome::Failed
                }
            },
            None => {
                tracing::debug!("copy target lost its {COPY_ATTR} attribute");
                CopyOutcome::Failed
            }
        };
        let message = match outcome {
            CopyOutcome::Copied => &self.copied_message,
            CopyOutcome::Failed => &self.failed_message,
        };
        self.toast.show(message);
        outcome
    }
}
