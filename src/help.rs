use crate::dom::{Dom, NodeId};
use crate::events::EventState;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HelpItem {
    pub(crate) trigger: NodeId,
    pub(crate) message: NodeId,
}

/// What a trigger activation changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Toggled {
    pub(crate) item: HelpItem,
    pub(crate) shown: bool,
}

/// Shows and hides inline help messages.
///
/// Items are paired once, when the controller is built: each trigger owns the
/// single message element that shares its parent container.
#[derive(Debug, Clone)]
pub(crate) struct HelpController {
    items: Vec<HelpItem>,
    hide_selector: String,
    shown_class: String,
}

impl HelpController {
    pub(crate) fn build(
        dom: &Dom,
        trigger_class: &str,
        message_class: &str,
        shown_class: &str,
    ) -> Result<Self> {
        let message_selector = format!(".{message_class}");
        let mut items = Vec::new();
        for trigger in dom.query_selector_all(&format!(".{trigger_class}"))? {
            let container = dom.parent(trigger).unwrap_or(trigger);
            let messages = dom.query_selector_all_from(container, &message_selector)?;
            let [message] = messages.as_slice() else {
                return Err(Error::UnpairedHelpTrigger {
                    trigger: dom.dump_label(trigger),
                    messages: messages.len(),
                });
            };
            items.push(HelpItem {
                trigger,
                message: *message,
            });
        }

        Ok(Self {
            items,
            hide_selector: format!(".{message_class}.{shown_class}"),
            shown_class: shown_class.to_string(),
        })
    }

    pub(crate) fn items(&self) -> &[HelpItem] {
        &self.items
    }

    /// Nearest registered trigger at or above `node`.
    fn trigger_for(&self, dom: &Dom, node: NodeId) -> Option<HelpItem> {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if let Some(item) = self.items.iter().find(|item| item.trigger == current) {
                return Some(*item);
            }
            cursor = dom.parent(current);
        }
        None
    }

    /// Trigger handler. Consumes the event and flips the paired message when
    /// the target is, or sits inside, a registered trigger.
    pub(crate) fn activate(
        &self,
        dom: &mut Dom,
        event: &mut EventState,
    ) -> Result<Option<Toggled>> {
        let Some(item) = self.trigger_for(dom, event.target) else {
            return Ok(None);
        };
        event.consume();
        let shown = dom.class_toggle(item.message, &self.shown_class)?;
        Ok(Some(Toggled { item, shown }))
    }

    /// Page-wide handler. Hides every shown message and reports how many were hidden.
    pub(crate) fn hide_all(&self, dom: &mut Dom) -> Result<usize> {
        let shown = dom.query_selector_all(&self.hide_selector)?;
        for message in &shown {
            dom.class_remove(*message, &self.shown_class)?;
        }
        Ok(shown.len())
    }
}
