use crate::dom::{Dom, NodeId};
use crate::{Result, uri};

/// The request a form submission hands to the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub method: String,
    pub action: String,
}

impl Navigation {
    pub(crate) fn from_form(dom: &Dom, form: NodeId) -> Self {
        let method = dom
            .attr(form, "method")
            .map(|method| method.trim().to_ascii_lowercase())
            .filter(|method| method == "post" || method == "dialog")
            .unwrap_or_else(|| "get".into());
        let action = dom.attr(form, "action").unwrap_or_default();
        Self { method, action }
    }

    /// Recovers the room code from a destination written by the join form.
    ///
    /// Returns `None` when the action does not live under `base_path` or
    /// carries more than one path segment.
    pub fn room_code(&self, base_path: &str) -> Option<Result<String>> {
        let segment = self.action.strip_prefix(base_path)?;
        if segment.contains('/') {
            return None;
        }
        Some(uri::decode_uri_component(segment))
    }
}

/// Rewrites the join form's destination from the code field before submission.
#[derive(Debug, Clone)]
pub(crate) struct JoinFormRedirector {
    form: NodeId,
    code_field: NodeId,
    base_path: String,
}

impl JoinFormRedirector {
    pub(crate) fn new(form: NodeId, code_field: NodeId, base_path: String) -> Self {
        Self {
            form,
            code_field,
            base_path,
        }
    }

    pub(crate) fn destination_for(&self, code: &str) -> String {
        format!("{}{}", self.base_path, uri::encode_uri_component(code))
    }

    /// Runs for a submit event on `form`. Returns the new action when the
    /// form is the join form, `None` for any other form.
    pub(crate) fn on_submit(&self, dom: &mut Dom, form: NodeId) -> Result<Option<String>> {
        if form != self.form {
            return Ok(None);
        }
        let code = dom.value(self.code_field)?;
        let destination = self.destination_for(&code);
        dom.set_attr(self.form, "action", &destination)?;
        Ok(Some(destination))
    }
}
