use crate::dom::{Dom, NodeId};
use crate::events::{EventState, EventType};
use crate::home::HomeBehaviors;
use crate::join::Navigation;
use crate::trace::Trace;
use crate::{Error, Result, html};

const SNIPPET_MAX_CHARS: usize = 200;

/// A server-rendered page and the interactive surface the home-page
/// behaviors attach to.
///
/// User actions are addressed by CSS selector, the way a test drives a real
/// browser. Every action runs to completion before the method returns.
pub struct Page {
    dom: Dom,
    home: Option<HomeBehaviors>,
    navigation: Option<Navigation>,
    trace: Trace,
}

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        let dom = html::parse_html(html)?;
        Ok(Self {
            dom,
            home: None,
            navigation: None,
            trace: Trace::default(),
        })
    }

    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace.set_enabled(enabled);
    }

    pub fn set_trace_stderr(&mut self, enabled: bool) {
        self.trace.set_stderr(enabled);
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        self.trace.set_log_limit(max_entries)
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.trace.take()
    }

    pub fn is_initialized(&self) -> bool {
        self.home.is_some()
    }

    pub(crate) fn dom(&self) -> &Dom {
        &self.dom
    }

    pub(crate) fn attach(&mut self, behaviors: HomeBehaviors) -> Result<()> {
        if self.home.is_some() {
            return Err(Error::AlreadyInitialized);
        }
        self.home = Some(behaviors);
        Ok(())
    }

    pub(crate) fn trace_line(&mut self, line: String) {
        self.trace.line(line);
    }

    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) || self.dom.readonly(target) {
            return Ok(());
        }

        let tag = self
            .dom
            .tag_name(target)
            .unwrap_or_default()
            .to_ascii_lowercase();
        if tag != "input" && tag != "textarea" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: tag,
            });
        }

        self.dom.set_value(target, text)
    }

    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) {
            return Ok(());
        }

        self.dispatch_click(target)?;

        if is_submit_control(&self.dom, target) {
            if let Some(form) = self.dom.find_ancestor_by_tag(target, "form") {
                self.submit_form(form)?;
            }
        }
        Ok(())
    }

    pub fn submit(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let form = if self.dom.is_tag(target, "form") {
            Some(target)
        } else {
            self.dom.find_ancestor_by_tag(target, "form")
        };

        match form {
            Some(form) => self.submit_form(form),
            None => Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "form or form control".into(),
                actual: self.dom.tag_name(target).unwrap_or_default().to_string(),
            }),
        }
    }

    /// The request produced by the most recent form submission, if any.
    pub fn last_navigation(&self) -> Option<&Navigation> {
        self.navigation.as_ref()
    }

    pub fn take_navigation(&mut self) -> Option<Navigation> {
        self.navigation.take()
    }

    pub fn has_class(&self, selector: &str, class_name: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        Ok(self.dom.class_contains(target, class_name))
    }

    pub fn attr(&self, selector: &str, name: &str) -> Result<Option<String>> {
        let target = self.select_one(selector)?;
        Ok(self.dom.attr(target, name))
    }

    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.text_content(target);
        self.check(selector, target, expected, actual)
    }

    pub fn assert_value(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.value(target)?;
        self.check(selector, target, expected, actual)
    }

    pub fn assert_attr(&self, selector: &str, name: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self
            .dom
            .attr(target, name)
            .unwrap_or_else(|| "(absent)".into());
        self.check(selector, target, expected, actual)
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        let _ = self.select_one(selector)?;
        Ok(())
    }

    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.dump_node(target))
    }

    fn check(&self, selector: &str, target: NodeId, expected: &str, actual: String) -> Result<()> {
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual,
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    fn node_snippet(&self, node_id: NodeId) -> String {
        truncate_chars(&self.dom.dump_node(node_id), SNIPPET_MAX_CHARS)
    }

    /// Element that receives page-wide clicks: `<body>`, or the document for
    /// fragments without one.
    fn surface(&self) -> NodeId {
        self.dom
            .query_selector("body")
            .ok()
            .flatten()
            .unwrap_or_else(|| self.dom.root())
    }

    // Trigger handlers run first; the page-wide handler only sees clicks they did not consume.
    fn dispatch_click(&mut self, target: NodeId) -> Result<EventState> {
        let mut event = EventState::new(EventType::Click, target);
        let surface = self.surface();
        let Some(home) = self.home.as_ref() else {
            self.trace_event_done(&event, "no_listeners");
            return Ok(event);
        };

        if let Some(toggled) = home.help.activate(&mut self.dom, &mut event)? {
            if self.trace.enabled() {
                let line = format!(
                    "[help] activated {} message={} shown={}",
                    self.dom.dump_label(event.target),
                    self.dom.dump_label(toggled.item.message),
                    toggled.shown
                );
                self.trace.line(line);
            }
        }

        if !event.consumed && self.dom.is_same_or_descendant_of(target, surface) {
            let hidden = home.help.hide_all(&mut self.dom)?;
            self.trace.line(format!("[help] hide_all hidden={hidden}"));
        }

        let outcome = if event.consumed { "consumed" } else { "completed" };
        self.trace_event_done(&event, outcome);
        Ok(event)
    }

    fn submit_form(&mut self, form: NodeId) -> Result<()> {
        let event = EventState::new(EventType::Submit, form);
        if let Some(join) = self.home.as_ref().and_then(|home| home.join.as_ref()) {
            if let Some(destination) = join.on_submit(&mut self.dom, form)? {
                self.trace.line(format!("[join] action={destination}"));
            }
        }
        self.trace_event_done(&event, "completed");

        let navigation = Navigation::from_form(&self.dom, form);
        self.trace.line(format!(
            "[event] navigate method={} action={}",
            navigation.method, navigation.action
        ));
        self.navigation = Some(navigation);
        Ok(())
    }

    fn trace_event_done(&mut self, event: &EventState, outcome: &str) {
        if !self.trace.enabled() {
            return;
        }
        let line = format!(
            "[event] done {} target={} outcome={} consumed={}",
            event.event_type.as_str(),
            self.dom.dump_label(event.target),
            outcome,
            event.consumed
        );
        self.trace.line(line);
    }
}

fn is_submit_control(dom: &Dom, node_id: NodeId) -> bool {
    let kind = dom
        .attr(node_id, "type")
        .map(|kind| kind.to_ascii_lowercase());
    if dom.is_tag(node_id, "button") {
        return kind.as_deref().is_none_or(|kind| kind == "submit");
    }
    if dom.is_tag(node_id, "input") {
        return matches!(kind.as_deref(), Some("submit" | "image"));
    }
    false
}

fn truncate_chars(value: &str, max_chars: usize) -> String {
    let mut it = value.chars();
    let mut out = String::new();
    for _ in 0..max_chars {
        let Some(ch) = it.next() else {
            return out;
        };
        out.push(ch);
    }
    if it.next().is_some() {
        out.push_str("...");
    }
    out
}
