use std::collections::HashMap;

use crate::selector::{Combinator, Compound, Selector};
use crate::{Error, Result};

// Recursive walks grow the stack on demand so deeply nested markup cannot overflow it.
const STACK_RED_ZONE: usize = 64 * 1024;
const STACK_GROWTH: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeType {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    node_type: NodeType,
}

#[derive(Debug, Clone)]
struct Element {
    tag_name: String,
    attrs: HashMap<String, String>,
    value: String,
    disabled: bool,
    readonly: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct Dom {
    nodes: Vec<Node>,
    root: NodeId,
    id_index: HashMap<String, NodeId>,
}

impl Dom {
    pub(crate) fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            node_type: NodeType::Document,
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
            id_index: HashMap::new(),
        }
    }

    pub(crate) fn root(&self) -> NodeId {
        self.root
    }

    fn create_node(&mut self, parent: Option<NodeId>, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            node_type,
        });
        if let Some(parent_id) = parent {
            self.nodes[parent_id.0].children.push(id);
        }
        id
    }

    pub(crate) fn create_element(
        &mut self,
        parent: NodeId,
        tag_name: String,
        attrs: HashMap<String, String>,
    ) -> NodeId {
        let value = attrs.get("value").cloned().unwrap_or_default();
        let disabled = is_disableable_tag(&tag_name) && attrs.contains_key("disabled");
        let readonly = attrs.contains_key("readonly");
        let element = Element {
            tag_name,
            attrs,
            value,
            disabled,
            readonly,
        };
        let id = self.create_node(Some(parent), NodeType::Element(element));
        if let Some(id_attr) = self
            .element(id)
            .and_then(|element| element.attrs.get("id").cloned())
        {
            // First element wins, like getElementById.
            self.id_index.entry(id_attr).or_insert(id);
        }
        id
    }

    pub(crate) fn create_text(&mut self, parent: NodeId, text: String) -> NodeId {
        self.create_node(Some(parent), NodeType::Text(text))
    }

    fn element(&self, node_id: NodeId) -> Option<&Element> {
        match &self.nodes[node_id.0].node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, node_id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[node_id.0].node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn tag_name(&self, node_id: NodeId) -> Option<&str> {
        self.element(node_id).map(|e| e.tag_name.as_str())
    }

    pub(crate) fn is_tag(&self, node_id: NodeId, tag: &str) -> bool {
        self.tag_name(node_id)
            .map(|name| name.eq_ignore_ascii_case(tag))
            .unwrap_or(false)
    }

    pub(crate) fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes[node_id.0].parent
    }

    pub(crate) fn is_descendant_of(&self, node_id: NodeId, ancestor: NodeId) -> bool {
        let mut cursor = self.parent(node_id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    pub(crate) fn is_same_or_descendant_of(&self, node_id: NodeId, ancestor: NodeId) -> bool {
        node_id == ancestor || self.is_descendant_of(node_id, ancestor)
    }

    pub(crate) fn by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    pub(crate) fn text_content(&self, node_id: NodeId) -> String {
        match &self.nodes[node_id.0].node_type {
            NodeType::Document | NodeType::Element(_) => {
                stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || {
                    let mut out = String::new();
                    for child in &self.nodes[node_id.0].children {
                        out.push_str(&self.text_content(*child));
                    }
                    out
                })
            }
            NodeType::Text(text) => text.clone(),
        }
    }

    pub(crate) fn value(&self, node_id: NodeId) -> Result<String> {
        let element = self
            .element(node_id)
            .ok_or_else(|| Error::TypeMismatch {
                selector: self.dump_label(node_id),
                expected: "element".into(),
                actual: "non-element".into(),
            })?;
        Ok(element.value.clone())
    }

    pub(crate) fn set_value(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        let label = self.dump_label(node_id);
        let element = self.element_mut(node_id).ok_or_else(|| Error::TypeMismatch {
            selector: label,
            expected: "element".into(),
            actual: "non-element".into(),
        })?;
        element.value = value.to_string();
        Ok(())
    }

    pub(crate) fn initialize_form_control_values(&mut self) {
        for node in self.all_element_nodes() {
            if self.is_tag(node, "textarea") {
                let text = self.text_content(node);
                if let Some(element) = self.element_mut(node) {
                    element.value = text;
                }
            }
        }
    }

    pub(crate) fn disabled(&self, node_id: NodeId) -> bool {
        self.element(node_id).map(|e| e.disabled).unwrap_or(false)
    }

    pub(crate) fn readonly(&self, node_id: NodeId) -> bool {
        self.element(node_id).map(|e| e.readonly).unwrap_or(false)
    }

    pub(crate) fn attr(&self, node_id: NodeId, name: &str) -> Option<String> {
        self.element(node_id)
            .and_then(|e| e.attrs.get(&name.to_ascii_lowercase()).cloned())
    }

    /// Writes a plain content attribute such as `action`. The id index and
    /// the live `value`/`disabled`/`readonly` state are fixed at parse time.
    pub(crate) fn set_attr(&mut self, node_id: NodeId, name: &str, value: &str) -> Result<()> {
        let label = self.dump_label(node_id);
        let element = self.element_mut(node_id).ok_or_else(|| Error::TypeMismatch {
            selector: label,
            expected: "element".into(),
            actual: "non-element".into(),
        })?;
        element.attrs.insert(name.to_ascii_lowercase(), value.to_string());
        Ok(())
    }

    pub(crate) fn class_contains(&self, node_id: NodeId, class_name: &str) -> bool {
        self.element(node_id)
            .map(|element| has_class(element, class_name))
            .unwrap_or(false)
    }

    pub(crate) fn class_add(&mut self, node_id: NodeId, class_name: &str) -> Result<()> {
        let element = self.class_target(node_id)?;
        let mut classes = class_tokens(element.attrs.get("class").map(String::as_str));
        if !classes.iter().any(|name| name == class_name) {
            classes.push(class_name.to_string());
        }
        set_class_attr(element, &classes);
        Ok(())
    }

    pub(crate) fn class_remove(&mut self, node_id: NodeId, class_name: &str) -> Result<()> {
        let element = self.class_target(node_id)?;
        let mut classes = class_tokens(element.attrs.get("class").map(String::as_str));
        classes.retain(|name| name != class_name);
        set_class_attr(element, &classes);
        Ok(())
    }

    pub(crate) fn class_toggle(&mut self, node_id: NodeId, class_name: &str) -> Result<bool> {
        if self.class_contains(node_id, class_name) {
            self.class_remove(node_id, class_name)?;
            Ok(false)
        } else {
            self.class_add(node_id, class_name)?;
            Ok(true)
        }
    }

    fn class_target(&mut self, node_id: NodeId) -> Result<&mut Element> {
        let label = self.dump_label(node_id);
        self.element_mut(node_id).ok_or_else(|| Error::TypeMismatch {
            selector: label,
            expected: "element with classList".into(),
            actual: "non-element".into(),
        })
    }

    pub(crate) fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        let all = self.query_selector_all(selector)?;
        Ok(all.into_iter().next())
    }

    pub(crate) fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let selector = Selector::parse(selector)?;
        if let Some(id) = selector.lone_id() {
            return Ok(self.by_id(id).into_iter().collect());
        }

        let mut ids = Vec::new();
        self.collect_elements_dfs(self.root, &mut ids);
        ids.retain(|node| self.matches_selector(*node, &selector));
        Ok(ids)
    }

    pub(crate) fn query_selector_all_from(
        &self,
        root: NodeId,
        selector: &str,
    ) -> Result<Vec<NodeId>> {
        let selector = Selector::parse(selector)?;
        let mut ids = Vec::new();
        self.collect_elements_descendants_dfs(root, &mut ids);
        ids.retain(|node| self.matches_selector(*node, &selector));
        Ok(ids)
    }

    pub(crate) fn query_selector_from(
        &self,
        root: NodeId,
        selector: &str,
    ) -> Result<Option<NodeId>> {
        let all = self.query_selector_all_from(root, selector)?;
        Ok(all.into_iter().next())
    }

    fn collect_elements_dfs(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        if matches!(self.nodes[node_id.0].node_type, NodeType::Element(_)) {
            out.push(node_id);
        }
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || {
            for child in &self.nodes[node_id.0].children {
                self.collect_elements_dfs(*child, out);
            }
        });
    }

    fn collect_elements_descendants_dfs(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        for child in &self.nodes[node_id.0].children {
            self.collect_elements_dfs(*child, out);
        }
    }

    fn all_element_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_elements_dfs(self.root, &mut out);
        out
    }

    fn matches_selector(&self, node_id: NodeId, selector: &Selector) -> bool {
        !selector.compounds.is_empty()
            && self.matches_compounds_up_to(node_id, selector, selector.compounds.len() - 1)
    }

    // Matches `compounds[..=last]` with `node_id` as the element for `compounds[last]`.
    // A descendant combinator tries every ancestor, so `#s > div input` still
    // matches when the nearest `div` is not the one under `#s`.
    fn matches_compounds_up_to(&self, node_id: NodeId, selector: &Selector, last: usize) -> bool {
        if !self.matches_compound(node_id, &selector.compounds[last]) {
            return false;
        }
        if last == 0 {
            return true;
        }
        match selector.combinators[last - 1] {
            Combinator::Child => self
                .parent(node_id)
                .is_some_and(|parent| self.matches_compounds_up_to(parent, selector, last - 1)),
            Combinator::Descendant => {
                let mut cursor = self.parent(node_id);
                while let Some(ancestor) = cursor {
                    if self.matches_compounds_up_to(ancestor, selector, last - 1) {
                        return true;
                    }
                    cursor = self.parent(ancestor);
                }
                false
            }
        }
    }

    fn matches_compound(&self, node_id: NodeId, compound: &Compound) -> bool {
        let Some(element) = self.element(node_id) else {
            return false;
        };
        compound
            .tag
            .as_ref()
            .is_none_or(|tag| element.tag_name.eq_ignore_ascii_case(tag))
            && compound
                .id
                .as_ref()
                .is_none_or(|id| element.attrs.get("id") == Some(id))
            && compound
                .classes
                .iter()
                .all(|class_name| has_class(element, class_name))
            && compound
                .attrs
                .iter()
                .all(|(name, value)| element.attrs.get(name) == Some(value))
    }

    pub(crate) fn find_ancestor_by_tag(&self, node_id: NodeId, tag: &str) -> Option<NodeId> {
        let mut cursor = self.parent(node_id);
        while let Some(current) = cursor {
            if self.is_tag(current, tag) {
                return Some(current);
            }
            cursor = self.parent(current);
        }
        None
    }

    pub(crate) fn dump_node(&self, node_id: NodeId) -> String {
        match &self.nodes[node_id.0].node_type {
            NodeType::Document => {
                let mut out = String::new();
                for child in &self.nodes[node_id.0].children {
                    out.push_str(&self.dump_node(*child));
                }
                out
            }
            NodeType::Text(text) => text.clone(),
            NodeType::Element(element) => {
                stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || {
                    let mut out = open_tag(element);
                    for child in &self.nodes[node_id.0].children {
                        out.push_str(&self.dump_node(*child));
                    }
                    out.push_str("</");
                    out.push_str(&element.tag_name);
                    out.push('>');
                    out
                })
            }
        }
    }

    /// Short label used in trace lines and error messages, e.g. `<span class="help">`.
    pub(crate) fn dump_label(&self, node_id: NodeId) -> String {
        match &self.nodes[node_id.0].node_type {
            NodeType::Document => "#document".into(),
            NodeType::Text(_) => "#text".into(),
            NodeType::Element(element) => open_tag(element),
        }
    }
}

fn open_tag(element: &Element) -> String {
    let mut keys = element.attrs.keys().collect::<Vec<_>>();
    keys.sort();

    let mut out = String::new();
    out.push('<');
    out.push_str(&element.tag_name);
    for key in keys {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&element.attrs[key]);
        out.push('"');
    }
    out.push('>');
    out
}

// Only form controls can be disabled; the attribute means nothing elsewhere.
fn is_disableable_tag(tag_name: &str) -> bool {
    ["button", "input", "select", "textarea", "fieldset", "optgroup", "option"]
        .iter()
        .any(|tag| tag_name.eq_ignore_ascii_case(tag))
}

fn has_class(element: &Element, class_name: &str) -> bool {
    element
        .attrs
        .get("class")
        .map(|classes| classes.split_whitespace().any(|c| c == class_name))
        .unwrap_or(false)
}

fn class_tokens(class_attr: Option<&str>) -> Vec<String> {
    class_attr
        .map(|value| {
            value
                .split_whitespace()
                .filter(|token| !token.is_empty())
                .map(ToOwned::to_owned)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default()
}

fn set_class_attr(element: &mut Element, classes: &[String]) {
    if classes.is_empty() {
        element.attrs.remove("class");
    } else {
        element.attrs.insert("class".to_string(), classes.join(" "));
    }
}
