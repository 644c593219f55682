use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use ego_tree::NodeRef;
use pagekit_core::{Capabilities, ElementId, Rect};
use scraper::{Html, Selector};
use thiserror::Error;

/// Carries the arena index through query snapshots.
const NODE_ATTR: &str = "data-pagekit-node";

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },
    #[error("no element {0} in document")]
    UnknownElement(ElementId),
    #[error("nothing matches {0:?}")]
    NoMatch(String),
    #[error("form has no field named {0:?}")]
    MissingField(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scroll_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            scroll_y: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    tag: String,
    attrs: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    style: BTreeMap<String, String>,
    text: String,
    value: String,
    default_value: String,
    rect: Rect,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    attached: bool,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: BTreeMap::new(),
            classes: BTreeSet::new(),
            style: BTreeMap::new(),
            text: String::new(),
            value: String::new(),
            default_value: String::new(),
            rect: Rect::default(),
            parent: None,
            children: Vec::new(),
            attached: false,
        }
    }

    fn from_element(element: &scraper::node::Element) -> Self {
        let mut node = Node::new(element.name());
        for (name, value) in element.attrs() {
            match name {
                "class" => node
                    .classes
                    .extend(value.split_whitespace().map(ToOwned::to_owned)),
                "data-rect" => node.rect = parse_rect(value).unwrap_or_default(),
                "value" => {
                    node.value = value.to_string();
                    node.default_value = value.to_string();
                }
                _ => {}
            }
            if name != "class" {
                node.attrs.insert(name.to_string(), value.to_string());
            }
        }
        node
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> + '_ {
        self.classes.iter().map(String::as_str)
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Value from the markup, restored by a form reset.
    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

/// Arena-backed document. Selector queries run against a `scraper` snapshot
/// of the live tree, so runtime nodes and classes are matched too.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: ElementId,
    body: ElementId,
    viewport: Viewport,
    capabilities: Capabilities,
}

impl Document {
    /// Parses page markup. Elements may carry `data-rect="left top width height"`
    /// to give them a layout box in document coordinates.
    pub fn from_html(markup: &str) -> Self {
        let html = Html::parse_document(markup);
        let mut root_node = Node::new("#document");
        root_node.attached = true;
        let mut doc = Self {
            nodes: vec![root_node],
            root: ElementId(0),
            body: ElementId(0),
            viewport: Viewport::default(),
            capabilities: Capabilities::default(),
        };
        for child in html.tree.root().children() {
            doc.import(child, ElementId(0));
        }
        doc.body = doc
            .nodes
            .iter()
            .position(|node| node.tag == "body")
            .map(ElementId)
            .unwrap_or(doc.root);
        doc
    }

    fn import(&mut self, node: NodeRef<'_, scraper::Node>, parent: ElementId) {
        match node.value() {
            scraper::Node::Element(element) => {
                let mut imported = Node::from_element(element);
                imported.parent = Some(parent);
                imported.attached = true;
                let id = ElementId(self.nodes.len());
                self.nodes.push(imported);
                self.nodes[parent.0].children.push(id);
                for child in node.children() {
                    self.import(child, id);
                }
                if self.nodes[id.0].tag == "textarea" {
                    let text = self.nodes[id.0].text.clone();
                    self.nodes[id.0].value = text.clone();
                    self.nodes[id.0].default_value = text;
                }
            }
            scraper::Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    let target = &mut self.nodes[parent.0].text;
                    if !target.is_empty() {
                        target.push(' ');
                    }
                    target.push_str(trimmed);
                }
            }
            _ => {
                for child in node.children() {
                    self.import(child, parent);
                }
            }
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn set_capabilities(&mut self, capabilities: Capabilities) {
        self.capabilities = capabilities;
    }

    pub fn scroll_y(&self) -> f64 {
        self.viewport.scroll_y
    }

    /// Bottom of the lowest laid-out element.
    pub fn document_height(&self) -> f64 {
        self.nodes
            .iter()
            .filter(|node| node.attached)
            .map(|node| node.rect.bottom())
            .fold(self.viewport.height, f64::max)
    }

    pub fn max_scroll(&self) -> f64 {
        (self.document_height() - self.viewport.height).max(0.0)
    }

    /// Clamps `y` to the scrollable range and returns the applied position.
    pub fn scroll_to(&mut self, y: f64) -> f64 {
        let clamped = y.clamp(0.0, self.max_scroll());
        self.viewport.scroll_y = clamped;
        clamped
    }

    pub fn node(&self, id: ElementId) -> Result<&Node, DocumentError> {
        self.nodes
            .get(id.0)
            .ok_or(DocumentError::UnknownElement(id))
    }

    fn node_mut(&mut self, id: ElementId) -> Result<&mut Node, DocumentError> {
        self.nodes
            .get_mut(id.0)
            .ok_or(DocumentError::UnknownElement(id))
    }

    /// Attached elements matching `selector`, in document order.
    pub fn select(&self, selector: &str) -> Result<Vec<ElementId>, DocumentError> {
        let parsed = Selector::parse(selector).map_err(|err| DocumentError::Selector {
            selector: selector.to_string(),
            reason: err.to_string(),
        })?;
        let snapshot = Html::parse_document(&self.to_html());
        let found = snapshot
            .select(&parsed)
            .filter_map(|element| element.value().attr(NODE_ATTR))
            .filter_map(|raw| raw.parse().ok())
            .map(ElementId)
            .filter(|id| self.nodes.get(id.0).is_some_and(|node| node.attached))
            .collect();
        Ok(found)
    }

    /// Serializes the attached tree, tagging every element with its arena index.
    fn to_html(&self) -> String {
        let mut out = String::from("<!DOCTYPE html>");
        for child in &self.nodes[self.root.0].children {
            self.write_element(*child, &mut out);
        }
        out
    }

    fn write_element(&self, id: ElementId, out: &mut String) {
        let node = &self.nodes[id.0];
        let _ = write!(out, "<{} {}=\"{}\"", node.tag, NODE_ATTR, id.0);
        if !node.classes.is_empty() {
            let classes: Vec<&str> = node.classes().collect();
            let _ = write!(out, " class=\"{}\"", escape(&classes.join(" ")));
        }
        for (name, value) in &node.attrs {
            if name != NODE_ATTR {
                let _ = write!(out, " {}=\"{}\"", name, escape(value));
            }
        }
        out.push('>');
        if VOID_ELEMENTS.contains(&node.tag.as_str()) {
            return;
        }
        out.push_str(&escape(&node.text));
        for child in &node.children {
            self.write_element(*child, out);
        }
        let _ = write!(out, "</{}>", node.tag);
    }

    pub fn select_first(&self, selector: &str) -> Result<Option<ElementId>, DocumentError> {
        Ok(self.select(selector)?.into_iter().next())
    }

    pub fn element_by_id(&self, id_attr: &str) -> Option<ElementId> {
        self.nodes
            .iter()
            .position(|node| node.attached && node.attr("id") == Some(id_attr))
            .map(ElementId)
    }

    /// `id` itself or its nearest ancestor satisfying `pred`.
    pub fn closest(
        &self,
        id: ElementId,
        pred: impl Fn(ElementId) -> bool,
    ) -> Option<ElementId> {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if pred(current) {
                return Some(current);
            }
            cursor = self.nodes.get(current.0).and_then(|node| node.parent);
        }
        None
    }

    pub fn descendants(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = match self.nodes.get(id.0) {
            Some(node) => node.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.nodes[current.0].children.iter().rev().copied());
        }
        out
    }

    /// Input, textarea or select inside `form` carrying `name="{name}"`.
    pub fn form_control(&self, form: ElementId, name: &str) -> Option<ElementId> {
        self.descendants(form).into_iter().find(|id| {
            let node = &self.nodes[id.0];
            matches!(node.tag.as_str(), "input" | "textarea" | "select")
                && node.attr("name") == Some(name)
        })
    }

    pub fn form_controls(&self, form: ElementId) -> Vec<ElementId> {
        self.descendants(form)
            .into_iter()
            .filter(|id| {
                matches!(
                    self.nodes[id.0].tag.as_str(),
                    "input" | "textarea" | "select"
                )
            })
            .collect()
    }

    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.nodes.push(Node::new(tag));
        ElementId(self.nodes.len() - 1)
    }

    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), DocumentError> {
        let attached = self.node(parent)?.attached;
        self.node(child)?;
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        self.set_attached(child, attached);
        Ok(())
    }

    /// Detaches `id` (and its subtree) from the tree.
    pub fn remove(&mut self, id: ElementId) -> Result<(), DocumentError> {
        self.node(id)?;
        self.detach(id);
        self.set_attached(id, false);
        Ok(())
    }

    fn detach(&mut self, id: ElementId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|child| *child != id);
        }
    }

    fn set_attached(&mut self, id: ElementId, attached: bool) {
        self.nodes[id.0].attached = attached;
        for child in self.descendants(id) {
            self.nodes[child.0].attached = attached;
        }
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) -> Result<(), DocumentError> {
        self.node_mut(id)?.classes.insert(class.to_string());
        Ok(())
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) -> Result<(), DocumentError> {
        self.node_mut(id)?.classes.remove(class);
        Ok(())
    }

    pub fn set_class(&mut self, id: ElementId, class: &str, on: bool) -> Result<(), DocumentError> {
        if on {
            self.add_class(id, class)
        } else {
            self.remove_class(id, class)
        }
    }

    pub fn set_style(
        &mut self,
        id: ElementId,
        property: &str,
        value: impl Into<String>,
    ) -> Result<(), DocumentError> {
        self.node_mut(id)?
            .style
            .insert(property.to_string(), value.into());
        Ok(())
    }

    pub fn set_attr(
        &mut self,
        id: ElementId,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), DocumentError> {
        self.node_mut(id)?.attrs.insert(name.to_string(), value.into());
        Ok(())
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) -> Result<(), DocumentError> {
        self.node_mut(id)?.text = text.into();
        Ok(())
    }

    pub fn set_value(&mut self, id: ElementId, value: impl Into<String>) -> Result<(), DocumentError> {
        self.node_mut(id)?.value = value.into();
        Ok(())
    }

    /// Puts a form control back to its markup value.
    pub fn reset_value(&mut self, id: ElementId) -> Result<(), DocumentError> {
        let node = self.node_mut(id)?;
        node.value = node.default_value.clone();
        Ok(())
    }

    pub fn set_rect(&mut self, id: ElementId, rect: Rect) -> Result<(), DocumentError> {
        self.node_mut(id)?.rect = rect;
        Ok(())
    }
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn parse_rect(raw: &str) -> Option<Rect> {
    let parts: Vec<f64> = raw
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    match parts.as_slice() {
        [left, top, width, height] => Some(Rect::new(*left, *top, *width, *height)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKUP: &str = r##"
        <html><body>
          <header class="header" data-rect="0 0 1280 70"><a href="#about" class="nav-link">About</a></header>
          <section id="about" data-rect="0 900 1280 400">
            <p>Hello <b>there</b></p>
          </section>
          <form class="contact-form">
            <input name="email" value="a@b.co">
            <textarea name="message">Hi</textarea>
          </form>
        </body></html>
    "##;

    #[test]
    fn parses_classes_rects_and_values() {
        let doc = Document::from_html(MARKUP);
        let header = doc.select_first(".header").unwrap().unwrap();
        let node = doc.node(header).unwrap();
        assert_eq!(node.tag(), "header");
        assert_eq!(node.rect(), Rect::new(0.0, 0.0, 1280.0, 70.0));
        assert_eq!(doc.element_by_id("about").map(|id| doc.node(id).unwrap().rect().top), Some(900.0));

        let form = doc.select_first("form").unwrap().unwrap();
        let email = doc.form_control(form, "email").unwrap();
        assert_eq!(doc.node(email).unwrap().value(), "a@b.co");
        let message = doc.form_control(form, "message").unwrap();
        assert_eq!(doc.node(message).unwrap().value(), "Hi");
        assert_eq!(doc.form_controls(form).len(), 2);
    }

    #[test]
    fn bad_selector_is_an_error() {
        let doc = Document::from_html(MARKUP);
        assert!(matches!(
            doc.select("a[href^="),
            Err(DocumentError::Selector { .. })
        ));
    }

    #[test]
    fn removed_nodes_drop_out_of_queries() {
        let mut doc = Document::from_html(MARKUP);
        let section = doc.element_by_id("about").unwrap();
        doc.remove(section).unwrap();
        assert!(doc.element_by_id("about").is_none());
        assert!(doc.select("section p").unwrap().is_empty());
    }

    #[test]
    fn created_nodes_attach_with_their_subtree() {
        let mut doc = Document::from_html(MARKUP);
        let outer = doc.create_element("div");
        let inner = doc.create_element("span");
        doc.append_child(outer, inner).unwrap();
        assert!(!doc.node(inner).unwrap().is_attached());
        doc.append_child(doc.body(), outer).unwrap();
        assert!(doc.node(inner).unwrap().is_attached());
        assert_eq!(doc.closest(inner, |id| id == outer), Some(outer));
    }

    #[test]
    fn queries_see_runtime_nodes_and_classes() {
        let mut doc = Document::from_html(MARKUP);
        let header = doc.select_first(".header").unwrap().unwrap();
        doc.add_class(header, "scrolled").unwrap();
        assert_eq!(doc.select("header.scrolled").unwrap(), vec![header]);
        doc.remove_class(header, "header").unwrap();
        assert!(doc.select(".header").unwrap().is_empty());

        let toast = doc.create_element("div");
        doc.add_class(toast, "notification").unwrap();
        doc.set_text(toast, "Saved <ok> & \"done\"").unwrap();
        let close = doc.create_element("button");
        doc.add_class(close, "notification-close").unwrap();
        doc.append_child(toast, close).unwrap();
        assert!(doc.select(".notification-close").unwrap().is_empty());

        doc.append_child(doc.body(), toast).unwrap();
        assert_eq!(doc.select(".notification .notification-close").unwrap(), vec![close]);
        assert_eq!(doc.select_first("body > div.notification").unwrap(), Some(toast));

        doc.remove(toast).unwrap();
        assert!(doc.select(".notification-close").unwrap().is_empty());
    }

    #[test]
    fn reset_restores_markup_values() {
        let mut doc = Document::from_html(MARKUP);
        let form = doc.select_first("form").unwrap().unwrap();
        let email = doc.form_control(form, "email").unwrap();
        let message = doc.form_control(form, "message").unwrap();
        doc.set_value(email, "x@y.io").unwrap();
        doc.set_value(message, "").unwrap();

        doc.reset_value(email).unwrap();
        doc.reset_value(message).unwrap();
        assert_eq!(doc.node(email).unwrap().value(), "a@b.co");
        assert_eq!(doc.node(message).unwrap().value(), "Hi");
    }

    #[test]
    fn scrolling_is_clamped_to_document_height() {
        let mut doc = Document::from_html(MARKUP);
        assert_eq!(doc.max_scroll(), 1300.0 - 800.0);
        assert_eq!(doc.scroll_to(-20.0), 0.0);
        assert_eq!(doc.scroll_to(10_000.0), 500.0);
    }
}
