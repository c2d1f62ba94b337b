//! Arena-backed document tree.

use anyhow::{Result, anyhow};
use indextree::{Arena, Node, NodeId};
use log::trace;
use smallvec::SmallVec;

use crate::window::Viewport;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NodeKind {
    #[default]
    Document,
    Element {
        tag: String,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DOMNode {
    pub kind: NodeKind,
    pub attrs: SmallVec<(String, String), 4>,
}

impl DOMNode {
    fn element(tag: &str) -> Self {
        Self {
            kind: NodeKind::Element {
                tag: tag.to_ascii_lowercase(),
            },
            attrs: SmallVec::new(),
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag } => Some(tag),
            _ => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn set_attr(&mut self, name: &str, value: String) {
        if let Some(slot) = self.attrs.iter_mut().find(|(key, _)| key == name) {
            slot.1 = value;
        } else {
            self.attrs.push((name.to_owned(), value));
        }
    }
}

/// A document with an `<html>` root, a `<head>` and (usually) a `<body>`.
#[derive(Debug)]
pub struct Document {
    pub(crate) arena: Arena<DOMNode>,
    pub(crate) root: NodeId,
    document_element: NodeId,
    head: NodeId,
    body: Option<NodeId>,
    viewport: Viewport,
}

impl Document {
    /// `<html><head></head><body></body></html>` rendered into `viewport`.
    pub fn new(viewport: Viewport) -> Self {
        let mut document = Self::without_body(viewport);
        let body = document.arena.new_node(DOMNode::element("body"));
        document.document_element.append(body, &mut document.arena);
        document.body = Some(body);
        document
    }

    /// A document whose `<body>` has not been parsed yet.
    pub fn without_body(viewport: Viewport) -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(DOMNode::default());
        let document_element = arena.new_node(DOMNode::element("html"));
        let head = arena.new_node(DOMNode::element("head"));
        root.append(document_element, &mut arena);
        document_element.append(head, &mut arena);
        Self {
            arena,
            root,
            document_element,
            head,
            body: None,
            viewport,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn document_element(&self) -> NodeId {
        self.document_element
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> Option<NodeId> {
        self.body.filter(|body| self.node(*body).is_some())
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Live node data; `None` for unknown or removed nodes.
    pub fn node(&self, id: NodeId) -> Option<&DOMNode> {
        self.arena
            .get(id)
            .filter(|node| !node.is_removed())
            .map(Node::get)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut DOMNode> {
        self.arena
            .get_mut(id)
            .filter(|node| !node.is_removed())
            .map(Node::get_mut)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).and_then(Node::parent)
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.arena)
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.arena.new_node(DOMNode::element(tag))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.arena.new_node(DOMNode {
            kind: NodeKind::Text {
                text: text.to_owned(),
            },
            attrs: SmallVec::new(),
        })
    }

    /// Append `child` as the last child of `parent`, detaching it from any previous parent.
    ///
    /// # Errors
    /// Returns an error if either node was removed, if `child` is `parent`, or if `child` is an
    /// ancestor of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        parent
            .checked_append(child, &mut self.arena)
            .map_err(|error| anyhow!("cannot append {child:?} to {parent:?}: {error}"))
    }

    /// Detach `id` and drop its whole subtree.
    pub fn remove_node(&mut self, id: NodeId) {
        if self.node(id).is_none() {
            return;
        }
        trace!(target: "dom", "removing subtree at {id:?}");
        id.remove_subtree(&mut self.arena);
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)?.attr(name)
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(node) = self.node_mut(id) {
            node.set_attr(name, value.to_owned());
        }
    }

    /// Tokens of the `class` attribute, in order.
    pub fn class_list(&self, id: NodeId) -> Vec<&str> {
        self.attribute(id, "class")
            .map(|classes| classes.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.class_list(id).contains(&class)
    }

    /// Append `class` unless already present. Returns whether the list changed.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> bool {
        if class.is_empty() || self.node(id).is_none() || self.has_class(id, class) {
            return false;
        }
        let mut tokens = self.class_list(id);
        tokens.push(class);
        let joined = tokens.join(" ");
        self.set_attribute(id, "class", &joined);
        true
    }

    /// Remove every occurrence of `class`. Returns whether the list changed.
    ///
    /// The `class` attribute is kept (possibly empty) once it exists, like `DOMTokenList`.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> bool {
        if !self.has_class(id, class) {
            return false;
        }
        let joined = self
            .class_list(id)
            .into_iter()
            .filter(|token| *token != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute(id, "class", &joined);
        true
    }

    /// Concatenated text of every descendant text node.
    pub fn text_content(&self, id: NodeId) -> String {
        id.descendants(&self.arena)
            .filter_map(|node| match &self.node(node)?.kind {
                NodeKind::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Elements named `tag` in tree order.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.root
            .descendants(&self.arena)
            .filter(|node| {
                self.node(*node)
                    .and_then(DOMNode::tag)
                    .is_some_and(|name| name.eq_ignore_ascii_case(tag))
            })
            .collect()
    }
}
