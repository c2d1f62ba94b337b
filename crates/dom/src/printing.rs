use core::fmt;

use indextree::NodeId;
use serde_json::{Map, Value, json};

use crate::document::{DOMNode, Document, NodeKind};

fn sorted_attrs(node: &DOMNode) -> Vec<(&str, &str)> {
    let mut pairs: Vec<(&str, &str)> = node
        .attrs
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();
    pairs.sort_unstable();
    pairs
}

fn node_to_json(document: &Document, id: NodeId) -> Value {
    let Some(node) = document.node(id) else {
        return Value::Null;
    };
    let children: Vec<Value> = document
        .children(id)
        .map(|child| node_to_json(document, child))
        .filter(|value| !value.is_null())
        .collect();
    match &node.kind {
        NodeKind::Document => json!({ "type": "document", "children": children }),
        NodeKind::Element { tag } => {
            let attrs: Map<String, Value> = sorted_attrs(node)
                .into_iter()
                .map(|(key, value)| (key.to_owned(), Value::String(value.to_owned())))
                .collect();
            json!({ "type": "element", "tag": tag, "attrs": attrs, "children": children })
        }
        NodeKind::Text { text } if text.trim().is_empty() => Value::Null,
        NodeKind::Text { text } => json!({ "type": "text", "text": text }),
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn write_node(document: &Document, id: NodeId, out: &mut fmt::Formatter<'_>) -> fmt::Result {
    let Some(node) = document.node(id) else {
        return Ok(());
    };
    match &node.kind {
        NodeKind::Document => {
            for child in document.children(id) {
                write_node(document, child, out)?;
            }
        }
        NodeKind::Element { tag } => {
            write!(out, "<{tag}")?;
            for (key, value) in sorted_attrs(node) {
                write!(out, " {key}=\"{}\"", escape(value))?;
            }
            out.write_str(">")?;
            for child in document.children(id) {
                write_node(document, child, out)?;
            }
            write!(out, "</{tag}>")?;
        }
        // Raw text: `<style>` contents must survive unescaped.
        NodeKind::Text { text } => out.write_str(text)?,
    }
    Ok(())
}

/// Serialized markup, attributes sorted for stable output.
impl fmt::Display for Document {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(self, self.root(), out)
    }
}

impl Document {
    /// Deterministic JSON tree of the document.
    /// Schema:
    /// - Document: { "type":"document", "children":[ ... ] }
    /// - Element: { "type":"element", "tag": "body", "attrs": {..}, "children":[ ... ] }
    /// - Text: { "type":"text", "text":"..." }
    pub fn to_json_value(&self) -> Value {
        node_to_json(self, self.root())
    }

    /// Pretty JSON string for snapshots and test comparisons.
    ///
    /// # Errors
    /// Returns an error if `serde_json` fails to serialize the tree.
    pub fn to_json_string(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_json_value())?)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Document, Viewport};

    #[test]
    fn markup_is_stable() {
        let mut doc = Document::new(Viewport::new(800, 0));
        let body = doc.body().unwrap();
        doc.set_attribute(body, "style", "margin: 0");
        doc.add_class(body, "a");
        assert_eq!(
            doc.to_string(),
            "<html><head></head><body class=\"a\" style=\"margin: 0\"></body></html>"
        );
    }

    #[test]
    fn json_snapshot_lists_attributes() {
        let mut doc = Document::new(Viewport::new(800, 0));
        let body = doc.body().unwrap();
        doc.add_class(body, "locked");
        let json = doc.to_json_value();
        let html = &json["children"][0];
        assert_eq!(html["tag"], "html");
        assert_eq!(html["children"][1]["attrs"]["class"], "locked");
    }
}
