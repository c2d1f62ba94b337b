//! Computed style: a small cascade over `<style>` elements and inline `style` attributes.
//!
//! Only what scroll-locking needs is modelled: box edges, `overflow` and custom properties.
//! Selectors are the compound/descendant subset understood by `css_syntax`.

use std::collections::BTreeMap;

use css_syntax::{ComplexSelector, Declaration, SelectorElement, Specificity, Stylesheet};
use css_variables::{
    CustomProperties, extract_custom_properties, resolve_property, resolve_vars,
};
use indextree::NodeId;
use once_cell::sync::Lazy;

use crate::document::{DOMNode, Document};

/// Default presentation the page starts from before any author styles.
static USER_AGENT_SHEET: Lazy<Stylesheet> =
    Lazy::new(|| css_syntax::parse_stylesheet("body { margin: 8px; }"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Origin {
    UserAgent,
    Author,
}

/// One declaration competing in the cascade.
struct Candidate<'sheet> {
    important: bool,
    origin: Origin,
    specificity: Specificity,
    order: usize,
    declaration: &'sheet Declaration,
}

impl Candidate<'_> {
    /// Ascending precedence. Importance flips origin order.
    fn precedence(&self) -> (bool, u8, Specificity, usize) {
        let origin_rank = match (self.important, self.origin) {
            (false, Origin::UserAgent) | (true, Origin::Author) => 0,
            (false, Origin::Author) | (true, Origin::UserAgent) => 1,
        };
        (self.important, origin_rank, self.specificity, self.order)
    }
}

/// Resolved property values for one element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComputedStyle {
    properties: BTreeMap<String, String>,
    custom: CustomProperties,
}

impl ComputedStyle {
    /// Specified value of a longhand or custom property.
    pub fn get(&self, name: &str) -> Option<&str> {
        if name.starts_with("--") {
            return self.custom.get(name).map(String::as_str);
        }
        self.properties.get(name).map(String::as_str)
    }

    /// Value with every `var()` substituted.
    pub fn resolved(&self, name: &str) -> Option<String> {
        if name.starts_with("--") {
            return resolve_property(name, &self.custom);
        }
        self.get(name).map(|value| resolve_vars(value, &self.custom))
    }

    /// Leading integer pixels of a property, `0` when unset or not a length.
    pub fn px(&self, name: &str) -> i32 {
        self.resolved(name)
            .map_or(0, |value| css_syntax::parse_leading_px(&value))
    }

    pub fn overflow(&self) -> &str {
        self.get("overflow").unwrap_or("visible")
    }

    pub fn custom_properties(&self) -> &CustomProperties {
        &self.custom
    }
}

/// Borrowed element handle used for selector matching.
#[derive(Clone, Copy)]
struct ElementRef<'doc> {
    document: &'doc Document,
    id: NodeId,
}

impl SelectorElement for ElementRef<'_> {
    fn local_name(&self) -> &str {
        self.document
            .node(self.id)
            .and_then(DOMNode::tag)
            .unwrap_or_default()
    }

    fn has_class(&self, class: &str) -> bool {
        self.document.has_class(self.id, class)
    }

    fn parent_element(&self) -> Option<Self> {
        let parent = self.document.parent(self.id)?;
        self.document.node(parent)?.tag()?;
        Some(Self {
            document: self.document,
            id: parent,
        })
    }
}

/// Split `margin`/`padding` shorthands into their four longhands.
fn expand(name: &str, value: &str) -> Vec<(String, String)> {
    if name != "margin" && name != "padding" {
        return vec![(name.to_owned(), value.to_owned())];
    }
    let parts: Vec<&str> = value.split_ascii_whitespace().collect();
    let (top, right, bottom, left) = match parts.as_slice() {
        [all] => (*all, *all, *all, *all),
        [vertical, horizontal] => (*vertical, *horizontal, *vertical, *horizontal),
        [top, horizontal, bottom] => (*top, *horizontal, *bottom, *horizontal),
        [top, right, bottom, left] => (*top, *right, *bottom, *left),
        _ => return Vec::new(),
    };
    [("top", top), ("right", right), ("bottom", bottom), ("left", left)]
        .into_iter()
        .map(|(side, side_value)| (format!("{name}-{side}"), side_value.to_owned()))
        .collect()
}

impl Document {
    /// Author stylesheets from every `<style>` element, in tree order.
    pub fn author_stylesheets(&self) -> Vec<Stylesheet> {
        self.elements_by_tag("style")
            .into_iter()
            .map(|style| css_syntax::parse_stylesheet(&self.text_content(style)))
            .collect()
    }

    /// Cascade the user-agent sheet, author sheets and the inline `style` attribute for `id`.
    pub fn computed_style(&self, id: NodeId) -> ComputedStyle {
        let author = self.author_stylesheets();
        self.computed_style_with(id, &author)
    }

    fn computed_style_with(&self, id: NodeId, author: &[Stylesheet]) -> ComputedStyle {
        let inherited = self
            .parent(id)
            .filter(|parent| self.node(*parent).and_then(DOMNode::tag).is_some())
            .map(|parent| self.computed_style_with(parent, author).custom)
            .unwrap_or_default();

        let element = ElementRef { document: self, id };
        let mut candidates = Vec::new();
        let sheets = core::iter::once((Origin::UserAgent, &*USER_AGENT_SHEET))
            .chain(author.iter().map(|sheet| (Origin::Author, sheet)));
        for (origin, sheet) in sheets {
            for rule in &sheet.rules {
                let Some(specificity) = rule
                    .selectors
                    .iter()
                    .filter(|selector| selector.matches(&element))
                    .map(ComplexSelector::specificity)
                    .max()
                else {
                    continue;
                };
                for declaration in &rule.declarations {
                    let order = candidates.len();
                    candidates.push(Candidate {
                        important: declaration.important,
                        origin,
                        specificity,
                        order,
                        declaration,
                    });
                }
            }
        }
        let inline = self
            .attribute(id, "style")
            .map(css_syntax::parse_declaration_list)
            .unwrap_or_default();
        for declaration in &inline {
            let order = candidates.len();
            candidates.push(Candidate {
                important: declaration.important,
                origin: Origin::Author,
                specificity: Specificity(u32::MAX),
                order,
                declaration,
            });
        }
        candidates.sort_by_key(|candidate| candidate.precedence());

        let mut style = ComputedStyle {
            properties: BTreeMap::new(),
            custom: inherited,
        };
        style.custom.extend(extract_custom_properties(
            candidates.iter().map(|candidate| candidate.declaration),
        ));
        for candidate in candidates {
            let Declaration { name, value, .. } = candidate.declaration;
            if name.starts_with("--") {
                continue;
            }
            for (longhand, longhand_value) in expand(name, value) {
                style.properties.insert(longhand, longhand_value);
            }
        }
        style
    }

    /// Whether the root scroller currently paints a classic scrollbar.
    ///
    /// The document is taken to be taller than the viewport, so only `overflow` decides: the
    /// root element's value wins, and `visible` on the root defers to the body.
    pub fn root_scrollbar_visible(&self) -> bool {
        let author = self.author_stylesheets();
        let root_style = self.computed_style_with(self.document_element(), &author);
        let overflow = match root_style.overflow() {
            "visible" => self.body().map_or_else(
                || "visible".to_owned(),
                |body| self.computed_style_with(body, &author).overflow().to_owned(),
            ),
            other => other.to_owned(),
        };
        !matches!(overflow.as_str(), "hidden" | "clip")
    }

    /// `document.documentElement.clientWidth`: the viewport minus a visible scrollbar.
    pub fn client_width(&self) -> i32 {
        let viewport = self.viewport();
        if self.root_scrollbar_visible() {
            (viewport.inner_width - viewport.scrollbar_width).max(0)
        } else {
            viewport.inner_width
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::Viewport;

    fn with_style(css: &str) -> Document {
        let mut doc = Document::new(Viewport::new(1000, 15));
        let style = doc.create_element("style");
        let text = doc.create_text(css);
        doc.append_child(style, text).unwrap();
        doc.append_child(doc.head(), style).unwrap();
        doc
    }

    #[test]
    fn body_starts_with_user_agent_margin() {
        let doc = Document::new(Viewport::new(1000, 15));
        let style = doc.computed_style(doc.body().unwrap());
        assert_eq!(style.px("margin-left"), 8);
        assert_eq!(style.px("margin-right"), 8);
        assert_eq!(style.px("padding-left"), 0);
        assert_eq!(style.overflow(), "visible");
    }

    #[test]
    fn important_author_beats_inline() {
        let mut doc = with_style("body { margin-right: 20px !important; padding: 1px 2px; }");
        let body = doc.body().unwrap();
        doc.set_attribute(body, "style", "margin-right: 3px; margin-left: 4px");
        let style = doc.computed_style(body);
        assert_eq!(style.px("margin-right"), 20);
        assert_eq!(style.px("margin-left"), 4);
        assert_eq!(style.px("padding-top"), 1);
        assert_eq!(style.px("padding-right"), 2);
    }

    #[test]
    fn class_rules_only_apply_with_class() {
        let mut doc = with_style("body.locked { overflow: hidden; --size: 15px; }");
        let body = doc.body().unwrap();
        assert_eq!(doc.computed_style(body).overflow(), "visible");
        assert_eq!(doc.client_width(), 985);

        doc.add_class(body, "locked");
        let style = doc.computed_style(body);
        assert_eq!(style.overflow(), "hidden");
        assert_eq!(style.resolved("--size").as_deref(), Some("15px"));
        assert_eq!(doc.client_width(), 1000);
    }

    #[test]
    fn custom_properties_inherit() {
        let mut doc = with_style("body { --size: 9px; } .child { margin-left: var(--size); }");
        let body = doc.body().unwrap();
        let child = doc.create_element("div");
        doc.set_attribute(child, "class", "child");
        doc.append_child(body, child).unwrap();
        assert_eq!(doc.computed_style(child).px("margin-left"), 9);
    }

    #[test]
    fn custom_properties_follow_the_cascade() {
        let mut doc = with_style(
            "body { --size: 1px !important; --gap: 2px; } body.wide { --gap: 5px; } .child { --gap: 7px; }",
        );
        let body = doc.body().unwrap();
        doc.add_class(body, "wide");
        doc.set_attribute(body, "style", "--size: 3px; --gap: 4px");
        let style = doc.computed_style(body);
        assert_eq!(style.get("--size"), Some("1px"));
        assert_eq!(style.get("--gap"), Some("4px"));

        let child = doc.create_element("div");
        doc.set_attribute(child, "class", "child");
        doc.append_child(body, child).unwrap();
        let inherited = doc.computed_style(child);
        assert_eq!(inherited.get("--gap"), Some("7px"));
        assert_eq!(inherited.get("--size"), Some("1px"));
    }
}
