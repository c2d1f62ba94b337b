//! CSS Custom Properties for Cascading Variables Module Level 1 — CSS variables.
//! Spec: <https://www.w3.org/TR/css-variables-1/>

#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use css_syntax::Declaration;
use log::trace;

/// Custom properties in scope for one element, keyed by name including the leading `--`.
///
/// Ordered so that iteration (and anything derived from it) is deterministic.
pub type CustomProperties = BTreeMap<String, String>;

/// Collect the `--*` declarations, later declarations overriding earlier ones.
///
/// Spec: <https://www.w3.org/TR/css-variables-1/#defining-variables>
pub fn extract_custom_properties<'decl>(
    declarations: impl IntoIterator<Item = &'decl Declaration>,
) -> CustomProperties {
    declarations
        .into_iter()
        .filter(|decl| decl.name.starts_with("--"))
        .map(|decl| (decl.name.clone(), decl.value.clone()))
        .collect()
}

/// Substitute every `var()` reference in `value`.
///
/// Supports `var(--name)` and `var(--name, fallback)`, nested references inside values and
/// fallbacks, and parentheses nested inside the arguments. A reference that is undefined or
/// part of a cycle is replaced by its fallback, or by nothing when it has none.
///
/// Spec: <https://www.w3.org/TR/css-variables-1/#using-variables>
pub fn resolve_vars(value: &str, properties: &CustomProperties) -> String {
    resolve_with_stack(value, properties, &mut Vec::new())
}

/// Look up one custom property and fully resolve it.
pub fn resolve_property(name: &str, properties: &CustomProperties) -> Option<String> {
    let raw = properties.get(name)?;
    let mut stack = vec![name.to_owned()];
    Some(resolve_with_stack(raw, properties, &mut stack))
}

fn resolve_with_stack(value: &str, properties: &CustomProperties, stack: &mut Vec<String>) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(open) = rest.find("var(") {
        let (head, after_head) = rest.split_at(open);
        out.push_str(head);
        let arguments_start = &after_head["var(".len()..];
        let Some(close) = matching_paren(arguments_start) else {
            out.push_str(after_head);
            return out;
        };
        let arguments = &arguments_start[..close];
        out.push_str(&resolve_reference(arguments, properties, stack));
        rest = &arguments_start[close + 1..];
    }
    out.push_str(rest);
    out
}

/// Byte offset of the `)` closing an already-opened parenthesis.
fn matching_paren(text: &str) -> Option<usize> {
    let mut depth = 0_usize;
    for (offset, character) in text.char_indices() {
        match character {
            '(' => depth += 1,
            ')' if depth == 0 => return Some(offset),
            ')' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Spec: <https://www.w3.org/TR/css-variables-1/#cycles>
fn resolve_reference(arguments: &str, properties: &CustomProperties, stack: &mut Vec<String>) -> String {
    let (name, fallback) = match arguments.split_once(',') {
        Some((name, fallback)) => (name.trim(), Some(fallback.trim())),
        None => (arguments.trim(), None),
    };
    let use_fallback = |stack: &mut Vec<String>| {
        fallback.map_or_else(String::new, |text| resolve_with_stack(text, properties, stack))
    };
    if !name.starts_with("--") {
        return use_fallback(stack);
    }
    if stack.iter().any(|seen| seen == name) {
        trace!(target: "css_variables", "cycle through {name}");
        return use_fallback(stack);
    }
    let Some(raw) = properties.get(name) else {
        return use_fallback(stack);
    };
    stack.push(name.to_owned());
    let resolved = resolve_with_stack(raw, properties, stack);
    stack.pop();
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, &str)]) -> CustomProperties {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect()
    }

    #[test]
    fn substitutes_simple_reference() {
        let scope = props(&[("--size", "17px")]);
        assert_eq!(resolve_vars("calc(100% - var(--size))", &scope), "calc(100% - 17px)");
    }

    #[test]
    fn missing_reference_uses_fallback() {
        let scope = CustomProperties::new();
        assert_eq!(resolve_vars("var(--size, 0px)", &scope), "0px");
        assert_eq!(resolve_vars("var(--size)", &scope), "");
    }

    #[test]
    fn fallback_may_contain_parentheses() {
        let scope = CustomProperties::new();
        assert_eq!(resolve_vars("var(--w, calc(1px + 2px))", &scope), "calc(1px + 2px)");
    }

    #[test]
    fn cycles_fall_back() {
        let scope = props(&[("--a", "var(--b, 1px)"), ("--b", "var(--a, 2px)")]);
        assert_eq!(resolve_property("--a", &scope).as_deref(), Some("2px"));
    }
}
