//! CSS Syntax Module Level 3 — the subset needed to read back injected stylesheets.
//! Spec: <https://www.w3.org/TR/css-syntax-3/>
//!
//! Two entry points share one `cssparser`-backed rule parser:
//! - [`parse_stylesheet`] is forgiving and drops whatever it cannot understand, the way a
//!   browser recovers from bad input.
//! - [`validate_stylesheet`] is strict and reports the first rule or declaration that a
//!   browser would have discarded.

#![forbid(unsafe_code)]

pub mod length;
pub mod selector;

pub use length::parse_leading_px;
pub use selector::{ComplexSelector, CompoundSelector, SelectorElement, Specificity};

use anyhow::{Result, anyhow};
use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, StyleSheetParser,
};
use log::trace;

/// A single CSS declaration (property: value [!important]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Lowercased property name. Custom properties keep their `--` prefix.
    pub name: String,
    /// Value text with surrounding whitespace and the `!important` tail removed.
    pub value: String,
    /// Whether the declaration carried `!important`.
    pub important: bool,
}

/// A style rule: selector list plus its declarations in source order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleRule {
    /// Raw prelude text, trimmed.
    pub prelude: String,
    /// Parsed selector list.
    pub selectors: Vec<ComplexSelector>,
    pub declarations: Vec<Declaration>,
}

impl StyleRule {
    /// Last declaration named `name` in this rule, if any.
    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().rev().find(|decl| decl.name == name)
    }
}

/// A parsed stylesheet consisting of style rules in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub rules: Vec<StyleRule>,
}

impl Stylesheet {
    /// Rules whose raw prelude equals `prelude` exactly.
    pub fn rules_for<'sheet>(
        &'sheet self,
        prelude: &'sheet str,
    ) -> impl Iterator<Item = &'sheet StyleRule> + 'sheet {
        self.rules.iter().filter(move |rule| rule.prelude == prelude)
    }

    /// Every declaration in the sheet, in source order.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.rules.iter().flat_map(|rule| rule.declarations.iter())
    }
}

/// Reads one declaration value, splitting off a trailing `!important`.
struct DeclarationReader;

impl<'i> DeclarationParser<'i> for DeclarationReader {
    type Declaration = Declaration;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _declaration_start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let start = input.position();
        let mut end = start;
        let mut important = false;
        loop {
            let before = input.position();
            if input.try_parse(cssparser::parse_important).is_ok() {
                if !input.is_exhausted() {
                    return Err(input.new_custom_error(()));
                }
                important = true;
                end = before;
                break;
            }
            if input.next_including_whitespace().is_err() {
                break;
            }
            end = input.position();
        }
        let value = input.slice(start..end).trim();
        if value.is_empty() {
            return Err(input.new_custom_error(()));
        }
        let name = if name.starts_with("--") {
            name.to_string()
        } else {
            name.to_ascii_lowercase()
        };
        Ok(Declaration {
            name,
            value: value.to_owned(),
            important,
        })
    }
}

impl<'i> AtRuleParser<'i> for DeclarationReader {
    type Prelude = ();
    type AtRule = Declaration;
    type Error = ();
}

impl<'i> QualifiedRuleParser<'i> for DeclarationReader {
    type Prelude = ();
    type QualifiedRule = Declaration;
    type Error = ();
}

impl<'i> RuleBodyItemParser<'i, Declaration, ()> for DeclarationReader {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}

/// Top-level parser producing [`StyleRule`]s. In strict mode a rule with any discarded
/// declaration is itself rejected.
struct RuleReader {
    strict: bool,
}

impl<'i> AtRuleParser<'i> for RuleReader {
    type Prelude = ();
    type AtRule = StyleRule;
    type Error = ();
}

impl<'i> QualifiedRuleParser<'i> for RuleReader {
    type Prelude = (String, Vec<ComplexSelector>);
    type QualifiedRule = StyleRule;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let start = input.position();
        let selectors = selector::parse_selector_list(input)?;
        Ok((input.slice_from(start).trim().to_owned(), selectors))
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let (prelude, selectors) = prelude;
        let mut declarations = Vec::new();
        let mut rejected = None;
        let mut reader = DeclarationReader;
        for item in RuleBodyParser::new(input, &mut reader) {
            match item {
                Ok(decl) => declarations.push(decl),
                Err((_, source)) if self.strict => {
                    rejected = Some(source);
                    break;
                }
                Err(_) => {}
            }
        }
        if let Some(source) = rejected {
            trace!(target: "css_syntax", "rejecting rule `{prelude}`: bad declaration `{source}`");
            return Err(input.new_custom_error(()));
        }
        Ok(StyleRule {
            prelude,
            selectors,
            declarations,
        })
    }
}

/// Parse a full stylesheet, silently dropping invalid rules and declarations.
pub fn parse_stylesheet(css: &str) -> Stylesheet {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut reader = RuleReader { strict: false };
    let rules = StyleSheetParser::new(&mut parser, &mut reader)
        .flatten()
        .collect();
    Stylesheet { rules }
}

/// Parse a stylesheet and fail on the first rule a browser would discard.
///
/// Used to check generated CSS: a declaration with an empty value, a malformed
/// `!important`, an unsupported selector or an at-rule all count as errors.
///
/// # Errors
/// Returns an error naming the line, column and source text of the first rejected rule.
pub fn validate_stylesheet(css: &str) -> Result<Stylesheet> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut reader = RuleReader { strict: true };
    let mut sheet = Stylesheet::default();
    for item in StyleSheetParser::new(&mut parser, &mut reader) {
        match item {
            Ok(rule) => sheet.rules.push(rule),
            Err((error, source)) => {
                return Err(anyhow!(
                    "invalid rule at {}:{}: `{}`",
                    error.location.line + 1,
                    error.location.column,
                    source.trim()
                ));
            }
        }
    }
    Ok(sheet)
}

/// Parse a declaration list such as the value of a `style="..."` attribute.
///
/// Spec: <https://www.w3.org/TR/css-style-attr/#interpreting>
pub fn parse_declaration_list(text: &str) -> Vec<Declaration> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let mut reader = DeclarationReader;
    RuleBodyParser::new(&mut parser, &mut reader)
        .flatten()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_list_splits_important() {
        let decls = parse_declaration_list("Margin-Left: 8px; padding-right: 4px !important");
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].name, "margin-left");
        assert_eq!(decls[0].value, "8px");
        assert!(!decls[0].important);
        assert_eq!(decls[1].value, "4px");
        assert!(decls[1].important);
    }

    #[test]
    fn declaration_list_skips_empty_values() {
        let decls = parse_declaration_list("color: ; margin-top: 2px");
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].name, "margin-top");
    }

    #[test]
    fn custom_property_name_keeps_case() {
        let decls = parse_declaration_list("--Gap-Size: 3px");
        assert_eq!(decls[0].name, "--Gap-Size");
    }

    #[test]
    fn strict_mode_rejects_empty_value() {
        let result = validate_stylesheet(".a { padding-right: ; }");
        assert!(result.is_err());
        let lenient = parse_stylesheet(".a { padding-right: ; }");
        assert_eq!(lenient.rules.len(), 1);
        assert!(lenient.rules[0].declarations.is_empty());
    }
}
