//! Compound and descendant selectors.
//! Spec: <https://www.w3.org/TR/selectors-4/>
//!
//! Only what injected stylesheets use is supported: type selectors, class selectors, the
//! universal selector, the descendant combinator and selector lists. Anything else makes the
//! prelude invalid, which drops the whole rule just like a browser would.

use cssparser::{ParseError, Parser, Token};
use smallvec::SmallVec;

/// Packed specificity, `(ids, classes, types)` from most to least significant.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Default, Hash)]
pub struct Specificity(pub u32);

impl Specificity {
    pub const fn from_counts(ids: u32, classes: u32, types: u32) -> Self {
        Self((ids << 20) | (classes << 10) | types)
    }
}

/// `tag.class.class` with an optional tag; `*` is stored as no tag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompoundSelector {
    pub tag: Option<String>,
    pub classes: SmallVec<String, 2>,
}

impl CompoundSelector {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.classes.is_empty()
    }

    fn matches<E: SelectorElement>(&self, element: &E) -> bool {
        if let Some(tag) = &self.tag
            && !element.local_name().eq_ignore_ascii_case(tag)
        {
            return false;
        }
        self.classes.iter().all(|class| element.has_class(class))
    }
}

/// Compounds joined by descendant combinators, left to right.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComplexSelector {
    pub compounds: Vec<CompoundSelector>,
}

/// Read-only view of an element for selector matching.
pub trait SelectorElement: Sized {
    fn local_name(&self) -> &str;
    fn has_class(&self, class: &str) -> bool;
    fn parent_element(&self) -> Option<Self>;
}

impl ComplexSelector {
    pub fn specificity(&self) -> Specificity {
        let classes = self.compounds.iter().map(|compound| compound.classes.len() as u32).sum();
        let types = self
            .compounds
            .iter()
            .filter(|compound| compound.tag.is_some())
            .count() as u32;
        Specificity::from_counts(0, classes, types)
    }

    /// Right-to-left match; ancestors are consumed greedily, which is exact for descendant-only
    /// chains.
    pub fn matches<E: SelectorElement>(&self, element: &E) -> bool {
        let Some((subject, ancestors)) = self.compounds.split_last() else {
            return false;
        };
        if !subject.matches(element) {
            return false;
        }
        let mut cursor = element.parent_element();
        for compound in ancestors.iter().rev() {
            loop {
                let Some(candidate) = cursor else {
                    return false;
                };
                cursor = candidate.parent_element();
                if compound.matches(&candidate) {
                    break;
                }
            }
        }
        true
    }
}

/// Parse a comma-separated selector list from a rule prelude.
pub fn parse_selector_list<'i>(
    input: &mut Parser<'i, '_>,
) -> Result<Vec<ComplexSelector>, ParseError<'i, ()>> {
    let mut list = Vec::new();
    let mut complex = ComplexSelector::default();
    let mut compound = CompoundSelector::default();
    let mut universal = false;
    input.skip_whitespace();
    loop {
        let token = match input.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::Ident(name) if compound.is_empty() && !universal => {
                compound.tag = Some(name.to_ascii_lowercase());
            }
            Token::Delim('*') if compound.is_empty() && !universal => universal = true,
            Token::Delim('.') => match input.next_including_whitespace()?.clone() {
                Token::Ident(class) => compound.classes.push(class.to_string()),
                other => return Err(input.new_unexpected_token_error(other)),
            },
            Token::WhiteSpace(_) => {
                if compound.is_empty() && !universal {
                    continue;
                }
                complex.compounds.push(core::mem::take(&mut compound));
                universal = false;
            }
            Token::Comma => {
                if !compound.is_empty() || universal {
                    complex.compounds.push(core::mem::take(&mut compound));
                    universal = false;
                }
                if complex.compounds.is_empty() {
                    return Err(input.new_unexpected_token_error(Token::Comma));
                }
                list.push(core::mem::take(&mut complex));
                input.skip_whitespace();
            }
            other => return Err(input.new_unexpected_token_error(other)),
        }
    }
    if !compound.is_empty() || universal {
        complex.compounds.push(compound);
    }
    if complex.compounds.is_empty() {
        return Err(input.new_custom_error(()));
    }
    list.push(complex);
    Ok(list)
}
