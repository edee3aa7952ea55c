//! The selector subset the home page needs: a chain of compounds (`tag`,
//! `#id`, `.class`, `[name=value]`) joined by descendant or child
//! combinators. Anything else is rejected with `UnsupportedSelector`.

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Combinator {
    Descendant,
    Child,
}

/// One compound, e.g. `input.wide[name="code"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Compound {
    pub(crate) tag: Option<String>,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    /// `(name, value)` pairs; names are lowercased.
    pub(crate) attrs: Vec<(String, String)>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attrs.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Selector {
    /// Left to right. The last compound is the subject.
    pub(crate) compounds: Vec<Compound>,
    /// `combinators[i]` sits between `compounds[i]` and `compounds[i + 1]`.
    pub(crate) combinators: Vec<Combinator>,
}

impl Selector {
    pub(crate) fn parse(text: &str) -> Result<Self> {
        SelectorParser {
            src: text,
            pos: 0,
        }
        .parse()
    }

    /// The id when the selector is exactly `#id`.
    pub(crate) fn lone_id(&self) -> Option<&str> {
        match self.compounds.as_slice() {
            [only] if only.tag.is_none() && only.classes.is_empty() && only.attrs.is_empty() => {
                only.id.as_deref()
            }
            _ => None,
        }
    }
}

struct SelectorParser<'a> {
    src: &'a str,
    pos: usize,
}

impl SelectorParser<'_> {
    fn parse(mut self) -> Result<Selector> {
        let mut selector = Selector {
            compounds: Vec::new(),
            combinators: Vec::new(),
        };
        self.skip_ws();
        loop {
            selector.compounds.push(self.compound()?);
            let had_space = self.skip_ws();
            match self.peek() {
                None => return Ok(selector),
                Some('>') => {
                    self.pos += 1;
                    self.skip_ws();
                    selector.combinators.push(Combinator::Child);
                }
                Some(_) if had_space => selector.combinators.push(Combinator::Descendant),
                Some(_) => return Err(self.unsupported()),
            }
        }
    }

    fn compound(&mut self) -> Result<Compound> {
        let mut compound = Compound {
            tag: self.ident().map(|tag| tag.to_ascii_lowercase()),
            ..Compound::default()
        };
        while let Some(ch) = self.peek() {
            match ch {
                '#' => {
                    self.pos += 1;
                    let id = self.ident().ok_or_else(|| self.unsupported())?;
                    if compound.id.replace(id).is_some() {
                        return Err(self.unsupported());
                    }
                }
                '.' => {
                    self.pos += 1;
                    let class_name = self.ident().ok_or_else(|| self.unsupported())?;
                    compound.classes.push(class_name);
                }
                '[' => {
                    self.pos += 1;
                    let attr = self.attr_equals()?;
                    compound.attrs.push(attr);
                }
                '>' => break,
                ch if ch.is_ascii_whitespace() => break,
                _ => return Err(self.unsupported()),
            }
        }
        if compound.is_empty() {
            return Err(self.unsupported());
        }
        Ok(compound)
    }

    // After `[`: `name = value ]`, where value is an identifier or a quoted string.
    fn attr_equals(&mut self) -> Result<(String, String)> {
        self.skip_ws();
        let name = self.ident().ok_or_else(|| self.unsupported())?;
        self.skip_ws();
        self.expect('=')?;
        self.skip_ws();
        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                self.quoted(quote)?
            }
            _ => self.ident().ok_or_else(|| self.unsupported())?,
        };
        self.skip_ws();
        self.expect(']')?;
        Ok((name.to_ascii_lowercase(), value))
    }

    fn quoted(&mut self, quote: char) -> Result<String> {
        let src = self.src;
        let mut out = String::new();
        let mut chars = src[self.pos..].char_indices();
        while let Some((offset, ch)) = chars.next() {
            match ch {
                '\\' => {
                    let (_, escaped) = chars.next().ok_or_else(|| self.unsupported())?;
                    out.push(escaped);
                }
                ch if ch == quote => {
                    self.pos += offset + ch.len_utf8();
                    return Ok(out);
                }
                ch => out.push(ch),
            }
        }
        Err(self.unsupported())
    }

    fn ident(&mut self) -> Option<String> {
        let src = self.src;
        let rest = &src[self.pos..];
        let len = rest
            .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'))
            .unwrap_or(rest.len());
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(rest[..len].to_string())
    }

    fn expect(&mut self, ch: char) -> Result<()> {
        if self.peek() == Some(ch) {
            self.pos += ch.len_utf8();
            Ok(())
        } else {
            Err(self.unsupported())
        }
    }

    /// Returns whether any whitespace was skipped.
    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        let rest = &self.src[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
        self.pos > start
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn unsupported(&self) -> Error {
        Error::UnsupportedSelector(self.src.to_string())
    }
}
