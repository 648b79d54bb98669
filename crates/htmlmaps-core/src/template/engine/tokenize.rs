//! Tokenization for the template engine
//!
//! Splits template text into literal runs and `{% ... %}` tags in a single
//! forward pass, tagging every token with the line/column it starts at.

use crate::map::{Frame, Position};
use crate::template::error::TemplateError;
use std::sync::Arc;

pub(crate) const OPEN: &str = "{%";
pub(crate) const CLOSE: &str = "%}";

/// Modifier marking an output tag: `{%= path %}`
const OUTPUT_MODIFIER: char = '=';

/// Token classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind<'a> {
    /// Text outside of tags, verbatim
    Text(&'a str),

    /// `{%= path %}`, trimmed path text
    Output(&'a str),

    /// `{% directive %}`, trimmed directive body
    Directive(&'a str),
}

/// A single token with position and classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind<'a>,
    /// Absolute byte offset in the template
    pub start: usize,
    /// Total length in bytes, including `{%` and `%}` for tags
    pub length: usize,
    /// Line/column of the first character
    pub position: Position,
}

/// Iterator over tokens in a template string
///
/// Every byte is visited once; the cursor advances over literals and tags
/// alike, so positions stay exact even across tags spanning several lines.
/// The stream yields at most one error and then stops.
///
/// ```ignore
/// for token in TokenStream::new(Arc::from("page.tpl"), "Hello {%= name %}!") {
///     println!("{:?}", token?);
/// }
/// ```
pub(crate) struct TokenStream<'a> {
    file: Arc<str>,
    text: &'a str,
    /// Current byte position
    pos: usize,
    cursor: Position,
    failed: bool,
}

impl<'a> TokenStream<'a> {
    /// Create a new TokenStream over the text of `file`
    pub fn new(file: Arc<str>, text: &'a str) -> Self {
        Self {
            file,
            text,
            pos: 0,
            cursor: Position::default(),
            failed: false,
        }
    }

    fn text_token(&self, text: &'a str) -> Token<'a> {
        Token {
            kind: TokenKind::Text(text),
            start: self.pos,
            length: text.len(),
            position: self.cursor,
        }
    }

    /// Scan a tag starting at the beginning of `remaining`
    fn tag_token(&self, remaining: &'a str) -> Result<Token<'a>, TemplateError> {
        let at = Frame::at(&self.file, self.cursor);
        let after_open = &remaining[OPEN.len()..];

        let is_output = match after_open.chars().next() {
            Some(OUTPUT_MODIFIER) => true,
            Some(c) if c.is_whitespace() => false,
            Some(modifier) => return Err(TemplateError::UnexpectedModifier { modifier, at }),
            None => return Err(TemplateError::UnclosedTag { at }),
        };

        let close = after_open
            .find(CLOSE)
            .ok_or_else(|| TemplateError::UnclosedTag { at: at.clone() })?;
        let inner = &after_open[..close];

        let kind = if is_output {
            TokenKind::Output(inner[OUTPUT_MODIFIER.len_utf8()..].trim())
        } else {
            TokenKind::Directive(inner.trim())
        };

        Ok(Token {
            kind,
            start: self.pos,
            length: OPEN.len() + close + CLOSE.len(),
            position: self.cursor,
        })
    }
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = Result<Token<'a>, TemplateError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.text.len() {
            return None;
        }

        let remaining = &self.text[self.pos..];
        let token = match remaining.find(OPEN) {
            Some(0) => self.tag_token(remaining),
            Some(open) => Ok(self.text_token(&remaining[..open])),
            None => Ok(self.text_token(remaining)),
        };

        match token {
            Ok(token) => {
                self.cursor
                    .advance(&self.text[token.start..token.start + token.length]);
                self.pos += token.length;
                Some(Ok(token))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
