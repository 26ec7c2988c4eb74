//! Parser for key-selector path expressions.
//!
//! Supported syntax:
//! - `field` or `field.nested` - object property access
//! - `tags[0]` - array index access
//! - `it.field` - optional explicit receiver prefix
//!
//! A leading `it` always names the receiver, so a top-level property
//! literally called `it` is addressed through the prefix: `it` alone is the
//! identity path and `it.it` is the one-hop access.
//!
//! A path navigates one item at a time; missing properties or indices
//! evaluate to `Null` rather than failing, so selectors stay total over
//! heterogeneous sequences.

use alloc::string::String;
use alloc::vec::Vec;
use velum_core::{Error, Result};

/// One navigation step of a compiled path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Object property access (`.field`)
    Field(String),
    /// Array index access (`[0]`)
    Index(usize),
}

/// A parsed path expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathExpr {
    segments: Vec<Segment>,
}

impl PathExpr {
    /// Parses a path expression string.
    pub fn parse(source: &str) -> Result<Self> {
        Parser::new(source).parse()
    }

    /// Returns the navigation steps in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn parse(mut self) -> Result<PathExpr> {
        if self.source.trim().is_empty() {
            return Err(Error::path_syntax("empty path expression", 0));
        }

        let mut segments = Vec::new();
        let mut expect_field = true;

        while self.pos < self.chars.len() {
            match self.peek() {
                '.' => {
                    if expect_field {
                        return Err(Error::path_syntax("unexpected '.'", self.pos));
                    }
                    self.pos += 1;
                    expect_field = true;
                }
                '[' => {
                    segments.push(self.parse_index()?);
                    expect_field = false;
                }
                c if is_ident_start(c) => {
                    if !expect_field {
                        return Err(Error::path_syntax("expected '.' or '['", self.pos));
                    }
                    segments.push(self.parse_field());
                    expect_field = false;
                }
                c => {
                    return Err(Error::path_syntax(
                        alloc::format!("unexpected character '{}'", c),
                        self.pos,
                    ));
                }
            }
        }

        if expect_field {
            return Err(Error::path_syntax("trailing '.'", self.pos));
        }

        // Strip the optional explicit receiver, `it` alone meaning identity.
        if segments.first() == Some(&Segment::Field(String::from("it"))) {
            segments.remove(0);
        }

        Ok(PathExpr { segments })
    }

    fn peek(&self) -> char {
        self.chars[self.pos]
    }

    fn parse_field(&mut self) -> Segment {
        let start = self.pos;
        while self.pos < self.chars.len() && is_ident_char(self.chars[self.pos]) {
            self.pos += 1;
        }
        Segment::Field(self.chars[start..self.pos].iter().collect())
    }

    fn parse_index(&mut self) -> Result<Segment> {
        let open = self.pos;
        self.pos += 1; // consume '['

        let start = self.pos;
        while self.pos < self.chars.len() && self.chars[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(Error::path_syntax("expected array index", self.pos));
        }
        if self.pos >= self.chars.len() || self.chars[self.pos] != ']' {
            return Err(Error::path_syntax("unclosed '['", open));
        }

        let digits: String = self.chars[start..self.pos].iter().collect();
        self.pos += 1; // consume ']'

        let index = digits
            .parse::<usize>()
            .map_err(|_| Error::path_syntax("index out of range", start))?;
        Ok(Segment::Index(index))
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
