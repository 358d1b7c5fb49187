use std::{iter::Peekable, str::CharIndices};

use crate::ast::Position;

/// A forward-only reader over already materialized source text.
///
/// The reader hands out one character at a time and offers exactly one
/// character of lookahead. It keeps the line and column of the next unread
/// character: reading a newline moves to the next line and resets the column.
pub struct CharSource<'src> {
    text:   &'src str,
    chars:  Peekable<CharIndices<'src>>,
    line:   usize,
    column: usize,
}

impl<'src> CharSource<'src> {
    #[must_use]
    pub fn new(text: &'src str) -> Self {
        Self { text,
               chars: text.char_indices().peekable(),
               line: 1,
               column: 0 }
    }

    /// Consumes and returns the next character, or `None` once the input is
    /// exhausted.
    pub fn advance(&mut self) -> Option<char> {
        let (_, c) = self.chars.next()?;
        self.column += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        }
        Some(c)
    }

    /// Returns the next character without consuming it.
    pub fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Byte offset of the next unread character.
    pub fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.text.len(), |&(offset, _)| offset)
    }

    /// Consumes characters until the byte offset `target` is reached or the
    /// input ends.
    pub fn advance_to(&mut self, target: usize) {
        while self.offset() < target && self.advance().is_some() {}
    }

    /// Position of the next unread character.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.line, self.column + 1)
    }
}
