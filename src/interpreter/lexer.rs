use std::fmt;

use logos::Logos;

use crate::{
    ast::Position,
    interpreter::{evaluator::builtin::Builtin, source::CharSource},
};

/// Raw classification of a run of characters.
///
/// This is the first half of tokenization: it decides where a lexeme ends and
/// what broad class it belongs to. Words are lower-cased here and resolved
/// against the keyword and builtin tables by the [`Tokenizer`].
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Lexeme {
    /// Numeric literals such as `3`, `3.14`, `.5` or `2.`.
    ///
    /// A literal holds at most one decimal point, so `1.2.3` lexes as `1.2`
    /// followed by `.3`. A lone `.` is not a number.
    #[regex(r"[0-9]+(\.[0-9]*)?", parse_number)]
    #[regex(r"\.[0-9]*", parse_number)]
    Number(f64),
    /// Keywords, builtin names and identifiers, lower-cased.
    ///
    /// A word starts with any Unicode letter and goes on with letters, digits
    /// and underscores.
    #[regex(r"\p{Alphabetic}[\p{Alphabetic}\p{N}_]*", |lex| lex.slice().to_lowercase())]
    Word(String),
    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// `=`
    #[token("=")]
    Equals,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `**`
    #[token("**")]
    Power,
    /// Any run of Unicode whitespace.
    #[regex(r"\s+", logos::skip)]
    Ignored,
}

/// Parses a numeric literal from the current token slice.
///
/// # Returns
/// - `Some(f64)`: The parsed value if the slice is a valid number.
/// - `None`: For a lone `.`, which the lexer then reports as an error.
fn parse_number(lex: &logos::Lexer<Lexeme>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// The kind of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `param`
    Param,
    /// `from`
    From,
    /// `to`
    To,
    /// `step`
    Step,
    /// `draw`
    Draw,
    /// `show`
    Show,
    /// `clear`
    Clear,
    /// `with`
    With,
    /// `color`
    Color,
    /// `def`
    Def,
    /// `let`
    Let,
    /// `;`
    Semicolon,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// `=`
    Assign,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `**`
    Power,
    /// A numeric literal; the value is in [`Token::value`].
    Number,
    /// A name that is neither a keyword nor a builtin.
    Identifier,
    /// A builtin function name; the builtin is in [`Token::function`].
    Function,
    /// End of input.
    Eof,
    /// Characters the lexer could not classify.
    Error,
}

/// Reserved words of the language.
///
/// Looked up case-insensitively. Builtin function names live in the builtin
/// table and are consulted after this one.
pub static KEYWORDS: &[(&str, TokenKind)] = &[("param", TokenKind::Param),
                                              ("from", TokenKind::From),
                                              ("to", TokenKind::To),
                                              ("step", TokenKind::Step),
                                              ("draw", TokenKind::Draw),
                                              ("show", TokenKind::Show),
                                              ("clear", TokenKind::Clear),
                                              ("with", TokenKind::With),
                                              ("color", TokenKind::Color),
                                              ("def", TokenKind::Def),
                                              ("let", TokenKind::Let)];

/// Looks a word up in the keyword table, ignoring ASCII case.
#[must_use]
pub fn keyword(word: &str) -> Option<TokenKind> {
    KEYWORDS.iter()
            .find(|(spelling, _)| spelling.eq_ignore_ascii_case(word))
            .map(|&(_, kind)| kind)
}

/// A lexical token with its source text and position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind:     TokenKind,
    /// The source text, lower-cased for words.
    pub lexeme:   String,
    /// The value of a numeric literal.
    pub value:    Option<f64>,
    /// The builtin a function-name token refers to.
    pub function: Option<Builtin>,
    /// Where the lexeme starts.
    pub position: Position,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, position: Position) -> Self {
        Self { kind,
               lexeme: lexeme.into(),
               value: None,
               function: None,
               position }
    }

    /// Returns `true` if this token is of the given kind.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => f.write_str("end of input"),
            _ => f.write_str(&self.lexeme),
        }
    }
}

/// Turns source text into [`Token`]s.
///
/// The tokenizer never fails: characters it cannot classify become
/// [`TokenKind::Error`] tokens and it is up to the parser to reject them. A
/// [`CharSource`] is advanced in step with the lexer so every token knows the
/// line and column it starts at.
///
/// As an iterator it yields every token, then a single [`TokenKind::Eof`]
/// token, then `None`.
pub struct Tokenizer<'src> {
    lexer:    logos::Lexer<'src, Lexeme>,
    source:   CharSource<'src>,
    start:    Position,
    finished: bool,
}

impl<'src> Tokenizer<'src> {
    #[must_use]
    pub fn new(text: &'src str) -> Self {
        let source = CharSource::new(text);
        let start = source.position();
        Self { lexer: Lexeme::lexer(text),
               source,
               start,
               finished: false }
    }

    /// Position of the start of the most recently produced token.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.start
    }

    /// Produces the next token; keeps producing `Eof` once the input ends.
    pub fn next_token(&mut self) -> Token {
        let Some(lexeme) = self.lexer.next() else {
            self.source.advance_to(usize::MAX);
            self.start = self.source.position();
            return Token::new(TokenKind::Eof, "", self.start);
        };

        let span = self.lexer.span();
        self.source.advance_to(span.start);
        self.start = self.source.position();
        self.source.advance_to(span.end);

        let slice = self.lexer.slice();
        match lexeme {
            Ok(lexeme) => self.classify(lexeme, slice),
            Err(()) => Token::new(TokenKind::Error, slice, self.start),
        }
    }

    fn classify(&self, lexeme: Lexeme, slice: &str) -> Token {
        let kind = match lexeme {
            Lexeme::Number(value) => {
                return Token { value: Some(value),
                               ..Token::new(TokenKind::Number, slice, self.start) };
            },
            Lexeme::Word(word) => return self.classify_word(word),
            Lexeme::Semicolon => TokenKind::Semicolon,
            Lexeme::LBracket => TokenKind::LBracket,
            Lexeme::RBracket => TokenKind::RBracket,
            Lexeme::LParen => TokenKind::LParen,
            Lexeme::RParen => TokenKind::RParen,
            Lexeme::Comma => TokenKind::Comma,
            Lexeme::Equals => TokenKind::Assign,
            Lexeme::Plus => TokenKind::Plus,
            Lexeme::Minus => TokenKind::Minus,
            Lexeme::Star => TokenKind::Star,
            Lexeme::Slash => TokenKind::Slash,
            Lexeme::Power => TokenKind::Power,
            // Skipped by the lexer and never produced.
            Lexeme::Comment | Lexeme::Ignored => TokenKind::Error,
        };
        Token::new(kind, slice, self.start)
    }

    fn classify_word(&self, word: String) -> Token {
        if let Some(kind) = keyword(&word) {
            return Token::new(kind, word, self.start);
        }
        if let Some(builtin) = Builtin::from_name(&word) {
            return Token { function: Some(builtin),
                           ..Token::new(TokenKind::Function, word, self.start) };
        }
        Token::new(TokenKind::Identifier, word, self.start)
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        self.finished = token.is(TokenKind::Eof);
        Some(token)
    }
}

/// Tokenizes a whole source string, including the trailing `Eof` token.
#[must_use]
pub fn tokenize(text: &str) -> Vec<Token> {
    Tokenizer::new(text).collect()
}
