//! Tokenizer shared by the effect and simulation file parsers.
use crate::{options::NumberParsing, Error};
use logos::{Logos, Span};
use std::fmt;
use std::iter::Peekable;

/// Declaration file tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Logos)]
pub(crate) enum Token<'a> {
    #[token("{")]
    LCurly,
    #[token("}")]
    RCurly,

    #[regex(r#""([^\\"]*)""#)]
    Str(&'a str),
    #[regex(r"[+-]?[0-9]+")]
    Int(&'a str),
    #[regex(r"[+-]?[0-9]+[.][0-9]*(?:[eE][+-]?[0-9]+)?")]
    #[regex(r"[+-]?[.][0-9]+(?:[eE][+-]?[0-9]+)?")]
    #[regex(r"[+-]?[0-9]+[eE][+-]?[0-9]+")]
    Float(&'a str),
    // path names are allowed unquoted
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_./\\:]*")]
    Name(&'a str),

    #[regex("//[^\n]*", logos::skip)]
    LineComment,
    #[regex(r"/\*([^*]|\*[^/])*\*/", logos::skip)]
    BlockComment,
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Whitespace,

    #[error]
    Error,
}

impl<'a> Token<'a> {
    /// Token text. Quoted strings are returned without their quotes.
    pub(crate) fn text(&self) -> &'a str {
        match *self {
            Token::LCurly => "{",
            Token::RCurly => "}",
            Token::Str(s) => &s[1..s.len() - 1],
            Token::Int(s) | Token::Float(s) | Token::Name(s) => s,
            Token::LineComment | Token::BlockComment | Token::Whitespace | Token::Error => "",
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Str(_) => write!(f, "string \"{}\"", self.text()),
            _ => write!(f, "`{}`", self.text()),
        }
    }
}

pub(crate) type SpannedToken<'a> = (Token<'a>, Span);

/// 1-based line and column of a position in a source file.
///
/// Columns count characters, not bytes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

struct LineMap {
    lines: Vec<usize>,
}

impl LineMap {
    fn new(source: &str) -> Self {
        let mut lines = vec![0];
        for (i, c) in source.char_indices() {
            if c == '\n' {
                lines.push(i + 1);
            }
        }
        Self { lines }
    }

    fn location(&self, source: &str, offset: usize) -> Location {
        let line = self.lines.binary_search(&offset).unwrap_or_else(|i| i - 1);
        let column = source[self.lines[line]..offset].chars().count() + 1;
        Location {
            line: line as u32 + 1,
            column: column as u32,
        }
    }
}

/// Sequential token reader over one loaded file.
pub(crate) struct Lexer<'a> {
    file: &'a str,
    source: &'a str,
    tokens: Peekable<logos::SpannedIter<'a, Token<'a>>>,
    line_map: LineMap,
    numbers: NumberParsing,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(file: &'a str, source: &'a str, numbers: NumberParsing) -> Self {
        Lexer {
            file,
            source,
            tokens: Token::lexer(source).spanned().peekable(),
            line_map: LineMap::new(source),
            numbers,
        }
    }

    /// Reads the next token, or `None` at the end of the file.
    pub(crate) fn read_token(&mut self) -> Result<Option<SpannedToken<'a>>, Error> {
        match self.tokens.next() {
            Some((Token::Error, span)) => Err(Error::InvalidToken {
                file: self.file.to_string(),
                location: self.location(span.start),
                text: self.source[span].to_string(),
            }),
            next => Ok(next),
        }
    }

    pub(crate) fn end_of_file(&mut self) -> bool {
        self.tokens.peek().is_none()
    }

    /// Reads the next token, failing at the end of the file.
    ///
    /// `what` describes the expected token in the error message.
    pub(crate) fn expect_any(&mut self, what: &str) -> Result<SpannedToken<'a>, Error> {
        match self.read_token()? {
            Some(token) => Ok(token),
            None => Err(self.early_eof(what)),
        }
    }

    /// Reads the next token and checks that its text is `literal`.
    pub(crate) fn expect_token(&mut self, literal: &str) -> Result<(), Error> {
        let expected = format!("`{literal}`");
        let (token, span) = self.expect_any(&expected)?;
        if token.text() != literal {
            return Err(self.unexpected(&span, &expected, token));
        }
        Ok(())
    }

    pub(crate) fn parse_int(&mut self) -> Result<i64, Error> {
        let (token, span) = self.expect_any("integer")?;
        match token {
            Token::Int(text) => text.parse().map_err(|_| self.invalid_number(&span)),
            Token::Float(text) if self.numbers == NumberParsing::Lenient => {
                let value: f64 = text.parse().map_err(|_| self.invalid_number(&span))?;
                if !value.is_finite() || value < i64::MIN as f64 || value >= i64::MAX as f64 {
                    return Err(self.invalid_number(&span));
                }
                Ok(value as i64)
            }
            _ => Err(self.unexpected(&span, "integer", token)),
        }
    }

    /// Parses an element count, which must not be negative.
    pub(crate) fn parse_count(&mut self, what: &'static str) -> Result<usize, Error> {
        let start = self.tokens.peek().map(|(_, span)| span.start).unwrap_or(self.source.len());
        let value = self.parse_int()?;
        usize::try_from(value).map_err(|_| Error::InvalidCount {
            file: self.file.to_string(),
            location: self.location(start),
            what,
            value,
        })
    }

    pub(crate) fn parse_float(&mut self) -> Result<f32, Error> {
        let (token, span) = self.expect_any("number")?;
        match token {
            Token::Int(text) | Token::Float(text) => text.parse().map_err(|_| self.invalid_number(&span)),
            _ => Err(self.unexpected(&span, "number", token)),
        }
    }

    pub(crate) fn unexpected(&self, span: &Span, expected: &str, found: Token) -> Error {
        Error::Unexpected {
            file: self.file.to_string(),
            location: self.location(span.start),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    fn location(&self, offset: usize) -> Location {
        self.line_map.location(self.source, offset)
    }

    fn early_eof(&self, expected: &str) -> Error {
        Error::EarlyEof {
            file: self.file.to_string(),
            location: self.location(self.source.len()),
            expected: expected.to_string(),
        }
    }

    fn invalid_number(&self, span: &Span) -> Error {
        Error::InvalidNumber {
            file: self.file.to_string(),
            location: self.location(span.start),
            text: self.source[span.clone()].to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        Token::lexer(source).collect()
    }

    #[test]
    fn declaration_tokens() {
        let source = r#"
            // comment
            effect "spark" {
                material fx/spark /* block
                comment */
                simuation "particles/spark.sim"
            }
            -1 2.5 .5 1e3
        "#;
        assert_eq!(
            tokens(source),
            vec![
                Token::Name("effect"),
                Token::Str("\"spark\""),
                Token::LCurly,
                Token::Name("material"),
                Token::Name("fx/spark"),
                Token::Name("simuation"),
                Token::Str("\"particles/spark.sim\""),
                Token::RCurly,
                Token::Int("-1"),
                Token::Float("2.5"),
                Token::Float(".5"),
                Token::Float("1e3"),
            ]
        );
        assert_eq!(Token::Str("\"spark\"").text(), "spark");
    }

    #[test]
    fn locations() {
        let mut lexer = Lexer::new("test", "a\n  b\n", NumberParsing::Strict);
        lexer.expect_token("a").unwrap();
        let err = lexer.expect_token("c").unwrap_err();
        assert_eq!(err.location(), Some(Location { line: 2, column: 3 }));
        let err = lexer.expect_token("d").unwrap_err();
        assert!(matches!(err, Error::EarlyEof { .. }));
        assert_eq!(err.location(), Some(Location { line: 3, column: 1 }));
        assert!(lexer.end_of_file());
    }

    #[test]
    fn columns_count_characters() {
        let mut lexer = Lexer::new("test", "\"é\" x", NumberParsing::Strict);
        lexer.read_token().unwrap();
        let err = lexer.expect_token("y").unwrap_err();
        assert_eq!(err.location(), Some(Location { line: 1, column: 5 }));
    }

    #[test]
    fn path_names() {
        assert_eq!(
            tokens("material textures:fx/spark"),
            vec![Token::Name("material"), Token::Name("textures:fx/spark")]
        );
    }

    #[test]
    fn invalid_character() {
        let mut lexer = Lexer::new("test", "a @", NumberParsing::Strict);
        lexer.read_token().unwrap();
        let err = lexer.read_token().unwrap_err();
        assert!(matches!(err, Error::InvalidToken { ref text, .. } if text == "@"));
    }

    #[test]
    fn integers() {
        let mut lenient = Lexer::new("test", "3 4.75 -2 x", NumberParsing::Lenient);
        assert_eq!(lenient.parse_int().unwrap(), 3);
        assert_eq!(lenient.parse_int().unwrap(), 4);
        assert_eq!(lenient.parse_int().unwrap(), -2);
        assert!(matches!(lenient.parse_int(), Err(Error::Unexpected { .. })));

        let mut lenient = Lexer::new("test", "1e30 -1e19 9.3e18", NumberParsing::Lenient);
        assert!(matches!(lenient.parse_int(), Err(Error::InvalidNumber { ref text, .. }) if text == "1e30"));
        assert!(matches!(lenient.parse_int(), Err(Error::InvalidNumber { .. })));
        assert!(matches!(lenient.parse_int(), Err(Error::InvalidNumber { .. })));

        let mut strict = Lexer::new("test", "4.75", NumberParsing::Strict);
        assert!(matches!(strict.parse_int(), Err(Error::Unexpected { .. })));
    }

    #[test]
    fn negative_count() {
        let mut lexer = Lexer::new("test", "-1", NumberParsing::Strict);
        let err = lexer.parse_count("frame").unwrap_err();
        assert!(matches!(err, Error::InvalidCount { what: "frame", value: -1, .. }));
    }

    #[test]
    fn floats() {
        let mut lexer = Lexer::new("test", "1 -2.5 3e2 {", NumberParsing::Strict);
        assert_eq!(lexer.parse_float().unwrap(), 1.0);
        assert_eq!(lexer.parse_float().unwrap(), -2.5);
        assert_eq!(lexer.parse_float().unwrap(), 300.0);
        assert!(matches!(lexer.parse_float(), Err(Error::Unexpected { .. })));
        assert!(matches!(lexer.parse_float(), Err(Error::EarlyEof { .. })));
    }
}
