use alloc::format;
use alloc::vec::Vec;

use crate::Real;
use crate::error::{CalcError, Result};
use crate::types::{Constant, Function, TokenKind};

/// A token produced by the lexer.
///
/// `text` borrows the exact slice of the input the token was read from and
/// `position` is its byte offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub value: Option<Real>,
    pub text: &'src str,
    pub position: usize,
}

/// The lexer struct, which produces tokens from a normalized input string.
///
/// It is also an iterator over `Result<Token>`; after the first error the
/// iterator is exhausted.
#[derive(Clone)]
pub struct Lexer<'src> {
    input: &'src str,
    pub pos: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(input: &'src str) -> Self {
        Self { input, pos: 0 }
    }

    /// Peek at the current character.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Advance the position by one character.
    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn token(&self, kind: TokenKind, value: Option<Real>, start: usize) -> Token<'src> {
        Token {
            kind,
            value,
            text: &self.input[start..self.pos],
            position: start,
        }
    }

    /// Get the next token from the input, `Ok(None)` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token<'src>>> {
        self.skip_whitespace();
        let start = self.pos;
        let Some(c) = self.peek() else {
            return Ok(None);
        };

        let result = if c.is_ascii_digit() || c == '.' {
            self.lex_number(start)
        } else if c.is_ascii_alphabetic() {
            self.lex_identifier(start)
        } else {
            self.advance();
            match c {
                '(' => Ok(self.token(TokenKind::Open, None, start)),
                ')' => Ok(self.token(TokenKind::Close, None, start)),
                '+' | '-' | '*' | '/' | '%' | '^' => {
                    Ok(self.token(TokenKind::Operator, None, start))
                }
                _ => Err(CalcError::Tokenizer(format!(
                    "Unexpected character '{}' at position {}",
                    c, start
                ))),
            }
        };

        if result.is_err() {
            // Stop here: a failed lexer yields nothing further.
            self.pos = self.input.len();
        }
        result.map(Some)
    }

    /// Maximal run of digits and decimal points. One point at most.
    fn lex_number(&mut self, start: usize) -> Result<Token<'src>> {
        let mut saw_dot = false;
        let mut saw_digit = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                saw_digit = true;
            } else if c == '.' {
                if saw_dot {
                    self.advance();
                    while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '.') {
                        self.advance();
                    }
                    return Err(CalcError::Tokenizer(format!(
                        "Malformed number '{}' at position {}: more than one decimal point",
                        &self.input[start..self.pos],
                        start
                    )));
                }
                saw_dot = true;
            } else {
                break;
            }
            self.advance();
        }

        let text = &self.input[start..self.pos];
        if !saw_digit {
            return Err(CalcError::Tokenizer(format!(
                "Malformed number '{}' at position {}",
                text, start
            )));
        }

        let value: Real = text.parse().map_err(|_| {
            CalcError::Tokenizer(format!("Malformed number '{}' at position {}", text, start))
        })?;
        if !value.is_finite() {
            return Err(CalcError::Overflow(format!(
                "Number literal at position {} is out of range",
                start
            )));
        }
        Ok(self.token(TokenKind::Number, Some(value), start))
    }

    /// Maximal run of ASCII letters, which must name a function or a constant.
    fn lex_identifier(&mut self, start: usize) -> Result<Token<'src>> {
        while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.advance();
        }
        let name = &self.input[start..self.pos];

        if Function::from_name(name).is_some() {
            Ok(self.token(TokenKind::Function, None, start))
        } else if let Some(constant) = Constant::from_name(name) {
            Ok(self.token(TokenKind::Constant, Some(constant.value()), start))
        } else {
            Err(CalcError::Tokenizer(format!(
                "Unknown identifier '{}' at position {}",
                name, start
            )))
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Token<'src>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Tokenize a whole normalized expression.
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>> {
    Lexer::new(input).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_numbers() {
        let tokens = tokenize("12 3.25 .5 7.").unwrap();
        let values: Vec<Real> = tokens.iter().filter_map(|t| t.value).collect();
        assert_eq!(values, [12.0, 3.25, 0.5, 7.0]);
        assert_eq!(tokens[1].text, "3.25");
        assert_eq!(tokens[1].position, 3);
    }

    #[test]
    fn test_operators_and_groups() {
        use TokenKind::*;
        assert_eq!(
            kinds("(1+2)*3/4-5^6%7"),
            [
                Open, Number, Operator, Number, Close, Operator, Number, Operator, Number,
                Operator, Number, Operator, Number, Operator, Number
            ]
        );
    }

    #[test]
    fn test_functions_and_constants() {
        use TokenKind::*;
        let tokens = tokenize("asin(pi) + e").unwrap();
        assert_eq!(tokens[0].kind, Function);
        assert_eq!(tokens[0].text, "asin");
        assert_eq!(tokens[2].kind, Constant);
        assert_eq!(tokens[2].value, Some(crate::constants::PI));
        assert_eq!(tokens[5].kind, Constant);
    }

    #[test]
    fn test_identifier_run_stops_at_digits() {
        // "log10" is "log" followed by the literal 10; the parser rejects it later
        use TokenKind::*;
        assert_eq!(kinds("log10"), [Function, Number]);
    }

    #[test]
    fn test_malformed_numbers() {
        let err = tokenize("1.2.3").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert!(matches!(err, CalcError::Tokenizer(ref msg) if msg.contains("1.2.3")));

        assert!(matches!(tokenize("."), Err(CalcError::Tokenizer(_))));
        assert!(matches!(tokenize("2+."), Err(CalcError::Tokenizer(_))));
    }

    #[test]
    fn test_unknown_input() {
        assert!(matches!(tokenize("2&3"), Err(CalcError::Tokenizer(_))));
        assert!(matches!(tokenize("foo(1)"), Err(CalcError::Tokenizer(_))));
        assert!(matches!(tokenize("SIN(1)"), Err(CalcError::Tokenizer(_))));
        assert!(matches!(tokenize("2×3"), Err(CalcError::Tokenizer(_))));
    }

    #[test]
    fn test_lexer_stops_after_error() {
        let mut lexer = Lexer::new("1 # 2 3");
        assert!(matches!(lexer.next(), Some(Ok(_))));
        assert!(matches!(lexer.next(), Some(Err(_))));
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_huge_literal_overflows() {
        let digits: alloc::string::String = core::iter::repeat_n('9', 400).collect();
        let err = tokenize(&digits).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overflow);
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("   \t").unwrap().is_empty());
    }
}
