//! Курсор по списку токенов для рекурсивного спуска.

use super::error::ParseError;
use super::token::{Span, Spanned, Token};

/// Поток токенов с просмотром на один токен вперёд.
///
/// Буфер всегда заканчивается [`Token::Eof`]; за его пределами курсор
/// продолжает отдавать `Eof`, поэтому парсер не обязан проверять границы.
pub struct TokenStream {
    tokens: Vec<Spanned<Token>>,
    pos: usize,
    eof: Spanned<Token>,
}

impl TokenStream {
    /// Создать поток по готовому списку токенов.
    pub fn new(tokens: Vec<Spanned<Token>>) -> Self {
        let end = tokens.last().map(|t| t.span.end).unwrap_or(0);
        Self {
            tokens,
            pos: 0,
            eof: Spanned::new(Token::Eof, Span::at(end)),
        }
    }

    /// Посмотреть на текущий токен без потребления.
    pub fn peek(&self) -> &Spanned<Token> {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    /// Потребить текущий токен.
    pub fn advance(&mut self) -> Spanned<Token> {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Проверить, совпадает ли текущий токен с ожидаемым.
    pub fn check(&self, expected: &Token) -> bool {
        &self.peek().value == expected
    }

    /// Потребить токен, если он совпадает с ожидаемым.
    pub fn eat(&mut self, expected: &Token) -> bool {
        if self.check(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Потребить ожидаемый токен или вернуть синтаксическую ошибку.
    pub fn expect(&mut self, expected: &Token) -> Result<Span, ParseError> {
        if self.check(expected) {
            Ok(self.advance().span)
        } else {
            Err(self.error(format!("'{}'", expected)))
        }
    }

    /// Ошибка "ожидалось `expected`" на текущем токене.
    pub fn error(&self, expected: impl Into<String>) -> ParseError {
        let found = self.peek();
        ParseError::unexpected_token(found.span, expected, &found.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(tokens: Vec<Token>) -> TokenStream {
        TokenStream::new(
            tokens
                .into_iter()
                .enumerate()
                .map(|(i, t)| Spanned::new(t, Span::new(i, i + 1)))
                .collect(),
        )
    }

    #[test]
    fn test_peek_does_not_consume() {
        let s = stream(vec![Token::LParen, Token::Eof]);
        assert_eq!(s.peek().value, Token::LParen);
        assert_eq!(s.peek().value, Token::LParen);
    }

    #[test]
    fn test_advance_past_end_yields_eof() {
        let mut s = stream(vec![Token::Comma]);
        assert_eq!(s.advance().value, Token::Comma);
        assert_eq!(s.peek().value, Token::Eof);
        assert_eq!(s.advance().value, Token::Eof);
        assert_eq!(s.advance().value, Token::Eof);
    }

    #[test]
    fn test_expect_reports_found_token() {
        let mut s = stream(vec![Token::Colon, Token::Eof]);
        let err = s.expect(&Token::RParen).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                span: Span::new(0, 1),
                expected: "')'".to_string(),
                found: ":".to_string(),
            }
        );
        assert!(s.eat(&Token::Colon));
        assert!(matches!(
            s.expect(&Token::RParen),
            Err(ParseError::UnexpectedEof { .. })
        ));
    }
}
