//! Ошибки компиляции.

use super::token::{Span, Token};
use thiserror::Error;

/// Фаза компиляции, в которой возникла ошибка.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lex,
    Syntax,
    Semantic,
}

/// Ошибка компиляции.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Неизвестный символ или незакрытая строка.
    #[error("Lexer error at position {}: unexpected character", span.start)]
    LexerError { span: Span },

    /// Неверный литерал.
    #[error("Invalid literal at position {}: {message}", span.start)]
    InvalidLiteral { span: Span, message: String },

    /// Отступ не совпадает ни с одним внешним уровнем.
    #[error("Inconsistent indentation at position {}", span.start)]
    InconsistentIndent { span: Span },

    /// Неожиданный токен.
    #[error("Unexpected token at position {}: expected {expected}, found {found}", span.start)]
    UnexpectedToken {
        span: Span,
        expected: String,
        found: String,
    },

    /// Неожиданный конец ввода.
    #[error("Unexpected end of input at position {}: expected {expected}", span.start)]
    UnexpectedEof { span: Span, expected: String },

    /// Направление ребра не соответствует типу графа.
    #[error("Semantic error at position {}: {message}", span.start)]
    DirectionMismatch { span: Span, message: String },
}

impl ParseError {
    /// Создать ошибку "неожиданный токен".
    ///
    /// Конец файла превращается в [`ParseError::UnexpectedEof`].
    pub fn unexpected_token(span: Span, expected: impl Into<String>, found: &Token) -> Self {
        match found {
            Token::Eof => Self::UnexpectedEof {
                span,
                expected: expected.into(),
            },
            _ => Self::UnexpectedToken {
                span,
                expected: expected.into(),
                found: found.to_string(),
            },
        }
    }

    /// Создать ошибку "неверный литерал".
    pub fn invalid_literal(span: Span, message: impl Into<String>) -> Self {
        Self::InvalidLiteral {
            span,
            message: message.into(),
        }
    }

    /// Создать семантическую ошибку направления ребра.
    pub fn direction_mismatch(span: Span, message: impl Into<String>) -> Self {
        Self::DirectionMismatch {
            span,
            message: message.into(),
        }
    }

    /// Получить позицию ошибки.
    pub fn span(&self) -> Span {
        match self {
            Self::LexerError { span } => *span,
            Self::InvalidLiteral { span, .. } => *span,
            Self::InconsistentIndent { span } => *span,
            Self::UnexpectedToken { span, .. } => *span,
            Self::UnexpectedEof { span, .. } => *span,
            Self::DirectionMismatch { span, .. } => *span,
        }
    }

    /// Получить фазу, в которой возникла ошибка.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::LexerError { .. } | Self::InvalidLiteral { .. } | Self::InconsistentIndent { .. } => {
                ErrorKind::Lex
            }
            Self::UnexpectedToken { .. } | Self::UnexpectedEof { .. } => ErrorKind::Syntax,
            Self::DirectionMismatch { .. } => ErrorKind::Semantic,
        }
    }
}
