//! Токены и позиции для лексера GraphDSL.

use serde::{Deserialize, Serialize};

/// Позиция в исходном коде.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    /// Начальная позиция (байт).
    pub start: usize,
    /// Конечная позиция (байт).
    pub end: usize,
}

impl Span {
    /// Создать новый Span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Пустой Span в заданной позиции.
    pub fn at(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Объединить два Span.
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Токен с позицией.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(value: T, span: Span) -> Self {
        Self { value, span }
    }
}

/// Типы токенов GraphDSL.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `=`
    Assign,
    /// `-`
    Minus,
    /// `<`
    Lt,
    /// `>`
    Gt,

    /// Идентификатор
    Name(String),
    /// Строковый литерал (уже без кавычек и escape-последовательностей)
    String(String),
    /// Целое число
    Int(i64),
    /// Число с плавающей точкой
    Float(f64),

    /// Перевод строки без содержимого (пустая строка или комментарий)
    Newline,
    /// Конец логической строки
    LineEnd,
    /// Увеличение отступа (начало блока)
    Indent,
    /// Уменьшение отступа (конец блока)
    Dedent,

    /// Конец файла
    Eof,
}

/// Классификация токенов.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Name,
    String,
    Number,
    Op,
    Newline,
    LogicalEnd,
    BlockStart,
    BlockEnd,
    End,
}

impl Token {
    /// Получить класс токена.
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::LParen
            | Token::RParen
            | Token::LBrace
            | Token::RBrace
            | Token::Colon
            | Token::Comma
            | Token::Assign
            | Token::Minus
            | Token::Lt
            | Token::Gt => TokenKind::Op,
            Token::Name(_) => TokenKind::Name,
            Token::String(_) => TokenKind::String,
            Token::Int(_) | Token::Float(_) => TokenKind::Number,
            Token::Newline => TokenKind::Newline,
            Token::LineEnd => TokenKind::LogicalEnd,
            Token::Indent => TokenKind::BlockStart,
            Token::Dedent => TokenKind::BlockEnd,
            Token::Eof => TokenKind::End,
        }
    }

    /// Проверить, завершает ли токен оператор (конец строки или файла).
    pub fn ends_statement(&self) -> bool {
        matches!(self, Token::LineEnd | Token::Eof)
    }

    /// Проверить, является ли токен разметкой (не содержимым).
    pub fn is_layout(&self) -> bool {
        matches!(
            self,
            Token::Newline | Token::LineEnd | Token::Indent | Token::Dedent
        )
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::Colon => write!(f, ":"),
            Token::Comma => write!(f, ","),
            Token::Assign => write!(f, "="),
            Token::Minus => write!(f, "-"),
            Token::Lt => write!(f, "<"),
            Token::Gt => write!(f, ">"),
            Token::Name(s) => write!(f, "{}", s),
            Token::String(s) => write!(f, "{:?}", s),
            Token::Int(n) => write!(f, "{}", n),
            Token::Float(n) => write!(f, "{}", n),
            Token::Newline => write!(f, "newline"),
            Token::LineEnd => write!(f, "end of line"),
            Token::Indent => write!(f, "indent"),
            Token::Dedent => write!(f, "dedent"),
            Token::Eof => write!(f, "EOF"),
        }
    }
}
