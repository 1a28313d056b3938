//! Лексер GraphDSL.
//!
//! Работает в два слоя: `logos` разбирает сырые лексемы, а [`Lexer`]
//! поверх них восстанавливает разметку строк: концы логических строк,
//! пустые строки и блоки отступов.

use std::collections::VecDeque;

use logos::Logos;

use super::error::ParseError;
use super::token::{Span, Spanned, Token};

/// Количество строк заголовка, которые занимает встраивающая конструкция
/// (декоратор и объявление функции).
pub const HOST_PREAMBLE_LINES: usize = 2;

/// Внутренние токены для logos.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\f]+")] // Пропускаем пробелы (кроме \n)
#[logos(skip r"#[^\n]*")] // Комментарии до конца строки
#[logos(skip r"\\\r?\n")] // Явное продолжение строки
enum LogosToken {
    #[token("\n")]
    Newline,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token("=")]
    Assign,
    #[token("-")]
    Minus,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,

    // Float (должен быть до Int для правильного приоритета)
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    Float(f64),

    // Integer
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),

    // Hex integer
    #[regex(r"0[xX][0-9a-fA-F]+", |lex| i64::from_str_radix(&lex.slice()[2..], 16).ok())]
    HexInt(i64),

    // Binary integer
    #[regex(r"0[bB][01]+", |lex| i64::from_str_radix(&lex.slice()[2..], 2).ok())]
    BinInt(i64),

    // Строки в двойных и одинарных кавычках
    #[regex(r#""([^"\\\n]|\\.)*""#, |lex| {
        let s = lex.slice();
        Some(unescape_string(&s[1..s.len()-1]))
    })]
    #[regex(r#"'([^'\\\n]|\\.)*'"#, |lex| {
        let s = lex.slice();
        Some(unescape_string(&s[1..s.len()-1]))
    })]
    String(String),

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Name(String),
}

/// Обработка escape-последовательностей в строке.
fn unescape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('r') => result.push('\r'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some('\'') => result.push('\''),
                Some('0') => result.push('\0'),
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Найти байтовую позицию, с которой начинается тело после `lines`
/// логических строк заголовка.
///
/// Заголовок принадлежит чужой конструкции, поэтому он просматривается
/// посимвольно: учитываются только скобки, строки и комментарии.
fn preamble_end(source: &str, lines: usize) -> usize {
    if lines == 0 {
        return 0;
    }

    let mut seen = 0;
    let mut depth = 0usize;
    let mut has_content = false;
    let mut quote: Option<char> = None;
    let mut comment = false;
    let mut chars = source.char_indices();

    while let Some((idx, c)) = chars.next() {
        if let Some(q) = quote {
            match c {
                '\\' => {
                    chars.next();
                }
                '\n' => quote = None,
                _ if c == q => quote = None,
                _ => {}
            }
            if c != '\n' {
                continue;
            }
        }

        match c {
            '\n' => {
                comment = false;
                if depth == 0 && has_content {
                    seen += 1;
                    has_content = false;
                    if seen == lines {
                        return idx + 1;
                    }
                }
            }
            _ if comment => {}
            '#' => comment = true,
            '"' | '\'' => {
                quote = Some(c);
                has_content = true;
            }
            '(' | '[' | '{' => {
                depth += 1;
                has_content = true;
            }
            ')' | ']' | '}' => {
                depth = depth.saturating_sub(1);
                has_content = true;
            }
            c if c.is_whitespace() => {}
            _ => has_content = true,
        }
    }

    source.len()
}

/// Шаг табуляции при измерении отступа.
const TAB_SIZE: usize = 8;

/// Ширина отступа строки.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct IndentWidth {
    /// Табуляция выравнивает до следующего кратного [`TAB_SIZE`].
    columns: usize,
    /// Табуляция считается одной колонкой.
    tabs_as_one: usize,
}

impl IndentWidth {
    fn measure(prefix: &str) -> Self {
        prefix.chars().fold(Self::default(), |width, c| match c {
            '\t' => Self {
                columns: (width.columns / TAB_SIZE + 1) * TAB_SIZE,
                tabs_as_one: width.tabs_as_one + 1,
            },
            '\x0c' => Self::default(),
            _ => Self {
                columns: width.columns + 1,
                tabs_as_one: width.tabs_as_one + 1,
            },
        })
    }
}

/// Лексер GraphDSL.
pub struct Lexer<'a> {
    logos: logos::Lexer<'a, LogosToken>,
    source: &'a str,
    /// Смещение тела относительно полного текста.
    offset: usize,
    pending: VecDeque<Spanned<Token>>,
    /// Стек отступов, всегда начинается с `(0, 0)`.
    indents: Vec<IndentWidth>,
    /// Глубина вложенности `(` и `{`.
    depth: usize,
    line_start: usize,
    at_line_start: bool,
    line_has_content: bool,
    finished: bool,
    emitted_eof: bool,
}

impl<'a> Lexer<'a> {
    /// Создать новый лексер.
    pub fn new(source: &'a str) -> Self {
        Self::with_preamble(source, 0)
    }

    /// Создать лексер, пропускающий `lines` логических строк заголовка.
    pub fn with_preamble(source: &'a str, lines: usize) -> Self {
        let offset = preamble_end(source, lines);
        let body = &source[offset..];

        Self {
            logos: LogosToken::lexer(body),
            source,
            offset,
            pending: VecDeque::new(),
            indents: vec![IndentWidth::default()],
            depth: 0,
            line_start: 0,
            at_line_start: true,
            line_has_content: false,
            finished: false,
            emitted_eof: false,
        }
    }

    /// Получить следующий токен.
    ///
    /// После [`Token::Eof`] лексер продолжает отдавать `Eof`.
    pub fn next_token(&mut self) -> Result<Spanned<Token>, ParseError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }
            if self.finished {
                return Ok(Spanned::new(Token::Eof, Span::at(self.source.len())));
            }
            self.fill()?;
        }
    }

    fn span(&self, start: usize, end: usize) -> Span {
        Span::new(self.offset + start, self.offset + end)
    }

    /// Прочитать одну сырую лексему и положить результат в очередь.
    fn fill(&mut self) -> Result<(), ParseError> {
        let raw = match self.logos.next() {
            Some(raw) => raw,
            None => {
                self.finish();
                return Ok(());
            }
        };

        let range = self.logos.span();
        let span = self.span(range.start, range.end);

        let raw = match raw {
            Ok(raw) => raw,
            Err(()) => return Err(self.classify_error(span)),
        };

        if raw == LogosToken::Newline {
            if self.depth > 0 {
                return Ok(());
            }
            let token = if self.line_has_content {
                Token::LineEnd
            } else {
                Token::Newline
            };
            self.pending.push_back(Spanned::new(token, span));
            self.line_has_content = false;
            self.at_line_start = true;
            self.line_start = range.end;
            return Ok(());
        }

        if self.at_line_start {
            self.at_line_start = false;
            let prefix = &self.source[self.offset + self.line_start..self.offset + range.start];
            self.layout_indent(IndentWidth::measure(prefix), span)?;
        }

        let token = match raw {
            LogosToken::Newline => Token::Newline,
            LogosToken::LParen => {
                self.depth += 1;
                Token::LParen
            }
            LogosToken::LBrace => {
                self.depth += 1;
                Token::LBrace
            }
            LogosToken::RParen => {
                self.depth = self.depth.saturating_sub(1);
                Token::RParen
            }
            LogosToken::RBrace => {
                self.depth = self.depth.saturating_sub(1);
                Token::RBrace
            }
            LogosToken::Colon => Token::Colon,
            LogosToken::Comma => Token::Comma,
            LogosToken::Assign => Token::Assign,
            LogosToken::Minus => Token::Minus,
            LogosToken::Lt => Token::Lt,
            LogosToken::Gt => Token::Gt,
            LogosToken::Float(f) => Token::Float(f),
            LogosToken::Int(n) | LogosToken::HexInt(n) | LogosToken::BinInt(n) => Token::Int(n),
            LogosToken::String(s) => Token::String(s),
            LogosToken::Name(s) => Token::Name(s),
        };

        self.line_has_content = true;
        self.pending.push_back(Spanned::new(token, span));
        Ok(())
    }

    /// Сравнить ширину отступа со стеком и выпустить Indent/Dedent.
    ///
    /// Обе ширины должны упорядочивать строки одинаково, иначе смесь
    /// табуляций и пробелов неоднозначна.
    fn layout_indent(&mut self, width: IndentWidth, span: Span) -> Result<(), ParseError> {
        let marker = Span::at(span.start);
        let top = self.indents.last().copied().unwrap_or_default();

        if width.columns > top.columns {
            if width.tabs_as_one <= top.tabs_as_one {
                return Err(ParseError::InconsistentIndent { span });
            }
            self.indents.push(width);
            self.pending.push_back(Spanned::new(Token::Indent, marker));
            return Ok(());
        }

        while self
            .indents
            .last()
            .is_some_and(|level| level.columns > width.columns)
        {
            self.indents.pop();
            self.pending.push_back(Spanned::new(Token::Dedent, marker));
        }

        if self.indents.last().copied().unwrap_or_default() != width {
            return Err(ParseError::InconsistentIndent { span });
        }
        Ok(())
    }

    /// Закрыть последнюю строку и все открытые блоки.
    fn finish(&mut self) {
        let end = Span::at(self.source.len());
        if self.line_has_content {
            self.pending.push_back(Spanned::new(Token::LineEnd, end));
            self.line_has_content = false;
        }
        while self.indents.len() > 1 {
            self.indents.pop();
            self.pending.push_back(Spanned::new(Token::Dedent, end));
        }
        self.pending.push_back(Spanned::new(Token::Eof, end));
        self.finished = true;
    }

    fn classify_error(&self, span: Span) -> ParseError {
        let slice = self.logos.slice();
        match slice.chars().next() {
            Some(c) if c.is_ascii_digit() => {
                ParseError::invalid_literal(span, format!("malformed number '{}'", slice))
            }
            _ => ParseError::LexerError { span },
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Spanned<Token>, ParseError>;

    /// Последовательность заканчивается после выдачи [`Token::Eof`].
    fn next(&mut self) -> Option<Self::Item> {
        if self.emitted_eof {
            return None;
        }
        let token = self.next_token();
        match &token {
            Ok(Spanned {
                value: Token::Eof, ..
            })
            | Err(_) => self.emitted_eof = true,
            _ => {}
        }
        Some(token)
    }
}

/// Разобрать текст в полный список токенов (включая завершающий `Eof`).
pub fn tokenize(source: &str, preamble_lines: usize) -> Result<Vec<Spanned<Token>>, ParseError> {
    Lexer::with_preamble(source, preamble_lines).collect()
}
