//! Парсер GraphDSL (рекурсивный спуск).

use super::error::ParseError;
use super::stream::TokenStream;
use super::token::{Span, Spanned, Token};
use crate::ast::{EdgeDirection, GraphDef, GraphStmt, LeftMarker, RightMarker, ValueExpr};
use crate::config::CompileOptions;
use crate::value::{Properties, Scalar};

/// Превратить умолчания конфигурации в литералы AST.
fn literals(params: &Properties<Scalar>) -> Properties<ValueExpr> {
    params
        .iter()
        .map(|(k, v)| (k.clone(), ValueExpr::Literal(v.clone())))
        .collect()
}

/// Парсер GraphDSL.
///
/// Умолчания и ориентированность графа фиксируются при создании: парсер
/// подмешивает свойства по умолчанию в каждый узел и ребро и отвергает рёбра
/// с неподходящим направлением.
pub struct Parser {
    stream: TokenStream,
    directed: bool,
    default_node_params: Properties<ValueExpr>,
    default_edge_params: Properties<ValueExpr>,
}

impl Parser {
    /// Создать парсер по списку токенов.
    pub fn new(tokens: Vec<Spanned<Token>>, options: &CompileOptions) -> Self {
        Self {
            stream: TokenStream::new(tokens),
            directed: options.directed,
            default_node_params: literals(&options.default_node_params),
            default_edge_params: literals(&options.default_edge_params),
        }
    }

    /// Распарсить всю программу.
    ///
    /// Разметка (пустые строки, концы строк, отступы) на верхнем уровне
    /// пропускается.
    pub fn parse_graph(&mut self) -> Result<GraphDef, ParseError> {
        let mut statements = Vec::new();

        loop {
            let token = self.stream.peek();
            match &token.value {
                Token::Eof => break,
                t if t.is_layout() => {
                    self.stream.advance();
                }
                _ => {
                    statements.push(self.parse_statement()?);
                    if !self.stream.peek().value.ends_statement() {
                        return Err(self.stream.error("end of line"));
                    }
                }
            }
        }

        Ok(GraphDef::new(statements))
    }

    /// Распарсить один оператор.
    ///
    /// Цепочки рёбер правоассоциативны: правая часть ребра разбирается как
    /// полный оператор, поэтому `a -> b -> c` даёт `Edge(a, Edge(b, c))`.
    pub fn parse_statement(&mut self) -> Result<GraphStmt, ParseError> {
        // Длинные цепочки рёбер дают глубокую рекурсию
        stacker::maybe_grow(256 * 1024, 8 * 1024 * 1024, || self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<GraphStmt, ParseError> {
        let token = self.stream.advance();

        let primary = match token.value {
            Token::Name(name) => match self.stream.peek().value {
                // a = ...
                Token::Assign => {
                    self.stream.advance();
                    return Ok(GraphStmt::assign(name, self.parse_statement()?));
                }
                // a := ...
                Token::Colon => {
                    self.stream.advance();
                    self.stream.expect(&Token::Assign)?;
                    return Ok(GraphStmt::assign(name, self.parse_statement()?));
                }
                _ => GraphStmt::get(name),
            },
            Token::LParen => self.parse_nodedef()?,
            other => {
                return Err(ParseError::unexpected_token(
                    token.span,
                    "name or '('",
                    &other,
                ))
            }
        };

        match self.stream.peek().value {
            Token::Minus | Token::Lt => self.parse_edge(primary),
            _ => Ok(primary),
        }
    }

    /// Распарсить тело узла (после открывающей скобки).
    fn parse_nodedef(&mut self) -> Result<GraphStmt, ParseError> {
        let mut data = self.default_node_params.clone();

        if self.stream.eat(&Token::RParen) {
            return Ok(GraphStmt::node(None, data));
        }

        let value = if self.stream.check(&Token::Comma) {
            None
        } else {
            Some(self.parse_value()?)
        };

        if self.stream.eat(&Token::Comma) {
            data.extend(self.parse_dict()?);
            self.stream.expect(&Token::RParen)?;
        } else if !self.stream.eat(&Token::RParen) {
            return Err(self.stream.error("',' or ')'"));
        }

        Ok(GraphStmt::node(value, data))
    }

    /// Распарсить значение: имя параметра, строку или число.
    fn parse_value(&mut self) -> Result<ValueExpr, ParseError> {
        let token = self.stream.advance();
        match token.value {
            Token::Name(name) => Ok(ValueExpr::Param(name)),
            Token::String(s) => Ok(ValueExpr::literal(s)),
            Token::Int(n) => Ok(ValueExpr::literal(n)),
            Token::Float(f) => Ok(ValueExpr::literal(f)),
            other => Err(ParseError::unexpected_token(token.span, "value", &other)),
        }
    }

    /// Распарсить словарь свойств `{key: value, ...}`.
    fn parse_dict(&mut self) -> Result<Properties<ValueExpr>, ParseError> {
        self.stream.expect(&Token::LBrace)?;
        let mut data = Properties::new();

        loop {
            if self.stream.eat(&Token::RBrace) {
                break;
            }

            let token = self.stream.advance();
            let key = match token.value {
                Token::Name(s) | Token::String(s) => s,
                other => {
                    return Err(ParseError::unexpected_token(
                        token.span,
                        "key or '}'",
                        &other,
                    ))
                }
            };
            self.stream.expect(&Token::Colon)?;
            let value = self.parse_value()?;
            data.insert(key, value);

            if self.stream.eat(&Token::Comma) {
                continue;
            }
            if !self.stream.eat(&Token::RBrace) {
                return Err(self.stream.error("',' or '}'"));
            }
            break;
        }

        Ok(data)
    }

    /// Распарсить ребро и его правую часть.
    fn parse_edge(&mut self, left: GraphStmt) -> Result<GraphStmt, ParseError> {
        let token = self.stream.advance();
        let start = token.span;
        let left_marker = match token.value {
            Token::Minus => LeftMarker::Dash,
            Token::Lt => LeftMarker::Lt,
            other => return Err(ParseError::unexpected_token(start, "'-' or '<'", &other)),
        };

        let mut data = self.default_edge_params.clone();
        data.extend(self.parse_dict()?);

        let token = self.stream.advance();
        let end = token.span;
        let right_marker = match (left_marker, token.value) {
            (LeftMarker::Dash, Token::Gt) => RightMarker::Gt,
            (LeftMarker::Dash, Token::Minus) => RightMarker::Dash,
            (LeftMarker::Dash, other) => {
                return Err(ParseError::unexpected_token(end, "'>' or '-'", &other))
            }
            (LeftMarker::Lt, Token::Minus) => RightMarker::Dash,
            (LeftMarker::Lt, other) => return Err(ParseError::unexpected_token(end, "'-'", &other)),
        };

        let direction = match (left_marker, right_marker) {
            (LeftMarker::Dash, RightMarker::Dash) => EdgeDirection::Undirected,
            (LeftMarker::Lt, _) => EdgeDirection::Backward,
            _ => EdgeDirection::Forward,
        };
        self.check_direction(direction, start.merge(end))?;

        let right = self.parse_statement()?;
        Ok(GraphStmt::edge(left, right, data, left_marker, right_marker))
    }

    fn check_direction(&self, direction: EdgeDirection, span: Span) -> Result<(), ParseError> {
        match (self.directed, direction) {
            (true, EdgeDirection::Undirected) => Err(ParseError::direction_mismatch(
                span,
                "undirected edge in directed graph",
            )),
            (false, EdgeDirection::Forward | EdgeDirection::Backward) => Err(
                ParseError::direction_mismatch(span, "directed edge in undirected graph"),
            ),
            _ => Ok(()),
        }
    }
}
