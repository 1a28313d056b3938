//! Конфигурация компиляции.

use crate::parser::lexer::HOST_PREAMBLE_LINES;
use crate::value::{Properties, Scalar};

/// Параметры компиляции, общие для всех построений одного определения.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileOptions {
    /// Ориентированный граф (по умолчанию) или неориентированный.
    pub directed: bool,
    /// Свойства, подмешиваемые в каждый узел.
    pub default_node_params: Properties<Scalar>,
    /// Свойства, подмешиваемые в каждое ребро.
    pub default_edge_params: Properties<Scalar>,
    /// Сколько логических строк заголовка пропустить перед телом.
    pub preamble_lines: usize,
    /// Выводить список токенов в лог перед разбором.
    pub debug_tokens: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            directed: true,
            default_node_params: Properties::new(),
            default_edge_params: Properties::new(),
            preamble_lines: 0,
            debug_tokens: false,
        }
    }
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Параметры для текста, встроенного в конструкцию хоста
    /// (заголовок из [`HOST_PREAMBLE_LINES`] строк).
    pub fn embedded() -> Self {
        Self {
            preamble_lines: HOST_PREAMBLE_LINES,
            ..Self::default()
        }
    }

    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    pub fn undirected(self) -> Self {
        self.directed(false)
    }

    pub fn debug_tokens(mut self, enabled: bool) -> Self {
        self.debug_tokens = enabled;
        self
    }

    pub fn node_default(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.default_node_params.insert(key.into(), value.into());
        self
    }

    pub fn edge_default(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.default_edge_params.insert(key.into(), value.into());
        self
    }
}
