//! Абстрактное синтаксическое дерево программы GraphDSL.
//!
//! Дерево неизменяемо после компиляции и сравнивается структурно,
//! поэтому один `GraphDef` можно разделять между любым числом построений.

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};
use crate::value::{Properties, Scalar};

/// Выражение значения.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValueExpr {
    /// Литерал, известный при компиляции.
    Literal(Scalar),
    /// Ссылка на внешний параметр построения.
    Param(String),
}

impl ValueExpr {
    pub fn literal(value: impl Into<Scalar>) -> Self {
        ValueExpr::Literal(value.into())
    }

    pub fn param(name: impl Into<String>) -> Self {
        ValueExpr::Param(name.into())
    }
}

/// Левая метка ребра: `-{` или `<{`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeftMarker {
    Dash,
    Lt,
}

/// Правая метка ребра: `}-` или `}>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RightMarker {
    Dash,
    Gt,
}

/// Направление ребра, заданное парой меток.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeDirection {
    /// `-{}>`
    Forward,
    /// `<{}-`
    Backward,
    /// `-{}-`
    Undirected,
}

/// Оператор GraphDSL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GraphStmt {
    /// Анонимный узел: `(value, {key: value})`.
    NodeDef {
        value: Option<ValueExpr>,
        data: Properties<ValueExpr>,
    },
    /// Ссылка на ранее связанное имя.
    GetNode { name: String },
    /// Связывание имени с результатом оператора.
    Assignation { name: String, value: Box<GraphStmt> },
    /// Ребро; `right` может само быть ребром (цепочка).
    Edge {
        left: Box<GraphStmt>,
        right: Box<GraphStmt>,
        data: Properties<ValueExpr>,
        left_marker: LeftMarker,
        right_marker: RightMarker,
    },
}

impl GraphStmt {
    pub fn node(value: Option<ValueExpr>, data: Properties<ValueExpr>) -> Self {
        GraphStmt::NodeDef { value, data }
    }

    pub fn get(name: impl Into<String>) -> Self {
        GraphStmt::GetNode { name: name.into() }
    }

    pub fn assign(name: impl Into<String>, value: GraphStmt) -> Self {
        GraphStmt::Assignation {
            name: name.into(),
            value: Box::new(value),
        }
    }

    pub fn edge(
        left: GraphStmt,
        right: GraphStmt,
        data: Properties<ValueExpr>,
        left_marker: LeftMarker,
        right_marker: RightMarker,
    ) -> Self {
        GraphStmt::Edge {
            left: Box::new(left),
            right: Box::new(right),
            data,
            left_marker,
            right_marker,
        }
    }

    /// Направление ребра; `None` для остальных операторов и для
    /// недопустимой пары `<{}>`.
    pub fn direction(&self) -> Option<EdgeDirection> {
        match self {
            GraphStmt::Edge {
                left_marker,
                right_marker,
                ..
            } => match (left_marker, right_marker) {
                (LeftMarker::Dash, RightMarker::Gt) => Some(EdgeDirection::Forward),
                (LeftMarker::Lt, RightMarker::Dash) => Some(EdgeDirection::Backward),
                (LeftMarker::Dash, RightMarker::Dash) => Some(EdgeDirection::Undirected),
                (LeftMarker::Lt, RightMarker::Gt) => None,
            },
            _ => None,
        }
    }

    /// Переложить вложенные операторы в `out`, оставив на их месте пустышки.
    fn detach_children(&mut self, out: &mut Vec<GraphStmt>) {
        let mut detach = |slot: &mut Box<GraphStmt>| {
            if matches!(**slot, GraphStmt::Assignation { .. } | GraphStmt::Edge { .. }) {
                out.push(std::mem::replace(
                    &mut **slot,
                    GraphStmt::GetNode {
                        name: String::new(),
                    },
                ));
            }
        };

        match self {
            GraphStmt::Assignation { value, .. } => detach(value),
            GraphStmt::Edge { left, right, .. } => {
                detach(left);
                detach(right);
            }
            GraphStmt::NodeDef { .. } | GraphStmt::GetNode { .. } => {}
        }
    }
}

// Цепочка рёбер вложена на всю свою длину; разбираем её итеративно,
// чтобы не переполнить стек.
impl Drop for GraphStmt {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut stmt) = pending.pop() {
            stmt.detach_children(&mut pending);
        }
    }
}

/// Скомпилированная программа: операторы в порядке исполнения.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDef {
    pub statements: Vec<GraphStmt>,
}

impl GraphDef {
    pub fn new(statements: Vec<GraphStmt>) -> Self {
        Self { statements }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Сериализовать дерево в JSON (для отладки и снапшотов).
    pub fn to_json(&self) -> GraphResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| GraphError::SerializationError(e.to_string()))
    }

    /// Восстановить дерево из JSON.
    pub fn from_json(json: &str) -> GraphResult<Self> {
        serde_json::from_str(json).map_err(|e| GraphError::SerializationError(e.to_string()))
    }
}
