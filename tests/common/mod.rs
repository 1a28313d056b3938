//! Общие помощники для интеграционных тестов.

#![allow(dead_code)]

use graphdsl::ast::{GraphStmt, LeftMarker, RightMarker, ValueExpr};
use graphdsl::Properties;

/// Включить логирование в тестах (RUST_LOG=trace cargo test).
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn lit(value: impl Into<graphdsl::Scalar>) -> ValueExpr {
    ValueExpr::literal(value)
}

pub fn props<const N: usize>(pairs: [(&str, ValueExpr); N]) -> Properties<ValueExpr> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

pub fn node(value: impl Into<graphdsl::Scalar>) -> GraphStmt {
    GraphStmt::node(Some(lit(value)), Properties::new())
}

pub fn node_with(value: impl Into<graphdsl::Scalar>, data: Properties<ValueExpr>) -> GraphStmt {
    GraphStmt::node(Some(lit(value)), data)
}

pub fn forward(left: GraphStmt, right: GraphStmt, data: Properties<ValueExpr>) -> GraphStmt {
    GraphStmt::edge(left, right, data, LeftMarker::Dash, RightMarker::Gt)
}
