//! Интерфейс бэкенда, материализующего граф.
//!
//! Построитель ничего не знает о представлении графа: он только вызывает
//! методы [`Backend`] в порядке исполнения программы.

use crate::error::GraphResult;
use crate::value::{Properties, Scalar};

/// Бэкенд построения графа.
///
/// Один экземпляр обслуживает одно построение за раз (`&mut self`).
pub trait Backend {
    /// Дескриптор графа.
    type Graph;
    /// Дескриптор узла, выданный бэкендом.
    type Node: Clone;

    /// Создать пустой ориентированный граф.
    fn create_directed_graph(&mut self) -> GraphResult<Self::Graph>;

    /// Создать пустой неориентированный граф.
    fn create_undirected_graph(&mut self) -> GraphResult<Self::Graph>;

    /// Добавить узел. `value` отсутствует у пустого узла `()`.
    fn add_node(
        &mut self,
        graph: &mut Self::Graph,
        value: Option<Scalar>,
        data: Properties<Scalar>,
    ) -> GraphResult<Self::Node>;

    /// Добавить ребро `from -> to`.
    fn add_edge(
        &mut self,
        graph: &mut Self::Graph,
        from: &Self::Node,
        to: &Self::Node,
        data: Properties<Scalar>,
    ) -> GraphResult<()>;
}

/// Вызов бэкенда, записанный [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    CreateDirected {
        graph: usize,
    },
    CreateUndirected {
        graph: usize,
    },
    AddNode {
        graph: usize,
        node: usize,
        value: Option<Scalar>,
        data: Properties<Scalar>,
    },
    AddEdge {
        graph: usize,
        from: usize,
        to: usize,
        data: Properties<Scalar>,
    },
}

/// Бэкенд "всухую": ничего не строит, только записывает вызовы.
///
/// Графы и узлы нумеруются с 1 в порядке создания.
#[derive(Debug, Default, Clone)]
pub struct RecordingBackend {
    pub calls: Vec<BackendCall>,
    graphs: usize,
    nodes: usize,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Записанные вызовы `add_node`: `(node, value, data)`.
    pub fn added_nodes(&self) -> Vec<(usize, Option<&Scalar>, &Properties<Scalar>)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::AddNode {
                    node, value, data, ..
                } => Some((*node, value.as_ref(), data)),
                _ => None,
            })
            .collect()
    }

    /// Записанные вызовы `add_edge`: `(from, to, data)`.
    pub fn added_edges(&self) -> Vec<(usize, usize, &Properties<Scalar>)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::AddEdge { from, to, data, .. } => Some((*from, *to, data)),
                _ => None,
            })
            .collect()
    }
}

impl Backend for RecordingBackend {
    type Graph = usize;
    type Node = usize;

    fn create_directed_graph(&mut self) -> GraphResult<usize> {
        self.graphs += 1;
        self.calls.push(BackendCall::CreateDirected { graph: self.graphs });
        Ok(self.graphs)
    }

    fn create_undirected_graph(&mut self) -> GraphResult<usize> {
        self.graphs += 1;
        self.calls
            .push(BackendCall::CreateUndirected { graph: self.graphs });
        Ok(self.graphs)
    }

    fn add_node(
        &mut self,
        graph: &mut usize,
        value: Option<Scalar>,
        data: Properties<Scalar>,
    ) -> GraphResult<usize> {
        self.nodes += 1;
        self.calls.push(BackendCall::AddNode {
            graph: *graph,
            node: self.nodes,
            value,
            data,
        });
        Ok(self.nodes)
    }

    fn add_edge(
        &mut self,
        graph: &mut usize,
        from: &usize,
        to: &usize,
        data: Properties<Scalar>,
    ) -> GraphResult<()> {
        self.calls.push(BackendCall::AddEdge {
            graph: *graph,
            from: *from,
            to: *to,
            data,
        });
        Ok(())
    }
}
