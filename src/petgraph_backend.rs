//! Бэкенд на petgraph: мультиграфы в памяти.

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph, StableUnGraph};

use crate::backend::Backend;
use crate::error::{GraphError, GraphResult};
use crate::value::{Properties, Scalar};

/// Вес узла: значение и свойства.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub value: Option<Scalar>,
    pub data: Properties<Scalar>,
}

/// Граф, построенный [`PetgraphBackend`]. Параллельные рёбра допускаются.
#[derive(Debug, Clone)]
pub enum PetGraph {
    Directed(StableDiGraph<GraphNode, Properties<Scalar>>),
    Undirected(StableUnGraph<GraphNode, Properties<Scalar>>),
}

impl PetGraph {
    pub fn is_directed(&self) -> bool {
        matches!(self, PetGraph::Directed(_))
    }

    pub fn node_count(&self) -> usize {
        match self {
            PetGraph::Directed(g) => g.node_count(),
            PetGraph::Undirected(g) => g.node_count(),
        }
    }

    pub fn edge_count(&self) -> usize {
        match self {
            PetGraph::Directed(g) => g.edge_count(),
            PetGraph::Undirected(g) => g.edge_count(),
        }
    }

    /// Получить вес узла.
    pub fn node(&self, idx: NodeIndex) -> Option<&GraphNode> {
        match self {
            PetGraph::Directed(g) => g.node_weight(idx),
            PetGraph::Undirected(g) => g.node_weight(idx),
        }
    }

    /// Найти первый узел с заданным значением.
    pub fn find_node(&self, value: &Scalar) -> Option<NodeIndex> {
        self.nodes()
            .into_iter()
            .find(|(_, node)| node.value.as_ref() == Some(value))
            .map(|(idx, _)| idx)
    }

    /// Все узлы в порядке добавления.
    pub fn nodes(&self) -> Vec<(NodeIndex, &GraphNode)> {
        match self {
            PetGraph::Directed(g) => g
                .node_indices()
                .filter_map(|i| g.node_weight(i).map(|w| (i, w)))
                .collect(),
            PetGraph::Undirected(g) => g
                .node_indices()
                .filter_map(|i| g.node_weight(i).map(|w| (i, w)))
                .collect(),
        }
    }

    /// Все рёбра в порядке добавления: `(from, to, data)`.
    pub fn edges(&self) -> Vec<(NodeIndex, NodeIndex, &Properties<Scalar>)> {
        fn collect<Ty: petgraph::EdgeType>(
            g: &petgraph::stable_graph::StableGraph<GraphNode, Properties<Scalar>, Ty>,
        ) -> Vec<(NodeIndex, NodeIndex, &Properties<Scalar>)> {
            g.edge_indices()
                .filter_map(|e: EdgeIndex| {
                    let (a, b) = g.edge_endpoints(e)?;
                    Some((a, b, g.edge_weight(e)?))
                })
                .collect()
        }

        match self {
            PetGraph::Directed(g) => collect(g),
            PetGraph::Undirected(g) => collect(g),
        }
    }
}

/// Бэкенд по умолчанию, строящий [`PetGraph`].
#[derive(Debug, Default, Clone, Copy)]
pub struct PetgraphBackend;

impl PetgraphBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Backend for PetgraphBackend {
    type Graph = PetGraph;
    type Node = NodeIndex;

    fn create_directed_graph(&mut self) -> GraphResult<PetGraph> {
        Ok(PetGraph::Directed(StableDiGraph::default()))
    }

    fn create_undirected_graph(&mut self) -> GraphResult<PetGraph> {
        Ok(PetGraph::Undirected(StableUnGraph::default()))
    }

    fn add_node(
        &mut self,
        graph: &mut PetGraph,
        value: Option<Scalar>,
        data: Properties<Scalar>,
    ) -> GraphResult<NodeIndex> {
        let weight = GraphNode { value, data };
        Ok(match graph {
            PetGraph::Directed(g) => g.add_node(weight),
            PetGraph::Undirected(g) => g.add_node(weight),
        })
    }

    fn add_edge(
        &mut self,
        graph: &mut PetGraph,
        from: &NodeIndex,
        to: &NodeIndex,
        data: Properties<Scalar>,
    ) -> GraphResult<()> {
        if graph.node(*from).is_none() || graph.node(*to).is_none() {
            return Err(GraphError::Backend(format!(
                "edge {} -> {} refers to a node outside this graph",
                from.index(),
                to.index()
            )));
        }
        match graph {
            PetGraph::Directed(g) => g.add_edge(*from, *to, data),
            PetGraph::Undirected(g) => g.add_edge(*from, *to, data),
        };
        Ok(())
    }
}
