//! Построитель графа: интерпретатор AST.
//!
//! Обходит операторы [`GraphDef`] по порядку и превращает их в вызовы
//! [`Backend`]. Состояние (таблица имён и таблица узлов) живёт ровно одно
//! построение.

use std::collections::HashMap;

use crate::ast::{GraphDef, GraphStmt, LeftMarker, ValueExpr};
use crate::backend::Backend;
use crate::error::{GraphError, GraphResult};
use crate::value::{Parameters, Properties, Scalar};

/// Ключ узла, выдаваемый в порядке создания.
///
/// Каждый `NodeDef` получает новый ключ, даже если его значение совпадает
/// со значением другого узла.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(u64);

/// Параметры одного построения.
pub struct BuildOptions<'a, G> {
    /// Какой граф создавать, если `graph_init` не задан.
    pub directed: bool,
    /// Фабрика, полностью заменяющая создание графа бэкендом.
    pub graph_init: Option<&'a dyn Fn() -> G>,
}

impl<G> Default for BuildOptions<'_, G> {
    fn default() -> Self {
        Self {
            directed: true,
            graph_init: None,
        }
    }
}

impl<'a, G> BuildOptions<'a, G> {
    pub fn directed(directed: bool) -> Self {
        Self {
            directed,
            graph_init: None,
        }
    }

    pub fn with_graph_init(mut self, init: &'a dyn Fn() -> G) -> Self {
        self.graph_init = Some(init);
        self
    }
}

/// Построитель графа.
pub struct Builder<'a, B: Backend> {
    backend: &'a mut B,
    parameters: &'a Parameters,
    /// Имя -> ключ узла; повторное связывание перезаписывает.
    definitions: HashMap<String, NodeKey>,
    /// Ключ узла -> дескриптор бэкенда.
    nodes: HashMap<NodeKey, B::Node>,
    next_key: u64,
}

impl<'a, B: Backend> Builder<'a, B> {
    /// Создать построитель.
    pub fn new(backend: &'a mut B, parameters: &'a Parameters) -> Self {
        Self {
            backend,
            parameters,
            definitions: HashMap::new(),
            nodes: HashMap::new(),
            next_key: 1,
        }
    }

    /// Построить граф.
    ///
    /// При ошибке уже выполненные вызовы бэкенда не откатываются.
    pub fn build(
        mut self,
        def: &GraphDef,
        options: &BuildOptions<'_, B::Graph>,
    ) -> GraphResult<B::Graph> {
        log::debug!(
            "building graph: {} statements, {} parameters",
            def.len(),
            self.parameters.len()
        );

        let mut graph = match options.graph_init {
            Some(init) => init(),
            None if options.directed => self.backend.create_directed_graph()?,
            None => self.backend.create_undirected_graph()?,
        };

        for stmt in &def.statements {
            self.eval(&mut graph, stmt)?;
        }

        log::debug!(
            "graph built: {} nodes, {} names bound",
            self.nodes.len(),
            self.definitions.len()
        );
        Ok(graph)
    }

    /// Получить следующий ключ узла.
    fn alloc_key(&mut self) -> NodeKey {
        let key = NodeKey(self.next_key);
        self.next_key += 1;
        key
    }

    /// Вычислить оператор и вернуть ключ его узла.
    fn eval(&mut self, graph: &mut B::Graph, stmt: &GraphStmt) -> GraphResult<NodeKey> {
        // Правые части цепочек вычисляются рекурсивно
        stacker::maybe_grow(256 * 1024, 8 * 1024 * 1024, || self.eval_stmt(graph, stmt))
    }

    fn eval_stmt(&mut self, graph: &mut B::Graph, stmt: &GraphStmt) -> GraphResult<NodeKey> {
        match stmt {
            GraphStmt::NodeDef { value, data } => {
                let value = value.as_ref().map(|v| self.resolve(v)).transpose()?;
                let data = self.resolve_data(data)?;

                let handle = self.backend.add_node(graph, value, data)?;
                let key = self.alloc_key();
                log::trace!("add_node -> {:?}", key);
                self.nodes.insert(key, handle);
                Ok(key)
            }

            GraphStmt::GetNode { name } => self
                .definitions
                .get(name)
                .copied()
                .ok_or_else(|| GraphError::UndefinedName(name.clone())),

            GraphStmt::Assignation { name, value } => {
                let key = self.eval(graph, value)?;
                self.definitions.insert(name.clone(), key);
                Ok(key)
            }

            GraphStmt::Edge {
                left,
                right,
                data,
                left_marker,
                ..
            } => {
                // Правая часть строится целиком до добавления этого ребра,
                // поэтому рёбра цепочки появляются с конца.
                let left = self.eval(graph, left)?;
                let right = self.eval(graph, right)?;
                let data = self.resolve_data(data)?;

                let (from, to) = match left_marker {
                    LeftMarker::Lt => (right, left),
                    LeftMarker::Dash => (left, right),
                };
                log::trace!("add_edge {:?} -> {:?}", from, to);

                let from = Self::handle(&self.nodes, from)?;
                let to = Self::handle(&self.nodes, to)?;
                self.backend.add_edge(graph, from, to, data)?;
                Ok(left)
            }
        }
    }

    fn handle(nodes: &HashMap<NodeKey, B::Node>, key: NodeKey) -> GraphResult<&B::Node> {
        nodes
            .get(&key)
            .ok_or_else(|| GraphError::Backend(format!("no node registered for {:?}", key)))
    }

    /// Вычислить значение: литерал или внешний параметр.
    fn resolve(&self, value: &ValueExpr) -> GraphResult<Scalar> {
        match value {
            ValueExpr::Literal(v) => Ok(v.clone()),
            ValueExpr::Param(name) => self
                .parameters
                .get(name)
                .cloned()
                .ok_or_else(|| GraphError::UndefinedParameter(name.clone())),
        }
    }

    fn resolve_data(&self, data: &Properties<ValueExpr>) -> GraphResult<Properties<Scalar>> {
        data.iter()
            .map(|(k, v)| Ok::<_, GraphError>((k.clone(), self.resolve(v)?)))
            .collect()
    }
}

/// Построить граф по скомпилированной программе.
pub fn build<B: Backend>(
    def: &GraphDef,
    parameters: &Parameters,
    backend: &mut B,
    options: &BuildOptions<'_, B::Graph>,
) -> GraphResult<B::Graph> {
    Builder::new(backend, parameters).build(def, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::RightMarker;
    use crate::backend::{BackendCall, RecordingBackend};

    fn lit(v: i64) -> GraphStmt {
        GraphStmt::node(Some(ValueExpr::literal(v)), Properties::new())
    }

    fn arrow(left: GraphStmt, right: GraphStmt) -> GraphStmt {
        GraphStmt::edge(left, right, Properties::new(), LeftMarker::Dash, RightMarker::Gt)
    }

    #[test]
    fn test_equal_values_are_distinct_nodes() {
        let def = GraphDef::new(vec![arrow(lit(1), lit(1))]);
        let mut backend = RecordingBackend::new();
        build(&def, &Parameters::new(), &mut backend, &BuildOptions::default()).unwrap();

        assert_eq!(backend.added_nodes().len(), 2);
        let edges = backend.added_edges();
        assert_eq!((edges[0].0, edges[0].1), (1, 2));
    }

    #[test]
    fn test_get_node_makes_no_backend_call() {
        let def = GraphDef::new(vec![GraphStmt::assign("a", lit(1)), GraphStmt::get("a")]);
        let mut backend = RecordingBackend::new();
        build(&def, &Parameters::new(), &mut backend, &BuildOptions::default()).unwrap();
        assert_eq!(backend.calls.len(), 2);
    }

    #[test]
    fn test_rebinding_overwrites() {
        let def = GraphDef::new(vec![
            GraphStmt::assign("a", lit(1)),
            GraphStmt::assign("a", lit(2)),
            arrow(GraphStmt::get("a"), lit(3)),
        ]);
        let mut backend = RecordingBackend::new();
        build(&def, &Parameters::new(), &mut backend, &BuildOptions::default()).unwrap();
        let edges = backend.added_edges();
        assert_eq!((edges[0].0, edges[0].1), (2, 3));
    }

    #[test]
    fn test_undefined_parameter() {
        let def = GraphDef::new(vec![GraphStmt::node(
            Some(ValueExpr::param("missing")),
            Properties::new(),
        )]);
        let mut backend = RecordingBackend::new();
        let err = build(&def, &Parameters::new(), &mut backend, &BuildOptions::default()).unwrap_err();
        assert!(matches!(err, GraphError::UndefinedParameter(ref n) if n == "missing"));
        assert_eq!(backend.calls, vec![BackendCall::CreateDirected { graph: 1 }]);
    }

    #[test]
    fn test_undirected_graph_creation() {
        let def = GraphDef::new(vec![lit(1)]);
        let mut backend = RecordingBackend::new();
        build(&def, &Parameters::new(), &mut backend, &BuildOptions::directed(false)).unwrap();
        assert_eq!(backend.calls[0], BackendCall::CreateUndirected { graph: 1 });
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        let mut stmt = lit(0);
        for i in 1..50_000 {
            stmt = arrow(lit(i), stmt);
        }
        let def = GraphDef::new(vec![stmt]);
        let mut backend = RecordingBackend::new();
        build(&def, &Parameters::new(), &mut backend, &BuildOptions::default()).unwrap();
        assert_eq!(backend.added_edges().len(), 49_999);
    }
}
