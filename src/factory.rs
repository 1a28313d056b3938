//! Фабрика графов: компилирует программу один раз и строит по ней графы.

use crate::ast::GraphDef;
use crate::backend::Backend;
use crate::builder::{build, BuildOptions};
use crate::config::CompileOptions;
use crate::error::GraphResult;
use crate::parser::compile;
use crate::petgraph_backend::{PetGraph, PetgraphBackend};
use crate::source::SourceProvider;
use crate::value::Parameters;

/// Скомпилированное определение графа.
///
/// Неизменяемо и может использоваться из нескольких потоков; каждое
/// построение получает собственное состояние.
///
/// ```
/// use graphdsl::{CompileOptions, GraphFactory, Parameters, Scalar};
///
/// let factory = GraphFactory::new(
///     "(1, {color: c}) -{length: l}> (2, {color: c})",
///     CompileOptions::default(),
/// )
/// .unwrap();
///
/// let mut params = Parameters::new();
/// params.insert("c".to_string(), Scalar::from("red"));
/// params.insert("l".to_string(), Scalar::from(42));
///
/// let graph = factory.build_default(&params).unwrap();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GraphFactory {
    def: GraphDef,
    options: CompileOptions,
}

impl GraphFactory {
    /// Прочитать и скомпилировать программу.
    pub fn new(source: impl SourceProvider, options: CompileOptions) -> GraphResult<Self> {
        let text = source.read_source()?;
        let def = compile(&text, &options)?;
        log::debug!(
            "compiled graph definition: {} statements, directed={}",
            def.len(),
            options.directed
        );
        Ok(Self { def, options })
    }

    /// Скомпилированное дерево.
    pub fn ast(&self) -> &GraphDef {
        &self.def
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Построить граф заданным бэкендом.
    pub fn build<B: Backend>(
        &self,
        backend: &mut B,
        parameters: &Parameters,
    ) -> GraphResult<B::Graph> {
        build(
            &self.def,
            parameters,
            backend,
            &BuildOptions::directed(self.options.directed),
        )
    }

    /// Построить граф, создав его фабрикой `graph_init` вместо бэкенда.
    pub fn build_with<B, F>(
        &self,
        backend: &mut B,
        parameters: &Parameters,
        graph_init: F,
    ) -> GraphResult<B::Graph>
    where
        B: Backend,
        F: Fn() -> B::Graph,
    {
        let options = BuildOptions::directed(self.options.directed).with_graph_init(&graph_init);
        build(&self.def, parameters, backend, &options)
    }

    /// Построить граф бэкендом по умолчанию ([`PetgraphBackend`]).
    pub fn build_default(&self, parameters: &Parameters) -> GraphResult<PetGraph> {
        self.build(&mut PetgraphBackend::new(), parameters)
    }
}
