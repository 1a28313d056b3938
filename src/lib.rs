//! # GraphDSL
//!
//! Маленький декларативный язык для описания графов: узлы, рёбра, свойства
//! и именованные ссылки. Программа компилируется в AST один раз, а затем
//! по ней строится любое число графов через подключаемый бэкенд.
//!
//! ## Основные модули
//!
//! - [`parser`] - лексер и парсер (текст -> [`GraphDef`])
//! - [`ast`] - синтаксическое дерево
//! - [`builder`] - интерпретатор AST, вызывающий [`Backend`]
//! - [`backend`] - интерфейс бэкенда и записывающий бэкенд
//! - [`petgraph_backend`] - бэкенд по умолчанию на petgraph
//! - [`factory`] - компиляция один раз, построение много раз
//! - [`source`] - поставщики исходного текста
//!
//! ## Пример
//!
//! ```
//! use graphdsl::backend::RecordingBackend;
//! use graphdsl::{CompileOptions, GraphFactory, Parameters};
//!
//! let factory = GraphFactory::new("(1) -{}> (2) -{}> (3)", CompileOptions::default()).unwrap();
//!
//! let mut backend = RecordingBackend::new();
//! factory.build(&mut backend, &Parameters::new()).unwrap();
//!
//! // Рёбра цепочки добавляются с конца
//! let edges: Vec<_> = backend.added_edges().iter().map(|(a, b, _)| (*a, *b)).collect();
//! assert_eq!(edges, vec![(2, 3), (1, 2)]);
//! ```

// === Компилятор ===
pub mod ast;
pub mod config;
pub mod parser;

// === Построение ===
pub mod backend;
pub mod builder;
pub mod factory;
pub mod petgraph_backend;

// === Общее ===
pub mod error;
pub mod source;
pub mod value;

// === Re-exports для удобства ===
pub use ast::{GraphDef, GraphStmt, ValueExpr};
pub use backend::Backend;
pub use builder::{build, BuildOptions, Builder};
pub use config::CompileOptions;
pub use error::{GraphError, GraphResult};
pub use factory::GraphFactory;
pub use parser::{compile, ParseError};
pub use petgraph_backend::{PetGraph, PetgraphBackend};
pub use source::{FileSource, SourceProvider};
pub use value::{Parameters, Properties, Scalar};
