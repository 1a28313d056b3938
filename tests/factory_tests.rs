//! Сквозные тесты: исходный текст -> граф petgraph.

mod common;

use std::io::Write;

use common::init_logger;
use graphdsl::value::{parameters_from_json, properties};
use graphdsl::{CompileOptions, FileSource, GraphError, GraphFactory, Parameters, Scalar};

#[test]
fn test_color_length_graph() {
    init_logger();
    let factory = GraphFactory::new(
        "(1, {color: c}) -{length: l}> (2, {color: c})",
        CompileOptions::default(),
    )
    .unwrap();

    let params = parameters_from_json(r#"{"c": "red", "l": 42}"#).unwrap();
    let graph = factory.build_default(&params).unwrap();

    assert!(graph.is_directed());
    assert_eq!(graph.node_count(), 2);

    let one = graph.find_node(&Scalar::from(1)).unwrap();
    let two = graph.find_node(&Scalar::from(2)).unwrap();
    assert_eq!(graph.node(one).unwrap().data, properties([("color", "red")]));
    assert_eq!(graph.node(two).unwrap().data, properties([("color", "red")]));

    let edges = graph.edges();
    assert_eq!(edges.len(), 1);
    assert_eq!((edges[0].0, edges[0].1), (one, two));
    assert_eq!(edges[0].2, &properties([("length", 42)]));
}

#[test]
fn test_parallel_edges_are_kept() {
    init_logger();
    let factory = GraphFactory::new(
        "a = (1)\nb = (2)\na -{k: 1}> b\na -{k: 2}> b",
        CompileOptions::default(),
    )
    .unwrap();

    let graph = factory.build_default(&Parameters::new()).unwrap();
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn test_equal_values_make_distinct_petgraph_nodes() {
    init_logger();
    let factory = GraphFactory::new("(1) -{}> (1)", CompileOptions::default()).unwrap();
    let graph = factory.build_default(&Parameters::new()).unwrap();

    assert_eq!(graph.node_count(), 2);
    let (from, to, _) = graph.edges()[0];
    assert_ne!(from, to);
}

#[test]
fn test_undirected_petgraph() {
    init_logger();
    let factory = GraphFactory::new(
        "hub = ('hub')\nhub -{}- (1)\nhub -{}- (2)\nhub -{}- (3)",
        CompileOptions::default().undirected(),
    )
    .unwrap();

    let graph = factory.build_default(&Parameters::new()).unwrap();
    assert!(!graph.is_directed());
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 3);

    let hub = graph.find_node(&Scalar::from("hub")).unwrap();
    assert!(graph.edges().iter().all(|(from, _, _)| *from == hub));
}

#[test]
fn test_build_default_reports_missing_parameter() {
    init_logger();
    let factory = GraphFactory::new("(x)", CompileOptions::default()).unwrap();
    let err = factory.build_default(&Parameters::new()).unwrap_err();
    assert!(matches!(err, GraphError::UndefinedParameter(ref n) if n == "x"));
}

// === Источники ===

#[test]
fn test_factory_from_file() {
    init_logger();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# граф из файла").unwrap();
    writeln!(file, "a = (1)").unwrap();
    writeln!(file, "a -{{w: w}}> (2) -{{w: w}}> (3)").unwrap();

    let factory = GraphFactory::new(FileSource::new(file.path()), CompileOptions::default()).unwrap();
    let graph = factory
        .build_default(&parameters_from_json(r#"{"w": 0.5}"#).unwrap())
        .unwrap();

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);
    assert!(graph
        .edges()
        .iter()
        .all(|(_, _, data)| data["w"] == Scalar::from(0.5)));
}

#[test]
fn test_embedded_file_source() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.py");
    std::fs::write(
        &path,
        "@Graph(directed=False)\ndef graph(size):\n    center = (0, {size: size})\n    center -{}- (1)\n",
    )
    .unwrap();

    let options = CompileOptions::embedded().undirected();
    let factory = GraphFactory::new(FileSource::new(&path), options).unwrap();

    let mut params = Parameters::new();
    params.insert("size".to_string(), Scalar::from(3));
    let graph = factory.build_default(&params).unwrap();

    assert_eq!(graph.node_count(), 2);
    let center = graph.find_node(&Scalar::from(0)).unwrap();
    assert_eq!(graph.node(center).unwrap().data["size"], Scalar::from(3));
}

#[test]
fn test_missing_file_is_io_error() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let err = GraphFactory::new(
        FileSource::new(dir.path().join("nope.graph")),
        CompileOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, GraphError::IoError(_)));
    assert!(!err.is_compile_error());
}

#[test]
fn test_compile_error_from_file_keeps_position() {
    init_logger();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "(1) -{{}}> (2)\n(3) -{{}} (4)").unwrap();

    let err = GraphFactory::new(FileSource::new(file.path()), CompileOptions::default()).unwrap_err();
    match err {
        GraphError::Parse(e) => assert_eq!(e.span().start, 21),
        other => panic!("expected compile error, got {other:?}"),
    }
}
