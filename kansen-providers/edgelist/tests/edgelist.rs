//! Integration tests for loading contact graphs from CSV edge lists.

use std::io::Write;

use kansen_providers_edgelist::{EdgeListProvider, EdgeListProviderError};
use rstest::rstest;

fn load(csv: &str) -> Result<EdgeListProvider, EdgeListProviderError> {
    EdgeListProvider::try_from_reader("test", csv.as_bytes())
}

#[rstest]
fn nodes_follow_first_seen_order() {
    let provider = load("id1,id2,duration\nc,a,1\na,b,2\n").expect("edge list must load");
    let graph = provider.graph();
    let labels: Vec<&str> = graph.labels().iter().map(AsRef::as_ref).collect();
    assert_eq!(labels, ["c", "a", "b"]);
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.neighbours(1), &[0, 2]);
}

#[rstest]
fn exact_duplicate_rows_are_dropped() {
    let provider =
        load("id1,id2,duration\na,b,5\na,b,5\nb,a,7\n").expect("edge list must load");
    assert_eq!(provider.rows(), 3);
    assert_eq!(provider.duplicate_rows(), 1);
    let graph = provider.graph();
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.edges()[0].duration(), Some(7.0));
}

#[rstest]
fn blank_lines_and_extra_columns_are_ignored() {
    let csv = "\nduration,note,id2,id1\n\n3.5,first,b,a\n   \n1,second,c,b\n";
    let provider = load(csv).expect("edge list must load");
    let graph = provider.graph();
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.index_of("a"), Some(0));
    assert_eq!(graph.index_of("c"), Some(2));
    assert_eq!(graph.edges()[0].duration(), Some(3.5));
}

#[rstest]
fn empty_duration_loads_as_missing() {
    let provider = load("id1,id2,duration\na,b,\n").expect("edge list must load");
    assert_eq!(provider.graph().edges()[0].duration(), None);
}

#[rstest]
#[case::empty("")]
#[case::whitespace("\n  \n")]
fn input_without_header_is_rejected(#[case] csv: &str) {
    let err = load(csv).expect_err("header is required");
    assert!(matches!(err, EdgeListProviderError::MissingHeader));
}

#[rstest]
#[case::missing_id1("src,id2,duration\n", "id1")]
#[case::missing_id2("id1,dst,duration\n", "id2")]
#[case::missing_duration("id1,id2,weight\n", "duration")]
fn missing_columns_are_named(#[case] csv: &str, #[case] expected: &str) {
    let err = load(csv).expect_err("column must be required");
    match err {
        EdgeListProviderError::ColumnNotFound { column } => assert_eq!(column, expected),
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
fn malformed_rows_report_their_line() {
    let err = load("id1,id2,duration\na,b,1\n,c,2\n").expect_err("empty id must fail");
    assert!(matches!(
        err,
        EdgeListProviderError::EmptyNodeId {
            line: 3,
            column: "id1"
        }
    ));
}

#[rstest]
fn loads_from_disk_and_names_after_file_stem() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("edge_list.csv");
    let mut file = std::fs::File::create(&path).expect("create edge list");
    writeln!(file, "id1,id2,duration").expect("write header");
    writeln!(file, "1,2,10").expect("write row");
    drop(file);

    let provider = EdgeListProvider::try_from_path(&path).expect("edge list must load");
    assert_eq!(provider.name(), "edge_list");
    assert_eq!(provider.into_graph().node_count(), 2);
}

#[rstest]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let err = EdgeListProvider::try_from_path(dir.path().join("absent.csv"))
        .expect_err("missing file must fail");
    assert!(matches!(err, EdgeListProviderError::Io(_)));
}
