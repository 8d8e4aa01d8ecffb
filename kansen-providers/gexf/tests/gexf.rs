//! Integration tests for loading contact graphs from GEXF documents.

use kansen_providers_gexf::{GexfProvider, GexfProviderError};
use rstest::{fixture, rstest};

#[fixture]
fn ward() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<gexf xmlns="http://gexf.net/1.3" version="1.3">
  <graph mode="static" defaultedgetype="directed">
    <attributes class="edge">
      <attribute id="0" title="duration" type="double"/>
    </attributes>
    <nodes>
      <node id="nurse" label="Nurse"/>
      <node id="patient-1" label="Patient 1"/>
      <node id="patient-2" label="Patient 2"/>
      <node id="visitor" label="Visitor"/>
    </nodes>
    <edges>
      <edge id="0" source="nurse" target="patient-1">
        <attvalues><attvalue for="0" value="45"/></attvalues>
      </edge>
      <edge id="1" source="patient-2" target="nurse">
        <attvalues><attvalue for="0" value="15.5"/></attvalues>
      </edge>
      <edge id="2" source="patient-1" target="nurse">
        <attvalues><attvalue for="0" value="50"/></attvalues>
      </edge>
    </edges>
  </graph>
</gexf>
"#
}

#[rstest]
fn nodes_keep_document_order_and_isolated_nodes(ward: &str) {
    let provider = GexfProvider::try_from_str("ward", ward).expect("document must load");
    let graph = provider.graph();
    let labels: Vec<&str> = graph.labels().iter().map(AsRef::as_ref).collect();
    assert_eq!(labels, ["nurse", "patient-1", "patient-2", "visitor"]);
    assert!(graph.neighbours(3).is_empty());
}

#[rstest]
fn reversed_repeat_edges_overwrite_duration(ward: &str) {
    let provider = GexfProvider::try_from_str("ward", ward).expect("document must load");
    assert_eq!(provider.edge_elements(), 3);
    assert!(provider.declared_directed());
    let graph = provider.graph();
    assert_eq!(graph.edge_count(), 2);
    let durations: Vec<Option<f64>> = graph.edges().iter().map(|edge| edge.duration()).collect();
    assert_eq!(durations, [Some(50.0), Some(15.5)]);
}

#[rstest]
fn malformed_xml_is_reported() {
    let err = GexfProvider::try_from_str("broken", "<gexf><graph></gexf>")
        .expect_err("mismatched tags must fail");
    assert!(matches!(err, GexfProviderError::Xml(_)));
}

#[rstest]
fn unterminated_edge_is_reported() {
    let err = GexfProvider::try_from_str("cut", r#"<gexf><graph><edges><edge source="a" target="b">"#)
        .expect_err("truncated document must fail");
    assert!(matches!(
        err,
        GexfProviderError::UnterminatedEdge | GexfProviderError::Xml(_)
    ));
}

#[rstest]
fn loads_from_disk(ward: &str) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("graph.gexf");
    std::fs::write(&path, ward).expect("write graph");

    let provider = GexfProvider::try_from_path(&path).expect("document must load");
    assert_eq!(provider.name(), "graph");
    assert_eq!(provider.into_graph().node_count(), 4);
}

#[rstest]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let err = GexfProvider::try_from_path(dir.path().join("graph.gexf"))
        .expect_err("missing file must fail");
    assert!(matches!(err, GexfProviderError::Io(_)));
}
