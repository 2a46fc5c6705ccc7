use crate::builder::PLACEHOLDER_ICON_DATA_URL;
use crate::catalog::{DEFAULT_SHAPE_STYLE, DIAMOND_SHAPE_STYLE, LABEL_FONT_SIZE, LABEL_OFFSET_X};
use crate::primitive::{NodePrimitive, NodeShape, TextPrimitive};
use crate::resolver::PLACEHOLDER_MARKER;
use crate::*;
use futures::executor::block_on;
use serde_json::json;

struct StaticFetcher;

impl AssetFetcher for StaticFetcher {
    fn fetch(&self, _locator: &str) -> impl Future<Output = Result<Vec<u8>>> {
        async { Ok(b"<svg/>".to_vec()) }
    }
}

struct FailingFetcher;

impl AssetFetcher for FailingFetcher {
    fn fetch(&self, locator: &str) -> impl Future<Output = Result<Vec<u8>>> {
        let locator = locator.to_string();
        async move {
            Err(Error::AssetLoad {
                locator,
                message: "404".to_string(),
            })
        }
    }
}

fn node(id: &str, x: f64, y: f64, shape: NodeShape) -> DiagramPrimitive {
    DiagramPrimitive::Node(NodePrimitive {
        kind: Default::default(),
        id: id.to_string(),
        x,
        y,
        shape,
        width: Some(120.0),
        height: Some(80.0),
    })
}

fn placeholder_text(id: &str, container: &str, key: &str, x: f64, y: f64) -> DiagramPrimitive {
    DiagramPrimitive::Text(TextPrimitive {
        kind: Default::default(),
        id: id.to_string(),
        x,
        y,
        text: format!("{key}\n{PLACEHOLDER_MARKER}\n{PLACEHOLDER_MARKER}"),
        container_id: Some(container.to_string()),
        font_size: None,
    })
}

#[test]
fn matched_placeholder_becomes_icon_plus_label() {
    let primitives = vec![
        node("n1", 100.0, 200.0, NodeShape::Rectangle),
        placeholder_text("t1", "n1", "cloudstor", 110.0, 210.0),
    ];
    let out = block_on(build_compound_elements(
        primitives,
        CloudProvider::Gcp,
        &StaticFetcher,
    ));

    // Placeholder text removed, node kept, one icon and one label added.
    assert_eq!(out.primitives.len(), 3);
    assert!(out.primitives.iter().any(|p| p.id() == Some("n1")));
    assert!(out.primitives.iter().all(|p| p.id() != Some("t1")));

    let icon = out.primitives.iter().find(|p| p.is_image()).unwrap();
    let DiagramPrimitive::Image(icon) = icon else {
        unreachable!()
    };
    assert_eq!(icon.x, 100.0 + DEFAULT_SHAPE_STYLE.offset_x);
    assert_eq!(icon.y, 200.0 + DEFAULT_SHAPE_STYLE.offset_y);
    assert_eq!(icon.file_id, "cloudstor");

    let label = out
        .primitives
        .iter()
        .filter_map(|p| p.as_text())
        .find(|t| t.text == "Cloud\nStorage")
        .unwrap();
    assert_eq!(label.x, 110.0 + LABEL_OFFSET_X);
    assert_eq!(label.y, 210.0);
    assert_eq!(label.font_size, Some(LABEL_FONT_SIZE));

    assert_eq!(out.assets.len(), 1);
    assert_eq!(out.assets[0].id, "cloudstor");
    assert!(out.assets[0].data_url.starts_with("data:image/svg+xml;base64,"));
}

#[test]
fn human_readable_name_in_placeholder_matches_by_candidate_scan() {
    // The conversion step may carry the full service name into the
    // placeholder text instead of the canonical key; the case-normalized,
    // whitespace-stripped scan still finds "loadbalanc" inside
    // "cloudloadbalancing".
    let primitives = vec![
        node("n1", 40.0, 80.0, NodeShape::Rectangle),
        DiagramPrimitive::Text(TextPrimitive {
            kind: Default::default(),
            id: "t1".to_string(),
            x: 45.0,
            y: 85.0,
            text: format!("Cloud Load Balancing\n{PLACEHOLDER_MARKER}\n{PLACEHOLDER_MARKER}"),
            container_id: Some("n1".to_string()),
            font_size: None,
        }),
    ];
    let out = block_on(build_compound_elements(
        primitives,
        CloudProvider::Gcp,
        &StaticFetcher,
    ));

    let DiagramPrimitive::Image(icon) = out.primitives.iter().find(|p| p.is_image()).unwrap()
    else {
        unreachable!()
    };
    assert_eq!(icon.file_id, "loadbalanc");
    assert_eq!(out.assets.len(), 1);
    assert_eq!(out.assets[0].id, "loadbalanc");

    let label = out
        .primitives
        .iter()
        .filter_map(|p| p.as_text())
        .find(|t| t.container_id.is_none())
        .unwrap();
    assert_eq!(label.text, "Cloud Load\nBalancing");
    assert!(out.primitives.iter().all(|p| p.id() != Some("t1")));
}

#[test]
fn icon_placement_follows_the_node_shape() {
    let primitives = vec![
        node("d1", 50.0, 60.0, NodeShape::Diamond),
        placeholder_text("t1", "d1", "pubsub", 55.0, 65.0),
    ];
    let out = block_on(build_compound_elements(
        primitives,
        CloudProvider::Gcp,
        &StaticFetcher,
    ));

    let DiagramPrimitive::Image(icon) = out.primitives.iter().find(|p| p.is_image()).unwrap()
    else {
        unreachable!()
    };
    assert_eq!(icon.x, 50.0 + DIAMOND_SHAPE_STYLE.offset_x);
    assert_eq!(icon.y, 60.0 + DIAMOND_SHAPE_STYLE.offset_y);
}

#[test]
fn provider_selects_the_catalog() {
    let primitives = vec![
        node("n1", 0.0, 0.0, NodeShape::Rectangle),
        placeholder_text("t1", "n1", "cloudstor", 0.0, 0.0),
    ];
    let out = block_on(build_compound_elements(
        primitives,
        CloudProvider::Aws,
        &StaticFetcher,
    ));

    let labels: Vec<&str> = out
        .primitives
        .iter()
        .filter_map(|p| p.as_text())
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(labels, vec!["S3"]);
}

#[test]
fn unmatched_placeholder_is_left_untouched() {
    let primitives = vec![
        node("n1", 0.0, 0.0, NodeShape::Rectangle),
        placeholder_text("t1", "n1", "unknownsvc", 0.0, 0.0),
    ];
    let out = block_on(build_compound_elements(
        primitives,
        CloudProvider::Gcp,
        &StaticFetcher,
    ));

    assert!(out.primitives.iter().any(|p| p.id() == Some("t1")));
    assert!(!out.primitives.iter().any(|p| p.is_image()));
    assert!(out.assets.is_empty());
}

#[test]
fn plain_text_without_markers_is_not_a_placeholder() {
    let primitives = vec![DiagramPrimitive::Text(TextPrimitive {
        kind: Default::default(),
        id: "t1".to_string(),
        x: 0.0,
        y: 0.0,
        text: "cloudstor".to_string(),
        container_id: None,
        font_size: None,
    })];
    let out = block_on(build_compound_elements(
        primitives,
        CloudProvider::Gcp,
        &StaticFetcher,
    ));

    assert_eq!(out.primitives.len(), 1);
    assert!(out.assets.is_empty());
}

#[test]
fn repeated_keys_share_one_asset() {
    let primitives = vec![
        node("n1", 0.0, 0.0, NodeShape::Rectangle),
        node("n2", 300.0, 0.0, NodeShape::Rectangle),
        placeholder_text("t1", "n1", "cloudrun", 0.0, 0.0),
        placeholder_text("t2", "n2", "cloudrun", 300.0, 0.0),
    ];
    let out = block_on(build_compound_elements(
        primitives,
        CloudProvider::Gcp,
        &StaticFetcher,
    ));

    assert_eq!(out.assets.len(), 1);
    assert_eq!(out.primitives.iter().filter(|p| p.is_image()).count(), 2);
}

#[test]
fn image_count_equals_matched_placeholder_count() {
    let primitives = vec![
        node("n1", 0.0, 0.0, NodeShape::Rectangle),
        node("n2", 0.0, 200.0, NodeShape::Ellipse),
        placeholder_text("t1", "n1", "bigq", 0.0, 0.0),
        placeholder_text("t2", "n2", "firest", 0.0, 200.0),
        placeholder_text("t3", "n1", "notakey", 0.0, 0.0),
    ];
    let out = block_on(build_compound_elements(
        primitives,
        CloudProvider::Azure,
        &StaticFetcher,
    ));

    assert_eq!(out.primitives.iter().filter(|p| p.is_image()).count(), 2);
}

#[test]
fn unloadable_icon_falls_back_to_the_placeholder_image() {
    let primitives = vec![
        node("n1", 0.0, 0.0, NodeShape::Rectangle),
        placeholder_text("t1", "n1", "clouddns", 0.0, 0.0),
    ];
    let out = block_on(build_compound_elements(
        primitives,
        CloudProvider::Gcp,
        &FailingFetcher,
    ));

    // Substitution still happens; only the asset body is the fallback.
    assert_eq!(out.primitives.iter().filter(|p| p.is_image()).count(), 1);
    assert_eq!(out.assets.len(), 1);
    assert_eq!(out.assets[0].data_url, PLACEHOLDER_ICON_DATA_URL);
}

#[test]
fn missing_container_defaults_to_the_origin() {
    let primitives = vec![placeholder_text("t1", "gone", "cloudsql", 10.0, 20.0)];
    let out = block_on(build_compound_elements(
        primitives,
        CloudProvider::Gcp,
        &StaticFetcher,
    ));

    let DiagramPrimitive::Image(icon) = out.primitives.iter().find(|p| p.is_image()).unwrap()
    else {
        unreachable!()
    };
    assert_eq!(icon.x, DEFAULT_SHAPE_STYLE.offset_x);
    assert_eq!(icon.y, DEFAULT_SHAPE_STYLE.offset_y);
}

#[test]
fn unknown_primitives_pass_through_unchanged() {
    let arrow = json!({ "type": "arrow", "id": "e1", "points": [[0, 0], [1, 1]] });
    let primitives = vec![
        DiagramPrimitive::Other(arrow.clone()),
        node("n1", 0.0, 0.0, NodeShape::Rectangle),
        placeholder_text("t1", "n1", "memorystore", 0.0, 0.0),
    ];
    let out = block_on(build_compound_elements(
        primitives,
        CloudProvider::Gcp,
        &StaticFetcher,
    ));

    assert!(out
        .primitives
        .iter()
        .any(|p| matches!(p, DiagramPrimitive::Other(v) if *v == arrow)));
}
