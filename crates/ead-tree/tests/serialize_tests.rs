//! Tests for the JSON shape of serialized trees.

use ead_tree::{AttributesMap, ElementData, ElementTree};
use serde_json::json;

fn element(name: &str, attrs: &[(&str, &str)]) -> ElementData {
    let attrs: AttributesMap = attrs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    ElementData::new(name.to_string(), attrs)
}

#[test]
fn test_empty_tree_serializes_as_null() {
    let tree = ElementTree::new();
    assert_eq!(serde_json::to_string(&tree).unwrap(), "null");
}

#[test]
fn test_empty_element_omits_absent_fields() {
    let mut tree = ElementTree::new();
    let root = tree.alloc(element("ead", &[]));
    tree.set_root(root);

    assert_eq!(serde_json::to_string(&tree).unwrap(), r#"{"name":"ead"}"#);
}

#[test]
fn test_attributes_render_sorted() {
    let mut tree = ElementTree::new();
    let root = tree.alloc(element("c01", &[("z", "1"), ("a", "2"), ("m", "3")]));
    tree.set_root(root);

    let text = serde_json::to_string(&tree).unwrap();
    assert_eq!(text, r#"{"name":"c01","attr":{"a":"2","m":"3","z":"1"}}"#);
}

#[test]
fn test_nested_tree_shape() {
    let mut tree = ElementTree::new();
    let did = tree.alloc(element("did", &[]));
    let title = tree.alloc(element("unittitle", &[]));
    let date = tree.alloc(element("unitdate", &[("normal", "1900/1950")]));
    tree.set_text(title, "Papers".to_string());
    tree.set_text(date, "1900-1950".to_string());
    tree.append_child(did, title);
    tree.append_child(did, date);
    tree.set_root(did);

    let value = serde_json::to_value(&tree).unwrap();
    assert_eq!(
        value,
        json!({
            "name": "did",
            "children": [
                { "name": "unittitle", "value": "Papers" },
                { "name": "unitdate", "attr": { "normal": "1900/1950" }, "value": "1900-1950" }
            ]
        })
    );
}

#[test]
fn test_view_serializes_subtree() {
    let mut tree = ElementTree::new();
    let parent = tree.alloc(element("dsc", &[]));
    let child = tree.alloc(element("c01", &[("level", "file")]));
    tree.append_child(parent, child);
    tree.set_root(parent);

    let value = serde_json::to_value(tree.view(child)).unwrap();
    assert_eq!(value, json!({ "name": "c01", "attr": { "level": "file" } }));
    assert_eq!(tree.view(child).id(), child);
}
