use packnode_core::prelude::*;

#[test]
fn export_json_array_and_hash_smoke() {
    let cfg = PackerConfig::builder()
        .with_canvas(256, 256)
        .on_failure(FailurePolicy::Skip)
        .build();
    let items = vec![("a", 32, 8), ("b", 10, 10), ("huge", 300, 1)];
    let layout = packnode_core::pack_layout(items, cfg).expect("pack");

    let ja = packnode_core::to_json_array(&layout);
    let obj = ja.as_object().expect("object");
    assert!(obj.contains_key("placements"));
    assert!(obj.contains_key("unplaced"));
    assert!(obj.contains_key("meta"));
    let placements = obj["placements"].as_array().expect("array");
    assert_eq!(placements.len(), 2);
    assert_eq!(placements[0]["key"], "b");
    assert_eq!(placements[0]["rect"], serde_json::json!([0, 0, 10, 10]));
    assert_eq!(placements[1]["frame"], serde_json::json!({"x": 10, "y": 0, "w": 32, "h": 8}));
    assert_eq!(obj["unplaced"][0]["key"], "huge");
    assert_eq!(obj["meta"]["app"], "packnode");
    assert_eq!(obj["meta"]["sort_order"], "area_asc");
    assert_eq!(obj["meta"]["canvas"], serde_json::json!({"w": 256, "h": 256}));

    let jh = packnode_core::to_json_hash(&layout);
    let obj = jh.as_object().expect("object");
    assert!(obj.contains_key("frames"));
    assert!(obj.contains_key("meta"));
    assert_eq!(obj["frames"]["a"]["order"], 1);
}

#[test]
fn tree_dump_lists_every_node() {
    let mut packer = Packer::new(10, 10).expect("canvas");
    packer.insert(6, 4).unwrap();

    let dump = packnode_core::tree_to_json(&packer);
    let nodes = dump["nodes"].as_array().expect("nodes");
    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes[0]["children"], serde_json::json!([1, 2]));
    assert_eq!(nodes[1]["rect"], serde_json::json!({"x0": 6, "y0": 0, "x1": 10, "y1": 4}));
    assert!(nodes[2]["children"].is_null());
    assert_eq!(dump["leaves"], 2);
    assert_eq!(dump["free_area"], 100 - 24);
}

#[test]
fn layout_serializes_with_serde() {
    let cfg = PackerConfig::builder().with_canvas(20, 20).build();
    let layout = pack_layout(vec![("x", 4, 4)], cfg).expect("pack");
    let s = serde_json::to_string(&layout).expect("serialize");
    let back: Layout = serde_json::from_str(&s).expect("deserialize");
    assert_eq!(back.placements, layout.placements);
    assert_eq!(back.meta.canvas, Size::new(20, 20));
}
