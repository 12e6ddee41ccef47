use crate::model::Layout;
use crate::packer::Packer;
use serde_json::{Value, json};

/// Serialize a `Layout` as `{ placements: [...], unplaced: [...], meta }`.
/// Placements keep submission order; each carries `key`, `frame` (x/y/w/h) and `rect` (corners).
pub fn to_json_array<K: ToString>(layout: &Layout<K>) -> Value {
    let placements: Vec<Value> = layout
        .placements
        .iter()
        .map(|p| {
            let r = &p.rect;
            json!({
                "key": p.key.to_string(),
                "order": p.order,
                "frame": {"x": r.x0, "y": r.y0, "w": r.width(), "h": r.height()},
                "rect": [r.x0, r.y0, r.x1, r.y1],
            })
        })
        .collect();
    let unplaced: Vec<Value> = layout
        .unplaced
        .iter()
        .map(|r| json!({"key": r.key.to_string(), "w": r.w, "h": r.h}))
        .collect();
    json!({"placements": placements, "unplaced": unplaced, "meta": &layout.meta})
}

/// Placements keyed by name: `{ frames: { name: { frame, rect, order } }, meta }`.
/// Later duplicates of a key overwrite earlier ones.
pub fn to_json_hash<K: ToString>(layout: &Layout<K>) -> Value {
    let mut frames = serde_json::Map::new();
    for p in &layout.placements {
        let r = &p.rect;
        frames.insert(
            p.key.to_string(),
            json!({
                "frame": {"x": r.x0, "y": r.y0, "w": r.width(), "h": r.height()},
                "rect": [r.x0, r.y0, r.x1, r.y1],
                "order": p.order,
            }),
        );
    }
    json!({ "frames": frames, "meta": &layout.meta })
}

/// Debug dump of the pack tree arena: canvas, every node with its rect and
/// child ids, and the placements in insertion order.
pub fn tree_to_json(packer: &Packer) -> Value {
    let nodes: Vec<Value> = packer
        .nodes()
        .iter()
        .enumerate()
        .map(|(i, n)| {
            json!({
                "id": i,
                "rect": n.rect(),
                "children": n.children(),
            })
        })
        .collect();
    json!({
        "canvas": packer.canvas(),
        "nodes": nodes,
        "placements": packer.placements(),
        "leaves": packer.leaf_count(),
        "free_area": packer.free_area(),
    })
}
