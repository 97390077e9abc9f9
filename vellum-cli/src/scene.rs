//! Scene description files.
//!
//! ```json
//! {
//!   "nodes": [
//!     { "id": 1, "z": 2, "shape": { "type": "rect", "x": 0, "y": 0, "width": 40, "height": 20 } },
//!     { "id": 2, "invisible": true, "shape": { "type": "text", "x": 4, "y": 4, "text": "hi" } }
//!   ],
//!   "remove": [1]
//! }
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use vellum_dom::{NativeTree, NodeId, NodeType};
use vellum_scene::{SceneNode, SceneNodeId, Shape};

/// A scene to paint, plus nodes to remove after the first pass.
#[derive(Debug, Deserialize)]
pub struct SceneFile {
    /// Nodes added before the first refresh, in insertion order.
    pub nodes: Vec<NodeSpec>,
    /// Ids removed after the first refresh.
    #[serde(default)]
    pub remove: Vec<SceneNodeId>,
}

/// One scene node entry.
#[derive(Debug, Deserialize)]
pub struct NodeSpec {
    /// Node identity.
    pub id: SceneNodeId,
    #[serde(default)]
    zlevel: i32,
    #[serde(default)]
    z: i32,
    #[serde(default)]
    z2: i32,
    #[serde(default)]
    invisible: bool,
    shape: Shape,
}

impl NodeSpec {
    /// Build the scene node this entry describes.
    #[must_use]
    pub fn into_node(self) -> SceneNode {
        SceneNode::new(self.id, self.shape)
            .with_z(self.zlevel, self.z, self.z2)
            .with_invisible(self.invisible)
    }
}

impl SceneFile {
    /// Parse a scene description.
    ///
    /// # Errors
    ///
    /// Returns an error if `source` is not a valid scene document.
    pub fn parse(source: &str) -> Result<Self> {
        serde_json::from_str(source).context("invalid scene description")
    }
}

/// Parse a `<W>x<H>` size argument.
///
/// # Errors
///
/// Returns a message naming the malformed part.
pub fn parse_size(value: &str) -> Result<(f64, f64), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected <W>x<H>, got '{value}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid dimension '{part}': {e}"))
    };
    Ok((parse(w)?, parse(h)?))
}

/// Convert a native subtree to JSON.
#[must_use]
pub fn node_to_json(tree: &NativeTree, id: NodeId) -> Value {
    let mut obj = Map::new();

    match tree.get(id).map(|n| &n.node_type) {
        Some(NodeType::Document) => {
            let _ = obj.insert("type".to_string(), json!("document"));
        }
        Some(NodeType::Element(data)) => {
            let _ = obj.insert("type".to_string(), json!("element"));
            let _ = obj.insert("tagName".to_string(), json!(data.tag_name));

            let attrs: Map<String, Value> = data
                .attrs
                .iter()
                .map(|(k, v)| (k.clone(), json!(v)))
                .collect();
            let _ = obj.insert("attributes".to_string(), Value::Object(attrs));

            let style: Map<String, Value> = data
                .style
                .iter()
                .map(|(k, v)| (k.to_string(), json!(v)))
                .collect();
            let _ = obj.insert("style".to_string(), Value::Object(style));
        }
        Some(NodeType::Text(text)) => {
            let _ = obj.insert("type".to_string(), json!("text"));
            let _ = obj.insert("content".to_string(), json!(text));
        }
        None => return Value::Null,
    }

    let children = tree.children(id);
    if !children.is_empty() {
        let children: Vec<Value> = children
            .iter()
            .map(|&child| node_to_json(tree, child))
            .collect();
        let _ = obj.insert("children".to_string(), Value::Array(children));
    }

    Value::Object(obj)
}
