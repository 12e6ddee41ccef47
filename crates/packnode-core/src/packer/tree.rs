use crate::model::Rect;
use serde::Serialize;

/// Handle to a node in the pack tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: Self = Self(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// A region of the canvas. Leaves are free; internal nodes have been split
/// around a placement and are only traversed.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    rect: Rect,
    /// `(right strip, bottom strip)`; `None` while the node is a free leaf.
    children: Option<(NodeId, NodeId)>,
}

impl Node {
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// Append-only arena of nodes. Node 0 is the root.
#[derive(Debug, Clone)]
pub(crate) struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    pub(crate) fn with_root(rect: Rect) -> Self {
        Self {
            nodes: vec![Node {
                rect,
                children: None,
            }],
        }
    }

    pub(crate) fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub(crate) fn try_get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub(crate) fn as_slice(&self) -> &[Node] {
        &self.nodes
    }

    fn push(&mut self, rect: Rect) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            rect,
            children: None,
        });
        id
    }

    /// First leaf in depth-first order (right strip before bottom strip) that
    /// can hold a `w x h` rectangle.
    pub(crate) fn find_leaf(&self, w: u32, h: u32) -> Option<NodeId> {
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            let node = self.get(id);
            // Every leaf below a node lies inside it.
            if !node.rect.fits(w, h) {
                continue;
            }
            match node.children {
                Some((right, bottom)) => {
                    stack.push(bottom);
                    stack.push(right);
                }
                None => return Some(id),
            }
        }
        None
    }

    /// Carves `w x h` from the top-left of leaf `id` and returns the placed rect.
    ///
    /// The leftover becomes two leaves: a right strip as tall as the placement,
    /// and a bottom strip spanning the full width of the old leaf.
    pub(crate) fn split(&mut self, id: NodeId, w: u32, h: u32) -> Rect {
        let r = self.get(id).rect;
        debug_assert!(self.get(id).is_leaf(), "split on internal node");
        debug_assert!(r.fits(w, h), "split without fit");

        let right = self.push(Rect::new(r.x0 + w, r.y0, r.x1, r.y0 + h));
        let bottom = self.push(Rect::new(r.x0, r.y0 + h, r.x1, r.y1));
        self.nodes[id.index()].children = Some((right, bottom));
        Rect::new(r.x0, r.y0, r.x0 + w, r.y0 + h)
    }
}
