use crate::error::{PackError, Result};
use crate::model::{Rect, Size};
use tracing::{debug, trace};

pub mod tree;

pub use tree::{Node, NodeId};
use tree::Arena;

/// Places rectangles on a fixed canvas using a guillotine pack tree.
///
/// Each successful insert takes the first free leaf (depth-first, right strip
/// before bottom strip) that is large enough, puts the rectangle in its
/// top-left corner and splits the rest into two new leaves. Placements are
/// never moved or removed, so results depend on the submission order.
///
/// A failed insert leaves the tree untouched.
#[derive(Debug, Clone)]
pub struct Packer {
    canvas: Size,
    arena: Arena,
    placed: Vec<Rect>,
}

impl Packer {
    /// Creates a packer for a `width x height` canvas.
    /// Returns `InvalidCanvas` if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PackError::InvalidCanvas { width, height });
        }
        debug!(width, height, "new pack tree");
        Ok(Self {
            canvas: Size::new(width, height),
            arena: Arena::with_root(Rect::from_size(width, height)),
            placed: Vec::new(),
        })
    }

    /// Places a `w x h` rectangle and returns its position in canvas coordinates.
    ///
    /// Fails with `InvalidRequest` for zero-sized requests and with `DoesNotFit`
    /// when no free leaf can hold the rectangle.
    pub fn insert(&mut self, w: u32, h: u32) -> Result<Rect> {
        check_request(w, h)?;
        let Some(leaf) = self.arena.find_leaf(w, h) else {
            debug!(w, h, "does not fit");
            return Err(PackError::DoesNotFit {
                width: w,
                height: h,
            });
        };
        let rect = self.arena.split(leaf, w, h);
        trace!(w, h, leaf = leaf.index(), %rect, "placed");
        self.placed.push(rect);
        Ok(rect)
    }

    /// True if `insert(w, h)` would succeed. Does not modify the tree.
    pub fn can_insert(&self, w: u32, h: u32) -> bool {
        w > 0 && h > 0 && self.arena.find_leaf(w, h).is_some()
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Looks up a node by handle. Returns `None` when `id` is past the end of
    /// this tree (e.g. a handle taken from a larger packer).
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.arena.try_get(id)
    }

    /// All nodes in creation order; index 0 is the root.
    pub fn nodes(&self) -> &[Node] {
        self.arena.as_slice()
    }

    /// Placed rectangles in insertion order.
    pub fn placements(&self) -> &[Rect] {
        &self.placed
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes().iter().filter(|n| n.is_leaf()).count()
    }

    pub fn used_area(&self) -> u64 {
        self.placed.iter().map(Rect::area).sum()
    }

    /// Total area of free leaves. Always `canvas area - used_area()`.
    pub fn free_area(&self) -> u64 {
        self.nodes()
            .iter()
            .filter(|n| n.is_leaf())
            .map(|n| n.rect().area())
            .sum()
    }
}

fn check_request(w: u32, h: u32) -> Result<()> {
    if w == 0 || h == 0 {
        return Err(PackError::InvalidRequest {
            width: w,
            height: h,
        });
    }
    Ok(())
}
