//! Core library for placing rectangles on a fixed-size canvas.
//!
//! - Engine: [`Packer`], a guillotine pack tree. Each insert takes the first free
//!   leaf (depth-first) that fits, places the rectangle top-left and splits the
//!   remainder into a right strip and a bottom strip. Failed inserts leave the tree unchanged.
//! - Batch: `pack_layout` / `pack_requests` sort keyed requests per [`SortOrder`] and
//!   apply a [`FailurePolicy`] to requests that do not fit.
//! - Data model is serde-serializable; JSON exporters live in [`export`].
//!
//! Quick example:
//! ```
//! use packnode_core::{PackerConfig, SortOrder, pack_layout};
//! # fn main() -> packnode_core::Result<()> {
//! let cfg = PackerConfig::builder()
//!     .with_canvas(100, 50)
//!     .sort_order(SortOrder::AreaDesc)
//!     .build();
//! let layout = pack_layout(vec![("a", 40, 50), ("b", 60, 50)], cfg)?;
//! assert_eq!(layout.placements.len(), 2);
//! # Ok(()) }
//! ```
//!
//! Driving the engine directly:
//! ```
//! use packnode_core::{Packer, Rect};
//! # fn main() -> packnode_core::Result<()> {
//! let mut packer = Packer::new(10, 10)?;
//! assert_eq!(packer.insert(6, 4)?, Rect::new(0, 0, 6, 4));
//! assert_eq!(packer.insert(3, 3)?, Rect::new(6, 0, 9, 3));
//! # Ok(()) }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod packer;
pub mod pipeline;

pub use config::*;
pub use error::*;
pub use export::*;
pub use model::*;
pub use packer::*;
pub use pipeline::*;

/// Convenience prelude for common types and functions.
/// Importing `packnode_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{FailurePolicy, PackerConfig, PackerConfigBuilder, SortOrder};
    pub use crate::error::{PackError, Result};
    pub use crate::model::{Layout, Meta, PackStats, Placement, Rect, Request, Size};
    pub use crate::packer::{Node, NodeId, Packer};
    pub use crate::{pack_layout, pack_requests, pack_with_tree, sort_requests};
}
