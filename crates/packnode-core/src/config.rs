use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Submission orders for the batch layer.
///
/// The pack tree is first-fit and never revisits earlier placements, so the
/// order decides packing quality. Larger-first usually packs denser; `AreaAsc`
/// is the default to match the historical behavior of the tool, which only
/// sorted largest-first on request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Smallest area first, ties by key ascending.
    AreaAsc,
    /// Exact reverse of `AreaAsc`: largest area first, ties by key descending.
    AreaDesc,
    /// Keep the caller's order.
    None,
}

impl FromStr for SortOrder {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "area_asc" | "smallest_first" => Ok(Self::AreaAsc),
            "area_desc" | "largest_first" => Ok(Self::AreaDesc),
            "none" => Ok(Self::None),
            _ => Err(()),
        }
    }
}

/// What the batch layer does with a request that does not fit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first request that does not fit and report it.
    Abort,
    /// Record the request as unplaced and keep going.
    Skip,
}

impl FromStr for FailurePolicy {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackerConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    #[serde(default = "default_sort_order")]
    pub sort_order: SortOrder,
    #[serde(default = "default_on_failure")]
    pub on_failure: FailurePolicy,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            sort_order: default_sort_order(),
            on_failure: default_on_failure(),
        }
    }
}

impl PackerConfig {
    /// Validates the configuration parameters.
    ///
    /// Returns `InvalidCanvas` if either canvas dimension is zero.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::PackError;

        if self.width == 0 || self.height == 0 {
            return Err(PackError::InvalidCanvas {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Create a fluent builder for `PackerConfig`.
    pub fn builder() -> PackerConfigBuilder {
        PackerConfigBuilder::new()
    }
}

fn default_sort_order() -> SortOrder {
    SortOrder::AreaAsc
}
fn default_on_failure() -> FailurePolicy {
    FailurePolicy::Abort
}

/// Builder for `PackerConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct PackerConfigBuilder {
    cfg: PackerConfig,
}

impl PackerConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PackerConfig::default(),
        }
    }
    pub fn with_canvas(mut self, w: u32, h: u32) -> Self {
        self.cfg.width = w;
        self.cfg.height = h;
        self
    }
    pub fn sort_order(mut self, v: SortOrder) -> Self {
        self.cfg.sort_order = v;
        self
    }
    /// Shorthand for `sort_order(AreaDesc)` / `sort_order(AreaAsc)`.
    pub fn largest_first(mut self, v: bool) -> Self {
        self.cfg.sort_order = if v {
            SortOrder::AreaDesc
        } else {
            SortOrder::AreaAsc
        };
        self
    }
    pub fn on_failure(mut self, v: FailurePolicy) -> Self {
        self.cfg.on_failure = v;
        self
    }
    pub fn build(self) -> PackerConfig {
        self.cfg
    }
}
