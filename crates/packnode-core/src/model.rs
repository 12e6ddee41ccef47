use crate::config::{FailurePolicy, SortOrder};
use crate::error::{PackError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Axis-aligned rectangle (pixels) stored by its corners.
/// `(x0, y0)` is top-left and inclusive, `(x1, y1)` is bottom-right and exclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl Rect {
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        debug_assert!(x0 <= x1 && y0 <= y1, "inverted rect");
        Self { x0, y0, x1, y1 }
    }
    /// Rectangle of size `w x h` anchored at the origin.
    pub fn from_size(w: u32, h: u32) -> Self {
        Self::new(0, 0, w, h)
    }
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }
    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }
    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
    pub fn area(&self) -> u64 {
        (self.width() as u64) * (self.height() as u64)
    }
    pub fn is_empty(&self) -> bool {
        self.x0 == self.x1 || self.y0 == self.y1
    }
    /// True when the interiors overlap. Rectangles sharing only an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }
    /// Returns true if `r` lies fully inside `self` (edges may touch).
    pub fn contains(&self, r: &Rect) -> bool {
        r.x0 >= self.x0 && r.y0 >= self.y0 && r.x1 <= self.x1 && r.y1 <= self.y1
    }
    /// True when a `w x h` rectangle fits inside this one without rotation.
    pub fn fits(&self, w: u32, h: u32) -> bool {
        w <= self.width() && h <= self.height()
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x0, self.y0, self.x1, self.y1)
    }
}

/// Width/height pair. Parses from `W,H`, `W:H` or `WxH`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }
    pub fn area(&self) -> u64 {
        (self.w as u64) * (self.h as u64)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

impl FromStr for Size {
    type Err = PackError;
    fn from_str(s: &str) -> Result<Self> {
        let t = s.trim();
        let parts = [',', ':', 'x', 'X']
            .iter()
            .find_map(|sep| t.split_once(*sep))
            .ok_or_else(|| PackError::InvalidSize(s.to_string()))?;
        let w = parts.0.trim().parse::<u32>();
        let h = parts.1.trim().parse::<u32>();
        match (w, h) {
            (Ok(w), Ok(h)) => Ok(Size::new(w, h)),
            _ => Err(PackError::InvalidSize(s.to_string())),
        }
    }
}

/// A keyed rectangle request. The key is opaque to the packer; it is only
/// carried through so callers can associate placements with their own objects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Request<K = String> {
    pub key: K,
    pub w: u32,
    pub h: u32,
}

impl<K> Request<K> {
    pub fn new(key: K, w: u32, h: u32) -> Self {
        Self { key, w, h }
    }
    pub fn area(&self) -> u64 {
        (self.w as u64) * (self.h as u64)
    }
}

impl FromStr for Request<String> {
    type Err = PackError;
    /// Parses `key WxH` (also `key W,H` / `key W:H`). The key may contain spaces;
    /// the size is the last whitespace-separated token.
    fn from_str(s: &str) -> Result<Self> {
        let t = s.trim();
        let (key, size) = t
            .rsplit_once(char::is_whitespace)
            .ok_or_else(|| PackError::InvalidRequestLine(format!("expected 'key WxH', got '{t}'")))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(PackError::InvalidRequestLine(format!("missing key in '{t}'")));
        }
        let size: Size = size.parse()?;
        Ok(Request::new(key.to_string(), size.w, size.h))
    }
}

/// Parses a text listing of requests, one `key WxH` per line.
/// Blank lines and lines starting with `#` are ignored.
pub fn parse_requests(text: &str) -> Result<Vec<Request<String>>> {
    let mut out = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let req = line.parse::<Request<String>>().map_err(|e| {
            PackError::InvalidRequestLine(format!("line {}: {}", idx + 1, e))
        })?;
        out.push(req);
    }
    Ok(out)
}

/// A request that was placed on the canvas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Placement<K = String> {
    /// User-specified key (e.g., filename or asset path).
    pub key: K,
    /// Placed rectangle in canvas coordinates.
    pub rect: Rect,
    /// Position of the request in the submission sequence (after sorting).
    pub order: usize,
}

/// Layout-level metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    /// Schema version for the JSON layout format; current: "1".
    pub schema_version: String,
    pub app: String,
    pub version: String,
    pub canvas: Size,
    pub sort_order: SortOrder,
    pub on_failure: FailurePolicy,
}

/// Result of a batch run on a single canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout<K = String> {
    /// Placements in submission order.
    pub placements: Vec<Placement<K>>,
    /// Requests that did not fit (only populated with `FailurePolicy::Skip`).
    pub unplaced: Vec<Request<K>>,
    pub meta: Meta,
}

/// Statistics about how well a layout uses its canvas.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PackStats {
    /// Number of requests submitted.
    pub num_requests: usize,
    pub num_placed: usize,
    pub num_unplaced: usize,
    pub canvas_area: u64,
    /// Sum of placed rectangle areas.
    pub used_area: u64,
    /// used_area / canvas_area (0.0 to 1.0).
    pub occupancy: f64,
}

impl<K> Layout<K> {
    pub fn canvas(&self) -> Size {
        self.meta.canvas
    }

    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Computes packing statistics for this layout.
    pub fn stats(&self) -> PackStats {
        let canvas_area = self.meta.canvas.area();
        let used_area: u64 = self.placements.iter().map(|p| p.rect.area()).sum();
        let occupancy = if canvas_area > 0 {
            used_area as f64 / canvas_area as f64
        } else {
            0.0
        };
        PackStats {
            num_requests: self.placements.len() + self.unplaced.len(),
            num_placed: self.placements.len(),
            num_unplaced: self.unplaced.len(),
            canvas_area,
            used_area,
            occupancy,
        }
    }
}

impl PackStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Placed: {}/{}, Unplaced: {}, Occupancy: {:.2}%, Canvas Area: {} px², Used Area: {} px²",
            self.num_placed,
            self.num_requests,
            self.num_unplaced,
            self.occupancy * 100.0,
            self.canvas_area,
            self.used_area,
        )
    }

    /// Returns wasted space in pixels.
    pub fn wasted_area(&self) -> u64 {
        self.canvas_area.saturating_sub(self.used_area)
    }

    /// Returns wasted space as a percentage (0.0 to 100.0).
    pub fn waste_percentage(&self) -> f64 {
        if self.canvas_area > 0 {
            (self.wasted_area() as f64 / self.canvas_area as f64) * 100.0
        } else {
            0.0
        }
    }
}
