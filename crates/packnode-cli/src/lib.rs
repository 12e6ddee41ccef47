//! Input handling shared by the `packnode` binary: request files and the
//! YAML config overlay.

use std::fs;
use std::path::Path;

use anyhow::Context;
use packnode_core::config::{FailurePolicy, SortOrder};
use packnode_core::{PackerConfig, Request, Size, parse_requests};
use serde::Deserialize;

/// Format of a request file, picked from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
    /// One `key WxH` per line.
    Listing,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => InputFormat::Json,
            Some("yaml") | Some("yml") => InputFormat::Yaml,
            _ => InputFormat::Listing,
        }
    }
}

pub fn decode_requests(text: &str, format: InputFormat) -> anyhow::Result<Vec<Request<String>>> {
    let requests: Vec<Request<String>> = match format {
        InputFormat::Json => serde_json::from_str(text).context("parse JSON requests")?,
        InputFormat::Yaml => serde_yaml::from_str(text).context("parse YAML requests")?,
        InputFormat::Listing => parse_requests(text).context("parse request list")?,
    };
    Ok(requests)
}

pub fn load_requests(path: &Path) -> anyhow::Result<Vec<Request<String>>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read input {}", path.display()))?;
    decode_requests(&text, InputFormat::from_path(path))
        .with_context(|| format!("load requests from {}", path.display()))
}

/// Config file overlay. Every field present in the file replaces the value
/// coming from the command line.
#[derive(Debug, Deserialize, Default)]
pub struct YamlConfig {
    pub size: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub sort_order: Option<String>,
    /// Applied after `sort_order`: `true` selects `area_desc`, `false` turns
    /// `area_desc` back into `area_asc` and leaves other orders alone.
    pub largest_first: Option<bool>,
    pub on_failure: Option<String>,
}

impl YamlConfig {
    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(text).context("parse YAML config")
    }

    pub fn into_packer_config(self, mut cfg: PackerConfig) -> anyhow::Result<PackerConfig> {
        if let Some(v) = self.size {
            let size: Size = v.parse()?;
            cfg.width = size.w;
            cfg.height = size.h;
        }
        if let Some(v) = self.width {
            cfg.width = v;
        }
        if let Some(v) = self.height {
            cfg.height = v;
        }
        if let Some(v) = self.sort_order {
            cfg.sort_order = parse_sort_order(&v)?;
        }
        match self.largest_first {
            Some(true) => cfg.sort_order = SortOrder::AreaDesc,
            Some(false) if cfg.sort_order == SortOrder::AreaDesc => {
                cfg.sort_order = SortOrder::AreaAsc
            }
            _ => {}
        }
        if let Some(v) = self.on_failure {
            cfg.on_failure = parse_on_failure(&v)?;
        }
        Ok(cfg)
    }
}

pub fn parse_sort_order(s: &str) -> anyhow::Result<SortOrder> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("unknown sort order: {} (expected area_asc|area_desc|none)", s))
}

pub fn parse_on_failure(s: &str) -> anyhow::Result<FailurePolicy> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("unknown failure policy: {} (expected abort|skip)", s))
}
