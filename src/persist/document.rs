//! On-disk board document (wire format).
//!
//! The file keeps the historical layout of parallel name-keyed maps so
//! boards stay interchangeable with older exports; the in-memory registry
//! consolidates them into one record per entity. Every field except `sets`
//! is optional on import and falls back to documented defaults.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::entities::ChannelFilter;

/// Embedded background image: base64 payload plus enough metadata to put
/// the file back where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundImage {
    pub data: String,
    pub format: String,
    pub path: String,
}

/// Top-level JSON document for export/import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardDocument {
    pub sets: IndexMap<String, Vec<String>>,
    pub positions: IndexMap<String, [f32; 2]>,
    pub colors: IndexMap<String, [u8; 3]>,
    pub sizes: IndexMap<String, [f32; 2]>,
    pub transparency: IndexMap<String, u8>,
    pub parents: IndexMap<String, Option<String>>,
    pub channels: ChannelFilter,
    pub parent_groups: IndexMap<String, Vec<String>>,
    pub group_positions: IndexMap<String, [f32; 2]>,
    pub group_colors: IndexMap<String, [u8; 3]>,
    pub group_sizes: IndexMap<String, [f32; 2]>,
    pub group_transparency: IndexMap<String, u8>,
    pub background_image: Option<BackgroundImage>,
}
