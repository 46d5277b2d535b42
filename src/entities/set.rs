//! Selection set entity.

use serde::{Deserialize, Serialize};

use super::style::Style;

/// Named, ordered collection of scene object ids plus display properties.
///
/// The name itself is the registry key; the record holds everything else.
/// `parent` points at another set by name (single-parent forest, cycle
/// checked by the registry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionSet {
    /// Scene object ids, in the order they were captured.
    pub members: Vec<String>,

    /// Parent set name, if nested under another set.
    #[serde(default)]
    pub parent: Option<String>,

    pub style: Style,
}

impl SelectionSet {
    pub fn new(members: Vec<String>, pos: [f32; 2]) -> Self {
        Self {
            members,
            parent: None,
            style: Style::set_default(pos),
        }
    }
}
