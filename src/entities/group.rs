//! Parent group entity.

use serde::{Deserialize, Serialize};

use super::style::Style;

/// Container of sets on the board. Groups live in their own namespace,
/// cannot nest inside each other and are not selectable as sets; deleting
/// a group only discards the container, never its member sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentGroup {
    /// Member set names, in the order they were added.
    pub members: Vec<String>,

    pub style: Style,
}

impl ParentGroup {
    pub fn new(pos: [f32; 2]) -> Self {
        Self {
            members: Vec::new(),
            style: Style::group_default(pos),
        }
    }
}
