//! Visual properties shared by sets and groups.
//!
//! Every entity carries a complete `Style` from creation to deletion;
//! there is never a partially-styled set on the board.

use serde::{Deserialize, Serialize};

/// Default widget transparency (0 = invisible, 255 = opaque).
pub const DEFAULT_ALPHA: u8 = 180;

/// Default set widget fill (neutral gray).
pub const SET_COLOR: [u8; 3] = [70, 70, 70];
pub const SET_SIZE: [f32; 2] = [200.0, 150.0];

/// Groups are rendered larger and warmer so they read as containers.
pub const GROUP_COLOR: [u8; 3] = [100, 100, 60];
pub const GROUP_SIZE: [f32; 2] = [300.0, 200.0];

/// Board origin for the first widget, and the cascade offset for the rest.
pub const ORIGIN: [f32; 2] = [20.0, 20.0];
pub const CASCADE_STEP: f32 = 20.0;

/// Position, size, color and transparency of one board widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub pos: [f32; 2],
    pub size: [f32; 2],
    pub color: [u8; 3],
    pub alpha: u8,
}

impl Style {
    pub fn set_default(pos: [f32; 2]) -> Self {
        Self {
            pos,
            size: SET_SIZE,
            color: SET_COLOR,
            alpha: DEFAULT_ALPHA,
        }
    }

    pub fn group_default(pos: [f32; 2]) -> Self {
        Self {
            pos,
            size: GROUP_SIZE,
            color: GROUP_COLOR,
            alpha: DEFAULT_ALPHA,
        }
    }
}

/// Placement for a newly created widget: offset from the furthest occupied
/// position, or the board origin on an empty board.
pub fn cascade(existing: impl Iterator<Item = [f32; 2]>) -> [f32; 2] {
    let mut max: Option<[f32; 2]> = None;
    for pos in existing {
        let m = max.get_or_insert(pos);
        m[0] = m[0].max(pos[0]);
        m[1] = m[1].max(pos[1]);
    }
    match max {
        Some([x, y]) => [x + CASCADE_STEP, y + CASCADE_STEP],
        None => ORIGIN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cascade_empty_board() {
        assert_eq!(cascade(std::iter::empty()), ORIGIN);
    }

    #[test]
    fn test_cascade_offsets_from_furthest() {
        let positions = [[20.0, 80.0], [120.0, 40.0]];
        assert_eq!(cascade(positions.into_iter()), [140.0, 100.0]);
    }
}
