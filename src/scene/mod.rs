//! Host scene abstraction.
//!
//! The board never talks to a host 3D application directly: the handful of
//! queries and mutations it needs sit behind the [`Scene`] trait, so the
//! data model can be exercised against [`MockScene`] in tests and in the
//! standalone demo binary, and against a real host binding elsewhere.

mod mock;

pub use mock::MockScene;

use anyhow::Result;

/// Narrow interface to the host scene graph and its selection.
pub trait Scene {
    /// Currently selected object ids, in selection order.
    fn current_selection(&self) -> Vec<String>;

    /// Whether `id` resolves to a scene object.
    fn object_exists(&self, id: &str) -> bool;

    /// Whether an attribute path like `"|rig|arm.tx"` resolves.
    fn attribute_exists(&self, path: &str) -> bool;

    /// All descendants of `root`, depth-first, excluding `root` itself.
    fn descendants(&self, root: &str) -> Vec<String>;

    /// Replace the scene selection with the given object or attribute paths.
    fn apply_selection(&mut self, paths: &[String]) -> Result<()>;

    /// Clear the scene selection.
    fn clear_selection(&mut self);
}
