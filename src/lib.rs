//! SELSET - Selection set board library
//!
//! Re-exports all modules for use by the binary target.

pub mod app;
pub mod cli;
pub mod entities;
pub mod persist;
pub mod scene;
pub mod select;
pub mod utils;
pub mod widgets;

// Re-export commonly used types
pub use entities::{Channel, ChannelFilter, ParentGroup, RegistryError, SelectionSet, SetRegistry};
pub use persist::{BoardDocument, ImportReport};
pub use scene::{MockScene, Scene};
pub use select::SelectionOutcome;
