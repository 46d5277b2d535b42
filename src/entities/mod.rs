//! Data model: sets, groups, channel filter and the registry that owns them.
//!
//! Nothing in here touches the GUI or the host scene; widgets read the
//! registry to draw themselves and mutate it through its methods.

pub mod channels;
pub mod group;
pub mod registry;
pub mod set;
pub mod style;

pub use channels::{Channel, ChannelFilter};
pub use group::ParentGroup;
pub use registry::{RegistryError, SetRegistry};
pub use set::SelectionSet;
pub use style::Style;
