//! Presentation layer: egui widgets projecting registry entries.

pub mod actions;
pub mod board;
pub mod chain_panel;
pub mod channel_panel;
pub mod file_dialogs;
pub mod status;

pub use actions::{ActionQueue, BoardAction};
pub use board::BoardState;
pub use chain_panel::ChainPanel;
pub use status::StatusBar;
