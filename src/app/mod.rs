//! Application module - SelsetApp and related functionality.
//!
//! - `events` - applying queued [`BoardAction`]s to the registry
//! - `run` - the eframe::App implementation
//!
//! [`BoardAction`]: crate::widgets::BoardAction

mod events;
mod run;

use log::error;
use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::entities::SetRegistry;
use crate::persist;
use crate::scene::MockScene;
use crate::widgets::{BoardState, ChainPanel, StatusBar};

/// UI preferences persisted via eframe storage. The board itself persists
/// only through explicit export/import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub dark_mode: bool,
    pub font_size: f32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            dark_mode: true,
            font_size: 14.0,
        }
    }
}

/// Active tab in the tools panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolsTab {
    Channels,
    Hierarchy,
}

/// Main application state.
pub struct SelsetApp {
    pub registry: SetRegistry,
    pub scene: MockScene,
    pub settings: AppSettings,
    pub tools_tab: ToolsTab,
    pub status: StatusBar,
    pub board: BoardState,
    pub chain_panel: ChainPanel,
}

impl SelsetApp {
    pub fn new(cc: &eframe::CreationContext<'_>, args: &Args) -> Self {
        let settings: AppSettings = cc
            .storage
            .and_then(|s| eframe::get_value(s, "settings"))
            .unwrap_or_default();
        let tools_tab = cc
            .storage
            .and_then(|s| eframe::get_value(s, "tools_tab"))
            .unwrap_or(ToolsTab::Channels);

        let scene = MockScene::demo();
        let mut app = Self {
            registry: SetRegistry::new(),
            scene,
            settings,
            tools_tab,
            status: StatusBar::new(),
            board: BoardState::default(),
            chain_panel: ChainPanel::default(),
        };

        if let Some(path) = &args.board {
            match persist::import_board(path, &app.scene) {
                Ok((registry, report)) => {
                    app.registry = registry;
                    app.status.info(report.message());
                }
                Err(err) => {
                    error!("startup import of {} failed: {:#}", path.display(), err);
                    app.status.warn(format!("Failed to import board: {}", err));
                }
            }
        }
        app
    }
}
