//! Typed action queue for widget UI.
//!
//! Widgets never mutate the registry while rendering; they describe the
//! mutation as a [`BoardAction`] and the app applies the queue after the
//! frame is laid out. Everything is synchronous, there is no bus.

use crate::entities::Channel;

/// One user-requested mutation or command.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardAction {
    // Toolbar
    CreateSetFromSelection,
    CreateGroup,
    ChooseBackground,
    ClearBackground,
    ExportBoard,
    ImportBoard,

    // Set widgets
    SelectSet { name: String, respect_channels: bool },
    MoveSet { name: String, pos: [f32; 2] },
    ResizeSet { name: String, size: [f32; 2] },
    RecolorSet { name: String, color: [u8; 3] },
    SetAlpha { name: String, alpha: u8 },
    RenameSet { old: String, new: String },
    DeleteSet { name: String },
    SetParent { child: String, parent: Option<String> },
    AddToGroup { set: String, group: String },
    RemoveFromGroup { set: String },

    // Group widgets
    SelectGroup { name: String },
    MoveGroup { name: String, pos: [f32; 2] },
    ResizeGroup { name: String, size: [f32; 2] },
    RecolorGroup { name: String, color: [u8; 3] },
    SetGroupAlpha { name: String, alpha: u8 },
    RenameGroup { old: String, new: String },
    DeleteGroup { name: String },

    // Channel panel
    SetChannel { channel: Channel, on: bool },
    SetAllChannels { on: bool },

    // Hierarchy tools
    SelectChain { top: String },
    CreateChainSet { top: String },
}

/// Actions collected during one frame, applied afterwards in order.
#[derive(Debug, Default)]
pub struct ActionQueue {
    actions: Vec<BoardAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: BoardAction) {
        self.actions.push(action);
    }

    pub fn take(self) -> Vec<BoardAction> {
        self.actions
    }
}
