//! Applying queued board actions to the registry and the scene.
//!
//! Every action is handled synchronously here; failures land in the
//! status bar instead of raising dialogs.

use log::debug;

use super::SelsetApp;
use crate::persist;
use crate::scene::Scene;
use crate::select::{self, SelectionOutcome};
use crate::widgets::{BoardAction, file_dialogs};

pub fn handle_actions(app: &mut SelsetApp, actions: Vec<BoardAction>) {
    for action in actions {
        debug!("action: {:?}", action);
        handle_action(app, action);
    }
}

fn handle_action(app: &mut SelsetApp, action: BoardAction) {
    use BoardAction::*;
    match action {
        CreateSetFromSelection => {
            let selection = app.scene.current_selection();
            match app.registry.create_set("NewSet", selection) {
                Ok(name) => app.status.info(format!("Created set '{}'", name)),
                Err(err) => app.status.warn(err.to_string()),
            }
        }
        CreateGroup => {
            let name = app.registry.create_group("ParentGroup");
            app.status.info(format!("Created group '{}'", name));
        }
        ChooseBackground => {
            if let Some(path) = file_dialogs::image_dialog("Choose Background Image").pick_file() {
                app.registry.set_background(Some(path));
            }
        }
        ClearBackground => app.registry.set_background(None),
        ExportBoard => {
            if let Some(path) = file_dialogs::board_dialog("Export Board").save_file() {
                match persist::export_board(&app.registry, &path) {
                    Ok(written) => app
                        .status
                        .info(format!("Exported board to {}", written.display())),
                    Err(err) => app.status.warn(format!("Export failed: {}", err)),
                }
            }
        }
        ImportBoard => {
            if let Some(path) = file_dialogs::board_dialog("Import Board").pick_file() {
                match persist::import_board(&path, &app.scene) {
                    Ok((registry, report)) => {
                        // Full-state replace, only after a successful parse.
                        app.registry = registry;
                        if report.is_warning() {
                            app.status.warn(report.message());
                        } else {
                            app.status.info(report.message());
                        }
                    }
                    Err(err) => app.status.warn(format!("Import failed: {}", err)),
                }
            }
        }

        SelectSet {
            name,
            respect_channels,
        } => {
            let result = select::select_set(&app.registry, &mut app.scene, &name, respect_channels);
            report_selection(app, result);
        }
        SelectGroup { name } => {
            let result = select::select_group(&app.registry, &mut app.scene, &name, true);
            report_selection(app, result);
        }

        // Drag-driven updates fire every frame; stay quiet unless broken.
        MoveSet { name, pos } => {
            let result = app.registry.move_set(&name, pos);
            report_err(app, result);
        }
        ResizeSet { name, size } => {
            let result = app.registry.resize_set(&name, size);
            report_err(app, result);
        }
        MoveGroup { name, pos } => {
            let result = app.registry.move_group(&name, pos);
            report_err(app, result);
        }
        ResizeGroup { name, size } => {
            let result = app.registry.resize_group(&name, size);
            report_err(app, result);
        }
        RecolorSet { name, color } => {
            let result = app.registry.recolor_set(&name, color);
            report_err(app, result);
        }
        SetAlpha { name, alpha } => {
            let result = app.registry.set_set_alpha(&name, alpha);
            report_err(app, result);
        }
        RecolorGroup { name, color } => {
            let result = app.registry.recolor_group(&name, color);
            report_err(app, result);
        }
        SetGroupAlpha { name, alpha } => {
            let result = app.registry.set_group_alpha(&name, alpha);
            report_err(app, result);
        }

        RenameSet { old, new } => match app.registry.rename_set(&old, &new) {
            Ok(()) => app.status.info(format!("Renamed '{}' to '{}'", old, new)),
            Err(err) => app.status.warn(err.to_string()),
        },
        RenameGroup { old, new } => match app.registry.rename_group(&old, &new) {
            Ok(()) => app.status.info(format!("Renamed '{}' to '{}'", old, new)),
            Err(err) => app.status.warn(err.to_string()),
        },
        DeleteSet { name } => match app.registry.delete_set(&name) {
            Ok(()) => app.status.info(format!("Deleted set '{}'", name)),
            Err(err) => app.status.warn(err.to_string()),
        },
        DeleteGroup { name } => match app.registry.delete_group(&name) {
            Ok(()) => app.status.info(format!("Deleted group '{}'", name)),
            Err(err) => app.status.warn(err.to_string()),
        },

        SetParent { child, parent } => {
            match app.registry.set_parent(&child, parent.as_deref()) {
                Ok(()) => match parent {
                    Some(parent) => app
                        .status
                        .info(format!("Parented '{}' under '{}'", child, parent)),
                    None => app.status.info(format!("Cleared parent of '{}'", child)),
                },
                Err(err) => app.status.warn(err.to_string()),
            }
        }
        AddToGroup { set, group } => match app.registry.add_to_group(&set, &group) {
            Ok(()) => app.status.info(format!("Added '{}' to '{}'", set, group)),
            Err(err) => app.status.warn(err.to_string()),
        },
        RemoveFromGroup { set } => {
            match app.registry.remove_from_group(&set, None) {
                Ok(()) => app.status.info(format!("Removed '{}' from its group", set)),
                Err(err) => app.status.warn(err.to_string()),
            }
        }

        SetChannel { channel, on } => app.registry.set_channel(channel, on),
        SetAllChannels { on } => app.registry.set_all_channels(on),

        SelectChain { top } => match select::select_hierarchy_chain(&mut app.scene, &top) {
            Ok(count) => app.status.info(format!("Selected {} nodes in chain", count)),
            Err(err) => app.status.warn(err.to_string()),
        },
        CreateChainSet { top } => {
            match select::create_chain_set(&mut app.registry, &app.scene, &top, None) {
                Ok(name) => app.status.info(format!("Created chain set '{}'", name)),
                Err(err) => app.status.warn(err.to_string()),
            }
        }
    }
}

fn report_selection(app: &mut SelsetApp, result: anyhow::Result<SelectionOutcome>) {
    match result {
        Ok(outcome) if outcome.is_warning() => app.status.warn(outcome.message()),
        Ok(outcome) => app.status.info(outcome.message()),
        Err(err) => app.status.warn(err.to_string()),
    }
}

fn report_err(app: &mut SelsetApp, result: Result<(), crate::entities::RegistryError>) {
    if let Err(err) = result {
        app.status.warn(err.to_string());
    }
}
