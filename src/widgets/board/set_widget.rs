//! One draggable set widget on the board.

use eframe::egui;

use crate::entities::SelectionSet;
use crate::utils::short_name;
use crate::widgets::actions::{ActionQueue, BoardAction};

use super::{ALPHA_STEPS, PALETTE, RenameDialog, RenameTarget};

const TITLE_HEIGHT: f32 = 22.0;
const LINE_HEIGHT: f32 = 15.0;
const MAX_LISTED: usize = 6;

#[allow(clippy::too_many_arguments)]
pub fn render(
    ui: &mut egui::Ui,
    origin: egui::Pos2,
    name: &str,
    set: &SelectionSet,
    group_of: Option<&str>,
    set_names: &[String],
    group_names: &[String],
    group_rects: &[(String, egui::Rect)],
    queue: &mut ActionQueue,
    rename: &mut Option<RenameDialog>,
) {
    let rect = egui::Rect::from_min_size(
        origin + egui::vec2(set.style.pos[0], set.style.pos[1]),
        egui::vec2(set.style.size[0], set.style.size[1]),
    );
    let id = egui::Id::new(("set_widget", name));
    let body = ui.interact(rect, id, egui::Sense::click_and_drag());
    let handle = ui.interact(
        super::handle_rect(rect),
        id.with("resize"),
        egui::Sense::drag(),
    );

    paint(ui, rect, name, set, body.hovered());

    if handle.dragged() {
        let size = super::clamp_size(
            egui::vec2(set.style.size[0], set.style.size[1]) + handle.drag_delta(),
            super::min_set_size(),
        );
        queue.push(BoardAction::ResizeSet {
            name: name.to_string(),
            size,
        });
    } else if body.dragged() {
        let delta = body.drag_delta();
        queue.push(BoardAction::MoveSet {
            name: name.to_string(),
            pos: [
                (set.style.pos[0] + delta.x).max(0.0),
                (set.style.pos[1] + delta.y).max(0.0),
            ],
        });
    }

    // Dropping a set inside a group container nests it there.
    if body.drag_stopped()
        && let Some(pointer) = body.interact_pointer_pos()
        && let Some((group, _)) = group_rects
            .iter()
            .find(|(g, r)| r.contains(pointer) && group_of != Some(g.as_str()))
    {
        queue.push(BoardAction::AddToGroup {
            set: name.to_string(),
            group: group.clone(),
        });
    }

    if body.clicked() {
        queue.push(BoardAction::SelectSet {
            name: name.to_string(),
            respect_channels: true,
        });
    }

    body.context_menu(|ui| {
        context_menu(ui, name, group_of, set_names, group_names, queue, rename);
    });
}

fn paint(ui: &egui::Ui, rect: egui::Rect, name: &str, set: &SelectionSet, hovered: bool) {
    let painter = ui.painter().with_clip_rect(rect.expand(1.0));
    painter.rect_filled(rect, 6.0, super::fill_color(set.style.color, set.style.alpha));
    let stroke = if hovered {
        egui::Stroke::new(1.5, egui::Color32::from_gray(220))
    } else {
        egui::Stroke::new(1.0, egui::Color32::from_gray(90))
    };
    painter.rect_stroke(rect, 6.0, stroke, egui::StrokeKind::Outside);

    // Title strip.
    let title_rect =
        egui::Rect::from_min_size(rect.min, egui::vec2(rect.width(), TITLE_HEIGHT));
    painter.rect_filled(title_rect, 6.0, egui::Color32::from_black_alpha(100));
    painter.text(
        title_rect.left_center() + egui::vec2(6.0, 0.0),
        egui::Align2::LEFT_CENTER,
        name,
        egui::FontId::proportional(13.0),
        egui::Color32::WHITE,
    );
    painter.text(
        title_rect.right_center() - egui::vec2(6.0, 0.0),
        egui::Align2::RIGHT_CENTER,
        format!("{}", set.members.len()),
        egui::FontId::proportional(12.0),
        egui::Color32::from_gray(200),
    );

    // Member list, truncated to fit.
    let mut cursor = rect.min + egui::vec2(8.0, TITLE_HEIGHT + 4.0);
    for member in set.members.iter().take(MAX_LISTED) {
        if cursor.y + LINE_HEIGHT > rect.max.y {
            break;
        }
        painter.text(
            cursor,
            egui::Align2::LEFT_TOP,
            short_name(member),
            egui::FontId::proportional(11.0),
            egui::Color32::from_gray(210),
        );
        cursor.y += LINE_HEIGHT;
    }
    if set.members.len() > MAX_LISTED && cursor.y + LINE_HEIGHT <= rect.max.y {
        painter.text(
            cursor,
            egui::Align2::LEFT_TOP,
            format!("+{} more", set.members.len() - MAX_LISTED),
            egui::FontId::proportional(11.0),
            egui::Color32::from_gray(150),
        );
    }

    // Resize handle in the corner.
    let handle = super::handle_rect(rect);
    painter.line_segment(
        [handle.left_bottom(), handle.right_top()],
        egui::Stroke::new(1.0, egui::Color32::from_gray(160)),
    );
}

fn context_menu(
    ui: &mut egui::Ui,
    name: &str,
    group_of: Option<&str>,
    set_names: &[String],
    group_names: &[String],
    queue: &mut ActionQueue,
    rename: &mut Option<RenameDialog>,
) {
    if ui.button("Select All Objects").clicked() {
        queue.push(BoardAction::SelectSet {
            name: name.to_string(),
            respect_channels: true,
        });
    }
    if ui.button("Select (Ignore Channels)").clicked() {
        queue.push(BoardAction::SelectSet {
            name: name.to_string(),
            respect_channels: false,
        });
    }
    ui.separator();
    if ui.button("Rename Set...").clicked() {
        *rename = Some(RenameDialog {
            target: RenameTarget::Set(name.to_string()),
            buffer: name.to_string(),
        });
    }
    ui.menu_button("Color", |ui| {
        for (label, color) in PALETTE {
            if ui.button(label).clicked() {
                queue.push(BoardAction::RecolorSet {
                    name: name.to_string(),
                    color,
                });
            }
        }
    });
    ui.menu_button("Transparency", |ui| {
        for (label, alpha) in ALPHA_STEPS {
            if ui.button(label).clicked() {
                queue.push(BoardAction::SetAlpha {
                    name: name.to_string(),
                    alpha,
                });
            }
        }
    });
    ui.menu_button("Set Parent", |ui| {
        if ui.button("None").clicked() {
            queue.push(BoardAction::SetParent {
                child: name.to_string(),
                parent: None,
            });
        }
        ui.separator();
        // Cycle-creating choices are rejected by the registry and land in
        // the status bar as a warning.
        for other in set_names.iter().filter(|n| n.as_str() != name) {
            if ui.button(other).clicked() {
                queue.push(BoardAction::SetParent {
                    child: name.to_string(),
                    parent: Some(other.clone()),
                });
            }
        }
    });
    if !group_names.is_empty() {
        ui.menu_button("Add to Group", |ui| {
            for group in group_names {
                if ui.button(group).clicked() {
                    queue.push(BoardAction::AddToGroup {
                        set: name.to_string(),
                        group: group.clone(),
                    });
                }
            }
        });
    }
    if group_of.is_some() && ui.button("Remove from Group").clicked() {
        queue.push(BoardAction::RemoveFromGroup {
            set: name.to_string(),
        });
    }
    ui.separator();
    if ui.button("Delete Set").clicked() {
        queue.push(BoardAction::DeleteSet {
            name: name.to_string(),
        });
    }
}
