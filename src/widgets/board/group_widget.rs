//! One group container widget on the board.

use eframe::egui;

use crate::entities::ParentGroup;
use crate::widgets::actions::{ActionQueue, BoardAction};

use super::{ALPHA_STEPS, PALETTE, RenameDialog, RenameTarget};

const TITLE_HEIGHT: f32 = 24.0;

/// Render a group container and return its rect so set widgets can be
/// dropped into it.
pub fn render(
    ui: &mut egui::Ui,
    origin: egui::Pos2,
    name: &str,
    group: &ParentGroup,
    queue: &mut ActionQueue,
    rename: &mut Option<RenameDialog>,
) -> egui::Rect {
    let rect = egui::Rect::from_min_size(
        origin + egui::vec2(group.style.pos[0], group.style.pos[1]),
        egui::vec2(group.style.size[0], group.style.size[1]),
    );
    let id = egui::Id::new(("group_widget", name));
    // Only the title strip is draggable so sets inside stay reachable.
    let title_rect = egui::Rect::from_min_size(rect.min, egui::vec2(rect.width(), TITLE_HEIGHT));
    let body = ui.interact(title_rect, id, egui::Sense::click_and_drag());
    let handle = ui.interact(
        super::handle_rect(rect),
        id.with("resize"),
        egui::Sense::drag(),
    );

    paint(ui, rect, title_rect, name, group, body.hovered());

    if handle.dragged() {
        let size = super::clamp_size(
            egui::vec2(group.style.size[0], group.style.size[1]) + handle.drag_delta(),
            super::min_group_size(),
        );
        queue.push(BoardAction::ResizeGroup {
            name: name.to_string(),
            size,
        });
    } else if body.dragged() {
        let delta = body.drag_delta();
        queue.push(BoardAction::MoveGroup {
            name: name.to_string(),
            pos: [
                (group.style.pos[0] + delta.x).max(0.0),
                (group.style.pos[1] + delta.y).max(0.0),
            ],
        });
    }

    if body.clicked() {
        queue.push(BoardAction::SelectGroup {
            name: name.to_string(),
        });
    }

    body.context_menu(|ui| {
        if ui.button("Select Member Sets").clicked() {
            queue.push(BoardAction::SelectGroup {
                name: name.to_string(),
            });
        }
        ui.separator();
        if ui.button("Rename Group...").clicked() {
            *rename = Some(RenameDialog {
                target: RenameTarget::Group(name.to_string()),
                buffer: name.to_string(),
            });
        }
        ui.menu_button("Color", |ui| {
            for (label, color) in PALETTE {
                if ui.button(label).clicked() {
                    queue.push(BoardAction::RecolorGroup {
                        name: name.to_string(),
                        color,
                    });
                }
            }
        });
        ui.menu_button("Transparency", |ui| {
            for (label, alpha) in ALPHA_STEPS {
                if ui.button(label).clicked() {
                    queue.push(BoardAction::SetGroupAlpha {
                        name: name.to_string(),
                        alpha,
                    });
                }
            }
        });
        ui.separator();
        if ui.button("Delete Group").clicked() {
            queue.push(BoardAction::DeleteGroup {
                name: name.to_string(),
            });
        }
    });

    rect
}

fn paint(
    ui: &egui::Ui,
    rect: egui::Rect,
    title_rect: egui::Rect,
    name: &str,
    group: &ParentGroup,
    hovered: bool,
) {
    let painter = ui.painter();
    painter.rect_filled(rect, 8.0, super::fill_color(group.style.color, group.style.alpha / 2));
    let stroke = if hovered {
        egui::Stroke::new(2.0, egui::Color32::from_gray(220))
    } else {
        egui::Stroke::new(1.5, egui::Color32::from_gray(110))
    };
    painter.rect_stroke(rect, 8.0, stroke, egui::StrokeKind::Outside);

    painter.rect_filled(title_rect, 8.0, super::fill_color(group.style.color, group.style.alpha));
    painter.text(
        title_rect.left_center() + egui::vec2(8.0, 0.0),
        egui::Align2::LEFT_CENTER,
        name,
        egui::FontId::proportional(14.0),
        egui::Color32::WHITE,
    );
    painter.text(
        title_rect.right_center() - egui::vec2(8.0, 0.0),
        egui::Align2::RIGHT_CENTER,
        format!("{} sets", group.members.len()),
        egui::FontId::proportional(12.0),
        egui::Color32::from_gray(210),
    );

    let handle = super::handle_rect(rect);
    painter.line_segment(
        [handle.left_bottom(), handle.right_top()],
        egui::Stroke::new(1.0, egui::Color32::from_gray(160)),
    );
}
