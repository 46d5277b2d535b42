//! Freeform board: group containers, set widgets and connector lines.
//!
//! Widgets are visual projections of registry entries; every user gesture
//! (drag, resize, menu action) becomes a [`BoardAction`] applied after the
//! frame. Groups are painted first so sets sit on top of their containers.

mod background;
mod group_widget;
mod set_widget;

use eframe::egui;

use crate::entities::SetRegistry;
use crate::widgets::actions::{ActionQueue, BoardAction};

use background::BackgroundCache;

/// Color presets offered in widget context menus.
pub(crate) const PALETTE: [(&str, [u8; 3]); 8] = [
    ("Gray", [70, 70, 70]),
    ("Red", [140, 60, 60]),
    ("Green", [60, 120, 70]),
    ("Blue", [55, 90, 140]),
    ("Purple", [110, 70, 130]),
    ("Teal", [50, 115, 115]),
    ("Orange", [160, 100, 45]),
    ("Olive", [100, 100, 60]),
];

/// Transparency presets (label, alpha).
pub(crate) const ALPHA_STEPS: [(&str, u8); 4] = [
    ("25%", 64),
    ("50%", 128),
    ("75%", 191),
    ("Opaque", 255),
];

const MIN_SET_SIZE: egui::Vec2 = egui::vec2(90.0, 50.0);
const MIN_GROUP_SIZE: egui::Vec2 = egui::vec2(140.0, 90.0);

/// Pending rename dialog.
#[derive(Debug, Clone)]
pub enum RenameTarget {
    Set(String),
    Group(String),
}

#[derive(Debug, Clone)]
pub struct RenameDialog {
    pub target: RenameTarget,
    pub buffer: String,
}

/// Per-frame transient board state (nothing here persists).
#[derive(Default)]
pub struct BoardState {
    rename: Option<RenameDialog>,
    background: BackgroundCache,
}

impl BoardState {
    pub fn render(
        &mut self,
        ui: &mut egui::Ui,
        registry: &SetRegistry,
        queue: &mut ActionQueue,
    ) {
        let rect = ui.available_rect_before_wrap();
        ui.painter()
            .rect_filled(rect, 0.0, egui::Color32::from_gray(28));
        self.background.paint(ui, rect, registry.background());

        let origin = rect.min;

        // Group containers first, collecting their rects for drop targets.
        let mut group_rects: Vec<(String, egui::Rect)> = Vec::new();
        for (name, group) in registry.groups() {
            let group_rect = group_widget::render(
                ui,
                origin,
                name,
                group,
                queue,
                &mut self.rename,
            );
            group_rects.push((name.clone(), group_rect));
        }

        draw_connectors(ui, origin, registry);

        let set_names: Vec<String> = registry.sets().keys().cloned().collect();
        let group_names: Vec<String> = registry.groups().keys().cloned().collect();
        for (name, set) in registry.sets() {
            set_widget::render(
                ui,
                origin,
                name,
                set,
                registry.group_of(name),
                &set_names,
                &group_names,
                &group_rects,
                queue,
                &mut self.rename,
            );
        }

        self.render_rename_dialog(ui.ctx(), queue);
    }

    fn render_rename_dialog(&mut self, ctx: &egui::Context, queue: &mut ActionQueue) {
        let Some(dialog) = &mut self.rename else {
            return;
        };
        let mut open = true;
        let mut done = false;
        let title = match &dialog.target {
            RenameTarget::Set(old) => format!("Rename set '{}'", old),
            RenameTarget::Group(old) => format!("Rename group '{}'", old),
        };
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                let edit = ui.text_edit_singleline(&mut dialog.buffer);
                edit.request_focus();
                let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                ui.horizontal(|ui| {
                    if ui.button("Rename").clicked() || submitted {
                        let new = dialog.buffer.trim().to_string();
                        if !new.is_empty() {
                            queue.push(match &dialog.target {
                                RenameTarget::Set(old) => BoardAction::RenameSet {
                                    old: old.clone(),
                                    new,
                                },
                                RenameTarget::Group(old) => BoardAction::RenameGroup {
                                    old: old.clone(),
                                    new,
                                },
                            });
                        }
                        done = true;
                    }
                    if ui.button("Cancel").clicked() {
                        done = true;
                    }
                });
            });
        if done || !open {
            self.rename = None;
        }
    }
}

/// Connector lines from each parent set to its children, drawn under the
/// set widgets.
fn draw_connectors(ui: &egui::Ui, origin: egui::Pos2, registry: &SetRegistry) {
    let painter = ui.painter();
    let stroke = egui::Stroke::new(1.5, egui::Color32::from_gray(150));
    for set in registry.sets().values() {
        let Some(parent_name) = set.parent.as_deref() else {
            continue;
        };
        let Some(parent) = registry.set(parent_name) else {
            continue;
        };
        let from = origin
            + egui::vec2(
                parent.style.pos[0] + parent.style.size[0] / 2.0,
                parent.style.pos[1] + parent.style.size[1],
            );
        let to = origin + egui::vec2(set.style.pos[0] + set.style.size[0] / 2.0, set.style.pos[1]);
        painter.line_segment([from, to], stroke);
        // Small dot at the child end so direction reads at a glance.
        painter.circle_filled(to, 3.0, stroke.color);
    }
}

/// Widget fill from the entity style.
pub(crate) fn fill_color(color: [u8; 3], alpha: u8) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color[0], color[1], color[2], alpha)
}

/// Shared drag/resize handling: returns the new position after a body
/// drag and the new size after a corner drag, clamped to the minimum.
pub(crate) fn handle_rect(rect: egui::Rect) -> egui::Rect {
    egui::Rect::from_min_size(rect.max - egui::vec2(14.0, 14.0), egui::vec2(14.0, 14.0))
}

pub(crate) fn clamp_size(size: egui::Vec2, min: egui::Vec2) -> [f32; 2] {
    [size.x.max(min.x), size.y.max(min.y)]
}

pub(crate) fn min_set_size() -> egui::Vec2 {
    MIN_SET_SIZE
}

pub(crate) fn min_group_size() -> egui::Vec2 {
    MIN_GROUP_SIZE
}
