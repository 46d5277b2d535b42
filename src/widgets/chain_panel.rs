//! Hierarchy tools: select or capture a node and all its descendants.

use eframe::egui;

use crate::scene::Scene;
use crate::widgets::actions::{ActionQueue, BoardAction};

/// Panel state: the top node the user is operating on.
#[derive(Debug, Default)]
pub struct ChainPanel {
    top_node: String,
}

impl ChainPanel {
    pub fn render(&mut self, ui: &mut egui::Ui, scene: &dyn Scene, queue: &mut ActionQueue) {
        ui.label("Operate on a node and everything below it:");
        ui.horizontal(|ui| {
            ui.label("Top node:");
            ui.add(
                egui::TextEdit::singleline(&mut self.top_node)
                    .hint_text("|rig|spine")
                    .desired_width(240.0),
            );
            if ui.button("Use Selection").clicked() {
                if let Some(first) = scene.current_selection().first() {
                    self.top_node = first.clone();
                }
            }
        });
        ui.horizontal(|ui| {
            let have_node = !self.top_node.trim().is_empty();
            if ui
                .add_enabled(have_node, egui::Button::new("Select Chain"))
                .clicked()
            {
                queue.push(BoardAction::SelectChain {
                    top: self.top_node.trim().to_string(),
                });
            }
            if ui
                .add_enabled(have_node, egui::Button::new("Create Chain Set"))
                .clicked()
            {
                queue.push(BoardAction::CreateChainSet {
                    top: self.top_node.trim().to_string(),
                });
            }
        });
    }
}
