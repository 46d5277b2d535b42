//! Main application loop - eframe::App implementation.
//!
//! Each frame: render toolbar, tools tabs, board and status bar while
//! collecting actions, then apply the whole queue in order.

use eframe::egui;

use super::{SelsetApp, ToolsTab, events};
use crate::widgets::{ActionQueue, BoardAction, channel_panel};

impl eframe::App for SelsetApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.settings.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }
        let mut style = (*ctx.style()).clone();
        for (_, font_id) in style.text_styles.iter_mut() {
            font_id.size = self.settings.font_size;
        }
        ctx.set_style(style);

        let mut queue = ActionQueue::new();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Create Set").clicked() {
                    queue.push(BoardAction::CreateSetFromSelection);
                }
                if ui.button("Create Group").clicked() {
                    queue.push(BoardAction::CreateGroup);
                }
                ui.separator();
                if ui.button("Background...").clicked() {
                    queue.push(BoardAction::ChooseBackground);
                }
                if self.registry.background().is_some() && ui.button("Clear Background").clicked()
                {
                    queue.push(BoardAction::ClearBackground);
                }
                ui.separator();
                if ui.button("Export...").clicked() {
                    queue.push(BoardAction::ExportBoard);
                }
                if ui.button("Import...").clicked() {
                    queue.push(BoardAction::ImportBoard);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.menu_button("View", |ui| {
                        ui.checkbox(&mut self.settings.dark_mode, "Dark mode");
                        ui.add(
                            egui::Slider::new(&mut self.settings.font_size, 10.0..=20.0)
                                .text("Font size"),
                        );
                    });
                });
            });
        });

        egui::TopBottomPanel::top("tools").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.tools_tab, ToolsTab::Channels, "Channel Selection");
                ui.selectable_value(&mut self.tools_tab, ToolsTab::Hierarchy, "Hierarchy Tools");
            });
            ui.separator();
            match self.tools_tab {
                ToolsTab::Channels => {
                    channel_panel::render(ui, self.registry.channels(), &mut queue);
                }
                ToolsTab::Hierarchy => {
                    self.chain_panel.render(ui, &self.scene, &mut queue);
                }
            }
            ui.add_space(4.0);
        });

        self.status
            .render(ctx, self.registry.sets().len(), self.registry.groups().len());

        egui::CentralPanel::default().show(ctx, |ui| {
            self.board.render(ui, &self.registry, &mut queue);
        });

        events::handle_actions(self, queue.take());
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, "settings", &self.settings);
        eframe::set_value(storage, "tools_tab", &self.tools_tab);
    }
}
