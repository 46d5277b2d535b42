//! Bottom status bar with transient feedback messages.

use eframe::egui;

/// How long a message stays on screen.
const FADE_SECS: f64 = 6.0;

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    warning: bool,
    shown_at: f64,
}

/// Status bar component. Registry operations report through here instead
/// of raising dialogs; warnings are colored, everything fades out.
#[derive(Debug, Default)]
pub struct StatusBar {
    message: Option<StatusMessage>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage {
            text: text.into(),
            warning: false,
            shown_at: f64::NAN, // stamped on next render
        });
    }

    pub fn warn(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::warn!("{}", text);
        self.message = Some(StatusMessage {
            text,
            warning: true,
            shown_at: f64::NAN,
        });
    }

    /// Render at the bottom of the screen and expire stale messages.
    pub fn render(&mut self, ctx: &egui::Context, set_count: usize, group_count: usize) {
        let now = ctx.input(|i| i.time);
        if let Some(msg) = &mut self.message {
            if msg.shown_at.is_nan() {
                msg.shown_at = now;
            }
            if now - msg.shown_at > FADE_SECS {
                self.message = None;
            }
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.monospace(format!("{} sets", set_count));
                ui.separator();
                ui.monospace(format!("{} groups", group_count));
                ui.separator();
                match &self.message {
                    Some(msg) if msg.warning => {
                        ui.colored_label(egui::Color32::from_rgb(230, 160, 60), &msg.text);
                    }
                    Some(msg) => {
                        ui.label(&msg.text);
                    }
                    None => {
                        ui.weak("Drag sets to position them. Right-click a widget for options.");
                    }
                }
            });
        });
    }
}
