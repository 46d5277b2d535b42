//! Channel selection panel: the six transform-channel checkboxes.

use eframe::egui;

use crate::entities::{Channel, ChannelFilter};
use crate::widgets::actions::{ActionQueue, BoardAction};

/// Render the channel filter controls. Changes go through the action
/// queue like every other mutation.
pub fn render(ui: &mut egui::Ui, filter: ChannelFilter, queue: &mut ActionQueue) {
    ui.label("Channels applied when selecting a set:");
    ui.horizontal(|ui| {
        for channel in Channel::ALL {
            let mut on = filter.get(channel);
            if ui.checkbox(&mut on, channel.label()).changed() {
                queue.push(BoardAction::SetChannel { channel, on });
            }
        }
        ui.separator();
        if ui.button("All").clicked() {
            queue.push(BoardAction::SetAllChannels { on: true });
        }
        if ui.button("None").clicked() {
            queue.push(BoardAction::SetAllChannels { on: false });
        }
    });
    if filter.is_uniform() {
        ui.weak("Uniform filter: whole objects are selected.");
    } else {
        let labels: Vec<&str> = filter.enabled().iter().map(|c| c.label()).collect();
        ui.weak(format!("Selecting channels: {}", labels.join(", ")));
    }
}
