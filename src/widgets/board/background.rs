//! Background image loading and painting for the board.

use std::fs;
use std::path::{Path, PathBuf};

use eframe::egui;
use log::warn;

/// Cached board background texture. Reloaded only when the registry's
/// background path changes, including to `None`.
#[derive(Default)]
pub struct BackgroundCache {
    key: Option<PathBuf>,
    texture: Option<egui::TextureHandle>,
}

impl BackgroundCache {
    /// Paint the background (if any) fitted and centered into `rect`.
    pub fn paint(&mut self, ui: &egui::Ui, rect: egui::Rect, path: Option<&Path>) {
        if self.key.as_deref() != path {
            self.key = path.map(Path::to_path_buf);
            self.texture = path.and_then(|p| load_texture(ui.ctx(), p));
        }
        let Some(texture) = &self.texture else {
            return;
        };

        let tex_size = texture.size_vec2();
        let scale = (rect.width() / tex_size.x).min(rect.height() / tex_size.y);
        let fitted = egui::Rect::from_center_size(rect.center(), tex_size * scale);
        ui.painter().image(
            texture.id(),
            fitted,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            // Dimmed so widgets stay readable on top.
            egui::Color32::from_rgba_unmultiplied(255, 255, 255, 110),
        );
    }
}

fn load_texture(ctx: &egui::Context, path: &Path) -> Option<egui::TextureHandle> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!("cannot read background image {}: {}", path.display(), err);
            return None;
        }
    };
    let image = match image::load_from_memory(&bytes) {
        Ok(image) => image.to_rgba8(),
        Err(err) => {
            warn!("cannot decode background image {}: {}", path.display(), err);
            return None;
        }
    };
    let size = [image.width() as usize, image.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
    Some(ctx.load_texture("board_background", color_image, egui::TextureOptions::LINEAR))
}
