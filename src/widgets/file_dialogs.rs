//! Shared file dialog helpers for widget UI.

/// Configured dialog for board JSON files.
pub fn board_dialog(title: &str) -> rfd::FileDialog {
    rfd::FileDialog::new()
        .add_filter("Selection Set Board", &["json"])
        .set_title(title)
}

/// Configured dialog for background image selection.
pub fn image_dialog(title: &str) -> rfd::FileDialog {
    rfd::FileDialog::new()
        .add_filter("Images", &["png", "jpg", "jpeg", "tif", "tiff", "tga"])
        .set_title(title)
}
