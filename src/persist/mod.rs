//! Board persistence: JSON export/import with an embedded background image.
//!
//! Export snapshots the registry into a [`BoardDocument`]; import is a
//! full-state replace that builds a *fresh* registry and returns it, so a
//! failed import never disturbs what the user already has. Scene objects
//! that no longer resolve are filtered silently and only totalled in the
//! [`ImportReport`].

mod document;

pub use document::{BackgroundImage, BoardDocument};

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use log::{info, warn};

use crate::entities::{ParentGroup, SelectionSet, SetRegistry, Style, style};
use crate::scene::Scene;

/// What import filtered out, surfaced as one status message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub sets: usize,
    pub groups: usize,
    pub dropped_objects: usize,
    pub dropped_sets: usize,
    pub dropped_refs: usize,
    pub background_error: Option<String>,
}

impl ImportReport {
    pub fn message(&self) -> String {
        let mut msg = format!("Imported {} sets, {} groups", self.sets, self.groups);
        if self.dropped_objects > 0 || self.dropped_sets > 0 {
            msg.push_str(&format!(
                " ({} missing objects dropped, {} sets empty)",
                self.dropped_objects, self.dropped_sets
            ));
        }
        if self.dropped_refs > 0 {
            msg.push_str(&format!(", {} dangling references dropped", self.dropped_refs));
        }
        msg
    }

    pub fn is_warning(&self) -> bool {
        self.dropped_objects > 0
            || self.dropped_sets > 0
            || self.dropped_refs > 0
            || self.background_error.is_some()
    }
}

/// Serialize the registry to pretty JSON at `path` (a `.json` extension is
/// appended when missing). Returns the path actually written.
pub fn export_board(registry: &SetRegistry, path: &Path) -> Result<PathBuf> {
    let path = if path.extension().and_then(|s| s.to_str()) == Some("json") {
        path.to_path_buf()
    } else {
        path.with_extension("json")
    };

    let mut doc = build_document(registry);
    if let Some(bg) = registry.background() {
        match embed_background(bg) {
            Ok(image) => doc.background_image = Some(image),
            // A missing or unreadable image should not block the export.
            Err(err) => warn!("background image not embedded: {}", err),
        }
    }

    let json = serde_json::to_string_pretty(&doc).context("serialize board")?;
    fs::write(&path, json).with_context(|| format!("write board to {}", path.display()))?;
    info!(
        "exported {} sets / {} groups to {}",
        registry.sets().len(),
        registry.groups().len(),
        path.display()
    );
    Ok(path)
}

fn build_document(registry: &SetRegistry) -> BoardDocument {
    let mut doc = BoardDocument {
        channels: registry.channels(),
        ..BoardDocument::default()
    };
    for (name, set) in registry.sets() {
        doc.sets.insert(name.clone(), set.members.clone());
        doc.positions.insert(name.clone(), set.style.pos);
        doc.colors.insert(name.clone(), set.style.color);
        doc.sizes.insert(name.clone(), set.style.size);
        doc.transparency.insert(name.clone(), set.style.alpha);
        doc.parents.insert(name.clone(), set.parent.clone());
    }
    for (name, group) in registry.groups() {
        doc.parent_groups.insert(name.clone(), group.members.clone());
        doc.group_positions.insert(name.clone(), group.style.pos);
        doc.group_colors.insert(name.clone(), group.style.color);
        doc.group_sizes.insert(name.clone(), group.style.size);
        doc.group_transparency.insert(name.clone(), group.style.alpha);
    }
    doc
}

fn embed_background(path: &Path) -> Result<BackgroundImage> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    // Prefer sniffing the actual bytes; fall back to the file extension.
    let format = image::guess_format(&bytes)
        .ok()
        .and_then(|f| f.extensions_str().first().copied())
        .map(str::to_string)
        .or_else(|| {
            path.extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_ascii_lowercase())
        })
        .unwrap_or_else(|| "png".to_string());
    Ok(BackgroundImage {
        data: BASE64.encode(&bytes),
        format,
        path: path.display().to_string(),
    })
}

/// Parse a board file and rebuild a registry against the current scene.
///
/// Listed objects that no longer resolve are dropped; sets left empty are
/// not recreated; parent and group references are re-validated against the
/// just-imported entities. The caller swaps the returned registry in only
/// on success.
pub fn import_board(path: &Path, scene: &dyn Scene) -> Result<(SetRegistry, ImportReport)> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("read board file {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&json).context("board file is not valid JSON")?;
    if !value.is_object() || value.get("sets").is_none() {
        bail!("invalid board document: missing 'sets'");
    }
    let doc: BoardDocument =
        serde_json::from_value(value).context("board file has an unexpected shape")?;

    let mut registry = SetRegistry::new();
    let mut report = ImportReport::default();

    for (name, objects) in &doc.sets {
        let members: Vec<String> = objects
            .iter()
            .filter(|obj| scene.object_exists(obj))
            .cloned()
            .collect();
        report.dropped_objects += objects.len() - members.len();
        if members.is_empty() {
            // A set with no surviving objects is simply not recreated.
            report.dropped_sets += 1;
            continue;
        }
        let index = registry.sets().len();
        let style = Style {
            pos: doc
                .positions
                .get(name)
                .copied()
                .unwrap_or([20.0, 20.0 + 30.0 * index as f32]),
            size: doc.sizes.get(name).copied().unwrap_or(style::SET_SIZE),
            color: doc.colors.get(name).copied().unwrap_or(style::SET_COLOR),
            alpha: doc
                .transparency
                .get(name)
                .copied()
                .unwrap_or(style::DEFAULT_ALPHA),
        };
        registry.insert_set(
            name.clone(),
            SelectionSet {
                members,
                parent: None,
                style,
            },
        );
        report.sets += 1;
    }

    // Parent pointers only between sets that survived the object filter.
    for (name, parent) in &doc.parents {
        if registry.set(name).is_none() {
            continue;
        }
        match parent {
            None => {}
            Some(parent_name) if registry.set(parent_name).is_some() => {
                // Documents are validated on export, but hand-edited files
                // may still close a loop; set_parent re-checks.
                if registry.set_parent(name, Some(parent_name)).is_err() {
                    report.dropped_refs += 1;
                }
            }
            Some(_) => report.dropped_refs += 1,
        }
    }

    for (name, members) in &doc.parent_groups {
        let valid: Vec<String> = members
            .iter()
            .filter(|set_name| registry.set(set_name).is_some())
            .cloned()
            .collect();
        report.dropped_refs += members.len() - valid.len();
        let index = registry.groups().len();
        let style = Style {
            pos: doc
                .group_positions
                .get(name)
                .copied()
                .unwrap_or([20.0, 20.0 + 30.0 * index as f32]),
            size: doc.group_sizes.get(name).copied().unwrap_or(style::GROUP_SIZE),
            color: doc.group_colors.get(name).copied().unwrap_or(style::GROUP_COLOR),
            alpha: doc
                .group_transparency
                .get(name)
                .copied()
                .unwrap_or(style::DEFAULT_ALPHA),
        };
        registry.insert_group(
            name.clone(),
            ParentGroup {
                members: valid,
                style,
            },
        );
        report.groups += 1;
    }

    registry.set_channels(doc.channels);

    if let Some(ref image) = doc.background_image {
        match restore_background(image, path) {
            Ok(bg_path) => registry.set_background(Some(bg_path)),
            Err(err) => {
                warn!("failed to restore background image: {}", err);
                report.background_error = Some(err.to_string());
            }
        }
    }

    info!("imported board from {}: {}", path.display(), report.message());
    Ok((registry, report))
}

/// Write the embedded image back to disk: the original path when its
/// directory accepts the write, else a sibling of the board file.
fn restore_background(image: &BackgroundImage, board_path: &Path) -> Result<PathBuf> {
    let bytes = BASE64
        .decode(image.data.as_bytes())
        .context("background payload is not valid base64")?;

    if !image.path.is_empty() {
        let original = PathBuf::from(&image.path);
        if fs::write(&original, &bytes).is_ok() {
            return Ok(original);
        }
    }

    let dir = board_path.parent().unwrap_or_else(|| Path::new("."));
    let fallback = dir.join(format!("selset_bg.{}", image.format));
    fs::write(&fallback, &bytes)
        .with_context(|| format!("write background to {}", fallback.display()))?;
    Ok(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Channel;
    use crate::scene::MockScene;

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("selset_test_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    fn fixture() -> (SetRegistry, MockScene) {
        let mut scene = MockScene::new();
        for id in ["|a", "|b", "|c"] {
            scene.add_transform(id, None);
        }
        let mut reg = SetRegistry::new();
        reg.create_set("Top", vec!["|a".into(), "|b".into()]).unwrap();
        reg.create_set("Child", vec!["|c".into()]).unwrap();
        reg.set_parent("Child", Some("Top")).unwrap();
        let group = reg.create_group("Grp");
        reg.add_to_group("Top", &group).unwrap();
        reg.set_channel(Channel::Ry, false);
        (reg, scene)
    }

    #[test]
    fn test_round_trip_preserves_board() {
        let (reg, scene) = fixture();
        let path = temp_path("round_trip.json");
        export_board(&reg, &path).unwrap();

        let (imported, report) = import_board(&path, &scene).unwrap();
        assert_eq!(report.sets, 2);
        assert_eq!(report.groups, 1);
        assert!(!report.is_warning());

        assert_eq!(imported.sets().len(), 2);
        assert_eq!(imported.set("Top").unwrap().members, vec!["|a", "|b"]);
        assert_eq!(imported.set("Child").unwrap().parent.as_deref(), Some("Top"));
        assert_eq!(imported.group("Grp").unwrap().members, vec!["Top"]);
        assert_eq!(imported.set("Top").unwrap().style, reg.set("Top").unwrap().style);
        assert!(!imported.channels().ry);
        assert!(imported.channels().tx);
    }

    #[test]
    fn test_export_appends_json_extension() {
        let (reg, _) = fixture();
        let written = export_board(&reg, &temp_path("noext")).unwrap();
        assert_eq!(written.extension().and_then(|e| e.to_str()), Some("json"));
    }

    #[test]
    fn test_import_drops_vanished_objects() {
        let (reg, mut scene) = fixture();
        let path = temp_path("vanished.json");
        export_board(&reg, &path).unwrap();

        scene.remove_object("|c"); // empties the Child set entirely
        scene.remove_object("|b");

        let (imported, report) = import_board(&path, &scene).unwrap();
        assert_eq!(imported.set("Top").unwrap().members, vec!["|a"]);
        assert!(imported.set("Child").is_none());
        assert_eq!(report.dropped_objects, 2);
        assert_eq!(report.dropped_sets, 1);
        assert!(report.is_warning());
    }

    #[test]
    fn test_import_drops_dangling_references() {
        let scene = {
            let mut s = MockScene::new();
            s.add_transform("|a", None);
            s
        };
        let json = r#"{
            "sets": {"A": ["|a"], "B": ["|gone"]},
            "parents": {"A": "B"},
            "parent_groups": {"G": ["A", "B"]}
        }"#;
        let path = temp_path("dangling.json");
        fs::write(&path, json).unwrap();

        let (imported, report) = import_board(&path, &scene).unwrap();
        // B was emptied by the object filter, so A's parent dangles.
        assert_eq!(imported.set("A").unwrap().parent, None);
        assert_eq!(imported.group("G").unwrap().members, vec!["A"]);
        assert_eq!(report.dropped_refs, 2);
    }

    #[test]
    fn test_import_applies_defaults() {
        let scene = {
            let mut s = MockScene::new();
            s.add_transform("|a", None);
            s.add_transform("|b", None);
            s
        };
        let json = r#"{"sets": {"A": ["|a"], "B": ["|b"]}, "parent_groups": {"G": []}}"#;
        let path = temp_path("defaults.json");
        fs::write(&path, json).unwrap();

        let (imported, _) = import_board(&path, &scene).unwrap();
        let a = &imported.set("A").unwrap().style;
        assert_eq!(a.pos, [20.0, 20.0]);
        assert_eq!(a.size, style::SET_SIZE);
        assert_eq!(a.color, style::SET_COLOR);
        assert_eq!(a.alpha, style::DEFAULT_ALPHA);
        // Second set offset by index.
        assert_eq!(imported.set("B").unwrap().style.pos, [20.0, 50.0]);
        let g = &imported.group("G").unwrap().style;
        assert_eq!(g.size, style::GROUP_SIZE);
        assert_eq!(g.color, style::GROUP_COLOR);
    }

    #[test]
    fn test_import_rejects_garbage() {
        let scene = MockScene::new();
        let path = temp_path("garbage.json");
        fs::write(&path, "not json at all").unwrap();
        assert!(import_board(&path, &scene).is_err());

        let path = temp_path("no_sets.json");
        fs::write(&path, r#"{"positions": {}}"#).unwrap();
        assert!(import_board(&path, &scene).is_err());

        assert!(import_board(Path::new("/definitely/missing.json"), &scene).is_err());
    }

    #[test]
    fn test_background_round_trip() {
        let (mut reg, scene) = fixture();
        let bg = temp_path("bg.png");
        fs::write(&bg, b"\x89PNG\r\n\x1a\nfakedata").unwrap();
        reg.set_background(Some(bg.clone()));

        let path = temp_path("with_bg.json");
        export_board(&reg, &path).unwrap();

        let doc: BoardDocument =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let image = doc.background_image.expect("background embedded");
        assert_eq!(image.format, "png");
        assert_eq!(image.path, bg.display().to_string());

        let (imported, report) = import_board(&path, &scene).unwrap();
        assert!(report.background_error.is_none());
        // Original path is writable here, so import prefers it.
        assert_eq!(imported.background(), Some(bg.as_path()));
        assert_eq!(fs::read(&bg).unwrap(), b"\x89PNG\r\n\x1a\nfakedata");
    }

    #[test]
    fn test_background_falls_back_beside_board() {
        let (_, scene) = fixture();
        let json = format!(
            r#"{{"sets": {{"A": ["|a"]}}, "background_image": {{"data": "{}", "format": "png", "path": "/nonexistent/dir/bg.png"}}}}"#,
            BASE64.encode(b"imagebytes")
        );
        let path = temp_path("bg_fallback.json");
        fs::write(&path, json).unwrap();

        let (imported, report) = import_board(&path, &scene).unwrap();
        assert!(report.background_error.is_none());
        let restored = imported.background().expect("background restored");
        assert_eq!(restored, path.parent().unwrap().join("selset_bg.png"));
        assert_eq!(fs::read(restored).unwrap(), b"imagebytes");
    }
}
