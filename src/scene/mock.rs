//! In-memory scene used by tests and the standalone demo binary.

use anyhow::{Result, bail};
use indexmap::IndexMap;

use super::Scene;

/// The six transform attributes every ordinary transform node carries.
pub const TRANSFORM_ATTRS: [&str; 6] = ["tx", "ty", "tz", "rx", "ry", "rz"];

#[derive(Debug, Clone, Default)]
struct ObjectEntry {
    attrs: Vec<String>,
    children: Vec<String>,
}

/// Flat id-keyed scene graph with an explicit selection list.
///
/// Object ids follow the host convention of `|`-separated full paths, but
/// the mock treats them as opaque keys; hierarchy comes from the parent
/// argument at insertion time.
#[derive(Debug, Clone, Default)]
pub struct MockScene {
    objects: IndexMap<String, ObjectEntry>,
    selection: Vec<String>,
}

impl MockScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object with the given attributes, optionally under a
    /// parent that must already exist.
    pub fn add_object(&mut self, id: &str, parent: Option<&str>, attrs: &[&str]) {
        self.objects.insert(
            id.to_string(),
            ObjectEntry {
                attrs: attrs.iter().map(|a| a.to_string()).collect(),
                children: Vec::new(),
            },
        );
        if let Some(parent) = parent
            && let Some(entry) = self.objects.get_mut(parent)
        {
            entry.children.push(id.to_string());
        }
    }

    /// Insert a plain transform node (all six transform channels).
    pub fn add_transform(&mut self, id: &str, parent: Option<&str>) {
        self.add_object(id, parent, &TRANSFORM_ATTRS);
    }

    /// Remove an object (descendants keep existing; this is enough to
    /// simulate objects vanishing between export and import).
    pub fn remove_object(&mut self, id: &str) {
        self.objects.shift_remove(id);
        for entry in self.objects.values_mut() {
            entry.children.retain(|c| c != id);
        }
        self.selection.retain(|s| s != id);
    }

    /// Seed the user-driven selection, as if picked in a viewport.
    pub fn select(&mut self, ids: &[&str]) {
        self.selection = ids.iter().map(|s| s.to_string()).collect();
    }

    /// A small demo rig so the app is usable without a host application.
    pub fn demo() -> Self {
        let mut scene = Self::new();
        scene.add_transform("|rig", None);
        scene.add_transform("|rig|spine", Some("|rig"));
        scene.add_transform("|rig|spine|chest", Some("|rig|spine"));
        scene.add_transform("|rig|spine|chest|arm_L", Some("|rig|spine|chest"));
        scene.add_transform("|rig|spine|chest|arm_R", Some("|rig|spine|chest"));
        scene.add_transform("|rig|spine|chest|head", Some("|rig|spine|chest"));
        scene.add_transform("|rig|hips", Some("|rig"));
        scene.add_transform("|rig|hips|leg_L", Some("|rig|hips"));
        scene.add_transform("|rig|hips|leg_R", Some("|rig|hips"));
        // Shapes only expose translate channels in this demo.
        scene.add_object("|props|crate", None, &["tx", "ty", "tz"]);
        scene.add_object("|props|barrel", None, &["tx", "ty", "tz"]);
        scene.select(&["|rig|spine|chest|arm_L", "|rig|spine|chest|arm_R"]);
        scene
    }

    fn collect_descendants(&self, id: &str, out: &mut Vec<String>) {
        if let Some(entry) = self.objects.get(id) {
            for child in &entry.children {
                out.push(child.clone());
                self.collect_descendants(child, out);
            }
        }
    }
}

impl Scene for MockScene {
    fn current_selection(&self) -> Vec<String> {
        self.selection.clone()
    }

    fn object_exists(&self, id: &str) -> bool {
        self.objects.contains_key(id)
    }

    fn attribute_exists(&self, path: &str) -> bool {
        match path.rsplit_once('.') {
            Some((id, attr)) => self
                .objects
                .get(id)
                .is_some_and(|entry| entry.attrs.iter().any(|a| a == attr)),
            None => false,
        }
    }

    fn descendants(&self, root: &str) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_descendants(root, &mut out);
        out
    }

    fn apply_selection(&mut self, paths: &[String]) -> Result<()> {
        for path in paths {
            let ok = self.object_exists(path) || self.attribute_exists(path);
            if !ok {
                bail!("cannot select '{}': no such object or attribute", path);
            }
        }
        self.selection = paths.to_vec();
        Ok(())
    }

    fn clear_selection(&mut self) {
        self.selection.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_lookup() {
        let scene = MockScene::demo();
        assert!(scene.attribute_exists("|rig|spine.tx"));
        assert!(!scene.attribute_exists("|props|crate.rx"));
        assert!(!scene.attribute_exists("|rig|spine"));
        assert!(!scene.attribute_exists("|nope.tx"));
    }

    #[test]
    fn test_descendants_depth_first() {
        let scene = MockScene::demo();
        let down = scene.descendants("|rig|spine");
        assert_eq!(
            down,
            vec![
                "|rig|spine|chest".to_string(),
                "|rig|spine|chest|arm_L".to_string(),
                "|rig|spine|chest|arm_R".to_string(),
                "|rig|spine|chest|head".to_string(),
            ]
        );
    }

    #[test]
    fn test_apply_selection_rejects_unknown() {
        let mut scene = MockScene::demo();
        let err = scene.apply_selection(&["|ghost".to_string()]);
        assert!(err.is_err());
        // Selection untouched on failure.
        assert_eq!(scene.current_selection().len(), 2);
    }

    #[test]
    fn test_remove_object_drops_references() {
        let mut scene = MockScene::demo();
        scene.remove_object("|rig|spine|chest|arm_L");
        assert!(!scene.object_exists("|rig|spine|chest|arm_L"));
        assert!(!scene
            .descendants("|rig|spine|chest")
            .contains(&"|rig|spine|chest|arm_L".to_string()));
    }
}
