//! Applying sets to the scene.
//!
//! Flattens set hierarchies, filters vanished objects, applies the channel
//! filter as an attribute-path cross product, and reports what actually
//! happened as a [`SelectionOutcome`] for the status bar.

use anyhow::{Result, bail};
use log::warn;

use crate::entities::{RegistryError, SetRegistry};
use crate::scene::Scene;
use crate::utils::short_name;

/// What a selection request did, for user feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Whole objects selected (uniform filter, or channels ignored).
    Objects { count: usize },

    /// Individual channel attributes selected.
    Channels { channels: usize, objects: usize },

    /// No channel attribute resolved (or the host refused them); fell back
    /// to whole-object selection.
    Fallback { count: usize },

    /// Every listed object has vanished from the scene; nothing selected.
    NothingValid,
}

impl SelectionOutcome {
    pub fn message(&self) -> String {
        match self {
            Self::Objects { count } => format!("Selected {} objects", count),
            Self::Channels { channels, objects } => {
                format!("Selected {} channels on {} objects", channels, objects)
            }
            Self::Fallback { count } => {
                format!("No matching channels; selected {} whole objects", count)
            }
            Self::NothingValid => "No valid objects found".to_string(),
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Fallback { .. } | Self::NothingValid)
    }
}

/// Select every object in a set and its child sets.
pub fn select_set(
    registry: &SetRegistry,
    scene: &mut dyn Scene,
    name: &str,
    respect_channels: bool,
) -> Result<SelectionOutcome> {
    if registry.set(name).is_none() {
        return Err(RegistryError::SetNotFound(name.to_string()).into());
    }
    let objects = registry.hierarchy_members(name);
    select_objects(registry, scene, objects, respect_channels)
}

/// Select the union of every set in a group (each flattened through its
/// own hierarchy).
pub fn select_group(
    registry: &SetRegistry,
    scene: &mut dyn Scene,
    name: &str,
    respect_channels: bool,
) -> Result<SelectionOutcome> {
    let Some(group) = registry.group(name) else {
        return Err(RegistryError::GroupNotFound(name.to_string()).into());
    };
    let mut objects = Vec::new();
    for member in &group.members {
        objects.extend(registry.hierarchy_members(member));
    }
    select_objects(registry, scene, objects, respect_channels)
}

/// Shared tail of set/group selection: dedupe, existence-filter, apply the
/// channel filter, push the result into the scene.
fn select_objects(
    registry: &SetRegistry,
    scene: &mut dyn Scene,
    objects: Vec<String>,
    respect_channels: bool,
) -> Result<SelectionOutcome> {
    // Order-preserving dedupe; hierarchies may list an object twice.
    let mut valid: Vec<String> = Vec::new();
    for obj in objects {
        // Vanished objects are dropped silently, not reported one by one.
        if scene.object_exists(&obj) && !valid.contains(&obj) {
            valid.push(obj);
        }
    }
    if valid.is_empty() {
        return Ok(SelectionOutcome::NothingValid);
    }

    let filter = registry.channels();
    if !respect_channels || filter.is_uniform() {
        scene.apply_selection(&valid)?;
        return Ok(SelectionOutcome::Objects { count: valid.len() });
    }

    // Cross product of valid objects x enabled channel suffixes, kept only
    // where the attribute path actually resolves.
    let mut attrs: Vec<String> = Vec::new();
    let mut touched_objects = 0usize;
    for obj in &valid {
        let before = attrs.len();
        for channel in filter.enabled() {
            let path = format!("{}{}", obj, channel.suffix());
            if scene.attribute_exists(&path) {
                attrs.push(path);
            }
        }
        if attrs.len() > before {
            touched_objects += 1;
        }
    }

    if attrs.is_empty() {
        scene.apply_selection(&valid)?;
        return Ok(SelectionOutcome::Fallback { count: valid.len() });
    }

    // Hosts treat attribute picks as additive, so start from an empty
    // selection.
    scene.clear_selection();
    match scene.apply_selection(&attrs) {
        Ok(()) => Ok(SelectionOutcome::Channels {
            channels: attrs.len(),
            objects: touched_objects,
        }),
        Err(err) => {
            // Host refused attribute selection: degrade to whole objects.
            warn!("channel selection failed ({}), selecting objects instead", err);
            scene.apply_selection(&valid)?;
            Ok(SelectionOutcome::Fallback { count: valid.len() })
        }
    }
}

/// Select a node plus all of its scene-graph descendants.
pub fn select_hierarchy_chain(scene: &mut dyn Scene, top: &str) -> Result<usize> {
    if !scene.object_exists(top) {
        bail!("object '{}' does not exist", top);
    }
    let mut chain = vec![top.to_string()];
    chain.extend(scene.descendants(top));
    scene.apply_selection(&chain)?;
    Ok(chain.len())
}

/// Create a set covering a node and all of its descendants. Defaults the
/// name to `<shortname>_Chain`. The scene selection is left untouched.
pub fn create_chain_set(
    registry: &mut SetRegistry,
    scene: &dyn Scene,
    top: &str,
    name: Option<&str>,
) -> Result<String> {
    if !scene.object_exists(top) {
        bail!("object '{}' does not exist", top);
    }
    let mut chain = vec![top.to_string()];
    chain.extend(scene.descendants(top));
    let default_name = format!("{}_Chain", short_name(top));
    let name = name.unwrap_or(&default_name);
    Ok(registry.create_set(name, chain)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Channel;
    use crate::scene::MockScene;

    fn fixture() -> (SetRegistry, MockScene) {
        let mut scene = MockScene::new();
        scene.add_transform("|a", None);
        scene.add_object("|b", None, &["ty"]); // no tx on purpose
        scene.add_transform("|c", None);
        let mut reg = SetRegistry::new();
        reg.create_set("Top", vec!["|a".into(), "|b".into()]).unwrap();
        reg.create_set("Child", vec!["|c".into()]).unwrap();
        reg.set_parent("Child", Some("Top")).unwrap();
        (reg, scene)
    }

    #[test]
    fn test_uniform_filter_selects_whole_objects() {
        let (reg, mut scene) = fixture();
        let outcome = select_set(&reg, &mut scene, "Top", true).unwrap();
        assert_eq!(outcome, SelectionOutcome::Objects { count: 3 });
        assert_eq!(scene.current_selection(), vec!["|a", "|b", "|c"]);
    }

    #[test]
    fn test_channel_filter_cross_product() {
        let (mut reg, mut scene) = fixture();
        reg.set_all_channels(false);
        reg.set_channel(Channel::Tx, true);

        let outcome = select_set(&reg, &mut scene, "Top", true).unwrap();
        // |b has no tx attribute and is skipped without error.
        assert_eq!(
            outcome,
            SelectionOutcome::Channels {
                channels: 2,
                objects: 2
            }
        );
        assert_eq!(scene.current_selection(), vec!["|a.tx", "|c.tx"]);
    }

    #[test]
    fn test_single_object_single_channel() {
        let mut scene = MockScene::new();
        scene.add_transform("|A", None);
        scene.add_object("|B", None, &["ty"]);
        let mut reg = SetRegistry::new();
        reg.create_set("S", vec!["|A".into(), "|B".into()]).unwrap();
        reg.set_all_channels(false);
        reg.set_channel(Channel::Tx, true);

        let outcome = select_set(&reg, &mut scene, "S", true).unwrap();
        assert_eq!(
            outcome,
            SelectionOutcome::Channels {
                channels: 1,
                objects: 1
            }
        );
        assert_eq!(scene.current_selection(), vec!["|A.tx"]);
    }

    #[test]
    fn test_no_matching_channels_falls_back() {
        let mut scene = MockScene::new();
        scene.add_object("|b", None, &["ty"]);
        let mut reg = SetRegistry::new();
        reg.create_set("S", vec!["|b".into()]).unwrap();
        reg.set_all_channels(false);
        reg.set_channel(Channel::Tx, true);

        let outcome = select_set(&reg, &mut scene, "S", true).unwrap();
        assert_eq!(outcome, SelectionOutcome::Fallback { count: 1 });
        assert_eq!(scene.current_selection(), vec!["|b"]);
    }

    #[test]
    fn test_vanished_objects_are_dropped() {
        let (reg, mut scene) = fixture();
        scene.remove_object("|a");
        let outcome = select_set(&reg, &mut scene, "Top", true).unwrap();
        assert_eq!(outcome, SelectionOutcome::Objects { count: 2 });
    }

    #[test]
    fn test_all_objects_vanished() {
        let (reg, mut scene) = fixture();
        scene.remove_object("|a");
        scene.remove_object("|b");
        scene.remove_object("|c");
        scene.select(&["|kept"]);
        let outcome = select_set(&reg, &mut scene, "Top", true).unwrap();
        assert_eq!(outcome, SelectionOutcome::NothingValid);
        // Existing selection is left untouched.
        assert_eq!(scene.current_selection(), vec!["|kept"]);
    }

    #[test]
    fn test_respect_channels_false_ignores_filter() {
        let (mut reg, mut scene) = fixture();
        reg.set_all_channels(false);
        reg.set_channel(Channel::Tx, true);
        let outcome = select_set(&reg, &mut scene, "Top", false).unwrap();
        assert_eq!(outcome, SelectionOutcome::Objects { count: 3 });
    }

    #[test]
    fn test_unknown_set_is_an_error() {
        let (reg, mut scene) = fixture();
        assert!(select_set(&reg, &mut scene, "Nope", true).is_err());
    }

    #[test]
    fn test_select_group_unions_members() {
        let (mut reg, mut scene) = fixture();
        reg.create_set("Solo", vec!["|a".into()]).unwrap();
        let group = reg.create_group("Grp");
        reg.add_to_group("Top", &group).unwrap();
        reg.add_to_group("Solo", &group).unwrap();

        let outcome = select_group(&reg, &mut scene, &group, true).unwrap();
        // |a appears in both members but is selected once.
        assert_eq!(outcome, SelectionOutcome::Objects { count: 3 });
    }

    #[test]
    fn test_select_hierarchy_chain() {
        let mut scene = MockScene::demo();
        let count = select_hierarchy_chain(&mut scene, "|rig|spine").unwrap();
        assert_eq!(count, 5);
        assert!(select_hierarchy_chain(&mut scene, "|ghost").is_err());
    }

    #[test]
    fn test_create_chain_set_defaults_name() {
        let scene = MockScene::demo();
        let mut reg = SetRegistry::new();
        let name = create_chain_set(&mut reg, &scene, "|rig|spine", None).unwrap();
        assert_eq!(name, "spine_Chain");
        assert_eq!(reg.set(&name).unwrap().members.len(), 5);
    }
}
