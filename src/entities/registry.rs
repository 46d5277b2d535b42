//! SetRegistry: the owned repository of sets and groups.
//!
//! Every mutation goes through the registry and validates its targets by
//! key lookup first; a failed operation returns a [`RegistryError`] and
//! leaves the registry untouched. Callers (the GUI layer) surface failures
//! to the user, nothing here panics on bad input.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::debug;
use thiserror::Error;

use super::channels::{Channel, ChannelFilter};
use super::group::ParentGroup;
use super::set::SelectionSet;
use super::style;
use crate::utils::unique_name;

/// Recursion guard for hierarchy walks. The cycle check keeps the parent
/// relation a forest, so this should never trip; it bounds the damage if
/// a hand-edited document ever sneaks a loop past validation.
const MAX_DEPTH: usize = 64;

/// Named failures reported by registry mutators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("set '{0}' not found")]
    SetNotFound(String),

    #[error("group '{0}' not found")]
    GroupNotFound(String),

    #[error("name '{0}' is already taken")]
    NameCollision(String),

    #[error("cannot parent '{child}' under '{parent}': would create a circular reference")]
    CycleRejected { child: String, parent: String },

    #[error("nothing selected: select objects to create a set")]
    EmptySelection,
}

/// In-memory registry of sets, groups, the channel filter and the board
/// background. One record per entity; name-keyed, insertion-ordered.
#[derive(Debug, Clone, Default)]
pub struct SetRegistry {
    sets: IndexMap<String, SelectionSet>,
    groups: IndexMap<String, ParentGroup>,
    channels: ChannelFilter,
    background: Option<PathBuf>,
}

impl SetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // === Read access ===

    pub fn sets(&self) -> &IndexMap<String, SelectionSet> {
        &self.sets
    }

    pub fn set(&self, name: &str) -> Option<&SelectionSet> {
        self.sets.get(name)
    }

    pub fn groups(&self) -> &IndexMap<String, ParentGroup> {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&ParentGroup> {
        self.groups.get(name)
    }

    pub fn channels(&self) -> ChannelFilter {
        self.channels
    }

    pub fn background(&self) -> Option<&Path> {
        self.background.as_deref()
    }

    /// Direct children of a set (sets whose parent pointer equals `name`).
    pub fn children_of(&self, name: &str) -> Vec<&str> {
        self.sets
            .iter()
            .filter(|(_, set)| set.parent.as_deref() == Some(name))
            .map(|(child, _)| child.as_str())
            .collect()
    }

    /// Group the set currently belongs to, if any.
    pub fn group_of(&self, set_name: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|(_, group)| group.members.iter().any(|m| m == set_name))
            .map(|(name, _)| name.as_str())
    }

    // === Set lifecycle ===

    /// Create a set from a captured selection. The requested name is
    /// uniquified with a `_N` suffix when taken; an empty member list is
    /// rejected. Returns the final name.
    pub fn create_set(
        &mut self,
        name: &str,
        members: Vec<String>,
    ) -> Result<String, RegistryError> {
        if members.is_empty() {
            return Err(RegistryError::EmptySelection);
        }
        let name = unique_name(name, |n| self.sets.contains_key(n));
        let pos = style::cascade(self.sets.values().map(|s| s.style.pos));
        debug!("create_set '{}' with {} members at {:?}", name, members.len(), pos);
        self.sets.insert(name.clone(), SelectionSet::new(members, pos));
        Ok(name)
    }

    /// Rename a set, atomically rewriting every reference to the old name:
    /// child parent pointers and group membership entries.
    pub fn rename_set(&mut self, old: &str, new: &str) -> Result<(), RegistryError> {
        if !self.sets.contains_key(old) {
            return Err(RegistryError::SetNotFound(old.to_string()));
        }
        if self.sets.contains_key(new) {
            return Err(RegistryError::NameCollision(new.to_string()));
        }
        let set = self.sets.shift_remove(old).expect("checked above");
        self.sets.insert(new.to_string(), set);
        for other in self.sets.values_mut() {
            if other.parent.as_deref() == Some(old) {
                other.parent = Some(new.to_string());
            }
        }
        for group in self.groups.values_mut() {
            for member in group.members.iter_mut() {
                if member == old {
                    *member = new.to_string();
                }
            }
        }
        debug!("renamed set '{}' -> '{}'", old, new);
        Ok(())
    }

    /// Delete a set. Children are orphaned (parent pointer cleared), not
    /// cascaded; group membership is removed.
    pub fn delete_set(&mut self, name: &str) -> Result<(), RegistryError> {
        if self.sets.shift_remove(name).is_none() {
            return Err(RegistryError::SetNotFound(name.to_string()));
        }
        for set in self.sets.values_mut() {
            if set.parent.as_deref() == Some(name) {
                set.parent = None;
            }
        }
        for group in self.groups.values_mut() {
            group.members.retain(|m| m != name);
        }
        debug!("deleted set '{}'", name);
        Ok(())
    }

    // === Group lifecycle ===

    /// Create an empty group; the requested name is uniquified like
    /// [`create_set`](Self::create_set). Returns the final name.
    pub fn create_group(&mut self, name: &str) -> String {
        let name = unique_name(name, |n| self.groups.contains_key(n));
        // Cascade from existing groups, falling back to set positions.
        let pos = if self.groups.is_empty() {
            style::cascade(self.sets.values().map(|s| s.style.pos))
        } else {
            style::cascade(self.groups.values().map(|g| g.style.pos))
        };
        debug!("create_group '{}' at {:?}", name, pos);
        self.groups.insert(name.clone(), ParentGroup::new(pos));
        name
    }

    pub fn rename_group(&mut self, old: &str, new: &str) -> Result<(), RegistryError> {
        if !self.groups.contains_key(old) {
            return Err(RegistryError::GroupNotFound(old.to_string()));
        }
        if self.groups.contains_key(new) {
            return Err(RegistryError::NameCollision(new.to_string()));
        }
        let group = self.groups.shift_remove(old).expect("checked above");
        self.groups.insert(new.to_string(), group);
        debug!("renamed group '{}' -> '{}'", old, new);
        Ok(())
    }

    /// Delete a group container. Member sets survive ungrouped.
    pub fn delete_group(&mut self, name: &str) -> Result<(), RegistryError> {
        if self.groups.shift_remove(name).is_none() {
            return Err(RegistryError::GroupNotFound(name.to_string()));
        }
        debug!("deleted group '{}'", name);
        Ok(())
    }

    // === Membership and hierarchy ===

    /// Put a set into a group. A set belongs to at most one group, so any
    /// previous membership is removed first.
    pub fn add_to_group(&mut self, set_name: &str, group_name: &str) -> Result<(), RegistryError> {
        if !self.sets.contains_key(set_name) {
            return Err(RegistryError::SetNotFound(set_name.to_string()));
        }
        if !self.groups.contains_key(group_name) {
            return Err(RegistryError::GroupNotFound(group_name.to_string()));
        }
        for group in self.groups.values_mut() {
            group.members.retain(|m| m != set_name);
        }
        let group = self.groups.get_mut(group_name).expect("checked above");
        group.members.push(set_name.to_string());
        Ok(())
    }

    /// Remove a set from one group, or from all groups when `group_name`
    /// is `None`.
    pub fn remove_from_group(
        &mut self,
        set_name: &str,
        group_name: Option<&str>,
    ) -> Result<(), RegistryError> {
        if !self.sets.contains_key(set_name) {
            return Err(RegistryError::SetNotFound(set_name.to_string()));
        }
        match group_name {
            Some(group_name) => {
                let group = self
                    .groups
                    .get_mut(group_name)
                    .ok_or_else(|| RegistryError::GroupNotFound(group_name.to_string()))?;
                group.members.retain(|m| m != set_name);
            }
            None => {
                for group in self.groups.values_mut() {
                    group.members.retain(|m| m != set_name);
                }
            }
        }
        Ok(())
    }

    /// Assign (or clear, with `None`) a set's parent. Rejects assignments
    /// that would make a set its own ancestor.
    pub fn set_parent(
        &mut self,
        child: &str,
        parent: Option<&str>,
    ) -> Result<(), RegistryError> {
        if !self.sets.contains_key(child) {
            return Err(RegistryError::SetNotFound(child.to_string()));
        }
        if let Some(parent) = parent {
            if !self.sets.contains_key(parent) {
                return Err(RegistryError::SetNotFound(parent.to_string()));
            }
            if self.would_create_cycle(child, parent) {
                return Err(RegistryError::CycleRejected {
                    child: child.to_string(),
                    parent: parent.to_string(),
                });
            }
        }
        let set = self.sets.get_mut(child).expect("checked above");
        set.parent = parent.map(str::to_string);
        Ok(())
    }

    /// Walk the parent chain from the proposed parent upwards; if `child`
    /// shows up, the assignment would close a loop. O(depth), no
    /// memoization - trees here are tens of nodes at most.
    fn would_create_cycle(&self, child: &str, new_parent: &str) -> bool {
        let mut ancestor = Some(new_parent);
        let mut steps = 0;
        while let Some(name) = ancestor {
            if name == child {
                return true;
            }
            steps += 1;
            if steps > MAX_DEPTH {
                return true;
            }
            ancestor = self.sets.get(name).and_then(|s| s.parent.as_deref());
        }
        false
    }

    /// All object ids under a set: its own members plus, recursively, the
    /// members of every set parented to it. Order is the set's own members
    /// first, then each child subtree; duplicates are kept (selection
    /// dedupes later).
    pub fn hierarchy_members(&self, name: &str) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_hierarchy(name, 0, &mut out);
        out
    }

    fn collect_hierarchy(&self, name: &str, depth: usize, out: &mut Vec<String>) {
        if depth > MAX_DEPTH {
            debug!("hierarchy walk depth cap hit at '{}'", name);
            return;
        }
        let Some(set) = self.sets.get(name) else {
            return;
        };
        out.extend(set.members.iter().cloned());
        for (child, other) in &self.sets {
            if other.parent.as_deref() == Some(name) {
                self.collect_hierarchy(child, depth + 1, out);
            }
        }
    }

    // === Style and channel mutators ===

    pub fn move_set(&mut self, name: &str, pos: [f32; 2]) -> Result<(), RegistryError> {
        self.set_style_mut(name)?.pos = pos;
        Ok(())
    }

    pub fn resize_set(&mut self, name: &str, size: [f32; 2]) -> Result<(), RegistryError> {
        self.set_style_mut(name)?.size = size;
        Ok(())
    }

    pub fn recolor_set(&mut self, name: &str, color: [u8; 3]) -> Result<(), RegistryError> {
        self.set_style_mut(name)?.color = color;
        Ok(())
    }

    pub fn set_set_alpha(&mut self, name: &str, alpha: u8) -> Result<(), RegistryError> {
        self.set_style_mut(name)?.alpha = alpha;
        Ok(())
    }

    pub fn move_group(&mut self, name: &str, pos: [f32; 2]) -> Result<(), RegistryError> {
        self.group_style_mut(name)?.pos = pos;
        Ok(())
    }

    pub fn resize_group(&mut self, name: &str, size: [f32; 2]) -> Result<(), RegistryError> {
        self.group_style_mut(name)?.size = size;
        Ok(())
    }

    pub fn recolor_group(&mut self, name: &str, color: [u8; 3]) -> Result<(), RegistryError> {
        self.group_style_mut(name)?.color = color;
        Ok(())
    }

    pub fn set_group_alpha(&mut self, name: &str, alpha: u8) -> Result<(), RegistryError> {
        self.group_style_mut(name)?.alpha = alpha;
        Ok(())
    }

    fn set_style_mut(&mut self, name: &str) -> Result<&mut super::style::Style, RegistryError> {
        self.sets
            .get_mut(name)
            .map(|s| &mut s.style)
            .ok_or_else(|| RegistryError::SetNotFound(name.to_string()))
    }

    fn group_style_mut(&mut self, name: &str) -> Result<&mut super::style::Style, RegistryError> {
        self.groups
            .get_mut(name)
            .map(|g| &mut g.style)
            .ok_or_else(|| RegistryError::GroupNotFound(name.to_string()))
    }

    pub fn set_channel(&mut self, channel: Channel, on: bool) {
        self.channels.set(channel, on);
    }

    pub fn set_all_channels(&mut self, on: bool) {
        self.channels.set_all(on);
    }

    pub fn set_background(&mut self, path: Option<PathBuf>) {
        self.background = path;
    }

    // === Import support ===

    /// Insert a fully-built set record under a known-free name. Used by
    /// import, which validates names and references itself.
    pub(crate) fn insert_set(&mut self, name: String, set: SelectionSet) {
        self.sets.insert(name, set);
    }

    pub(crate) fn insert_group(&mut self, name: String, group: ParentGroup) {
        self.groups.insert(name, group);
    }

    pub(crate) fn set_channels(&mut self, channels: ChannelFilter) {
        self.channels = channels;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn objects(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn registry_with(sets: &[&str]) -> SetRegistry {
        let mut reg = SetRegistry::new();
        for name in sets {
            reg.create_set(name, objects(&["|rig|node"])).unwrap();
        }
        reg
    }

    #[test]
    fn test_create_set_requires_members() {
        let mut reg = SetRegistry::new();
        assert_eq!(
            reg.create_set("Arms", Vec::new()),
            Err(RegistryError::EmptySelection)
        );
        assert!(reg.sets().is_empty());
    }

    #[test]
    fn test_create_set_uniquifies_name() {
        let mut reg = registry_with(&["Arms"]);
        let name = reg.create_set("Arms", objects(&["|a"])).unwrap();
        assert_eq!(name, "Arms_1");
        let name = reg.create_set("Arms", objects(&["|b"])).unwrap();
        assert_eq!(name, "Arms_2");
    }

    #[test]
    fn test_created_sets_cascade_positions() {
        let mut reg = registry_with(&["A", "B"]);
        let a = reg.set("A").unwrap().style.pos;
        let b = reg.set("B").unwrap().style.pos;
        assert_eq!(a, style::ORIGIN);
        assert_eq!(b, [a[0] + style::CASCADE_STEP, a[1] + style::CASCADE_STEP]);
    }

    #[test]
    fn test_set_parent_and_walk() {
        let mut reg = registry_with(&["Root", "Mid", "Leaf"]);
        reg.set_parent("Mid", Some("Root")).unwrap();
        reg.set_parent("Leaf", Some("Mid")).unwrap();

        // Walking up from Leaf reaches Root.
        let mut ancestor = reg.set("Leaf").unwrap().parent.clone();
        let mut seen = Vec::new();
        while let Some(name) = ancestor {
            ancestor = reg.set(&name).unwrap().parent.clone();
            seen.push(name);
        }
        assert_eq!(seen, vec!["Mid".to_string(), "Root".to_string()]);
    }

    #[test]
    fn test_set_parent_rejects_cycles() {
        let mut reg = registry_with(&["Root", "Mid", "Leaf"]);
        reg.set_parent("Mid", Some("Root")).unwrap();
        reg.set_parent("Leaf", Some("Mid")).unwrap();

        let err = reg.set_parent("Root", Some("Leaf")).unwrap_err();
        assert_eq!(
            err,
            RegistryError::CycleRejected {
                child: "Root".into(),
                parent: "Leaf".into()
            }
        );
        // State unchanged on rejection.
        assert_eq!(reg.set("Root").unwrap().parent, None);
    }

    #[test]
    fn test_set_parent_rejects_self() {
        let mut reg = registry_with(&["A"]);
        assert!(matches!(
            reg.set_parent("A", Some("A")),
            Err(RegistryError::CycleRejected { .. })
        ));
    }

    #[test]
    fn test_set_parent_unknown_targets() {
        let mut reg = registry_with(&["A"]);
        assert_eq!(
            reg.set_parent("Missing", Some("A")),
            Err(RegistryError::SetNotFound("Missing".into()))
        );
        assert_eq!(
            reg.set_parent("A", Some("Missing")),
            Err(RegistryError::SetNotFound("Missing".into()))
        );
    }

    #[test]
    fn test_rename_set_fixes_references() {
        let mut reg = registry_with(&["Root", "Leaf"]);
        reg.set_parent("Leaf", Some("Root")).unwrap();
        let group = reg.create_group("Grp");
        reg.add_to_group("Root", &group).unwrap();

        reg.rename_set("Root", "Base").unwrap();

        assert!(reg.set("Root").is_none());
        assert_eq!(reg.set("Leaf").unwrap().parent.as_deref(), Some("Base"));
        assert_eq!(reg.group(&group).unwrap().members, vec!["Base".to_string()]);
    }

    #[test]
    fn test_rename_set_collision_and_missing() {
        let mut reg = registry_with(&["A", "B"]);
        assert_eq!(
            reg.rename_set("A", "B"),
            Err(RegistryError::NameCollision("B".into()))
        );
        assert_eq!(
            reg.rename_set("X", "Y"),
            Err(RegistryError::SetNotFound("X".into()))
        );
    }

    #[test]
    fn test_delete_set_orphans_children() {
        let mut reg = registry_with(&["Root", "Leaf"]);
        reg.set_parent("Leaf", Some("Root")).unwrap();
        let group = reg.create_group("Grp");
        reg.add_to_group("Root", &group).unwrap();

        reg.delete_set("Root").unwrap();

        assert!(reg.set("Root").is_none());
        // Child survives, orphaned.
        assert_eq!(reg.set("Leaf").unwrap().parent, None);
        assert!(reg.group(&group).unwrap().members.is_empty());
    }

    #[test]
    fn test_group_membership_is_exclusive() {
        let mut reg = registry_with(&["A"]);
        let g1 = reg.create_group("First");
        let g2 = reg.create_group("Second");
        reg.add_to_group("A", &g1).unwrap();
        reg.add_to_group("A", &g2).unwrap();

        assert!(reg.group(&g1).unwrap().members.is_empty());
        assert_eq!(reg.group(&g2).unwrap().members, vec!["A".to_string()]);
        assert_eq!(reg.group_of("A"), Some(g2.as_str()));
    }

    #[test]
    fn test_delete_group_keeps_member_sets() {
        let mut reg = registry_with(&["A"]);
        let g = reg.create_group("Grp");
        reg.add_to_group("A", &g).unwrap();
        reg.delete_group(&g).unwrap();
        assert!(reg.group(&g).is_none());
        assert!(reg.set("A").is_some());
        assert_eq!(reg.group_of("A"), None);
    }

    #[test]
    fn test_hierarchy_members_flattens_children() {
        let mut reg = SetRegistry::new();
        reg.create_set("Root", objects(&["|r1", "|r2"])).unwrap();
        reg.create_set("Left", objects(&["|l1"])).unwrap();
        reg.create_set("Right", objects(&["|q1"])).unwrap();
        reg.create_set("Deep", objects(&["|d1"])).unwrap();
        reg.set_parent("Left", Some("Root")).unwrap();
        reg.set_parent("Right", Some("Root")).unwrap();
        reg.set_parent("Deep", Some("Left")).unwrap();

        assert_eq!(
            reg.hierarchy_members("Root"),
            objects(&["|r1", "|r2", "|l1", "|d1", "|q1"])
        );
    }

    #[test]
    fn test_hierarchy_members_unknown_set() {
        let reg = SetRegistry::new();
        assert!(reg.hierarchy_members("Nope").is_empty());
    }

    #[test]
    fn test_style_mutators_validate_target() {
        let mut reg = registry_with(&["A"]);
        reg.move_set("A", [5.0, 6.0]).unwrap();
        reg.resize_set("A", [300.0, 100.0]).unwrap();
        reg.recolor_set("A", [10, 20, 30]).unwrap();
        reg.set_set_alpha("A", 99).unwrap();
        let style = &reg.set("A").unwrap().style;
        assert_eq!(style.pos, [5.0, 6.0]);
        assert_eq!(style.size, [300.0, 100.0]);
        assert_eq!(style.color, [10, 20, 30]);
        assert_eq!(style.alpha, 99);

        assert!(reg.move_set("missing", [0.0, 0.0]).is_err());
        assert!(reg.recolor_group("missing", [0, 0, 0]).is_err());
    }
}
