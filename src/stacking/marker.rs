//! Engine markers
//!
//! Every stack the engine gives a non-default capacity is tagged in its
//! persistent data, so a later reversal only touches stacks the engine
//! actually changed. The tag lives in the tag map, which is not part of the
//! equivalence key.
//!
//! A plain marker is `Byte(1)`. When the item already carried a capacity
//! override of its own, the marker is `Int(previous)` so reversal can put
//! that override back.

use crate::items::{Item, TagValue};

/// Persistent data key of the marker
pub const MARKER_KEY: &str = "stackwright:stacked_item";

/// Tag an item as engine-modified. Idempotent; an existing marker is kept.
pub fn set_marker(item: &mut Item) {
    item.meta
        .tags
        .entry(MARKER_KEY.to_string())
        .or_insert(TagValue::Byte(1));
}

pub fn has_marker(item: &Item) -> bool {
    matches!(
        item.meta.tags.get(MARKER_KEY),
        Some(TagValue::Byte(_) | TagValue::Int(_))
    )
}

/// Remove the tag. Returns whether one was present.
pub fn clear_marker(item: &mut Item) -> bool {
    item.meta.tags.remove(MARKER_KEY).is_some()
}

/// Override the item carried before the engine first touched it
fn previous_capacity(item: &Item) -> Option<u32> {
    match item.meta.tags.get(MARKER_KEY) {
        Some(TagValue::Int(previous)) => u32::try_from(*previous).ok(),
        _ => None,
    }
}

/// Give an item the capacity `target`. Only a capacity different from the
/// material default is written and marked; a default capacity resets the
/// item instead.
pub fn apply_capacity(item: &mut Item, target: u32) -> bool {
    if target == item.material.max_stack_size() {
        reset_capacity(item);
        return false;
    }

    if !has_marker(item) {
        let marker = match item.meta.max_stack_size.and_then(|m| i32::try_from(m).ok()) {
            Some(previous) => TagValue::Int(previous),
            None => TagValue::Byte(1),
        };
        item.meta.tags.insert(MARKER_KEY.to_string(), marker);
    }
    item.meta.max_stack_size = Some(target);
    true
}

/// Undo [`apply_capacity`] on an engine-marked item, restoring any override
/// it had before. Unmarked items are left alone. Returns whether the item
/// was reset.
pub fn reset_capacity(item: &mut Item) -> bool {
    if !has_marker(item) {
        return false;
    }
    item.meta.max_stack_size = previous_capacity(item);
    clear_marker(item);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::Material;

    #[test]
    fn test_marker_is_idempotent() {
        let mut item = Item::new(Material::Snowball, 3);
        set_marker(&mut item);
        let once = item.clone();
        set_marker(&mut item);
        assert_eq!(item, once);
        assert!(has_marker(&item));
        assert!(clear_marker(&mut item));
        assert!(!clear_marker(&mut item));
        assert!(!has_marker(&item));
    }

    #[test]
    fn test_apply_capacity_marks_only_non_default() {
        let mut pearl = Item::new(Material::EnderPearl, 3);
        assert!(apply_capacity(&mut pearl, 64));
        assert_eq!(pearl.meta.max_stack_size, Some(64));
        assert!(has_marker(&pearl));

        let mut dirt = Item::new(Material::Dirt, 3);
        assert!(!apply_capacity(&mut dirt, 64));
        assert!(dirt.meta.is_empty());
    }

    #[test]
    fn test_apply_default_capacity_unmarks() {
        let mut pearl = Item::new(Material::EnderPearl, 3);
        apply_capacity(&mut pearl, 64);
        apply_capacity(&mut pearl, 16);
        assert!(!has_marker(&pearl));
        assert_eq!(pearl.meta.max_stack_size, None);
    }

    #[test]
    fn test_reset_leaves_foreign_overrides() {
        let mut foreign = Item::new(Material::EnderPearl, 3);
        foreign.meta.max_stack_size = Some(32);
        assert!(!reset_capacity(&mut foreign));
        assert_eq!(foreign.meta.max_stack_size, Some(32));

        let mut ours = Item::new(Material::EnderPearl, 3);
        apply_capacity(&mut ours, 48);
        assert!(reset_capacity(&mut ours));
        assert!(ours.meta.is_empty());
    }

    #[test]
    fn test_reset_restores_foreign_override() {
        let mut pearl = Item::new(Material::EnderPearl, 3);
        pearl.meta.max_stack_size = Some(32);

        assert!(apply_capacity(&mut pearl, 64));
        assert_eq!(pearl.meta.max_stack_size, Some(64));
        assert_eq!(pearl.meta.tags.get(MARKER_KEY), Some(&TagValue::Int(32)));

        // A second pass must not forget the original override
        assert!(apply_capacity(&mut pearl, 48));
        assert_eq!(pearl.meta.tags.get(MARKER_KEY), Some(&TagValue::Int(32)));

        assert!(reset_capacity(&mut pearl));
        assert_eq!(pearl.meta.max_stack_size, Some(32));
        assert!(!has_marker(&pearl));
    }

    #[test]
    fn test_marker_survives_json() {
        let mut item = Item::new(Material::Egg, 2);
        apply_capacity(&mut item, 64);
        let json = serde_json::to_string(&item).unwrap();
        let back: Item = serde_json::from_str(&json).unwrap();
        assert!(has_marker(&back));
        assert_eq!(back.meta.max_stack_size, Some(64));
    }
}
