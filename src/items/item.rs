//! Item definitions
//!
//! An item is a material, an amount, and the metadata a player can observe
//! (name, lore, durability, container contents) plus out-of-band tags the
//! host persists alongside it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::material::Material;

/// Value stored in an item's persistent tag map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagValue {
    Byte(u8),
    Int(i32),
}

/// Item metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMeta {
    /// Custom display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Lore lines, in display order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lore: Option<Vec<String>>,
    /// Damage taken so far; present only when the item exposes durability
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<u32>,
    /// Capacity override; `None` means the material default applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_stack_size: Option<u32>,
    /// Interior slots of a container item. `None` when the contents could
    /// not be read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<Vec<Option<Item>>>,
    /// Persistent key/value data
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, TagValue>,
}

impl ItemMeta {
    /// Check if no metadata is set at all
    pub fn is_empty(&self) -> bool {
        *self == ItemMeta::default()
    }
}

/// A stack of one material
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub material: Material,
    pub amount: u32,
    #[serde(default, skip_serializing_if = "ItemMeta::is_empty")]
    pub meta: ItemMeta,
}

impl Item {
    /// Create a plain stack. Damageable materials start undamaged and
    /// containers start with an empty interior, as the host would hand them out.
    pub fn new(material: Material, amount: u32) -> Self {
        let mut meta = ItemMeta::default();
        if material.is_damageable() {
            meta.damage = Some(0);
        }
        if material.is_container() {
            meta.contents = Some(vec![None; Material::CONTAINER_SLOTS]);
        }
        Self { material, amount, meta }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.meta.display_name = Some(name.into());
        self
    }

    pub fn with_lore<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.meta.lore = Some(lines.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_damage(mut self, damage: u32) -> Self {
        self.meta.damage = Some(damage);
        self
    }

    /// Replace container contents
    pub fn with_contents(mut self, contents: Vec<Option<Item>>) -> Self {
        self.meta.contents = Some(contents);
        self
    }

    /// Whether this item carries per-use state
    pub fn has_per_use_state(&self) -> bool {
        self.material.is_damageable() || self.meta.damage.is_some()
    }

    /// Whether this item holds nested contents
    pub fn is_container(&self) -> bool {
        self.material.is_container()
    }

    /// Effective capacity: the override if one is set, else the material default
    pub fn max_stack_size(&self) -> u32 {
        self.meta
            .max_stack_size
            .unwrap_or_else(|| self.material.max_stack_size())
    }

    /// Copy of this item with a different amount
    pub fn with_amount(&self, amount: u32) -> Item {
        let mut copy = self.clone();
        copy.amount = amount;
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_defaults() {
        let sword = Item::new(Material::IronSword, 1);
        assert_eq!(sword.meta.damage, Some(0));
        assert!(sword.has_per_use_state());

        let dirt = Item::new(Material::Dirt, 12);
        assert!(dirt.meta.is_empty());
        assert!(!dirt.has_per_use_state());

        let box_item = Item::new(Material::ShulkerBox, 1);
        assert_eq!(box_item.meta.contents.as_ref().map(Vec::len), Some(27));
    }

    #[test]
    fn test_max_stack_size_override() {
        let mut pearl = Item::new(Material::EnderPearl, 3);
        assert_eq!(pearl.max_stack_size(), 16);
        pearl.meta.max_stack_size = Some(64);
        assert_eq!(pearl.max_stack_size(), 64);
    }

    #[test]
    fn test_json_round_trip_keeps_tags() {
        let mut item = Item::new(Material::Diamond, 5).with_lore(["Shiny"]);
        item.meta.tags.insert("stackwright:stacked_item".into(), TagValue::Byte(1));
        let json = serde_json::to_string(&item).unwrap();
        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
