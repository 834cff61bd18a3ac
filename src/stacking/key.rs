//! Equivalence keys
//!
//! Two stacks may merge only if a player could not tell them apart. The key
//! captures every observable attribute: material, display name, lore,
//! durability and, for containers, what is inside them. Container contents
//! are compared as a multiset so the order of interior slots does not matter.
//!
//! Each component is written length-prefixed, so distinct attribute tuples
//! never render to the same string.

use std::collections::BTreeMap;
use std::fmt::{self, Write};

use crate::items::Item;

/// Canonical, order-independent signature of an item
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StackKey(String);

impl StackKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the equivalence key of an item. Pure; never mutates the item.
pub fn stack_key(item: &Item) -> StackKey {
    let meta = &item.meta;
    let mut key = String::new();

    push_field(&mut key, 't', item.material.name());
    push_field(&mut key, 'n', meta.display_name.as_deref().unwrap_or(""));

    let lore = meta.lore.as_deref().unwrap_or(&[]);
    let _ = write!(key, "l{};", lore.len());
    for line in lore {
        push_field(&mut key, '-', line);
    }

    // Missing state and present state must never compare equal
    match meta.damage {
        Some(damage) => {
            let _ = write!(key, "d{};", damage);
        }
        None => key.push_str("d_;"),
    }

    if item.is_container() {
        push_field(&mut key, 'c', &content_signature(item));
    }

    StackKey(key)
}

/// Whether two items may share a stack
pub fn can_stack(a: &Item, b: &Item) -> bool {
    stack_key(a) == stack_key(b)
}

/// Order-independent summary of a container's interior: the sorted list of
/// (inner key, summed amount) pairs. Unreadable contents count as empty.
pub fn content_signature(item: &Item) -> String {
    let Some(contents) = item.meta.contents.as_deref() else {
        log::trace!("{} has no readable contents; using empty signature", item.material);
        return String::new();
    };

    let mut totals: BTreeMap<StackKey, u64> = BTreeMap::new();
    for inner in contents.iter().flatten() {
        if inner.amount == 0 {
            continue;
        }
        *totals.entry(stack_key(inner)).or_default() += inner.amount as u64;
    }

    let mut signature = String::new();
    for (inner_key, amount) in &totals {
        push_field(&mut signature, 'k', inner_key.as_str());
        let _ = write!(signature, "x{};", amount);
    }
    signature
}

fn push_field(buf: &mut String, tag: char, value: &str) {
    let _ = write!(buf, "{}{}:{}", tag, value.len(), value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::Material;

    fn shulker(contents: Vec<Option<Item>>) -> Item {
        Item::new(Material::ShulkerBox, 1).with_contents(contents)
    }

    #[test]
    fn test_amount_does_not_affect_key() {
        let a = Item::new(Material::Diamond, 3);
        let b = Item::new(Material::Diamond, 60);
        assert_eq!(stack_key(&a), stack_key(&b));
    }

    #[test]
    fn test_missing_and_empty_name_are_equivalent() {
        let a = Item::new(Material::Stone, 1);
        let b = Item::new(Material::Stone, 1).with_name("");
        assert!(can_stack(&a, &b));
        assert!(!can_stack(&a, &Item::new(Material::Stone, 1).with_name("Rock")));
    }

    #[test]
    fn test_distinct_lore_never_merges() {
        let legendary = Item::new(Material::Diamond, 1).with_lore(["Legendary"]);
        let plain = Item::new(Material::Diamond, 1).with_lore(Vec::<String>::new());
        assert!(!can_stack(&legendary, &plain));
    }

    #[test]
    fn test_trailing_empty_lore_line_matters() {
        let a = Item::new(Material::Diamond, 1).with_lore(["a"]);
        let b = Item::new(Material::Diamond, 1).with_lore(["a", ""]);
        assert!(!can_stack(&a, &b));
    }

    #[test]
    fn test_field_boundaries_are_unambiguous() {
        let a = Item::new(Material::Diamond, 1).with_name("ab").with_lore(["c"]);
        let b = Item::new(Material::Diamond, 1).with_name("a").with_lore(["bc"]);
        assert!(!can_stack(&a, &b));
    }

    #[test]
    fn test_durability_must_match_exactly() {
        let fresh = Item::new(Material::IronPickaxe, 1);
        let worn = Item::new(Material::IronPickaxe, 1).with_damage(12);
        assert!(!can_stack(&fresh, &worn));
        assert!(can_stack(&worn, &Item::new(Material::IronPickaxe, 1).with_damage(12)));
    }

    #[test]
    fn test_one_sided_durability_is_a_mismatch() {
        let mut hidden = Item::new(Material::IronPickaxe, 1);
        hidden.meta.damage = None;
        let shown = Item::new(Material::IronPickaxe, 1);
        assert!(!can_stack(&hidden, &shown));

        let mut also_hidden = Item::new(Material::IronPickaxe, 1);
        also_hidden.meta.damage = None;
        assert!(can_stack(&hidden, &also_hidden));
    }

    #[test]
    fn test_marker_and_capacity_do_not_affect_key() {
        let plain = Item::new(Material::EnderPearl, 4);
        let mut touched = plain.clone();
        crate::stacking::marker::set_marker(&mut touched);
        touched.meta.max_stack_size = Some(64);
        assert_eq!(stack_key(&plain), stack_key(&touched));
    }

    #[test]
    fn test_container_contents_are_order_independent() {
        let a = shulker(vec![
            Some(Item::new(Material::Diamond, 5)),
            None,
            Some(Item::new(Material::Coal, 10)),
        ]);
        let b = shulker(vec![
            None,
            Some(Item::new(Material::Coal, 4)),
            Some(Item::new(Material::Diamond, 5)),
            Some(Item::new(Material::Coal, 6)),
        ]);
        assert_eq!(stack_key(&a), stack_key(&b));
    }

    #[test]
    fn test_container_quantities_matter() {
        let a = shulker(vec![Some(Item::new(Material::Diamond, 5))]);
        let b = shulker(vec![Some(Item::new(Material::Diamond, 6))]);
        assert!(!can_stack(&a, &b));
        assert!(!can_stack(&a, &shulker(vec![None; 27])));
    }

    #[test]
    fn test_nested_contents_recurse() {
        let inner_a = shulker(vec![Some(Item::new(Material::Emerald, 1))]);
        let inner_b = shulker(vec![Some(Item::new(Material::Emerald, 2))]);
        let outer_a = shulker(vec![Some(inner_a)]);
        let outer_b = shulker(vec![Some(inner_b)]);
        assert!(!can_stack(&outer_a, &outer_b));
    }

    #[test]
    fn test_unreadable_contents_count_as_empty() {
        let mut unreadable = Item::new(Material::RedShulkerBox, 1);
        unreadable.meta.contents = None;
        let empty = Item::new(Material::RedShulkerBox, 1);
        assert_eq!(content_signature(&unreadable), "");
        assert!(can_stack(&unreadable, &empty));
    }

    #[test]
    fn test_non_containers_skip_contents() {
        let mut odd = Item::new(Material::Chest, 1);
        odd.meta.contents = Some(vec![Some(Item::new(Material::Diamond, 1))]);
        assert!(can_stack(&odd, &Item::new(Material::Chest, 1)));
    }

    #[test]
    fn test_key_is_transitive_across_equal_items() {
        let a = Item::new(Material::Bread, 1).with_name("Loaf");
        let b = Item::new(Material::Bread, 9).with_name("Loaf");
        let c = Item::new(Material::Bread, 30).with_name("Loaf");
        assert!(can_stack(&a, &b) && can_stack(&b, &c));
        assert!(can_stack(&a, &c));
        assert!(can_stack(&b, &a));
    }
}
