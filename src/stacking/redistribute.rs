//! Redistribution
//!
//! Turns the items of one equivalence class into the fewest stacks the
//! capacity allows, then writes them back. Packing is greedy: full stacks
//! first, remainder last. Stacks go back into the slots the class already
//! occupied, in ascending order, then into free slots; whatever still does
//! not fit is handed back as overflow.

use std::collections::HashMap;

use super::key::{stack_key, StackKey};
use super::marker;
use super::policy::{MAX_STACK_SIZE, MIN_STACK_SIZE};
use crate::items::{Item, Material, Slots};

/// All items of one equivalence class found in a slot range
#[derive(Debug, Clone)]
pub struct StackGroup {
    pub key: StackKey,
    /// Representative item with amount 1 and no engine capacity applied
    pub template: Item,
    /// Combined amount of every member
    pub total: u64,
    /// Slots the members were read from, ascending
    pub slots: Vec<usize>,
}

impl StackGroup {
    fn new(key: StackKey, item: &Item, slot: usize) -> Self {
        let mut template = item.with_amount(1);
        marker::reset_capacity(&mut template);
        Self {
            key,
            template,
            total: item.amount as u64,
            slots: vec![slot],
        }
    }

    fn absorb(&mut self, item: &Item, slot: usize) {
        self.total += item.amount as u64;
        self.slots.push(slot);
    }

    pub fn material(&self) -> Material {
        self.template.material
    }
}

/// Stacks produced for one group
#[derive(Debug, Clone)]
pub struct GroupOutput {
    pub key: StackKey,
    /// Capacity the group was packed to
    pub target_max: u32,
    /// Slots the group came from, ascending
    pub slots: Vec<usize>,
    /// Output stacks in emission order
    pub stacks: Vec<Item>,
}

/// Outcome of writing group outputs back into a slot range
#[derive(Debug, Clone, Default)]
pub struct Placement {
    /// Groups whose slots ended up different from before
    pub changed_groups: usize,
    /// Stacks written into the range
    pub written: usize,
    /// Stacks that found no slot
    pub overflow: Vec<Item>,
}

/// Keep a capacity inside the configurable domain
pub fn clamp_capacity(capacity: u32) -> u32 {
    capacity.clamp(MIN_STACK_SIZE, MAX_STACK_SIZE)
}

/// Read a whole slot range and bucket its items by equivalence key.
/// Groups are ordered by the first slot they appear in.
pub fn group_slots<S: Slots + ?Sized>(slots: &S) -> Vec<StackGroup> {
    let mut groups: Vec<StackGroup> = Vec::new();
    let mut by_key: HashMap<StackKey, usize> = HashMap::new();

    for index in 0..slots.len() {
        let Some(item) = slots.get(index) else {
            continue;
        };
        if item.amount == 0 {
            continue;
        }

        let key = stack_key(item);
        match by_key.get(&key) {
            Some(&g) => groups[g].absorb(item, index),
            None => {
                by_key.insert(key.clone(), groups.len());
                groups.push(StackGroup::new(key, item, index));
            }
        }
    }

    groups
}

/// Split one group into stacks of at most `target_max`.
/// Always yields at least one stack for a non-empty group.
pub fn split_group(group: &StackGroup, target_max: u32) -> Vec<Item> {
    let target_max = clamp_capacity(target_max);
    let mut remaining = group.total;
    let mut stacks = Vec::new();

    while remaining > 0 {
        let size = remaining.min(target_max as u64) as u32;
        let mut stack = group.template.with_amount(size);
        marker::apply_capacity(&mut stack, target_max);
        stacks.push(stack);
        remaining -= size as u64;
    }

    stacks
}

/// Produce output stacks for every group, each packed to the capacity
/// `capacity_of` reports for its material
pub fn redistribute<F>(groups: Vec<StackGroup>, capacity_of: F) -> Vec<GroupOutput>
where
    F: Fn(Material) -> u32,
{
    groups
        .into_iter()
        .map(|group| {
            let target_max = clamp_capacity(capacity_of(group.material()));
            let stacks = split_group(&group, target_max);
            log::trace!(
                "{} x{} -> {} stack(s) of up to {}",
                group.material(),
                group.total,
                stacks.len(),
                target_max
            );
            GroupOutput {
                key: group.key,
                target_max,
                slots: group.slots,
                stacks,
            }
        })
        .collect()
}

/// Write group outputs back into the range they were read from.
///
/// Each group first refills its own slots in ascending order and empties the
/// ones it no longer needs. Extra stacks then take free slots in ascending
/// order, group by group. Anything left is returned as overflow.
pub fn place<S: Slots + ?Sized>(slots: &mut S, outputs: Vec<GroupOutput>) -> Placement {
    let mut placement = Placement::default();
    let mut pending: Vec<Vec<Item>> = Vec::new();
    let mut changed = vec![false; outputs.len()];

    for (g, output) in outputs.into_iter().enumerate() {
        let mut stacks = output.stacks.into_iter();

        for &index in &output.slots {
            match stacks.next() {
                Some(stack) => {
                    if slots.get(index) != Some(&stack) {
                        changed[g] = true;
                    }
                    slots.set(index, Some(stack));
                    placement.written += 1;
                }
                None => {
                    changed[g] = true;
                    slots.set(index, None);
                }
            }
        }

        let extra: Vec<Item> = stacks.collect();
        if !extra.is_empty() {
            changed[g] = true;
            pending.push(extra);
        }
    }

    let mut cursor = 0;
    for extra in pending {
        for stack in extra {
            while cursor < slots.len() && slots.get(cursor).is_some() {
                cursor += 1;
            }
            if cursor < slots.len() {
                slots.set(cursor, Some(stack));
                placement.written += 1;
                cursor += 1;
            } else {
                placement.overflow.push(stack);
            }
        }
    }

    placement.changed_groups = changed.into_iter().filter(|c| *c).count();
    placement
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::Inventory;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn group_of(material: Material, amounts: &[u32]) -> StackGroup {
        let mut inv = Inventory::new(amounts.len());
        for (i, amount) in amounts.iter().enumerate() {
            inv.set(i, Some(Item::new(material, *amount)));
        }
        let mut groups = group_slots(&inv);
        assert_eq!(groups.len(), 1);
        groups.remove(0)
    }

    fn sizes(stacks: &[Item]) -> Vec<u32> {
        stacks.iter().map(|s| s.amount).collect()
    }

    #[test]
    fn test_merge_scenario() {
        let group = group_of(Material::Cobblestone, &[10, 20, 40]);
        assert_eq!(group.total, 70);
        assert_eq!(sizes(&split_group(&group, 64)), vec![64, 6]);
    }

    #[test]
    fn test_capacity_conservation() {
        for total in 1..=300u32 {
            for max in [1u32, 7, 16, 64, 99] {
                let group = group_of(Material::Stone, &[total]);
                let stacks = split_group(&group, max);
                let expected = total.div_ceil(max) as usize;
                assert_eq!(stacks.len(), expected);
                assert_eq!(stacks.iter().map(|s| s.amount).sum::<u32>(), total);
                assert!(stacks.iter().all(|s| s.amount <= max && s.amount > 0));
                assert!(stacks.iter().filter(|s| s.amount < max).count() <= 1);
            }
        }
    }

    #[test]
    fn test_single_partial_stack_still_emitted() {
        let group = group_of(Material::EnderPearl, &[5]);
        let stacks = split_group(&group, 64);
        assert_eq!(sizes(&stacks), vec![5]);
        assert!(marker::has_marker(&stacks[0]));
    }

    #[test]
    fn test_capacity_is_clamped() {
        let group = group_of(Material::Stone, &[250]);
        assert_eq!(sizes(&split_group(&group, 500)), vec![99, 99, 52]);
        assert_eq!(split_group(&group, 0).len(), 250);
    }

    #[test]
    fn test_default_capacity_is_not_marked() {
        let group = group_of(Material::Stone, &[70]);
        let stacks = split_group(&group, 64);
        assert!(stacks.iter().all(|s| !marker::has_marker(s)));
        assert!(stacks.iter().all(|s| s.meta.max_stack_size.is_none()));
    }

    #[test]
    fn test_groups_keep_first_appearance_order() {
        let mut inv = Inventory::new(4);
        inv.set(0, Some(Item::new(Material::Coal, 1)));
        inv.set(1, Some(Item::new(Material::Diamond, 1)));
        inv.set(3, Some(Item::new(Material::Coal, 1)));
        let groups = group_slots(&inv);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].material(), Material::Coal);
        assert_eq!(groups[0].slots, vec![0, 3]);
        assert_eq!(groups[1].slots, vec![1]);
    }

    #[test]
    fn test_output_is_independent_of_slot_arrangement() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let mut amounts = vec![3u32, 17, 64, 1, 40, 12];
        let reference = sizes(&split_group(&group_of(Material::Sand, &amounts), 64));

        for _ in 0..20 {
            amounts.shuffle(&mut rng);
            let stacks = split_group(&group_of(Material::Sand, &amounts), 64);
            assert_eq!(sizes(&stacks), reference);
        }
    }

    #[test]
    fn test_place_reuses_group_slots_then_free_slots() {
        let mut inv = Inventory::new(5);
        inv.set(1, Some(Item::new(Material::Stone, 64)));
        inv.set(3, Some(Item::new(Material::Stone, 64)));

        let outputs = redistribute(group_slots(&inv), |_| 16);
        assert_eq!(outputs[0].stacks.len(), 8);

        let placement = place(&mut inv, outputs);
        assert_eq!(placement.written, 5);
        assert_eq!(placement.overflow.len(), 3);
        assert_eq!(placement.changed_groups, 1);
        assert_eq!(inv.count(), 5);
        assert_eq!(inv.total_of(Material::Stone), 80);
    }

    #[test]
    fn test_place_empties_unused_group_slots() {
        let mut inv = Inventory::new(3);
        inv.set(0, Some(Item::new(Material::Coal, 10)));
        inv.set(2, Some(Item::new(Material::Coal, 20)));

        let outputs = redistribute(group_slots(&inv), |_| 64);
        let placement = place(&mut inv, outputs);
        assert_eq!(placement.changed_groups, 1);
        assert_eq!(inv.get(0).map(|i| i.amount), Some(30));
        assert!(inv.get(2).is_none());
    }

    #[test]
    fn test_place_reports_unchanged_groups() {
        let mut inv = Inventory::new(2);
        inv.set(0, Some(Item::new(Material::Coal, 64)));
        inv.set(1, Some(Item::new(Material::Coal, 5)));

        let outputs = redistribute(group_slots(&inv), |_| 64);
        let placement = place(&mut inv, outputs);
        assert_eq!(placement.changed_groups, 0);
        assert_eq!(placement.written, 2);
    }
}
