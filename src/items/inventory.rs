//! Inventory system
//!
//! The engine sees a host inventory as an indexable range of slots. This
//! module defines that seam, a plain `Vec`-backed inventory, and a window that
//! restricts any slot range to a sub-range of its indices.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::item::Item;

/// Main storage of a player inventory (hotbar plus the three rows above it)
pub const STORAGE_SLOTS: Range<usize> = 0..36;
/// Every player slot: storage, four armor slots and the offhand
pub const PLAYER_SLOTS: usize = 41;

/// A finite, indexable range of slots holding an item or nothing
pub trait Slots {
    /// Number of slots
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Item at `index`; `None` for an empty or out-of-range slot
    fn get(&self, index: usize) -> Option<&Item>;

    fn get_mut(&mut self, index: usize) -> Option<&mut Item>;

    /// Replace the slot contents. Writes past the end are ignored.
    fn set(&mut self, index: usize, item: Option<Item>);

    /// Remove and return the item at `index`
    fn take(&mut self, index: usize) -> Option<Item> {
        let item = self.get(index).cloned();
        if item.is_some() {
            self.set(index, None);
        }
        item
    }
}

/// Receives items that could not be placed back into a slot range
pub trait OverflowSink {
    fn accept(&mut self, item: Item);
}

impl OverflowSink for Vec<Item> {
    fn accept(&mut self, item: Item) {
        self.push(item);
    }
}

impl Slots for Vec<Option<Item>> {
    fn len(&self) -> usize {
        <[Option<Item>]>::len(self)
    }

    fn get(&self, index: usize) -> Option<&Item> {
        <[Option<Item>]>::get(self, index).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut Item> {
        <[Option<Item>]>::get_mut(self, index).and_then(Option::as_mut)
    }

    fn set(&mut self, index: usize, item: Option<Item>) {
        if let Some(slot) = <[Option<Item>]>::get_mut(self, index) {
            *slot = item;
        }
    }
}

/// Fixed-size inventory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    slots: Vec<Option<Item>>,
}

impl Inventory {
    /// Create an empty inventory with `size` slots
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![None; size],
        }
    }

    /// Create an empty player inventory
    pub fn player() -> Self {
        Self::new(PLAYER_SLOTS)
    }

    /// Wrap existing slot contents
    pub fn from_slots(slots: Vec<Option<Item>>) -> Self {
        Self { slots }
    }

    /// Get total slot count
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Get current number of occupied slots
    pub fn count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Index of the first empty slot
    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Put an item in the first empty slot, handing it back if there is none
    pub fn add_item(&mut self, item: Item) -> Result<usize, Item> {
        match self.first_empty() {
            Some(index) => {
                self.slots[index] = Some(item);
                Ok(index)
            }
            None => Err(item),
        }
    }

    /// Get all slots
    pub fn slots(&self) -> &[Option<Item>] {
        &self.slots
    }

    /// Total amount of a material across all slots
    pub fn total_of(&self, material: super::Material) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|i| i.material == material)
            .map(|i| i.amount)
            .sum()
    }

    /// View restricted to `range`
    pub fn window(&mut self, range: Range<usize>) -> SlotWindow<'_, Self> {
        SlotWindow::new(self, range)
    }
}

impl Slots for Inventory {
    fn len(&self) -> usize {
        self.slots.len()
    }

    fn get(&self, index: usize) -> Option<&Item> {
        Slots::get(&self.slots, index)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut Item> {
        Slots::get_mut(&mut self.slots, index)
    }

    fn set(&mut self, index: usize, item: Option<Item>) {
        Slots::set(&mut self.slots, index, item);
    }
}

/// A contiguous sub-range of another slot range, re-indexed from zero
pub struct SlotWindow<'a, S: Slots + ?Sized> {
    inner: &'a mut S,
    range: Range<usize>,
}

impl<'a, S: Slots + ?Sized> SlotWindow<'a, S> {
    /// The range is clamped to the inner slot count
    pub fn new(inner: &'a mut S, range: Range<usize>) -> Self {
        let end = range.end.min(inner.len());
        let start = range.start.min(end);
        Self {
            inner,
            range: start..end,
        }
    }

    fn map(&self, index: usize) -> Option<usize> {
        let mapped = self.range.start.checked_add(index)?;
        (mapped < self.range.end).then_some(mapped)
    }
}

impl<S: Slots + ?Sized> Slots for SlotWindow<'_, S> {
    fn len(&self) -> usize {
        self.range.len()
    }

    fn get(&self, index: usize) -> Option<&Item> {
        self.map(index).and_then(|i| self.inner.get(i))
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut Item> {
        let mapped = self.map(index)?;
        self.inner.get_mut(mapped)
    }

    fn set(&mut self, index: usize, item: Option<Item>) {
        if let Some(mapped) = self.map(index) {
            self.inner.set(mapped, item);
        }
    }
}
