//! Item system

pub mod material;
pub mod item;
pub mod inventory;

pub use material::{Material, ToolFamily};
pub use item::{Item, ItemMeta, TagValue};
pub use inventory::{Inventory, OverflowSink, SlotWindow, Slots, PLAYER_SLOTS, STORAGE_SLOTS};
