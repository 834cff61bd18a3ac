//! Stackwright - item stack consolidation
//!
//! Merges equivalent item stacks in a slot range up to configurable
//! per-material capacities, tracks every stack it changed so the change can
//! be undone, and guards against using a merged stack of durable items.

pub mod items;
pub mod stacking;
pub mod config;
pub mod save;

// Re-export commonly used types
pub use items::{Inventory, Item, Material, OverflowSink, Slots};
pub use stacking::{ActionKind, CapacityPolicy, ConsolidationReport, GuardVerdict, Stacker};
pub use config::StackerConfig;
