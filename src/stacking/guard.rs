//! Usage guard
//!
//! A merged stack of durable or single-use items cannot track per-unit state,
//! so any action that would use one of them out of a stack is refused. The
//! player has to take one item out first. Opening a container is never
//! refused, whatever the player is holding.

use serde::{Deserialize, Serialize};

use crate::items::Item;

/// Reason shown to the player when an action is refused
pub const BLOCKED_MESSAGE: &str = "You must take one item out of the stack and use that!";

/// Interaction reported by the host
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ActionKind {
    LeftClickBlock,
    LeftClickAir,
    RightClickBlock,
    RightClickAir,
    BlockBreak,
    MeleeAttack,
    ItemDamage,
    Consume,
}

/// Ways an action can invoke an item's primary use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UseCategory {
    ToolUse,
    Consume,
    MeleeDamage,
    ItemDamage,
}

/// Guard decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardVerdict {
    Allow,
    Block,
}

impl GuardVerdict {
    pub fn is_blocked(&self) -> bool {
        matches!(self, GuardVerdict::Block)
    }

    /// Message the host should surface, if any
    pub fn message(&self) -> Option<&'static str> {
        self.is_blocked().then_some(BLOCKED_MESSAGE)
    }
}

impl ActionKind {
    pub fn is_right_click(&self) -> bool {
        matches!(self, ActionKind::RightClickBlock | ActionKind::RightClickAir)
    }

    pub fn is_left_click(&self) -> bool {
        matches!(self, ActionKind::LeftClickBlock | ActionKind::LeftClickAir)
    }

    /// Whether this action opens the container it targets
    pub fn opens_container(&self, target_is_container: bool) -> bool {
        *self == ActionKind::RightClickBlock && target_is_container
    }

    /// Which primary use, if any, this action would invoke on `item`
    pub fn primary_use(&self, item: &Item) -> Option<UseCategory> {
        let material = item.material;

        if item.has_per_use_state() {
            let category = match self {
                a if a.is_left_click() && material.uses_durability_on_left_click() => {
                    Some(UseCategory::ToolUse)
                }
                a if a.is_right_click() && material.uses_durability_on_right_click() => {
                    Some(UseCategory::ToolUse)
                }
                ActionKind::BlockBreak => Some(UseCategory::ToolUse),
                ActionKind::MeleeAttack => Some(UseCategory::MeleeDamage),
                ActionKind::ItemDamage => Some(UseCategory::ItemDamage),
                _ => None,
            };
            if category.is_some() {
                return category;
            }
        }

        if material.is_consumable() && (self.is_right_click() || *self == ActionKind::Consume) {
            return Some(UseCategory::Consume);
        }

        None
    }
}

/// Whether `action` would use up or damage part of a merged stack
pub fn would_consume_or_damage(item: &Item, action: ActionKind, target_is_container: bool) -> bool {
    if action.opens_container(target_is_container) {
        return false;
    }
    if item.amount <= 1 {
        return false;
    }
    if !item.has_per_use_state() && !item.material.is_consumable() {
        return false;
    }
    action.primary_use(item).is_some()
}

/// Decide whether the host may go ahead with an action
pub fn guard_check(item: Option<&Item>, action: ActionKind, target_is_container: bool) -> GuardVerdict {
    match item {
        Some(item) if would_consume_or_damage(item, action, target_is_container) => {
            log::debug!(
                "Blocked {} with stacked {} x{}",
                action,
                item.material,
                item.amount
            );
            GuardVerdict::Block
        }
        _ => GuardVerdict::Allow,
    }
}
