//! Stacking engine
//!
//! Ties the pieces together: one consolidation pass snapshots a slot range
//! and the active policy, groups, redistributes and writes back. The policy
//! table is the only shared state and is replaced wholesale on reload.

use std::sync::Arc;

use super::error::StackError;
use super::guard::{self, ActionKind, GuardVerdict};
use super::marker;
use super::policy::{CapacityPolicy, SharedPolicy};
use super::redistribute::{group_slots, place, redistribute};
use crate::config::StackerConfig;
use crate::items::{Item, OverflowSink, Slots};

/// Summary of one consolidation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsolidationReport {
    /// Output groups produced, one per equivalence class present
    pub groups: usize,
    /// Groups whose slots or capacity changed
    pub changed_groups: usize,
    /// Stacks written back into the range
    pub stacks: usize,
    /// Stacks handed to the overflow sink
    pub overflowed: usize,
}

impl ConsolidationReport {
    /// Whether the pass left the range exactly as it found it
    pub fn is_noop(&self) -> bool {
        self.changed_groups == 0 && self.overflowed == 0
    }
}

/// The consolidation engine
#[derive(Debug, Default)]
pub struct Stacker {
    policy: SharedPolicy,
}

impl Stacker {
    pub fn new(policy: CapacityPolicy) -> Self {
        Self {
            policy: SharedPolicy::new(policy),
        }
    }

    /// Build an engine from the rules of a loaded config
    pub fn from_config(config: &StackerConfig) -> Self {
        Self::new(config.policy())
    }

    /// Snapshot of the active policy
    pub fn policy(&self) -> Arc<CapacityPolicy> {
        self.policy.load()
    }

    /// Replace the active policy with one built from `entries`.
    /// Passes already running keep the table they started with.
    pub fn reload<I, S>(&self, entries: I) -> Arc<CapacityPolicy>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: AsRef<str>,
    {
        self.policy.replace(CapacityPolicy::from_entries(entries));
        let active = self.policy.load();
        log::info!("Reloaded stack policy ({} rules)", active.len());
        active
    }

    /// Merge every equivalence class in `slots` into the fewest stacks the
    /// policy allows. Stacks that no longer fit go to `overflow`.
    pub fn consolidate<S, O>(&self, slots: &mut S, overflow: &mut O) -> ConsolidationReport
    where
        S: Slots + ?Sized,
        O: OverflowSink + ?Sized,
    {
        let policy = self.policy.load();

        let groups = group_slots(&*slots);
        let group_count = groups.len();
        let outputs = redistribute(groups, |material| policy.capacity_of(material));
        let placement = place(slots, outputs);

        let report = ConsolidationReport {
            groups: group_count,
            changed_groups: placement.changed_groups,
            stacks: placement.written,
            overflowed: placement.overflow.len(),
        };
        for item in placement.overflow {
            log::warn!("No room for {} x{}; handing to overflow", item.material, item.amount);
            overflow.accept(item);
        }

        log::debug!(
            "Consolidated {} group(s) into {} stack(s), {} changed, {} overflowed",
            report.groups,
            report.stacks,
            report.changed_groups,
            report.overflowed
        );
        report
    }

    /// Consolidate the interior of a container item in place
    pub fn consolidate_contents<O>(
        &self,
        container: &mut Item,
        overflow: &mut O,
    ) -> Result<ConsolidationReport, StackError>
    where
        O: OverflowSink + ?Sized,
    {
        if !container.is_container() {
            return Err(StackError::NotContainer(container.material));
        }
        let material = container.material;
        let contents = container
            .meta
            .contents
            .as_mut()
            .ok_or(StackError::MalformedContainer(material))?;

        Ok(self.consolidate(contents, overflow))
    }

    /// Reset every engine-marked item in `slots` (and inside any container
    /// contents) to its baseline capacity. Returns how many were reset.
    pub fn reverse<S: Slots + ?Sized>(&self, slots: &mut S) -> usize {
        let mut reset = 0;
        for index in 0..slots.len() {
            if let Some(item) = slots.get_mut(index) {
                reset += reverse_item(item);
            }
        }
        log::debug!("Reset {} stacked item(s)", reset);
        reset
    }

    /// Whether the host may carry out `action` with `item`
    pub fn guard_check(
        &self,
        item: Option<&Item>,
        action: ActionKind,
        target_is_container: bool,
    ) -> GuardVerdict {
        guard::guard_check(item, action, target_is_container)
    }
}

fn reverse_item(item: &mut Item) -> usize {
    let mut reset = usize::from(marker::reset_capacity(item));
    if let Some(contents) = item.meta.contents.as_mut() {
        for inner in contents.iter_mut().flatten() {
            reset += reverse_item(inner);
        }
    }
    reset
}
