//! Capacity policy
//!
//! Maps materials to the stack size the engine should consolidate them to.
//! Entries are validated once at load; invalid ones are logged and skipped so
//! a single bad line never prevents the rest of the table from loading.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::error::PolicyRejection;
use crate::items::Material;

/// Smallest configurable stack size
pub const MIN_STACK_SIZE: u32 = 1;
/// Largest configurable stack size
pub const MAX_STACK_SIZE: u32 = 99;

/// Validated material -> target stack size table
#[derive(Debug, Clone, Default)]
pub struct CapacityPolicy {
    targets: HashMap<Material, u32>,
    rejections: Vec<PolicyRejection>,
}

impl CapacityPolicy {
    /// Policy with no configured targets; every material keeps its default
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a policy from `(type name, target)` pairs, in order.
    /// A later entry for the same material replaces an earlier one.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: AsRef<str>,
    {
        let mut policy = Self::default();
        let mut skipped_damageable = 0usize;
        let mut invalid = 0usize;

        for (name, target) in entries {
            match validate_entry(name.as_ref(), target) {
                Ok((material, size)) => {
                    policy.targets.insert(material, size);
                }
                Err(rejection) => {
                    log::debug!("Skipping stack rule: {}", rejection);
                    match rejection {
                        PolicyRejection::PerUseState { .. } => skipped_damageable += 1,
                        _ => invalid += 1,
                    }
                    policy.rejections.push(rejection);
                }
            }
        }

        log::info!(
            "Loaded {} stack rules, skipped {} damageable, {} invalid",
            policy.targets.len(),
            skipped_damageable,
            invalid
        );
        policy
    }

    /// Configured target for a material, if any
    pub fn resolve(&self, material: Material) -> Option<u32> {
        self.targets.get(&material).copied()
    }

    /// Parse a type name and resolve it
    pub fn resolve_name(&self, name: &str) -> Option<u32> {
        Material::match_name(name).and_then(|m| self.resolve(m))
    }

    /// Configured target, falling back to the material's intrinsic default
    pub fn capacity_of(&self, material: Material) -> u32 {
        self.resolve(material)
            .unwrap_or_else(|| material.max_stack_size())
    }

    /// Number of accepted rules
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Entries skipped during load
    pub fn rejections(&self) -> &[PolicyRejection] {
        &self.rejections
    }

    /// Accepted rules, sorted by material
    pub fn targets(&self) -> Vec<(Material, u32)> {
        let mut rules: Vec<_> = self.targets.iter().map(|(m, t)| (*m, *t)).collect();
        rules.sort();
        rules
    }
}

/// Check a single policy entry against the domain rules
pub fn validate_entry(name: &str, target: i64) -> Result<(Material, u32), PolicyRejection> {
    let material = Material::match_name(name).ok_or_else(|| PolicyRejection::UnknownType {
        name: name.to_string(),
    })?;

    if target < MIN_STACK_SIZE as i64 || target > MAX_STACK_SIZE as i64 {
        return Err(PolicyRejection::OutOfRange { material, target });
    }

    if material.is_damageable() && target > 1 {
        return Err(PolicyRejection::PerUseState { material, target });
    }

    Ok((material, target as u32))
}

/// Policy table shared between callers and replaced wholesale on reload
#[derive(Debug, Default)]
pub struct SharedPolicy {
    current: RwLock<Arc<CapacityPolicy>>,
}

impl SharedPolicy {
    pub fn new(policy: CapacityPolicy) -> Self {
        Self {
            current: RwLock::new(Arc::new(policy)),
        }
    }

    /// Snapshot of the active table
    pub fn load(&self) -> Arc<CapacityPolicy> {
        Arc::clone(&*self.current.read())
    }

    /// Swap in a fully built table
    pub fn replace(&self, policy: CapacityPolicy) -> Arc<CapacityPolicy> {
        let next = Arc::new(policy);
        let mut guard = self.current.write();
        std::mem::replace(&mut *guard, next)
    }
}
