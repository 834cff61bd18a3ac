//! Error types for the stacking engine

use thiserror::Error;

use crate::items::Material;

/// Why a capacity policy entry was skipped at load time
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyRejection {
    #[error("unknown material: {name}")]
    UnknownType { name: String },

    #[error("invalid stack size {target} for {material} (must be 1..99)")]
    OutOfRange { material: Material, target: i64 },

    #[error("damageable item {material} cannot stack to {target}; merged items cannot track durability")]
    PerUseState { material: Material, target: i64 },
}

impl PolicyRejection {
    /// Whether the entry named a real material but broke a domain rule
    pub fn is_configuration_rejected(&self) -> bool {
        !matches!(self, PolicyRejection::UnknownType { .. })
    }
}

/// Failures of operations that require a specific kind of item
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    #[error("{0} is not a container")]
    NotContainer(Material),

    #[error("{0} has no readable contents")]
    MalformedContainer(Material),
}
