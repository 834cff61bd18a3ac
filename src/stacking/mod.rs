//! Stack consolidation engine

pub mod engine;
pub mod error;
pub mod guard;
pub mod key;
pub mod marker;
pub mod policy;
pub mod redistribute;

pub use engine::{ConsolidationReport, Stacker};
pub use error::{PolicyRejection, StackError};
pub use guard::{guard_check, ActionKind, GuardVerdict, UseCategory, BLOCKED_MESSAGE};
pub use key::{can_stack, stack_key, StackKey};
pub use marker::{has_marker, MARKER_KEY};
pub use policy::{CapacityPolicy, SharedPolicy, MAX_STACK_SIZE, MIN_STACK_SIZE};
