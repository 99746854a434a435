//! Which commands make sense for the current stack.

use serde::{Deserialize, Serialize};
use stacksim_core::BoundedStack;

/// Enable flags for the stateful commands.
///
/// Size, is-empty and clear are always available and carry no flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    pub push_enabled: bool,
    pub pop_enabled: bool,
    pub peek_enabled: bool,
}

impl ControlState {
    pub fn for_stack(stack: &BoundedStack) -> Self {
        Self {
            push_enabled: !stack.is_full(),
            pop_enabled: !stack.is_empty(),
            peek_enabled: !stack.is_empty(),
        }
    }
}
