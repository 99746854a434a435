//! Render model built from a stack snapshot.
//!
//! A [`StackView`] is plain owned data: once built it no longer refers to the
//! stack, so a deferred redraw shows exactly the state it was built from.

use serde::Serialize;
use stacksim_core::{BoundedStack, Value, ValueSign};

use crate::controls::ControlState;
use crate::status::Feedback;

/// Fill fraction below which the gauge is in the normal band.
pub const ELEVATED_THRESHOLD: f64 = 0.7;

/// Fill fraction from which the gauge is critical.
pub const CRITICAL_THRESHOLD: f64 = 0.9;

/// One row of the rendered column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellRow {
    Live {
        index: usize,
        value: Value,
        sign: ValueSign,
        is_top: bool,
    },
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GaugeBand {
    Normal,
    Elevated,
    Critical,
}

impl GaugeBand {
    pub fn for_fraction(fraction: f64) -> Self {
        if fraction < ELEVATED_THRESHOLD {
            Self::Normal
        } else if fraction < CRITICAL_THRESHOLD {
            Self::Elevated
        } else {
            Self::Critical
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacityGauge {
    pub used: usize,
    pub capacity: usize,
    pub fraction: f64,
    pub band: GaugeBand,
}

impl CapacityGauge {
    pub fn new(used: usize, capacity: usize) -> Self {
        let fraction = if capacity == 0 {
            0.0
        } else {
            used as f64 / capacity as f64
        };
        Self {
            used,
            capacity,
            fraction,
            band: GaugeBand::for_fraction(fraction),
        }
    }

    pub fn label(&self) -> String {
        format!("Capacity: {} | Used: {}", self.capacity, self.used)
    }
}

/// The "Stack Information" side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InfoPanel {
    pub maximum_size: usize,
    pub current_size: usize,
    pub is_empty: bool,
    pub is_full: bool,
}

/// Everything needed to draw the simulator once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackView {
    pub capacity: usize,
    pub size: usize,
    /// Top of the screen first: empty placeholders, then live cells from the
    /// topmost element down to index 0.
    pub rows: Vec<CellRow>,
    pub gauge: CapacityGauge,
    pub info: InfoPanel,
    pub controls: ControlState,
    pub status: Feedback,
    pub last_operation: Option<Feedback>,
}

impl StackView {
    pub fn build(
        stack: &BoundedStack,
        status: &Feedback,
        last_operation: Option<&Feedback>,
    ) -> Self {
        let values = stack.snapshot();
        let capacity = stack.capacity();
        let size = values.len();

        let mut rows = Vec::with_capacity(capacity);
        rows.extend(std::iter::repeat_n(CellRow::Empty, capacity - size));
        rows.extend(values.iter().enumerate().rev().map(|(index, &value)| CellRow::Live {
            index,
            value,
            sign: ValueSign::of(value),
            is_top: index + 1 == size,
        }));

        Self {
            capacity,
            size,
            rows,
            gauge: CapacityGauge::new(size, capacity),
            info: InfoPanel {
                maximum_size: capacity,
                current_size: size,
                is_empty: stack.is_empty(),
                is_full: stack.is_full(),
            },
            controls: ControlState::for_stack(stack),
            status: status.clone(),
            last_operation: last_operation.cloned(),
        }
    }

    /// Live values bottom to top, as stored.
    pub fn values(&self) -> Vec<Value> {
        let mut values: Vec<Value> = self
            .rows
            .iter()
            .filter_map(|row| match row {
                CellRow::Live { value, .. } => Some(*value),
                CellRow::Empty => None,
            })
            .collect();
        values.reverse();
        values
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
