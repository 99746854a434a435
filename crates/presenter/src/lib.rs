//! # StackSim Presenter
//!
//! Turns user gestures into stack operations and the stack back into
//! something a person can look at.
//!
//! The [`Presenter`] owns the current [`BoundedStack`](stacksim_core::BoundedStack).
//! Each dispatched [`Command`] yields an [`Outcome`]: a status line, an
//! optional alert, the recomputed [`ControlState`] and a [`RefreshRequest`]
//! carrying the [`StackView`] to draw. [`TextRenderer`] turns views and
//! alerts into terminal text.

pub mod command;
pub mod controls;
pub mod presenter;
pub mod render;
pub mod status;
pub mod view;

pub use command::{Command, CommandParseError};
pub use controls::ControlState;
pub use presenter::{Outcome, Presenter, RefreshRequest, RefreshTiming};
pub use render::TextRenderer;
pub use status::{Alert, AlertSeverity, Feedback, StatusKind};
pub use view::{CapacityGauge, CellRow, GaugeBand, InfoPanel, StackView};
