//! # StackSim Core
//!
//! The bounded LIFO container, the numeric value type, the error taxonomy and
//! domain events for the StackSim simulator. Every other crate depends inward
//! on this one; nothing here knows about terminals, configuration files or
//! rendering.
//!
//! ## Layers
//!
//! - [`stack`]: the fixed-capacity container and its snapshot export
//! - [`value`]: the element type and user input parsing
//! - [`error`]: overflow, underflow, capacity and input errors
//! - [`event`]: broadcast of session events for logging and observers

pub mod error;
pub mod event;
pub mod stack;
pub mod value;

// Re-export key types at crate root for ergonomics
pub use error::{Error, ErrorKind, InputError, Result, StackError};
pub use event::{DomainEvent, EventBus};
pub use stack::BoundedStack;
pub use value::{Value, ValueSign, parse_value};
