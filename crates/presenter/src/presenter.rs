//! The presenter: command dispatch and feedback.
//!
//! Owns the current stack. Every command goes through [`Presenter::dispatch`],
//! which runs the stack operation, classifies the result, and hands back what
//! the surface needs to redraw. Failures are reported, never fatal.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use stacksim_core::{
    BoundedStack, DomainEvent, Error, ErrorKind, EventBus, StackError, Value, parse_value,
};

use crate::command::Command;
use crate::controls::ControlState;
use crate::status::{Alert, Feedback, StatusKind};
use crate::view::StackView;

const INVALID_INPUT_STATUS: &str = "Invalid input. Enter numbers only.";

/// Redraw delays per command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTiming {
    pub push: Duration,
    pub pop: Duration,
}

impl RefreshTiming {
    pub fn new(push: Duration, pop: Duration) -> Self {
        Self { push, pop }
    }

    /// Redraw immediately after every command.
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    fn for_command(&self, command: &Command) -> Duration {
        match command {
            Command::Push(_) => self.push,
            Command::Pop => self.pop,
            _ => Duration::ZERO,
        }
    }
}

impl Default for RefreshTiming {
    fn default() -> Self {
        Self::new(Duration::from_millis(100), Duration::from_millis(300))
    }
}

/// Redraw instruction produced by a dispatch.
///
/// `view` is already built from the updated stack; `delay` only says when to
/// show it.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshRequest {
    pub delay: Duration,
    pub view: StackView,
}

/// Everything the surface needs after one command.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub feedback: Feedback,
    pub last_operation: Option<Feedback>,
    pub alert: Option<Alert>,
    pub controls: ControlState,
    pub refresh: RefreshRequest,
}

/// Result of running one command before the shared bookkeeping.
enum Step {
    Done {
        status: Feedback,
        last_operation: Feedback,
    },
    Rejected {
        status: Feedback,
        alert: Alert,
        kind: ErrorKind,
    },
}

pub struct Presenter {
    stack: BoundedStack,
    status: Feedback,
    last_operation: Option<Feedback>,
    timing: RefreshTiming,
    events: Option<Arc<EventBus>>,
}

impl Presenter {
    pub fn new(stack: BoundedStack, timing: RefreshTiming) -> Self {
        Self {
            stack,
            status: Feedback::info("Ready"),
            last_operation: None,
            timing,
            events: None,
        }
    }

    /// Publish a [`DomainEvent`] after every dispatch.
    pub fn with_events(mut self, events: Arc<EventBus>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn stack(&self) -> &BoundedStack {
        &self.stack
    }

    pub fn status(&self) -> &Feedback {
        &self.status
    }

    pub fn last_operation(&self) -> Option<&Feedback> {
        self.last_operation.as_ref()
    }

    pub fn controls(&self) -> ControlState {
        ControlState::for_stack(&self.stack)
    }

    pub fn view(&self) -> StackView {
        StackView::build(&self.stack, &self.status, self.last_operation.as_ref())
    }

    pub fn dispatch(&mut self, command: Command) -> Outcome {
        let verb = command.verb();
        let delay = self.timing.for_command(&command);

        let alert = match self.apply(&command) {
            Step::Done {
                status,
                last_operation,
            } => {
                tracing::debug!(command = verb, size = self.stack.size(), "{}", status.message);
                self.publish(|timestamp| DomainEvent::OperationApplied {
                    operation: verb.to_string(),
                    status: status.kind.as_str().to_string(),
                    size: self.stack.size(),
                    timestamp,
                });
                self.status = status;
                self.last_operation = Some(last_operation);
                None
            }
            Step::Rejected {
                status,
                alert,
                kind,
            } => {
                tracing::warn!(command = verb, error_kind = %kind, "{}", alert.message);
                self.publish(|timestamp| DomainEvent::OperationRejected {
                    operation: verb.to_string(),
                    error_kind: kind,
                    message: alert.message.clone(),
                    timestamp,
                });
                self.status = status;
                Some(alert)
            }
        };

        Outcome {
            feedback: self.status.clone(),
            last_operation: self.last_operation.clone(),
            alert,
            controls: self.controls(),
            refresh: RefreshRequest {
                delay,
                view: self.view(),
            },
        }
    }

    fn apply(&mut self, command: &Command) -> Step {
        match command {
            Command::Push(input) => self.push(input),
            Command::Pop => match self.stack.pop() {
                Ok(value) => Step::Done {
                    status: Feedback::success(format!("Popped: {value}")),
                    last_operation: Feedback::success(format!(
                        "Popped: {value} | Stack Size: {}",
                        self.stack.size()
                    )),
                },
                Err(e) => stack_rejection("Stack Underflow", e),
            },
            Command::Peek => match self.stack.peek() {
                Ok(value) => Step::Done {
                    status: Feedback::info(format!("Top element: {value}")),
                    last_operation: Feedback::info(format!("Peek: {value} | No change")),
                },
                Err(e) => stack_rejection("Stack Empty", e),
            },
            Command::Size => {
                let size = self.stack.size();
                Step::Done {
                    status: Feedback::info(format!("Stack size: {size}")),
                    last_operation: Feedback::info(format!("Size: {size} | No change")),
                }
            }
            Command::IsEmpty => {
                let empty = self.stack.is_empty();
                Step::Done {
                    status: Feedback::info(format!("Stack is empty: {empty}")),
                    last_operation: Feedback::info(format!(
                        "Is Empty: {} | No change",
                        if empty { "Yes" } else { "No" }
                    )),
                }
            }
            Command::Clear => self.clear(),
        }
    }

    fn push(&mut self, input: &str) -> Step {
        match self.try_push(input) {
            Ok(value) => Step::Done {
                status: Feedback::success(format!("Pushed: {value}")),
                last_operation: Feedback::success(format!(
                    "Pushed: {value} | Stack Size: {}",
                    self.stack.size()
                )),
            },
            Err(Error::Input(e)) => Step::Rejected {
                status: Feedback::warning(INVALID_INPUT_STATUS),
                kind: e.kind(),
                alert: Alert::warning("Invalid Input", e.to_string()),
            },
            Err(Error::Stack(e)) => stack_rejection("Stack Overflow", e),
        }
    }

    fn try_push(&mut self, input: &str) -> stacksim_core::Result<Value> {
        let value = parse_value(input)?;
        self.stack.push(value)?;
        Ok(value)
    }

    /// Replace the stack with a fresh one of the same capacity.
    fn clear(&mut self) -> Step {
        let capacity = self.stack.capacity();
        let fresh = i64::try_from(capacity)
            .map_err(|_| StackError::InvalidCapacity(i64::MAX))
            .and_then(BoundedStack::new);

        match fresh {
            Ok(stack) => {
                self.stack = stack;
                self.publish(|timestamp| DomainEvent::StackCleared {
                    capacity,
                    timestamp,
                });
                Step::Done {
                    status: Feedback::warning("Stack cleared"),
                    last_operation: Feedback::warning("Stack cleared | Stack Size: 0"),
                }
            }
            Err(e) => stack_rejection("Clear Failed", e),
        }
    }

    fn publish<F>(&self, event: F)
    where
        F: FnOnce(chrono::DateTime<Utc>) -> DomainEvent,
    {
        if let Some(bus) = &self.events {
            bus.publish(event(Utc::now()));
        }
    }
}

fn stack_rejection(title: &str, error: StackError) -> Step {
    let message = error.to_string();
    Step::Rejected {
        status: Feedback::new(StatusKind::Error, message.clone()),
        kind: error.kind(),
        alert: Alert::error(title, message),
    }
}
