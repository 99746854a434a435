//! Session launcher.
//!
//! Chooses the stack capacity and optional seed data, builds the stack and
//! hands it to a [`Presenter`]. Seeding is the launcher's only contract with
//! the stack: values are pushed in order until they run out or the stack
//! overflows.

use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stacksim_config::{AppConfig, CAPACITY_RANGE, InitialDataMode, RANDOM_COUNT_RANGE};
use stacksim_core::{BoundedStack, DomainEvent, EventBus, StackError, Value};
use stacksim_presenter::{Presenter, RefreshTiming};

/// What the stack holds when the session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialData {
    Empty,
    Random { count: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOptions {
    pub capacity: u32,
    pub initial_data: InitialData,
    pub value_range: RangeInclusive<i32>,
    /// Fixed RNG seed; fresh entropy when `None`
    pub rng_seed: Option<u64>,
    pub timing: RefreshTiming,
}

impl LaunchOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        let launcher = &config.launcher;
        let initial_data = match launcher.initial_data {
            InitialDataMode::Empty => InitialData::Empty,
            InitialDataMode::Random => InitialData::Random {
                count: launcher.random_count,
            },
        };

        let timing = if config.display.animate {
            RefreshTiming::new(
                Duration::from_millis(config.display.push_delay_ms),
                Duration::from_millis(config.display.pop_delay_ms),
            )
        } else {
            RefreshTiming::immediate()
        };

        Self {
            capacity: launcher.capacity,
            initial_data,
            value_range: launcher.value_min..=launcher.value_max,
            rng_seed: launcher.seed,
            timing,
        }
    }

    /// Check the bounds the launcher surface enforces.
    pub fn validate(&self) -> Result<(), LaunchError> {
        if !CAPACITY_RANGE.contains(&self.capacity) {
            return Err(LaunchError::OutOfRange {
                field: "capacity",
                value: i64::from(self.capacity),
                range: CAPACITY_RANGE,
            });
        }

        if let InitialData::Random { count } = self.initial_data
            && !RANDOM_COUNT_RANGE.contains(&count)
        {
            return Err(LaunchError::OutOfRange {
                field: "random count",
                value: i64::from(count),
                range: RANDOM_COUNT_RANGE,
            });
        }

        if self.value_range.is_empty() {
            return Err(LaunchError::EmptyValueRange {
                min: *self.value_range.start(),
                max: *self.value_range.end(),
            });
        }

        Ok(())
    }
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("{field} must be between {} and {} (got {value})", .range.start(), .range.end())]
    OutOfRange {
        field: &'static str,
        value: i64,
        range: RangeInclusive<u32>,
    },

    #[error("Value range is empty: {min}..={max}")]
    EmptyValueRange { min: i32, max: i32 },

    #[error("Stack construction failed: {0}")]
    Stack(#[from] StackError),
}

/// `count` integers drawn uniformly from `range`, as stack values.
///
/// An empty range yields no values.
pub fn seed_values<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    range: RangeInclusive<i32>,
) -> Vec<Value> {
    if range.is_empty() {
        return Vec::new();
    }
    (0..count)
        .map(|_| Value::from(rng.random_range(range.clone())))
        .collect()
}

/// Push `values` in order, stopping quietly at the first overflow.
///
/// Returns how many values were loaded.
pub fn bulk_load<I>(stack: &mut BoundedStack, values: I) -> usize
where
    I: IntoIterator<Item = Value>,
{
    let mut loaded = 0;
    for value in values {
        if stack.push(value).is_err() {
            tracing::debug!(loaded, capacity = stack.capacity(), "Seeding stopped at full stack");
            break;
        }
        loaded += 1;
    }
    loaded
}

/// Build the stack described by `options` and hand it to a presenter.
pub fn launch(options: &LaunchOptions) -> Result<Presenter, LaunchError> {
    launch_with_events(options, None)
}

/// Like [`launch`], publishing `SessionStarted` and later events on `events`.
pub fn launch_with_events(
    options: &LaunchOptions,
    events: Option<Arc<EventBus>>,
) -> Result<Presenter, LaunchError> {
    options.validate()?;

    let mut stack = BoundedStack::new(i64::from(options.capacity))?;

    let seeded = match options.initial_data {
        InitialData::Empty => 0,
        InitialData::Random { count } => {
            let wanted = count.min(options.capacity) as usize;
            let range = options.value_range.clone();
            let values = match options.rng_seed {
                Some(seed) => seed_values(&mut StdRng::seed_from_u64(seed), wanted, range),
                None => seed_values(&mut rand::rng(), wanted, range),
            };
            bulk_load(&mut stack, values)
        }
    };

    tracing::info!(
        capacity = options.capacity,
        seeded,
        "Launching stack simulator"
    );

    let mut presenter = Presenter::new(stack, options.timing);
    if let Some(bus) = events {
        bus.publish(DomainEvent::SessionStarted {
            capacity: presenter.stack().capacity(),
            seeded,
            timestamp: Utc::now(),
        });
        presenter = presenter.with_events(bus);
    }

    Ok(presenter)
}
