use crate::domain::model::{DayBatch, TimeWindow};
use crate::utils::error::{ExportError, Result};
use crate::utils::validation::Validate;
use chrono::{Duration, NaiveDate};

pub const DEFAULT_STEP_MINUTES: u64 = 60;
pub const DEFAULT_WINDOW_MINUTES: u64 = 59;
/// 每段開始間隔最多一天，每段長度最多一週
pub const MAX_STEP_MINUTES: u64 = 24 * 60;
pub const MAX_WINDOW_MINUTES: u64 = 7 * 24 * 60;

/// 每天切成固定長度的時段：每 `step` 開一段，每段長 `window`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    step: Duration,
    window: Duration,
}

impl Schedule {
    pub fn new(step: Duration, window: Duration) -> Result<Self> {
        let schedule = Self { step, window };
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn from_minutes(step_minutes: u64, window_minutes: u64) -> Result<Self> {
        let minutes = |field: &str, value: u64| {
            i64::try_from(value)
                .ok()
                .and_then(Duration::try_minutes)
                .ok_or_else(|| ExportError::InvalidConfigValueError {
                    field: field.to_string(),
                    value: value.to_string(),
                    reason: "Value is out of range".to_string(),
                })
        };
        Self::new(
            minutes("step_minutes", step_minutes)?,
            minutes("window_minutes", window_minutes)?,
        )
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Windows for a single day, starting at midnight and stopping before the next one.
    pub fn windows_for(&self, day: NaiveDate) -> Vec<TimeWindow> {
        let start = day.and_time(chrono::NaiveTime::MIN);
        let next_midnight = start + Duration::days(1);

        let mut windows = Vec::new();
        let mut begin = start;
        while begin < next_midnight {
            windows.push(TimeWindow {
                begin,
                end: begin + self.window,
            });
            begin += self.step;
        }
        windows
    }

    /// One batch per calendar day, both ends inclusive. Empty when `last_day < first_day`.
    pub fn day_batches(&self, first_day: NaiveDate, last_day: NaiveDate) -> Vec<DayBatch> {
        first_day
            .iter_days()
            .take_while(|day| *day <= last_day)
            .map(|day| DayBatch {
                day,
                windows: self.windows_for(day),
            })
            .collect()
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            step: Duration::minutes(DEFAULT_STEP_MINUTES as i64),
            window: Duration::minutes(DEFAULT_WINDOW_MINUTES as i64),
        }
    }
}

impl Validate for Schedule {
    fn validate(&self) -> Result<()> {
        if self.step <= Duration::zero() {
            return Err(ExportError::InvalidConfigValueError {
                field: "step".to_string(),
                value: self.step.to_string(),
                reason: "Step between windows must be positive".to_string(),
            });
        }
        if self.step > Duration::minutes(MAX_STEP_MINUTES as i64) {
            return Err(ExportError::InvalidConfigValueError {
                field: "step".to_string(),
                value: self.step.to_string(),
                reason: format!("Step between windows must be at most {} minutes", MAX_STEP_MINUTES),
            });
        }
        if self.window <= Duration::zero() {
            return Err(ExportError::InvalidConfigValueError {
                field: "window".to_string(),
                value: self.window.to_string(),
                reason: "Window length must be positive".to_string(),
            });
        }
        if self.window > Duration::minutes(MAX_WINDOW_MINUTES as i64) {
            return Err(ExportError::InvalidConfigValueError {
                field: "window".to_string(),
                value: self.window.to_string(),
                reason: format!("Window length must be at most {} minutes", MAX_WINDOW_MINUTES),
            });
        }
        Ok(())
    }
}
