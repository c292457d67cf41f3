use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::constants::SECONDS_PER_DAY;
use crate::error::ModelError;

/// Validated keep-alive extension, in whole days.
///
/// Zero and negative values are rejected at construction so the persistence
/// layer only ever sees forward-moving proposals. Values above
/// [`ExtendDays::MAX_DAYS`] are rejected too, which keeps the
/// seconds arithmetic downstream safely inside `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64")]
#[serde(into = "i64")]
pub struct ExtendDays(i64);

impl ExtendDays {
    /// Largest accepted extension: 100 years is already far beyond any
    /// sensible keep-alive window.
    pub const MAX_DAYS: i64 = 36_500;

    /// Creates a new `ExtendDays`, rejecting zero, negative and
    /// out-of-range input.
    ///
    /// # Examples
    /// ```
    /// use warden_model::ExtendDays;
    ///
    /// let days = ExtendDays::new(3).unwrap();
    /// assert_eq!(days.value(), 3);
    ///
    /// assert!(ExtendDays::new(0).is_err());
    /// assert!(ExtendDays::new(-1).is_err());
    /// assert!(ExtendDays::new(40_000).is_err());
    /// ```
    pub fn new(days: i64) -> Result<Self, ModelError> {
        Self::try_from(days)
    }

    /// Returns the raw number of days.
    #[inline]
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Returns the extension expressed in whole seconds.
    pub fn as_seconds(&self) -> i64 {
        self.0 * SECONDS_PER_DAY
    }
}

impl fmt::Display for ExtendDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for ExtendDays {
    type Error = ModelError;
    fn try_from(days: i64) -> Result<Self, Self::Error> {
        if days <= 0 || days > Self::MAX_DAYS {
            return Err(ModelError::InvalidDuration(days));
        }
        Ok(ExtendDays(days))
    }
}

impl From<ExtendDays> for i64 {
    fn from(d: ExtendDays) -> Self {
        d.0
    }
}
