//! Local calendar date index.
//!
//! Daily content (quests, the daily challenge) rotates on the user's local
//! calendar date, not UTC. All rotation logic takes a [`DateIndex`] argument
//! so tests supply dates directly instead of mocking the wall clock;
//! [`DateIndex::today_local`] is the only place that touches the clock.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of whole days between the Unix epoch and a local calendar date.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DateIndex(i64);

impl DateIndex {
    /// Creates a date index from a raw day count.
    #[must_use]
    pub const fn new(days: i64) -> Self {
        Self(days)
    }

    /// Returns today's index in the local timezone.
    #[must_use]
    pub fn today_local() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// Converts a calendar date to its index.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        // Days from 0001-01-01 (CE) to 1970-01-01.
        const EPOCH_FROM_CE: i64 = 719_163;
        Self(i64::from(date.num_days_from_ce()) - EPOCH_FROM_CE)
    }

    /// Returns the raw day count.
    #[must_use]
    pub const fn days(self) -> i64 {
        self.0
    }

    /// Returns the index as an RNG seed.
    #[must_use]
    pub const fn seed(self) -> u64 {
        self.0 as u64
    }

    /// Returns the index of the following day.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}
