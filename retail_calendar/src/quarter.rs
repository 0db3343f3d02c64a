//! Quarterly calendar arithmetic
//!
//! Forecast periods are calendar quarters. A quarter is turned into a single
//! date through a [`QuarterAnchor`], which must match the convention the
//! predictors were fitted with. The anchor is always configured, never guessed
//! from the data.

use crate::{CalendarError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar quarter, e.g. 2023Q2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Quarter {
    year: i32,
    number: u32,
}

/// Which day of a quarter represents it as a timestamp
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuarterAnchor {
    /// First day of the quarter (1 Jan, 1 Apr, 1 Jul, 1 Oct)
    #[default]
    Start,
    /// Last day of the quarter (31 Mar, 30 Jun, 30 Sep, 31 Dec)
    ///
    /// The first date after a quarter-start observation is the end of that
    /// same quarter, so the last observed quarter is forecast again.
    End,
}

impl Quarter {
    /// Create a quarter from a year and a quarter number in 1..=4
    pub fn new(year: i32, number: u32) -> Result<Self> {
        if !(1..=4).contains(&number) {
            return Err(CalendarError::InvalidInput(format!(
                "Quarter number must be between 1 and 4, got {}",
                number
            )));
        }

        Ok(Self { year, number })
    }

    /// The quarter a date falls in
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            number: (date.month0() / 3) + 1,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    /// The following quarter
    pub fn next(&self) -> Result<Self> {
        if self.number < 4 {
            return Ok(Self {
                year: self.year,
                number: self.number + 1,
            });
        }

        let year = self.year.checked_add(1).ok_or_else(|| {
            CalendarError::OutOfRange(format!("No quarter after {}", self))
        })?;

        Ok(Self { year, number: 1 })
    }

    /// First day of the quarter
    pub fn start(&self) -> Result<NaiveDate> {
        let month = (self.number - 1) * 3 + 1;
        NaiveDate::from_ymd_opt(self.year, month, 1)
            .ok_or_else(|| CalendarError::OutOfRange(format!("{} has no start date", self)))
    }

    /// Last day of the quarter
    pub fn end(&self) -> Result<NaiveDate> {
        let (month, day) = match self.number {
            1 => (3, 31),
            2 => (6, 30),
            3 => (9, 30),
            _ => (12, 31),
        };
        NaiveDate::from_ymd_opt(self.year, month, day)
            .ok_or_else(|| CalendarError::OutOfRange(format!("{} has no end date", self)))
    }

    /// The date representing this quarter under the given anchor
    pub fn date(&self, anchor: QuarterAnchor) -> Result<NaiveDate> {
        match anchor {
            QuarterAnchor::Start => self.start(),
            QuarterAnchor::End => self.end(),
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Q{}", self.year, self.number)
    }
}

impl QuarterAnchor {
    /// The first quarter whose anchored date is strictly after `date`
    pub fn first_quarter_after(&self, date: NaiveDate) -> Result<Quarter> {
        let current = Quarter::containing(date);
        match self {
            // The start of the current quarter is never after `date`
            QuarterAnchor::Start => current.next(),
            QuarterAnchor::End => {
                if date < current.end()? {
                    Ok(current)
                } else {
                    current.next()
                }
            }
        }
    }

    /// `count` consecutive anchored quarter dates, the first strictly after `date`
    pub fn dates_after(&self, date: NaiveDate, count: usize) -> Result<Vec<NaiveDate>> {
        let mut dates = Vec::with_capacity(count);
        if count == 0 {
            return Ok(dates);
        }

        let mut quarter = self.first_quarter_after(date)?;
        dates.push(quarter.date(*self)?);
        for _ in 1..count {
            quarter = quarter.next()?;
            dates.push(quarter.date(*self)?);
        }

        Ok(dates)
    }
}

impl fmt::Display for QuarterAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuarterAnchor::Start => write!(f, "start"),
            QuarterAnchor::End => write!(f, "end"),
        }
    }
}
