//! Filter selection and date windows

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::catalog::{Category, Product, Region};
use crate::error::{Result, SalesError};
use crate::model::{DateBounds, Transaction, TransactionLog};

/// Inclusive range of calendar days, `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WindowFields")]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

/// Unchecked serde shape, validated through `DateWindow::new`
#[derive(Deserialize)]
struct WindowFields {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<WindowFields> for DateWindow {
    type Error = SalesError;

    fn try_from(fields: WindowFields) -> Result<Self> {
        Self::new(fields.start, fields.end)
    }
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(SalesError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn single_day(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Length in days, counting both ends
    pub fn days(&self) -> u64 {
        self.end.signed_duration_since(self.start).num_days().unsigned_abs() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Window of equal length ending the day before `start`
    pub fn previous(&self) -> Self {
        let end = self.start - Days::new(1);
        let start = self.start - Days::new(self.days());
        Self { start, end }
    }

    /// Clamp to the given bounds
    ///
    /// Fails when the window and the bounds share no day.
    pub fn clamp_to(&self, bounds: &DateBounds) -> Result<Self> {
        if self.end < bounds.min || self.start > bounds.max {
            return Err(SalesError::OutsideLog {
                start: self.start,
                end: self.end,
                min: bounds.min,
                max: bounds.max,
            });
        }
        Ok(Self {
            start: self.start.max(bounds.min),
            end: self.end.min(bounds.max),
        })
    }
}

/// User-selected filter values
///
/// Empty value sets match nothing, they do not mean "all".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    window: DateWindow,
    pub categories: BTreeSet<Category>,
    pub regions: BTreeSet<Region>,
    pub products: BTreeSet<Product>,
}

impl FilterSelection {
    pub fn new(
        window: DateWindow,
        categories: BTreeSet<Category>,
        regions: BTreeSet<Region>,
        products: BTreeSet<Product>,
    ) -> Self {
        Self {
            window,
            categories,
            regions,
            products,
        }
    }

    /// Selection covering the whole log: full date range, every value present
    ///
    /// Returns None for an empty log (there is no date range to select).
    pub fn all_of(log: &TransactionLog) -> Option<Self> {
        let bounds = log.date_bounds()?;
        Some(Self {
            window: DateWindow {
                start: bounds.min,
                end: bounds.max,
            },
            categories: log.categories(),
            regions: log.regions(),
            products: log.products(),
        })
    }

    pub fn window(&self) -> DateWindow {
        self.window
    }

    pub fn start_date(&self) -> NaiveDate {
        self.window.start
    }

    pub fn end_date(&self) -> NaiveDate {
        self.window.end
    }

    /// Replace the date window, keeping the value filters
    pub fn with_window(mut self, window: DateWindow) -> Self {
        self.window = window;
        self
    }

    /// True when category, region and product are all selected
    ///
    /// Ignores the date window; the previous period reuses these filters.
    pub fn matches_values(&self, record: &Transaction) -> bool {
        self.categories.contains(&record.category)
            && self.regions.contains(&record.region)
            && self.products.contains(&record.product)
    }

    /// True when the record passes every predicate for the selected window
    pub fn matches(&self, record: &Transaction) -> bool {
        self.window.contains(record.date) && self.matches_values(record)
    }

    /// The comparison window immediately before the selection
    pub fn previous_window(&self) -> DateWindow {
        self.window.previous()
    }
}
