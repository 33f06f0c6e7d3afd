//! Transaction records and the immutable transaction log

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::catalog::{Category, Product, Region};

/// Round a dollar amount to whole cents
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// One synthetic sale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transaction {
    pub date: NaiveDate,
    pub product: Product,
    pub category: Category,
    pub region: Region,
    pub quantity: u32,
    pub unit_price: f64,
    pub revenue: f64,
}

impl Transaction {
    /// Build a record with the catalog category of `product`
    pub fn new(date: NaiveDate, product: Product, region: Region, quantity: u32, unit_price: f64) -> Self {
        Self::with_category(date, product, product.category(), region, quantity, unit_price)
    }

    /// Build a record under an explicit category
    ///
    /// The unit price is rounded to cents first and revenue is computed from
    /// the rounded price, so `revenue == round_cents(quantity * unit_price)`.
    pub fn with_category(
        date: NaiveDate,
        product: Product,
        category: Category,
        region: Region,
        quantity: u32,
        unit_price: f64,
    ) -> Self {
        let unit_price = round_cents(unit_price);
        Self {
            date,
            product,
            category,
            region,
            quantity,
            unit_price,
            revenue: round_cents(quantity as f64 * unit_price),
        }
    }
}

/// Inclusive `[min, max]` dates present in a log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateBounds {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

/// Ordered, append-free sequence of transactions
///
/// Built once by the generator and shared read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionLog {
    records: Vec<Transaction>,
}

impl TransactionLog {
    pub fn new(records: Vec<Transaction>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Transaction] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.records.iter()
    }

    /// Earliest and latest date, or None for an empty log
    pub fn date_bounds(&self) -> Option<DateBounds> {
        let min = self.records.iter().map(|r| r.date).min()?;
        let max = self.records.iter().map(|r| r.date).max()?;
        Some(DateBounds { min, max })
    }

    /// Distinct categories present, sorted
    pub fn categories(&self) -> BTreeSet<Category> {
        self.records.iter().map(|r| r.category).collect()
    }

    /// Distinct regions present, sorted
    pub fn regions(&self) -> BTreeSet<Region> {
        self.records.iter().map(|r| r.region).collect()
    }

    /// Distinct products present, sorted
    pub fn products(&self) -> BTreeSet<Product> {
        self.records.iter().map(|r| r.product).collect()
    }
}

impl<'a> IntoIterator for &'a TransactionLog {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
