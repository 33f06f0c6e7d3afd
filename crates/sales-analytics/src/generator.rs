//! Deterministic synthetic transaction generation
//!
//! Every draw comes from a single `StdRng` seeded once per call, so the same
//! seed and inputs always produce the same log.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::catalog::{self, Category, PriceRange, Product, Region};
use crate::model::{Transaction, TransactionLog};

/// Default seed for the demo dataset
pub const DEFAULT_SEED: u64 = 42;

/// Transactions drawn per day: `[MIN, MAX)`
pub const MIN_DAILY_TRANSACTIONS: u32 = 5;
pub const MAX_DAILY_TRANSACTIONS: u32 = 15;

/// Quantity drawn per transaction: `[MIN, MAX)`
pub const MIN_QUANTITY: u32 = 1;
pub const MAX_QUANTITY: u32 = 10;

/// Inputs that fully determine a generated log
///
/// Also serves as the cache key in [`crate::cache::LogCache`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeneratorParams {
    pub seed: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub products: Vec<Product>,
    pub regions: Vec<Region>,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2024, 11, 24).unwrap_or_default(),
            products: catalog::PRODUCTS.to_vec(),
            regions: catalog::REGIONS.to_vec(),
        }
    }
}

impl GeneratorParams {
    pub fn new(seed: u64, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            seed,
            start_date,
            end_date,
            ..Default::default()
        }
    }

    /// Generate with the fixed catalog lookups
    pub fn generate(&self) -> TransactionLog {
        generate(self, catalog::category_of, catalog::price_range_of)
    }
}

/// Generate one log covering every day in `[start_date, end_date]`
///
/// An inverted date range or an empty product/region catalog yields an
/// empty log.
pub fn generate<C, P>(params: &GeneratorParams, category_of: C, price_range_of: P) -> TransactionLog
where
    C: Fn(Product) -> Category,
    P: Fn(Category) -> PriceRange,
{
    if params.products.is_empty() || params.regions.is_empty() {
        debug!("empty catalog, generating no transactions");
        return TransactionLog::default();
    }

    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut records = Vec::new();

    for date in params.start_date.iter_days().take_while(|d| *d <= params.end_date) {
        let count = rng.gen_range(MIN_DAILY_TRANSACTIONS..MAX_DAILY_TRANSACTIONS);
        for _ in 0..count {
            records.push(draw_transaction(&mut rng, date, params, &category_of, &price_range_of));
        }
    }

    debug!(
        seed = params.seed,
        start = %params.start_date,
        end = %params.end_date,
        transactions = records.len(),
        "generated sales log"
    );

    TransactionLog::new(records)
}

/// Draw order: product, unit price, quantity, region
fn draw_transaction<C, P>(
    rng: &mut StdRng,
    date: NaiveDate,
    params: &GeneratorParams,
    category_of: &C,
    price_range_of: &P,
) -> Transaction
where
    C: Fn(Product) -> Category,
    P: Fn(Category) -> PriceRange,
{
    // Catalogs are checked non-empty by the caller
    let product = params.products.choose(rng).copied().unwrap_or(Product::Laptop);
    let category = category_of(product);

    let range = price_range_of(category);
    let price = if range.low < range.high {
        rng.gen_range(range.low..range.high)
    } else {
        range.low
    };

    let quantity = rng.gen_range(MIN_QUANTITY..MAX_QUANTITY);
    let region = params.regions.choose(rng).copied().unwrap_or(Region::NorthAmerica);

    Transaction::with_category(date, product, category, region, quantity, price)
}
