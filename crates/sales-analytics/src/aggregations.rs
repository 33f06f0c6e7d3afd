//! Grouped revenue tables for charts and top-N listings

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::catalog::{Category, Product, Region};
use crate::model::Transaction;

/// Entries kept in the product revenue chart
pub const TOP_PRODUCTS_BY_REVENUE: usize = 8;

/// Entries kept in the best-selling products table
pub const TOP_SELLING_PRODUCTS: usize = 5;

/// Entries kept in the top regions table
pub const TOP_REGIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryRevenue {
    pub category: Category,
    pub revenue: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegionRevenue {
    pub region: Region,
    pub revenue: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductRevenue {
    pub product: Product,
    pub revenue: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductSales {
    pub product: Product,
    pub quantity: u64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegionSales {
    pub region: Region,
    pub revenue: f64,
    pub quantity: u64,
}

/// Every grouped table derived from one filtered record set
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregations {
    /// Chronological
    pub daily_revenue: Vec<DailyRevenue>,
    /// Category name order
    pub category_revenue: Vec<CategoryRevenue>,
    /// Descending by revenue
    pub region_revenue: Vec<RegionRevenue>,
    /// Descending by revenue, at most [`TOP_PRODUCTS_BY_REVENUE`]
    pub top_products: Vec<ProductRevenue>,
    /// Descending by revenue, at most [`TOP_SELLING_PRODUCTS`]
    pub top_selling_products: Vec<ProductSales>,
    /// Descending by revenue, at most [`TOP_REGIONS`]
    pub top_regions: Vec<RegionSales>,
}

impl Aggregations {
    pub fn compute(records: &[Transaction]) -> Self {
        let by_product = totals_by(records, |r| r.product);
        let by_region = totals_by(records, |r| r.region);

        let mut region_revenue: Vec<_> = by_region
            .iter()
            .map(|(&region, t)| RegionRevenue {
                region,
                revenue: t.revenue,
            })
            .collect();
        sort_desc(&mut region_revenue, |r| r.revenue);

        let mut top_products: Vec<_> = by_product
            .iter()
            .map(|(&product, t)| ProductRevenue {
                product,
                revenue: t.revenue,
            })
            .collect();
        sort_desc(&mut top_products, |p| p.revenue);
        top_products.truncate(TOP_PRODUCTS_BY_REVENUE);

        let mut top_selling_products: Vec<_> = by_product
            .iter()
            .map(|(&product, t)| ProductSales {
                product,
                quantity: t.quantity,
                revenue: t.revenue,
            })
            .collect();
        sort_desc(&mut top_selling_products, |p| p.revenue);
        top_selling_products.truncate(TOP_SELLING_PRODUCTS);

        let mut top_regions: Vec<_> = by_region
            .iter()
            .map(|(&region, t)| RegionSales {
                region,
                revenue: t.revenue,
                quantity: t.quantity,
            })
            .collect();
        sort_desc(&mut top_regions, |r| r.revenue);
        top_regions.truncate(TOP_REGIONS);

        Self {
            daily_revenue: totals_by(records, |r| r.date)
                .into_iter()
                .map(|(date, t)| DailyRevenue {
                    date,
                    revenue: t.revenue,
                })
                .collect(),
            category_revenue: totals_by(records, |r| r.category)
                .into_iter()
                .map(|(category, t)| CategoryRevenue {
                    category,
                    revenue: t.revenue,
                })
                .collect(),
            region_revenue,
            top_products,
            top_selling_products,
            top_regions,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    revenue: f64,
    quantity: u64,
}

/// Sum revenue and quantity per key, in key order
fn totals_by<K, F>(records: &[Transaction], key: F) -> BTreeMap<K, Totals>
where
    K: Ord,
    F: Fn(&Transaction) -> K,
{
    let mut totals: BTreeMap<K, Totals> = BTreeMap::new();
    for record in records {
        let entry = totals.entry(key(record)).or_default();
        entry.revenue += record.revenue;
        entry.quantity += record.quantity as u64;
    }
    totals
}

/// Stable descending sort; equal values keep key order
fn sort_desc<T, F>(rows: &mut [T], value: F)
where
    F: Fn(&T) -> f64,
{
    rows.sort_by(|a, b| value(b).total_cmp(&value(a)));
}
