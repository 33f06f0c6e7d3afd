use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use proptest::test_runner::Config;
use sales_analytics::aggregations::{TOP_PRODUCTS_BY_REVENUE, TOP_SELLING_PRODUCTS};
use sales_analytics::catalog::{CATEGORIES, PRODUCTS, REGIONS};
use sales_analytics::model::round_cents;
use sales_analytics::{
    apply_filters, Category, DateWindow, FilterSelection, GeneratorParams, Product, Region,
    TransactionLog,
};
use std::collections::BTreeSet;
use std::sync::OnceLock;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn shared_log() -> &'static TransactionLog {
    static LOG: OnceLock<TransactionLog> = OnceLock::new();
    LOG.get_or_init(|| GeneratorParams::new(42, date(2024, 1, 1), date(2024, 4, 30)).generate())
}

fn subset<T: Copy + Ord>(items: &[T], mask: u8) -> BTreeSet<T> {
    items
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << i) != 0)
        .map(|(_, &item)| item)
        .collect()
}

fn selection_strategy() -> impl Strategy<Value = FilterSelection> {
    (0_u64..120, 0_u64..60, any::<u8>(), 0_u8..32, 0_u8..16).prop_map(
        |(offset, len, product_mask, region_mask, category_mask)| {
            let start = date(2024, 1, 1) + Days::new(offset);
            let end = start + Days::new(len);
            FilterSelection::new(
                DateWindow::new(start, end).unwrap(),
                subset(&CATEGORIES, category_mask),
                subset(&REGIONS, region_mask),
                subset(&PRODUCTS, product_mask),
            )
        },
    )
}

proptest! {
    #![proptest_config(Config::with_cases(64))]

    #[test]
    fn total_revenue_is_sum_of_records(selection in selection_strategy()) {
        let view = apply_filters(shared_log(), &selection);
        let sum: f64 = view.records.iter().map(|r| r.revenue).sum();
        prop_assert_eq!(view.kpis.total_revenue, sum);
        prop_assert_eq!(view.kpis.total_transactions, view.records.len());
    }

    #[test]
    fn record_included_iff_all_predicates_hold(selection in selection_strategy()) {
        let view = apply_filters(shared_log(), &selection);
        let expected: Vec<_> = shared_log()
            .iter()
            .filter(|r| {
                r.date >= selection.start_date()
                    && r.date <= selection.end_date()
                    && selection.categories.contains(&r.category)
                    && selection.regions.contains(&r.region)
                    && selection.products.contains(&r.product)
            })
            .copied()
            .collect();
        prop_assert_eq!(view.records, expected);
    }

    #[test]
    fn previous_window_has_equal_length(selection in selection_strategy()) {
        let view = apply_filters(shared_log(), &selection);
        prop_assert_eq!(view.previous_window.days(), view.window.days());
        prop_assert_eq!(view.previous_window.end() + Days::new(1), view.window.start());
    }

    #[test]
    fn top_lists_are_bounded_and_sorted(selection in selection_strategy()) {
        let agg = apply_filters(shared_log(), &selection).aggregations;
        prop_assert!(agg.top_products.len() <= TOP_PRODUCTS_BY_REVENUE);
        prop_assert!(agg.top_selling_products.len() <= TOP_SELLING_PRODUCTS);
        prop_assert!(agg.top_selling_products.windows(2).all(|w| w[0].revenue >= w[1].revenue));
        prop_assert!(agg.region_revenue.windows(2).all(|w| w[0].revenue >= w[1].revenue));
    }
}

#[test]
fn test_generation_is_deterministic() {
    let params = GeneratorParams::default();
    assert_eq!(params.start_date, date(2024, 1, 1));
    assert_eq!(params.end_date, date(2024, 11, 24));

    let first = params.generate();
    let second = params.generate();
    assert_eq!(first.len(), second.len());
    assert_eq!(first, second);
}

#[test]
fn test_revenue_identity() {
    for r in shared_log() {
        assert_eq!(r.revenue, round_cents(r.quantity as f64 * r.unit_price));
    }
}

#[test]
fn test_empty_value_sets_yield_zero_kpis() {
    let log = shared_log();
    let full = FilterSelection::all_of(log).unwrap();

    let mut no_categories = full.clone();
    no_categories.categories.clear();
    let mut no_regions = full.clone();
    no_regions.regions.clear();
    let mut no_products = full;
    no_products.products.clear();

    for selection in [no_categories, no_regions, no_products] {
        let view = apply_filters(log, &selection);
        assert!(view.records.is_empty());
        assert_eq!(view.kpis.total_revenue, 0.0);
        assert_eq!(view.kpis.total_transactions, 0);
        assert_eq!(view.kpis.avg_transaction, 0.0);
        assert_eq!(view.kpis.total_quantity, 0);
        assert_eq!(view.kpis.growth_rate, 0.0);
    }
}

#[test]
fn test_full_log_defaults() {
    let log = shared_log();
    let selection = FilterSelection::all_of(log).unwrap();
    assert_eq!(selection.categories.len(), 4);
    assert_eq!(selection.regions.len(), 5);
    assert_eq!(selection.products.len(), 8);

    let view = apply_filters(log, &selection);
    assert_eq!(view.records.len(), log.len());
    assert_eq!(view.aggregations.daily_revenue.len(), 121);
}

#[test]
fn test_growth_against_generated_previous_month() {
    let log = shared_log();
    let selection = FilterSelection::all_of(log)
        .unwrap()
        .with_window(DateWindow::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap());
    let view = apply_filters(log, &selection);

    assert_eq!(view.previous_window.start(), date(2024, 1, 30));
    assert_eq!(view.previous_window.end(), date(2024, 2, 29));
    assert!(view.kpis.previous_revenue > 0.0);
    let expected =
        (view.kpis.total_revenue - view.kpis.previous_revenue) / view.kpis.previous_revenue * 100.0;
    assert!((view.kpis.growth_rate - expected).abs() < 1e-9);
}

#[test]
fn test_category_filter_implies_product_category() {
    let log = shared_log();
    let mut selection = FilterSelection::all_of(log).unwrap();
    selection.categories = [Category::Audio].into();
    let view = apply_filters(log, &selection);

    assert!(!view.records.is_empty());
    assert!(view
        .records
        .iter()
        .all(|r| matches!(r.product, Product::Headphones | Product::Webcam)));
    assert_eq!(view.aggregations.category_revenue.len(), 1);
    assert_eq!(view.aggregations.category_revenue[0].category, Category::Audio);
    assert!(view.aggregations.top_products.len() <= 2);
}

#[test]
fn test_region_totals_cover_filtered_revenue() {
    let log = shared_log();
    let mut selection = FilterSelection::all_of(log).unwrap();
    selection.regions = [Region::Europe, Region::Asia].into();
    let view = apply_filters(log, &selection);

    let region_total: f64 = view.aggregations.region_revenue.iter().map(|r| r.revenue).sum();
    assert!((region_total - view.kpis.total_revenue).abs() < 1e-6);
    assert!(view.aggregations.top_regions.len() <= 2);
}
