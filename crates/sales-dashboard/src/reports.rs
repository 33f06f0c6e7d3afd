//! Report generation (CSV outputs and console summary)

use anyhow::Result;
use csv::Writer;
use sales_analytics::format::{format_count, format_currency, format_percent, normalize_zero};
use sales_analytics::{Aggregations, DateWindow, FilterSelection, FilteredView, Kpis, TransactionLog};
use serde::Serialize;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::info;

use crate::constants;

/// Generate every CSV report, returning the written paths
pub fn generate_all_reports(output_dir: &Path, view: &FilteredView) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;

    let paths = vec![
        generate_sales_detail(output_dir, view)?,
        generate_daily_revenue(output_dir, view)?,
        generate_category_revenue(output_dir, view)?,
        generate_region_revenue(output_dir, view)?,
        generate_top_products(output_dir, view)?,
        generate_top_selling_products(output_dir, view)?,
        generate_top_regions(output_dir, view)?,
    ];

    for path in &paths {
        println!("  Generated: {}", path.display());
    }
    info!(files = paths.len(), dir = %output_dir.display(), "exported reports");

    Ok(paths)
}

fn money(value: f64) -> String {
    format!("{:.2}", normalize_zero(value))
}

/// Generate sales_detail.csv (newest first)
fn generate_sales_detail(output_dir: &Path, view: &FilteredView) -> Result<PathBuf> {
    let path = output_dir.join(constants::SALES_DETAIL_FILENAME);
    let mut wtr = Writer::from_path(&path)?;

    wtr.write_record([
        "Date",
        "Product",
        "Category",
        "Region",
        "Quantity",
        "Unit_Price",
        "Revenue",
    ])?;

    for r in view.detail_records() {
        let date = r.date.format("%Y-%m-%d").to_string();
        wtr.write_record([
            date.as_str(),
            r.product.name(),
            r.category.name(),
            r.region.name(),
            &r.quantity.to_string(),
            &money(r.unit_price),
            &money(r.revenue),
        ])?;
    }

    wtr.flush()?;
    Ok(path)
}

/// Generate daily_revenue.csv (chronological)
fn generate_daily_revenue(output_dir: &Path, view: &FilteredView) -> Result<PathBuf> {
    let path = output_dir.join(constants::DAILY_REVENUE_FILENAME);
    let mut wtr = Writer::from_path(&path)?;

    wtr.write_record(["Date", "Revenue"])?;
    for day in &view.aggregations.daily_revenue {
        wtr.write_record([day.date.format("%Y-%m-%d").to_string(), money(day.revenue)])?;
    }

    wtr.flush()?;
    Ok(path)
}

/// Generate category_revenue.csv
fn generate_category_revenue(output_dir: &Path, view: &FilteredView) -> Result<PathBuf> {
    let path = output_dir.join(constants::CATEGORY_REVENUE_FILENAME);
    let mut wtr = Writer::from_path(&path)?;

    wtr.write_record(["Category", "Revenue"])?;
    for row in &view.aggregations.category_revenue {
        wtr.write_record([row.category.name().to_string(), money(row.revenue)])?;
    }

    wtr.flush()?;
    Ok(path)
}

/// Generate region_revenue.csv (descending)
fn generate_region_revenue(output_dir: &Path, view: &FilteredView) -> Result<PathBuf> {
    let path = output_dir.join(constants::REGION_REVENUE_FILENAME);
    let mut wtr = Writer::from_path(&path)?;

    wtr.write_record(["Region", "Revenue"])?;
    for row in &view.aggregations.region_revenue {
        wtr.write_record([row.region.name().to_string(), money(row.revenue)])?;
    }

    wtr.flush()?;
    Ok(path)
}

/// Generate top_products.csv (top products by revenue)
fn generate_top_products(output_dir: &Path, view: &FilteredView) -> Result<PathBuf> {
    let path = output_dir.join(constants::TOP_PRODUCTS_FILENAME);
    let mut wtr = Writer::from_path(&path)?;

    wtr.write_record(["Product", "Revenue"])?;
    for row in &view.aggregations.top_products {
        wtr.write_record([row.product.name().to_string(), money(row.revenue)])?;
    }

    wtr.flush()?;
    Ok(path)
}

/// Generate top_selling_products.csv
fn generate_top_selling_products(output_dir: &Path, view: &FilteredView) -> Result<PathBuf> {
    let path = output_dir.join(constants::TOP_SELLING_PRODUCTS_FILENAME);
    let mut wtr = Writer::from_path(&path)?;

    wtr.write_record(["Product", "Quantity", "Revenue"])?;
    for row in &view.aggregations.top_selling_products {
        wtr.write_record([
            row.product.name().to_string(),
            row.quantity.to_string(),
            money(row.revenue),
        ])?;
    }

    wtr.flush()?;
    Ok(path)
}

/// Generate top_regions.csv
fn generate_top_regions(output_dir: &Path, view: &FilteredView) -> Result<PathBuf> {
    let path = output_dir.join(constants::TOP_REGIONS_FILENAME);
    let mut wtr = Writer::from_path(&path)?;

    wtr.write_record(["Region", "Revenue", "Quantity"])?;
    for row in &view.aggregations.top_regions {
        wtr.write_record([
            row.region.name().to_string(),
            money(row.revenue),
            row.quantity.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(path)
}

// =============================================================================
// Console output
// =============================================================================

#[derive(Tabled)]
struct ShareRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Revenue")]
    revenue: String,
    #[tabled(rename = "Share")]
    share: String,
}

#[derive(Tabled)]
struct ProductSalesRow {
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Revenue")]
    revenue: String,
}

#[derive(Tabled)]
struct RegionSalesRow {
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Revenue")]
    revenue: String,
    #[tabled(rename = "Quantity")]
    quantity: String,
}

#[derive(Tabled)]
struct DetailRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Quantity")]
    quantity: u32,
    #[tabled(rename = "Unit Price")]
    unit_price: String,
    #[tabled(rename = "Revenue")]
    revenue: String,
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Rows with each entry's share of `total`
fn share_rows<'a, K: Display + 'a>(
    entries: impl Iterator<Item = (&'a K, f64)>,
    total: f64,
) -> Vec<ShareRow> {
    entries
        .map(|(name, revenue)| ShareRow {
            name: name.to_string(),
            revenue: format_currency(revenue),
            share: if total > 0.0 {
                format_percent(revenue / total * 100.0)
            } else {
                format_percent(0.0)
            },
        })
        .collect()
}

fn join_names<T: Display>(values: impl IntoIterator<Item = T>) -> String {
    let names: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}

/// Machine-readable summary for `summary --json`
#[derive(Serialize)]
pub struct SummaryJson<'a> {
    pub selection: &'a FilterSelection,
    pub previous_window: DateWindow,
    pub kpis: &'a Kpis,
    pub aggregations: &'a Aggregations,
}

pub fn summary_json(view: &FilteredView, selection: &FilterSelection) -> Result<String> {
    let summary = SummaryJson {
        selection,
        previous_window: view.previous_window,
        kpis: &view.kpis,
        aggregations: &view.aggregations,
    };
    Ok(serde_json::to_string_pretty(&summary)?)
}

/// Print KPIs and grouped tables to the console
pub fn print_summary(view: &FilteredView, selection: &FilterSelection) {
    let kpis = &view.kpis;

    println!("\n============================================================");
    println!(
        "          SALES SUMMARY ({} to {})",
        view.window.start(), view.window.end()
    );
    println!("============================================================\n");

    println!("FILTERS:");
    println!("  Categories:  {}", join_names(&selection.categories));
    println!("  Regions:     {}", join_names(&selection.regions));
    println!("  Products:    {}", join_names(&selection.products));

    println!("\nKEY METRICS:");
    println!(
        "  Total Revenue:          {:>16}",
        format_currency(kpis.total_revenue)
    );
    println!(
        "  Total Transactions:     {:>16}",
        format_count(kpis.total_transactions as u64)
    );
    println!(
        "  Avg Transaction Value:  {:>16}",
        format_currency(kpis.avg_transaction)
    );
    println!(
        "  Units Sold:             {:>16}",
        format_count(kpis.total_quantity)
    );
    println!(
        "  Revenue Growth:         {:>16}",
        format_percent(kpis.growth_rate)
    );
    println!(
        "    vs. {} to {}: {}",
        view.previous_window.start(),
        view.previous_window.end(),
        format_currency(kpis.previous_revenue)
    );

    if view.is_empty() {
        println!("\nNo transactions match the current filters.");
        println!("============================================================");
        return;
    }

    let agg = &view.aggregations;

    println!("\nREVENUE OVER TIME:");
    let peak = agg
        .daily_revenue
        .iter()
        .max_by(|a, b| a.revenue.total_cmp(&b.revenue));
    let low = agg
        .daily_revenue
        .iter()
        .min_by(|a, b| a.revenue.total_cmp(&b.revenue));
    println!("  Days with sales:  {}", agg.daily_revenue.len());
    if let (Some(peak), Some(low)) = (peak, low) {
        println!("  Best day:         {} {}", peak.date, format_currency(peak.revenue));
        println!("  Slowest day:      {} {}", low.date, format_currency(low.revenue));
    }

    println!("\nREVENUE BY CATEGORY:");
    println!(
        "{}",
        render(share_rows(
            agg.category_revenue.iter().map(|c| (&c.category, c.revenue)),
            kpis.total_revenue,
        ))
    );

    println!("\nREVENUE BY REGION:");
    println!(
        "{}",
        render(share_rows(
            agg.region_revenue.iter().map(|r| (&r.region, r.revenue)),
            kpis.total_revenue,
        ))
    );

    println!("\nTOP PRODUCTS BY REVENUE:");
    println!(
        "{}",
        render(share_rows(
            agg.top_products.iter().map(|p| (&p.product, p.revenue)),
            kpis.total_revenue,
        ))
    );

    println!("\nTOP {} BEST SELLING PRODUCTS:", agg.top_selling_products.len());
    println!(
        "{}",
        render(
            agg.top_selling_products
                .iter()
                .map(|p| ProductSalesRow {
                    product: p.product.to_string(),
                    quantity: format_count(p.quantity),
                    revenue: format_currency(p.revenue),
                })
                .collect()
        )
    );

    println!("\nTOP {} REGIONS BY PERFORMANCE:", agg.top_regions.len());
    println!(
        "{}",
        render(
            agg.top_regions
                .iter()
                .map(|r| RegionSalesRow {
                    region: r.region.to_string(),
                    revenue: format_currency(r.revenue),
                    quantity: format_count(r.quantity),
                })
                .collect()
        )
    );

    println!("============================================================");
}

/// Print the detail table, newest first
pub fn print_records(view: &FilteredView, limit: usize) {
    let detail = view.detail_records();
    if detail.is_empty() {
        println!("No transactions match the current filters.");
        return;
    }

    let rows: Vec<DetailRow> = detail
        .iter()
        .take(limit)
        .map(|r| DetailRow {
            date: r.date.format("%Y-%m-%d").to_string(),
            product: r.product.to_string(),
            category: r.category.to_string(),
            region: r.region.to_string(),
            quantity: r.quantity,
            unit_price: format_currency(r.unit_price),
            revenue: format_currency(r.revenue),
        })
        .collect();

    println!("{}", render(rows));
    println!(
        "\nShowing {} of {} transaction(s)",
        limit.min(detail.len()),
        format_count(detail.len() as u64)
    );
}

/// Print the values a selection can be built from
pub fn print_options(log: &TransactionLog) {
    println!("Transactions:  {}", format_count(log.len() as u64));
    match log.date_bounds() {
        Some(bounds) => println!("Date range:    {} to {}", bounds.min, bounds.max),
        None => println!("Date range:    (empty log)"),
    }
    println!("Categories:    {}", join_names(log.categories()));
    println!("Regions:       {}", join_names(log.regions()));
    println!("Products:      {}", join_names(log.products()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sales_analytics::{apply_filters, GeneratorParams};

    fn sample_log() -> TransactionLog {
        GeneratorParams::new(
            42,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(),
        )
        .generate()
    }

    fn view() -> (FilteredView, FilterSelection) {
        let log = sample_log();
        let selection = FilterSelection::all_of(&log).unwrap();
        (apply_filters(&log, &selection), selection)
    }

    fn read_rows(path: &Path) -> (Vec<String>, Vec<csv::StringRecord>) {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        let headers = rdr.headers().unwrap().iter().map(String::from).collect();
        let rows = rdr.records().map(|r| r.unwrap()).collect();
        (headers, rows)
    }

    #[test]
    fn test_generate_all_reports() {
        let dir = tempfile::tempdir().unwrap();
        let (view, _) = view();

        let paths = generate_all_reports(dir.path(), &view).unwrap();
        assert_eq!(paths.len(), 7);
        for path in &paths {
            assert!(path.exists(), "{} missing", path.display());
        }

        let (headers, rows) = read_rows(&dir.path().join(constants::SALES_DETAIL_FILENAME));
        assert_eq!(headers[0], "Date");
        assert_eq!(headers[6], "Revenue");
        assert_eq!(rows.len(), view.records.len());
        assert_eq!(&rows[0][0], "2024-06-14");

        let (_, daily) = read_rows(&dir.path().join(constants::DAILY_REVENUE_FILENAME));
        assert_eq!(daily.len(), 14);
        assert_eq!(&daily[0][0], "2024-06-01");

        let (headers, top) = read_rows(&dir.path().join(constants::TOP_SELLING_PRODUCTS_FILENAME));
        assert_eq!(headers, vec!["Product", "Quantity", "Revenue"]);
        assert!(top.len() <= 5);
    }

    #[test]
    fn test_empty_view_writes_headers() {
        let dir = tempfile::tempdir().unwrap();
        let log = sample_log();
        let mut selection = FilterSelection::all_of(&log).unwrap();
        selection.products.clear();
        let empty = apply_filters(&log, &selection);
        assert!(empty.is_empty());

        generate_all_reports(dir.path(), &empty).unwrap();
        let (headers, rows) = read_rows(&dir.path().join(constants::TOP_REGIONS_FILENAME));
        assert_eq!(headers, vec!["Region", "Revenue", "Quantity"]);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_summary_json() {
        let (view, selection) = view();
        let json = summary_json(&view, &selection).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            value["kpis"]["total_transactions"].as_u64(),
            Some(view.records.len() as u64)
        );
        assert_eq!(value["previous_window"]["end"], "2024-05-31");
        assert!(value["aggregations"]["region_revenue"].is_array());
    }

    #[test]
    fn test_share_rows() {
        let names = ["A".to_string(), "B".to_string()];
        let rows = share_rows(names.iter().zip([75.0, 25.0]), 100.0);
        assert_eq!(rows[0].share, "75.0%");
        assert_eq!(rows[1].revenue, "$25.00");

        let zero = share_rows(names.iter().zip([0.0, 0.0]), 0.0);
        assert_eq!(zero[0].share, "0.0%");
    }

    #[test]
    fn test_join_names() {
        assert_eq!(join_names(Vec::<String>::new()), "(none)");
        assert_eq!(join_names(["x", "y"]), "x, y");
    }
}
