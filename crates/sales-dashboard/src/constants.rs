//! Centralized constants for the sales dashboard

// =============================================================================
// Configuration
// =============================================================================

/// Default config file path
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable holding the log filter (e.g. "debug", "sales_analytics=trace")
pub const LOG_ENV: &str = "SALES_DASHBOARD_LOG";

/// Default rows shown by the `records` command
pub const DEFAULT_RECORD_LIMIT: usize = 20;

// =============================================================================
// File Names
// =============================================================================

/// Filtered transactions, newest first
pub const SALES_DETAIL_FILENAME: &str = "sales_detail.csv";

/// Revenue per day
pub const DAILY_REVENUE_FILENAME: &str = "daily_revenue.csv";

/// Revenue per category
pub const CATEGORY_REVENUE_FILENAME: &str = "category_revenue.csv";

/// Revenue per region
pub const REGION_REVENUE_FILENAME: &str = "region_revenue.csv";

/// Top products by revenue
pub const TOP_PRODUCTS_FILENAME: &str = "top_products.csv";

/// Best-selling products with quantity
pub const TOP_SELLING_PRODUCTS_FILENAME: &str = "top_selling_products.csv";

/// Top regions with quantity
pub const TOP_REGIONS_FILENAME: &str = "top_regions.csv";
