//! Configuration for the sales dashboard

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sales_analytics::{
    Category, DateWindow, FilterSelection, GeneratorParams, Product, Region, TransactionLog,
};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;

// =============================================================================
// File-based Configuration (config.toml)
// =============================================================================

/// Configuration loaded from config.toml
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub filters: FilterConfig,
}

/// Synthetic dataset section
#[derive(Debug, Default, Deserialize)]
pub struct GeneratorConfig {
    pub seed: Option<u64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Default filter selection; anything left out selects everything
#[derive(Debug, Default, Deserialize)]
pub struct FilterConfig {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub categories: Option<Vec<Category>>,
    pub regions: Option<Vec<Region>>,
    pub products: Option<Vec<Product>>,
}

impl FileConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content).with_context(|| {
            format!(
                "Failed to parse {}. Check for:\n\
                 - Dates not in YYYY-MM-DD format\n\
                 - Unknown category, region or product names\n\
                 - Invalid TOML syntax (missing quotes, brackets, etc.)",
                path.display()
            )
        })
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Command-line values that take precedence over the config file
#[derive(Debug, Default)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub categories: Vec<Category>,
    pub regions: Vec<Region>,
    pub products: Vec<Product>,
}

/// Resolved configuration
pub struct Config {
    /// Inputs for the synthetic log
    pub params: GeneratorParams,
    /// Requested filters; None means "everything in the log"
    pub filters: FilterRequest,
}

/// Filter values requested before the log is known
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FilterRequest {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub categories: Option<BTreeSet<Category>>,
    pub regions: Option<BTreeSet<Region>>,
    pub products: Option<BTreeSet<Product>>,
}

/// Empty CLI list falls back to the config file value
fn pick<T: Ord + Copy>(cli: &[T], file: Option<&Vec<T>>) -> Option<BTreeSet<T>> {
    if !cli.is_empty() {
        Some(cli.iter().copied().collect())
    } else {
        file.map(|values| values.iter().copied().collect())
    }
}

impl Config {
    /// Merge file config with CLI overrides
    pub fn from_file(file_config: &FileConfig, overrides: &Overrides) -> Result<Self> {
        let defaults = GeneratorParams::default();
        let generator = &file_config.generator;

        let params = GeneratorParams {
            seed: overrides.seed.or(generator.seed).unwrap_or(defaults.seed),
            start_date: generator.start_date.unwrap_or(defaults.start_date),
            end_date: generator.end_date.unwrap_or(defaults.end_date),
            ..defaults
        };
        DateWindow::new(params.start_date, params.end_date)
            .context("Invalid [generator] date range")?;

        let filters = &file_config.filters;
        Ok(Self {
            params,
            filters: FilterRequest {
                start_date: overrides.start_date.or(filters.start_date),
                end_date: overrides.end_date.or(filters.end_date),
                categories: pick(&overrides.categories, filters.categories.as_ref()),
                regions: pick(&overrides.regions, filters.regions.as_ref()),
                products: pick(&overrides.products, filters.products.as_ref()),
            },
        })
    }
}

impl FilterRequest {
    /// Build a concrete selection against the generated log
    ///
    /// Missing values default to the whole log, and the date range is clamped
    /// to the dates the log actually covers. A range sharing no day with the
    /// log is an error.
    pub fn resolve(&self, log: &TransactionLog) -> Result<FilterSelection> {
        let Some(base) = FilterSelection::all_of(log) else {
            anyhow::bail!("The generated sales log is empty; check the [generator] date range");
        };
        let bounds = log
            .date_bounds()
            .context("Sales log has no date bounds")?;

        let start = self.start_date.unwrap_or(base.start_date());
        let end = self.end_date.unwrap_or(base.end_date());
        let window = DateWindow::new(start, end)
            .context("Invalid filter date range")?
            .clamp_to(&bounds)
            .context("Requested dates fall outside the generated log")?;

        let mut selection = base.with_window(window);
        if let Some(categories) = &self.categories {
            selection.categories = categories.clone();
        }
        if let Some(regions) = &self.regions {
            selection.regions = regions.clone();
        }
        if let Some(products) = &self.products {
            selection.products = products.clone();
        }
        Ok(selection)
    }
}
