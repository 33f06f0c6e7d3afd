//! Fixed product, region and category catalogs
//!
//! The category of a transaction is a pure function of its product, and the
//! unit price range is a pure function of the category. Both lookups live here
//! so the generator and the pipeline agree on them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SalesError;

// =============================================================================
// Products
// =============================================================================

/// Product sold in a transaction
///
/// Variants are declared in name order so that `Ord` matches the sorted
/// option lists shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Product {
    Headphones,
    Keyboard,
    Laptop,
    Monitor,
    Mouse,
    Smartphone,
    Tablet,
    Webcam,
}

/// Product catalog in draw order
pub const PRODUCTS: [Product; 8] = [
    Product::Laptop,
    Product::Smartphone,
    Product::Tablet,
    Product::Headphones,
    Product::Monitor,
    Product::Keyboard,
    Product::Mouse,
    Product::Webcam,
];

impl Product {
    pub fn name(&self) -> &'static str {
        match self {
            Product::Headphones => "Headphones",
            Product::Keyboard => "Keyboard",
            Product::Laptop => "Laptop",
            Product::Monitor => "Monitor",
            Product::Mouse => "Mouse",
            Product::Smartphone => "Smartphone",
            Product::Tablet => "Tablet",
            Product::Webcam => "Webcam",
        }
    }

    /// Category this product is sold under
    pub fn category(&self) -> Category {
        category_of(*self)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Product {
    type Err = SalesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PRODUCTS
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SalesError::UnknownProduct(s.to_string()))
    }
}

impl TryFrom<String> for Product {
    type Error = SalesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// =============================================================================
// Regions
// =============================================================================

/// Sales region
///
/// Parses from text (CLI flags and config files) through `FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Region {
    Africa,
    Asia,
    Europe,
    #[serde(rename = "North America")]
    NorthAmerica,
    #[serde(rename = "South America")]
    SouthAmerica,
}

/// Region catalog in draw order
pub const REGIONS: [Region; 5] = [
    Region::NorthAmerica,
    Region::Europe,
    Region::Asia,
    Region::SouthAmerica,
    Region::Africa,
];

impl Region {
    pub fn name(&self) -> &'static str {
        match self {
            Region::Africa => "Africa",
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::NorthAmerica => "North America",
            Region::SouthAmerica => "South America",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Region {
    type Err = SalesError;

    /// Accepts the display name, case-insensitive ("north america")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        REGIONS
            .iter()
            .copied()
            .find(|r| r.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SalesError::UnknownRegion(s.to_string()))
    }
}

impl TryFrom<String> for Region {
    type Error = SalesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// =============================================================================
// Categories
// =============================================================================

/// Product category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Category {
    Accessories,
    Audio,
    Computers,
    Electronics,
}

/// Every category, in name order
pub const CATEGORIES: [Category; 4] = [
    Category::Accessories,
    Category::Audio,
    Category::Computers,
    Category::Electronics,
];

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Category::Accessories => "Accessories",
            Category::Audio => "Audio",
            Category::Computers => "Computers",
            Category::Electronics => "Electronics",
        }
    }

    /// Unit price range for products in this category
    pub fn price_range(&self) -> PriceRange {
        price_range_of(*self)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Category {
    type Err = SalesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATEGORIES
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SalesError::UnknownCategory(s.to_string()))
    }
}

impl TryFrom<String> for Category {
    type Error = SalesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// =============================================================================
// Lookups
// =============================================================================

/// Half-open unit price range `[low, high)` in dollars
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub low: f64,
    pub high: f64,
}

impl PriceRange {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.low && price < self.high
    }
}

/// Fixed product -> category lookup
pub fn category_of(product: Product) -> Category {
    match product {
        Product::Laptop | Product::Monitor => Category::Computers,
        Product::Smartphone | Product::Tablet => Category::Electronics,
        Product::Headphones | Product::Webcam => Category::Audio,
        Product::Keyboard | Product::Mouse => Category::Accessories,
    }
}

/// Fixed category -> unit price range lookup
pub fn price_range_of(category: Category) -> PriceRange {
    match category {
        Category::Computers => PriceRange::new(500.0, 2000.0),
        Category::Electronics => PriceRange::new(300.0, 1200.0),
        Category::Audio => PriceRange::new(50.0, 400.0),
        Category::Accessories => PriceRange::new(20.0, 150.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_lookup() {
        assert_eq!(category_of(Product::Laptop), Category::Computers);
        assert_eq!(category_of(Product::Monitor), Category::Computers);
        assert_eq!(category_of(Product::Tablet), Category::Electronics);
        assert_eq!(category_of(Product::Webcam), Category::Audio);
        assert_eq!(category_of(Product::Mouse), Category::Accessories);
    }

    #[test]
    fn test_every_category_has_products() {
        for category in CATEGORIES {
            let count = PRODUCTS.iter().filter(|p| p.category() == category).count();
            assert_eq!(count, 2, "{} should have two products", category);
        }
    }

    #[test]
    fn test_parse_names_case_insensitive() {
        assert_eq!("north america".parse::<Region>().unwrap(), Region::NorthAmerica);
        assert_eq!(" Laptop ".parse::<Product>().unwrap(), Product::Laptop);
        assert_eq!("AUDIO".parse::<Category>().unwrap(), Category::Audio);
    }

    #[test]
    fn test_parse_unknown_name() {
        let err = "Antarctica".parse::<Region>().unwrap_err();
        assert!(matches!(err, SalesError::UnknownRegion(ref s) if s == "Antarctica"));
        assert!("Printer".parse::<Product>().is_err());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Region::SouthAmerica.to_string(), "South America");
        assert_eq!(Product::Smartphone.to_string(), "Smartphone");
        assert_eq!(Category::Electronics.to_string(), "Electronics");
    }

    #[test]
    fn test_serde_uses_display_names() {
        let regions: Vec<Region> = serde_json::from_str(r#"["europe", "north america"]"#).unwrap();
        assert_eq!(regions, vec![Region::Europe, Region::NorthAmerica]);
        assert_eq!(
            serde_json::to_string(&Region::NorthAmerica).unwrap(),
            r#""North America""#
        );
        assert!(serde_json::from_str::<Category>(r#""Toys""#).is_err());
    }

    #[test]
    fn test_price_range_contains() {
        let range = price_range_of(Category::Accessories);
        assert!(range.contains(20.0));
        assert!(range.contains(149.99));
        assert!(!range.contains(150.0));
    }
}
