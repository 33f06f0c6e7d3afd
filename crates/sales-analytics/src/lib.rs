//! Sales analytics core
//!
//! Generates a deterministic synthetic sales log and turns a filter
//! selection into KPIs and grouped revenue tables. Rendering is left to the
//! caller.

pub mod aggregations;
pub mod cache;
pub mod catalog;
pub mod error;
pub mod filters;
pub mod format;
pub mod generator;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod session;

pub use aggregations::Aggregations;
pub use cache::LogCache;
pub use catalog::{Category, Product, Region};
pub use error::{Result, SalesError};
pub use filters::{DateWindow, FilterSelection};
pub use generator::{generate, GeneratorParams};
pub use metrics::Kpis;
pub use model::{Transaction, TransactionLog};
pub use pipeline::{apply_filters, FilteredView};
pub use session::Session;
