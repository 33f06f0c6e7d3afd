//! Dashboard session: one selection in, one derived view out

use std::sync::Arc;

use crate::cache::{CacheStats, LogCache};
use crate::filters::FilterSelection;
use crate::generator::GeneratorParams;
use crate::model::TransactionLog;
use crate::pipeline::{apply_filters, FilteredView};

pub struct Session {
    params: GeneratorParams,
    cache: LogCache,
}

impl Session {
    pub fn new(params: GeneratorParams) -> Self {
        Self {
            params,
            cache: LogCache::new(),
        }
    }

    pub fn params(&self) -> &GeneratorParams {
        &self.params
    }

    /// Switch generator inputs; the previous log stays cached
    pub fn set_params(&mut self, params: GeneratorParams) {
        self.params = params;
    }

    /// The log for the current generator inputs
    pub fn log(&mut self) -> Arc<TransactionLog> {
        self.cache.get_or_generate(&self.params)
    }

    /// Whole-log selection, or None when the log is empty
    pub fn default_selection(&mut self) -> Option<FilterSelection> {
        FilterSelection::all_of(&self.log())
    }

    /// Recompute the view for a new selection
    pub fn on_selection_change(&mut self, selection: &FilterSelection) -> FilteredView {
        let log = self.log();
        apply_filters(&log, selection)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
