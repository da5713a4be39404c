//! Shared application state
//!
//! Everything in here is built once at startup and never mutated.

use std::sync::Arc;

use crate::database::SchemaCatalog;
use crate::inspector::InspectionSummary;
use crate::search::SearchEngine;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn SchemaCatalog>,
    pub engine: Arc<SearchEngine>,
    pub summary: Arc<InspectionSummary>,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn SchemaCatalog>,
        engine: Arc<SearchEngine>,
        summary: Arc<InspectionSummary>,
    ) -> Self {
        Self {
            catalog,
            engine,
            summary,
        }
    }
}
