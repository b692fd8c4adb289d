//! Shared application state for API handlers.

use std::sync::Arc;

use crate::reporting::ReportingService;

/// Shared application state for API handlers.
#[derive(Clone)]
pub struct AppState {
    /// Reporting data provider every query endpoint delegates to.
    pub reporting: Arc<dyn ReportingService>,
}

impl AppState {
    /// Create a new AppState around a reporting provider.
    pub fn new(reporting: impl ReportingService + 'static) -> Self {
        Self::from_arc(Arc::new(reporting))
    }

    /// Create a new AppState from an already shared provider.
    pub fn from_arc(reporting: Arc<dyn ReportingService>) -> Self {
        Self { reporting }
    }
}
