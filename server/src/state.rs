use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::sync::Arc;

use crate::store::SchedulerStore;
use crate::utils::error::AppError;

#[derive(Clone)]
pub struct AppState {
    store: Option<Arc<dyn SchedulerStore>>,
}

impl AppState {
    pub fn new(store: Arc<dyn SchedulerStore>) -> Self {
        Self { store: Some(store) }
    }

    /// State for a process started without `DATABASE_URL`.
    pub fn unconfigured() -> Self {
        Self { store: None }
    }

    pub fn store(&self) -> Result<Arc<dyn SchedulerStore>, AppError> {
        self.store
            .clone()
            .ok_or_else(|| AppError::ConfigurationError("DATABASE_URL not configured".into()))
    }
}

/// Extracts the configured store, rejecting the request before the body is read when there is none.
pub struct Store(pub Arc<dyn SchedulerStore>);

#[async_trait]
impl FromRequestParts<AppState> for Store {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        state.store().map(Store)
    }
}
