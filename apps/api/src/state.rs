use std::sync::Arc;

use crate::classifier::ScoreClassifier;
use crate::quota::tracker::QuotaTracker;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Per-caller daily scan quota. Shared with the background sweep task.
    pub quota: Arc<QuotaTracker>,
    pub classifier: Arc<ScoreClassifier>,
}
