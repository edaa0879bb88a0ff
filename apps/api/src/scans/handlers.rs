//! Axum route handlers for quota status, classification, and scans.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classifier::MatchAssessment;
use crate::client_key::ClientKey;
use crate::errors::AppError;
use crate::quota::tracker::QuotaUsage;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub score: i32,
}

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub assessment: MatchAssessment,
    pub quota: QuotaUsage,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/quota
///
/// Today's usage for the calling client. Never consumes quota.
pub async fn handle_get_quota(
    State(state): State<AppState>,
    client: ClientKey,
) -> Json<QuotaUsage> {
    Json(state.quota.usage(client.as_str()))
}

/// POST /api/v1/match/classify
///
/// Classifies a score without touching the caller's quota.
pub async fn handle_classify(
    State(state): State<AppState>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<MatchAssessment>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    Ok(Json(state.classifier.classify(request.score)))
}

/// POST /api/v1/scans
///
/// Records one scan against the caller's daily quota, then classifies the
/// score. Malformed bodies are rejected before any quota is spent.
pub async fn handle_scan(
    State(state): State<AppState>,
    client: ClientKey,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<ScanResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let key = client.as_str();

    if !state.quota.try_admit(key) {
        return Err(AppError::RateLimited {
            used: state.quota.used(key),
            ceiling: state.quota.ceiling(),
        });
    }

    let assessment = state.classifier.classify(request.score);
    let quota = state.quota.usage(key);
    info!(
        client = key,
        score = assessment.score,
        label = assessment.label,
        used = quota.used,
        ceiling = quota.ceiling,
        "Scan recorded"
    );

    Ok(Json(ScanResponse { assessment, quota }))
}
