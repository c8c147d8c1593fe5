use std::io::Cursor;
use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::ScoringConfig;
use crate::error::AppError;
use crate::income::{infer_monthly_income, LedgerImporter};
use crate::scoring::{generate_rent_score, PaymentImporter, PaymentRecord, RentScoreResult};

/// Payment history to score. `payments_csv` wins over `payments` when both
/// are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RentScoreRequest {
    #[serde(default)]
    pub full_rent: Option<f64>,
    #[serde(default)]
    pub payments: Vec<PaymentRecord>,
    #[serde(default)]
    pub payments_csv: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeRequest {
    pub ledger_csv: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeResponse {
    pub average_monthly_income: f64,
    pub entries: usize,
}

/// Router builder exposing the scoring endpoints.
pub fn scoring_router(config: ScoringConfig) -> Router {
    Router::new()
        .route("/api/v1/rent-score", post(rent_score_handler))
        .route("/api/v1/income", post(income_handler))
        .with_state(Arc::new(config))
}

pub(crate) async fn rent_score_handler(
    State(config): State<Arc<ScoringConfig>>,
    Json(request): Json<RentScoreRequest>,
) -> Result<Json<RentScoreResult>, AppError> {
    score_request(&config, request)
        .map(Json)
        .inspect_err(|err| warn!(error = %err, "rent score request rejected"))
}

pub(crate) async fn income_handler(
    Json(request): Json<IncomeRequest>,
) -> Result<Json<IncomeResponse>, AppError> {
    let entries = LedgerImporter::from_reader(Cursor::new(request.ledger_csv.into_bytes()))
        .inspect_err(|err| warn!(error = %err, "income request rejected"))?;

    Ok(Json(IncomeResponse {
        average_monthly_income: infer_monthly_income(&entries),
        entries: entries.len(),
    }))
}

/// Resolves the rent and payment rows of a request and scores them.
pub fn score_request(
    config: &ScoringConfig,
    request: RentScoreRequest,
) -> Result<RentScoreResult, AppError> {
    let RentScoreRequest {
        full_rent,
        payments,
        payments_csv,
    } = request;

    let full_rent = config
        .resolve_rent(full_rent)
        .ok_or(AppError::MissingRent)?;
    let payments = match payments_csv {
        Some(csv) => PaymentImporter::from_reader(Cursor::new(csv.into_bytes()))?,
        None => payments,
    };

    Ok(generate_rent_score(full_rent, &payments)?)
}
