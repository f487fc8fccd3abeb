use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{list_currencies, Currency};
use crate::services::price_display::PriceDisplay;
use crate::state::AppState;

#[derive(Serialize)]
pub struct CurrenciesResponse {
    current: &'static Currency,
    currencies: &'static [Currency],
}

// GET /api/currencies
pub async fn get_currencies(State(state): State<Arc<AppState>>) -> Json<CurrenciesResponse> {
    Json(CurrenciesResponse {
        current: state.currency.get_current(),
        currencies: list_currencies(),
    })
}

// POST /api/currency
#[derive(Deserialize)]
pub struct SetCurrencyRequest {
    pub code: String,
}

#[derive(Serialize)]
pub struct SetCurrencyResponse {
    current: &'static Currency,
    changed: bool,
}

pub async fn set_currency(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SetCurrencyRequest>,
) -> Json<SetCurrencyResponse> {
    let changed = state.currency.set_current(&body.code);
    if changed {
        tracing::info!(code = %body.code, "display currency changed");
    }
    Json(SetCurrencyResponse {
        current: state.currency.get_current(),
        changed,
    })
}

// GET /api/price?amount=45000&currency=NGN
#[derive(Deserialize)]
pub struct PriceQuery {
    pub amount: String,
    pub currency: Option<String>,
}

pub async fn get_price(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PriceQuery>,
) -> Result<Json<PriceDisplay>, AppError> {
    let amount: f64 = query
        .amount
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid amount: {}", query.amount)))?;
    let original = query.currency.as_deref().unwrap_or("NGN");

    Ok(Json(state.prices.display(amount, original)))
}
