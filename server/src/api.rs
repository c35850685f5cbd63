//! HTTP routes and handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use cambio_common::{Account, AccountId, ExchangeRequest, ExchangeResult, RateMap};
use cambio_engine::ExchangeService;
use cambio_fx::RateUpdate;

use crate::error::{ApiError, ApiResult};
use crate::metrics::SharedMetrics;

/// Shared application state.
pub struct AppState {
    pub service: ExchangeService,
    pub metrics: SharedMetrics,
}

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/accounts", get(get_accounts))
        .route("/accounts/{id}/balance", put(put_account_balance))
        .route("/rates", get(get_rates).put(put_rate))
        .route("/log", get(get_log))
        .route("/exchange", post(post_exchange))
        .route("/metrics", get(get_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn get_accounts(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Account>>> {
    Ok(Json(state.service.accounts().await?))
}

#[derive(Debug, Deserialize)]
struct BalanceUpdate {
    balance: Decimal,
}

async fn put_account_balance(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<BalanceUpdate>,
) -> ApiResult<Json<Vec<Account>>> {
    if update.balance < Decimal::ZERO {
        return Err(ApiError::BadRequest("Malformed request".to_string()));
    }

    state
        .service
        .set_account_balance(&AccountId::new(id), update.balance)
        .await?;
    Ok(Json(state.service.accounts().await?))
}

async fn get_rates(State(state): State<Arc<AppState>>) -> ApiResult<Json<RateMap>> {
    Ok(Json(state.service.rates().await?))
}

async fn put_rate(
    State(state): State<Arc<AppState>>,
    Json(update): Json<RateUpdate>,
) -> ApiResult<Json<RateMap>> {
    Ok(Json(state.service.set_rate(&update).await?))
}

async fn get_log(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<ExchangeResult>>> {
    Ok(Json(state.service.log().await?))
}

async fn post_exchange(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ExchangeRequest>,
) -> ApiResult<Response> {
    if request.base_amount <= Decimal::ZERO {
        return Err(ApiError::BadRequest("Malformed request".to_string()));
    }

    let result = match state.service.exchange(request).await {
        Ok(result) => result,
        Err(err) => {
            state.metrics.exchange_rejected();
            return Err(err.into());
        }
    };

    // The body always carries the full result record; the status mirrors
    // the outcome.
    let status = if result.ok {
        state.metrics.exchange_settled();
        StatusCode::OK
    } else {
        state.metrics.exchange_failed();
        StatusCode::INTERNAL_SERVER_ERROR
    };
    Ok((status, Json(result)).into_response())
}

async fn get_metrics(State(state): State<Arc<AppState>>) -> String {
    state.metrics.to_prometheus()
}
