//! Holiday lookup endpoint.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use calendaring_core::holiday::{HolidayEvent, HolidayQuery, ResolveError};

use crate::handlers::AppError;
use crate::state::AppState;

/// Query string of `GET /get`. Every field is optional here so that a missing
/// one surfaces as a domain error rather than an extractor rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayParams {
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
}

/// GET /get - Bank holidays for a locale within a date range.
#[axum::debug_handler]
pub async fn get_holidays(
    State(state): State<AppState>,
    params: Result<Query<HolidayParams>, QueryRejection>,
) -> Result<Json<Vec<HolidayEvent>>, AppError> {
    let Query(params) = params?;
    tracing::debug!(?params, "Holiday request");

    let query = HolidayQuery::from_params(
        params.from_date.as_deref(),
        params.to_date.as_deref(),
        params.language.as_deref(),
        params.country.as_deref(),
    )
    .map_err(ResolveError::from)?;

    let events = state.resolver.resolve(&query).await?;

    Ok(Json(events))
}
