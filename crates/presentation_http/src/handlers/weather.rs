//! Weather lookup endpoint

use application::WeatherAdvice;
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Default, Deserialize)]
pub struct WeatherQuery {
    pub date: Option<String>,
    pub location: Option<String>,
}

/// Forecast for a visit with a seating suggestion
#[instrument(skip(state))]
pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<WeatherAdvice>, ApiError> {
    let (Some(date), Some(location)) = (query.date, query.location) else {
        return Err(ApiError::BadRequest(
            "date and location are required".to_string(),
        ));
    };

    let advice = state
        .weather
        .advise(&date, &location)
        .await
        .map_err(|e| ApiError::from_application(e, "Failed to fetch weather information"))?;
    Ok(Json(advice))
}
