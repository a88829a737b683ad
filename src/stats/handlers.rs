use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use tracing::{info, instrument};

use super::dto::{
    DataResponse, EmergencyIntervalRequest, EmergencyIntervalRow, EmergencyRequest, EmergencyRow,
    OffenceIntervalRequest, OffenceRow, SaveFilterRequest, SeizureIntervalRequest, SeizureRow,
};
use super::filters::{Drug, SeizureMeasure};
use super::repo;
use crate::auth::extractors::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;

const MISSING_FIELDS: &str = "Provide all required fields";

pub fn stats_routes() -> Router<AppState> {
    Router::new()
        .route("/statistics/urgente", post(emergency))
        .route("/statistics/urgente/interval", post(emergency_interval))
        .route("/statistics/confiscari", post(seizures_interval))
        .route("/statistics/infractiuni", post(offences_interval))
        .route("/filters", post(save_filter))
}

fn parse_drug(s: &str) -> Result<Drug, ApiError> {
    Drug::parse(s).ok_or_else(|| ApiError::bad_request(format!("Invalid drug: {s}")))
}

fn parse_measure(s: &str) -> Result<SeizureMeasure, ApiError> {
    SeizureMeasure::parse(s).ok_or_else(|| ApiError::bad_request(format!("Invalid drug: {s}")))
}

#[instrument(skip(state, payload))]
pub async fn emergency(
    State(state): State<AppState>,
    Json(payload): Json<EmergencyRequest>,
) -> Result<Json<DataResponse<Vec<EmergencyRow>>>, ApiError> {
    let (Some(an), Some(drog), Some(filtru)) = (
        payload.urgente_an,
        payload.urgente_drog,
        payload.urgente_filtru,
    ) else {
        return Err(ApiError::bad_request(MISSING_FIELDS));
    };
    let drug = parse_drug(&drog)?;

    let rows = repo::emergency_by_category(&state.db, an, &filtru, drug).await?;
    let data = rows
        .into_iter()
        .map(|(categorie, cantitate)| EmergencyRow {
            label: categorie,
            drog: drug.column(),
            cantitate,
            filtru: filtru.clone(),
            an,
        })
        .collect();
    Ok(Json(DataResponse::new(data)))
}

#[instrument(skip(state, payload))]
pub async fn emergency_interval(
    State(state): State<AppState>,
    Json(payload): Json<EmergencyIntervalRequest>,
) -> Result<Json<DataResponse<Vec<EmergencyIntervalRow>>>, ApiError> {
    let (Some(start), Some(end), Some(drog)) = (
        payload.start_year,
        payload.end_year,
        payload.urgente_drog.clone(),
    ) else {
        return Err(ApiError::bad_request(MISSING_FIELDS));
    };
    let drug = parse_drug(&drog)?;
    let categorie = payload.active_filter().map(|s| s.to_string());

    let rows = repo::emergency_interval(&state.db, start, end, categorie.as_deref(), drug).await?;
    let data = rows
        .into_iter()
        .map(|(an, filtru, cantitate)| EmergencyIntervalRow {
            label: an,
            cantitate,
            categorie: categorie.clone(),
            drog: drug.column(),
            filtru,
        })
        .collect();
    Ok(Json(DataResponse::new(data)))
}

#[instrument(skip(state, payload))]
pub async fn seizures_interval(
    State(state): State<AppState>,
    Json(payload): Json<SeizureIntervalRequest>,
) -> Result<Json<DataResponse<Vec<SeizureRow>>>, ApiError> {
    let (Some(start), Some(end), Some(drog), Some(subcategorie)) = (
        payload.start_year,
        payload.end_year,
        payload.drog,
        payload.confiscari_subcategorie,
    ) else {
        return Err(ApiError::bad_request(MISSING_FIELDS));
    };
    let measure = parse_measure(&subcategorie)?;

    let rows = repo::seizures_interval(&state.db, start, end, &drog, measure).await?;
    let data = rows
        .into_iter()
        .map(|(an, cantitate)| SeizureRow {
            label: an,
            // Quantities are discrete counts; floor fractional values.
            cantitate: cantitate.map(|v| v.floor() as i64),
            filtru: measure.column(),
            drog: drog.clone(),
        })
        .collect();
    Ok(Json(DataResponse::new(data)))
}

#[instrument(skip(state, payload))]
pub async fn offences_interval(
    State(state): State<AppState>,
    Json(payload): Json<OffenceIntervalRequest>,
) -> Result<Json<DataResponse<Vec<OffenceRow>>>, ApiError> {
    let (Some(start), Some(end), Some(categorie)) = (
        payload.start_year,
        payload.end_year,
        payload.infractiuni_categorie.clone(),
    ) else {
        return Err(ApiError::bad_request(MISSING_FIELDS));
    };
    let filtru = payload.primary_filter().map(|s| s.to_string());
    let subfiltru = payload.secondary_filter().map(|s| s.to_string());

    let rows = repo::offences_interval(
        &state.db,
        start,
        end,
        &categorie,
        filtru.as_deref(),
        subfiltru.as_deref(),
    )
    .await?;
    let data = rows
        .into_iter()
        .map(|(an, valoare)| OffenceRow {
            label: an,
            cantitate: valoare.map(|v| v.floor() as i64),
            categorie: categorie.clone(),
            filtru: filtru.clone(),
            subfiltru: subfiltru.clone(),
        })
        .collect();
    Ok(Json(DataResponse::new(data)))
}

#[instrument(skip(state, user, payload))]
pub async fn save_filter(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<SaveFilterRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let (Some(categorie), Some(an), Some(tip), Some(reprezentare)) = (
        payload.categorie,
        payload.an,
        payload.tip,
        payload.reprezentare,
    ) else {
        return Err(ApiError::bad_request(MISSING_FIELDS));
    };

    match repo::save_filter(&state.db, &categorie, an, &tip, &reprezentare, &user.email).await? {
        Some(saved) => {
            info!(email = %user.email, %categorie, "filter saved");
            Ok((
                StatusCode::CREATED,
                Json(json!({ "status": "success", "data": saved })),
            ))
        }
        // Identical filter already on file: suppress, no new row.
        None => Ok((
            StatusCode::OK,
            Json(json!({ "status": "success", "data": null })),
        )),
    }
}
