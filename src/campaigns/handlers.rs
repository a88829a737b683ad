use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use tracing::{info, instrument};

use super::dto::{CampaignItem, CampaignListResponse, CreatedCampaignResponse};
use super::repo::Campaign;
use super::services::store_campaign_image;
use crate::auth::extractors::{require_role, CurrentUser};
use crate::auth::repo::Role;
use crate::error::ApiError;
use crate::state::AppState;

pub fn campaign_routes() -> Router<AppState> {
    Router::new()
        .route("/campaign", get(list_campaigns))
        .route(
            "/campaign",
            post(insert_campaign).layer(DefaultBodyLimit::max(10 * 1024 * 1024)),
        )
}

#[instrument(skip(state))]
pub async fn list_campaigns(
    State(state): State<AppState>,
) -> Result<Json<CampaignListResponse>, ApiError> {
    let campaigns = Campaign::list_all(&state.db).await?;
    let campaigns = campaigns
        .into_iter()
        .map(|c| CampaignItem {
            title: c.title,
            article: c.article,
            img: c.img,
        })
        .collect();
    Ok(Json(CampaignListResponse { campaigns }))
}

/// POST /campaign (multipart): fields `photo`, `title`, `article`.
///
/// Auth and role gate run before the body is touched, so an unauthorized
/// request never reaches storage or the database.
#[instrument(skip_all)]
pub async fn insert_campaign(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mut mp: Multipart,
) -> Result<(StatusCode, Json<CreatedCampaignResponse>), ApiError> {
    require_role(&user, Role::Admin)?;

    let mut photo: Option<(Bytes, String)> = None;
    let mut title: Option<String> = None;
    let mut article: Option<String> = None;

    while let Some(field) = mp
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("photo") => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".into());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(e.to_string()))?;
                photo = Some((data, content_type));
            }
            Some("title") => {
                title = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(e.to_string()))?,
                );
            }
            Some("article") => {
                article = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(e.to_string()))?,
                );
            }
            _ => {}
        }
    }

    let Some((body, content_type)) = photo else {
        return Err(ApiError::bad_request("Please provide a photo"));
    };
    let (Some(title), Some(article)) = (title, article) else {
        return Err(ApiError::bad_request("Provide all required fields"));
    };

    let img = store_campaign_image(&state, body, &content_type).await?;
    let campaign = Campaign::insert(&state.db, &title, &article, &img).await?;

    info!(campaign_id = %campaign.id, by = %user.name, "campaign created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedCampaignResponse {
            message: "Campaign added successfully",
        }),
    ))
}
