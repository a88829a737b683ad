use serde::Serialize;

/// Public listing entry; matches what the dashboard table renders.
#[derive(Debug, Serialize)]
pub struct CampaignItem {
    pub title: String,
    pub article: String,
    pub img: String,
}

#[derive(Debug, Serialize)]
pub struct CampaignListResponse {
    pub campaigns: Vec<CampaignItem>,
}

#[derive(Debug, Serialize)]
pub struct CreatedCampaignResponse {
    pub message: &'static str,
}
