use crate::state::AppState;
use axum::Router;

mod dto;
pub mod filters;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    handlers::stats_routes()
}
