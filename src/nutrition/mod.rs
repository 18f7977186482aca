pub mod controller;
pub mod dto;
pub mod error;
pub mod exercise;
pub mod handlers;
pub mod series;
mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::session_routes())
        .merge(handlers::calculator_routes())
}
