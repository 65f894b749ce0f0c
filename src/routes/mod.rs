pub mod dashboard;
pub mod health;
pub mod phases;
pub mod sessions;

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(sessions::router())
        .merge(dashboard::router())
        .merge(phases::router())
}
