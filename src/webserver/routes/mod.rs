use std::sync::Arc;

use axum::Router;

use crate::webserver::state::AppState;

pub mod search;
pub mod shipments;
pub mod system;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new().nest("/api", api_routes()).with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(search::routes())
        .merge(shipments::routes())
        .merge(system::routes())
}
