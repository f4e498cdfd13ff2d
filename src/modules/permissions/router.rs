use axum::{Router, routing::get};

use crate::modules::permissions::controller::{check_my_permission, list_sections, my_permissions};
use crate::state::AppState;

pub fn init_permissions_router() -> Router<AppState> {
    Router::new()
        .route("/sections", get(list_sections))
        .route("/me", get(my_permissions))
        .route("/me/check", get(check_my_permission))
}
