use axum::{Router, routing::get};

use crate::modules::employees::controller::{
    create_employee, get_employee_permissions, list_employees, replace_employee_permissions,
    toggle_employee_permission,
};
use crate::state::AppState;

pub fn init_employees_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/{id}/permissions",
            get(get_employee_permissions)
                .put(replace_employee_permissions)
                .patch(toggle_employee_permission),
        )
}
