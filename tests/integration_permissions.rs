mod common;

use axum::http::StatusCode;
use common::{app_without_db, get, json_request, send, token_for};
use ridebook_core::UserRole;
use serde_json::json;

#[tokio::test]
async fn sections_are_listed_in_registry_order() {
    let token = token_for(UserRole::Employee, json!({}));
    let (status, body) = send(app_without_db(), get("/api/permissions/sections", Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    let sections = body.as_array().unwrap();
    assert_eq!(sections.len(), 20);
    assert_eq!(sections[0]["key"], "corporateBookings");
    assert_eq!(sections[0]["capabilities"], json!(["view", "edit", "downloadCsv"]));

    let legal = sections.iter().find(|s| s["key"] == "legalPages").unwrap();
    assert_eq!(legal["capabilities"], json!(["view", "edit"]));

    let refunds = sections.iter().find(|s| s["key"] == "refundIssuance").unwrap();
    assert_eq!(refunds["kind"], "flag");
    assert_eq!(refunds["capabilities"], json!([]));
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let (status, body) = send(app_without_db(), get("/api/permissions/me", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing authorization header");
}

#[tokio::test]
async fn forged_token_is_unauthorized() {
    let (status, _) = send(
        app_without_db(),
        get("/api/permissions/me", Some("eyJhbGciOiJIUzI1NiJ9.e30.invalid")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn my_permissions_resolve_stored_grants() {
    let token = token_for(
        UserRole::Employee,
        json!({
            "rentalBookings": { "view": true, "edit": false },
            "driverAssignment": true,
            "retiredSection": { "view": true },
        }),
    );
    let (status, body) = send(app_without_db(), get("/api/permissions/me", Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "employee");
    assert_eq!(
        body["permissions"]["rentalBookings"],
        json!({ "view": true, "edit": false, "downloadCsv": false })
    );
    assert_eq!(body["permissions"]["driverAssignment"], json!(true));
    assert_eq!(body["permissions"]["userBanning"], json!(false));
    assert!(body["permissions"].get("retiredSection").is_none());
    assert_eq!(
        body["visible_sections"],
        json!(["rentalBookings", "driverAssignment"])
    );
}

#[tokio::test]
async fn superadmin_sees_everything() {
    let token = token_for(UserRole::SuperAdmin, json!({}));
    let (status, body) = send(app_without_db(), get("/api/permissions/me", Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["visible_sections"].as_array().unwrap().len(), 20);
    assert_eq!(
        body["permissions"]["employeeManagement"],
        json!({ "view": true, "edit": true, "downloadCsv": false })
    );
    assert_eq!(
        body["permissions"]["walletManagement"],
        json!({ "view": true, "edit": true, "downloadCsv": true })
    );
}

#[tokio::test]
async fn check_answers_single_permission() {
    let token = token_for(
        UserRole::Employee,
        json!({ "rentalBookings": { "view": true, "edit": false } }),
    );

    let (status, body) = send(
        app_without_db(),
        get(
            "/api/permissions/me/check?section=rentalBookings&capability=view",
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed"], json!(true));

    let (_, body) = send(
        app_without_db(),
        get(
            "/api/permissions/me/check?section=rentalBookings&capability=downloadCsv",
            Some(&token),
        ),
    )
    .await;
    assert_eq!(body["allowed"], json!(false));
}

#[tokio::test]
async fn check_ignores_capability_for_flags() {
    let token = token_for(UserRole::Employee, json!({ "driverAssignment": true }));
    let (status, body) = send(
        app_without_db(),
        get(
            "/api/permissions/me/check?section=driverAssignment&capability=edit",
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed"], json!(true));
}

#[tokio::test]
async fn check_rejects_unknown_names() {
    let token = token_for(UserRole::SuperAdmin, json!({}));
    for uri in [
        "/api/permissions/me/check?section=aiTripPlanner&capability=view",
        "/api/permissions/me/check?section=blogPosts&capability=publish",
        "/api/permissions/me/check?section=blogPosts",
    ] {
        let (status, body) = send(app_without_db(), get(uri, Some(&token))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn employee_list_requires_view_grant() {
    let token = token_for(
        UserRole::Employee,
        json!({ "employeeManagement": { "view": false, "edit": true } }),
    );
    let (status, body) = send(app_without_db(), get("/api/employees", Some(&token))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["error"],
        "Access denied. Missing required permission: employeeManagement.view"
    );
}

#[tokio::test]
async fn permission_writes_require_superadmin() {
    let token = token_for(
        UserRole::Employee,
        json!({ "employeeManagement": { "view": true, "edit": true } }),
    );
    let uri = format!("/api/employees/{}/permissions", uuid::Uuid::new_v4());

    let (status, _) = send(
        app_without_db(),
        json_request("PUT", &uri, &token, json!({ "permissions": {} })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        app_without_db(),
        json_request(
            "PATCH",
            &uri,
            &token,
            json!({ "section": "blogPosts", "column": "view", "value": true }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        app_without_db(),
        json_request(
            "POST",
            "/api/employees",
            &token,
            json!({ "first_name": "A", "last_name": "B", "email": "a@b.co" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn create_employee_validates_body() {
    let token = token_for(UserRole::SuperAdmin, json!({}));
    let (status, body) = send(
        app_without_db(),
        json_request(
            "POST",
            "/api/employees",
            &token,
            json!({ "first_name": "Ada", "last_name": "Obi", "email": "not-an-email" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "email is invalid");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (status, body) = send(app_without_db(), get("/api-docs/openapi.json", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Ridebook Admin API");
    assert!(body["paths"]["/api/employees/{id}/permissions"]["patch"].is_object());
}
