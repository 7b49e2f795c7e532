// =====================================================================================
// CONFIRMATION CELL HANDLER TESTS
// =====================================================================================

use std::collections::HashSet;

use axum::http::StatusCode;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use confirmation_cell::create_confirmation_router;
use shared_utils::test_utils::{get_request, json_request, read_json, TestConfig};

fn seeded_app() -> Router {
    create_confirmation_router(TestConfig::seeded().to_arc())
}

fn empty_app() -> Router {
    create_confirmation_router(TestConfig::default().to_arc())
}

fn new_confirmation(appointment_id: &str) -> Value {
    json!({
        "appointmentId": appointment_id,
        "patientId": "p-900",
        "patientName": "Nora Quinn",
        "patientPhone": "(555) 909-1000",
        "patientEmail": "nora@example.com",
        "serviceName": "Lip Filler",
        "practitionerId": "prov-9",
        "practitionerName": "Dr. Ada Park",
        "appointmentStart": "2030-05-01T15:00:00Z",
        "appointmentEnd": "2030-05-01T15:45:00Z",
        "noShowRisk": "high"
    })
}

async fn list(app: &Router, query: &str) -> Value {
    let response = app
        .clone()
        .oneshot(get_request(&format!("/{}", query)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    read_json(response).await
}

fn appointment_ids(body: &Value) -> HashSet<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["appointmentId"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_list_returns_envelope_with_meta_and_stats() {
    let app = seeded_app();
    let body = list(&app, "").await;

    assert_eq!(body["success"], true);
    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["meta"]["limit"], 20);
    assert_eq!(body["meta"]["total"], 8);
    assert_eq!(body["meta"]["totalPages"], 1);
    assert_eq!(body["stats"]["total"], 8);
    assert_eq!(body["statusCounts"]["pending"], 3);
    assert_eq!(body["statusCounts"]["confirmed"], 2);
    assert_eq!(body["statusCounts"]["no_response"], 1);
}

#[tokio::test]
async fn test_status_filter_returns_only_matching_records() {
    let app = seeded_app();
    let body = list(&app, "?status=pending").await;

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert!(data.iter().all(|c| c["status"] == "pending"));
}

#[tokio::test]
async fn test_combined_filters_equal_intersection() {
    let app = seeded_app();

    let by_status = appointment_ids(&list(&app, "?status=pending,no_response").await);
    let by_practitioner = appointment_ids(&list(&app, "?practitionerId=prov-2").await);
    let combined =
        appointment_ids(&list(&app, "?status=pending,no_response&practitionerId=prov-2").await);

    let expected: HashSet<String> = by_status.intersection(&by_practitioner).cloned().collect();
    assert_eq!(combined, expected);
    assert!(!combined.is_empty());

    let by_level = appointment_ids(&list(&app, "?escalationLevel=escalated").await);
    let combined =
        appointment_ids(&list(&app, "?status=pending,no_response&escalationLevel=escalated").await);

    let expected: HashSet<String> = by_status.intersection(&by_level).cloned().collect();
    assert_eq!(combined, expected);
    assert_eq!(
        combined,
        HashSet::from(["apt-1003".to_string(), "apt-1006".to_string()])
    );
}

#[tokio::test]
async fn test_escalation_level_filter_accepts_a_set() {
    let app = seeded_app();
    let body = list(&app, "?escalationLevel=warning,escalated").await;

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert!(data
        .iter()
        .all(|c| c["escalationLevel"] == "warning" || c["escalationLevel"] == "escalated"));
    assert_eq!(
        appointment_ids(&body),
        HashSet::from([
            "apt-1002".to_string(),
            "apt-1003".to_string(),
            "apt-1006".to_string()
        ])
    );
}

#[tokio::test]
async fn test_patient_filter_returns_only_that_patient() {
    let app = seeded_app();
    let body = list(&app, "?patientId=p-001").await;

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert!(data.iter().all(|c| c["patientId"] == "p-001"));
    assert_eq!(
        appointment_ids(&body),
        HashSet::from(["apt-1001".to_string(), "apt-1008".to_string()])
    );

    let none = list(&app, "?patientId=p-404").await;
    assert_eq!(none["meta"]["total"], 0);
}

#[tokio::test]
async fn test_channel_filter_matches_secondary_channels() {
    let app = seeded_app();
    let body = list(&app, "?channel=email").await;

    let ids = appointment_ids(&body);
    assert!(ids.contains("apt-1001"), "secondary email channel should match");
    assert!(ids.contains("apt-1004"), "primary email channel should match");
    assert!(!ids.contains("apt-1002"));
}

#[tokio::test]
async fn test_high_risk_only_excludes_confirmed() {
    let app = seeded_app();
    let body = list(&app, "?highRiskOnly=true").await;

    let data = body["data"].as_array().unwrap();
    assert!(!data.is_empty());
    assert!(data
        .iter()
        .all(|c| c["noShowRisk"] == "high" && c["status"] != "confirmed"));
}

#[tokio::test]
async fn test_search_is_case_insensitive_across_fields() {
    let app = seeded_app();

    let by_name = list(&app, "?search=SARAH").await;
    assert_eq!(by_name["meta"]["total"], 2);

    let by_practitioner = list(&app, "?search=marcus").await;
    assert_eq!(appointment_ids(&by_practitioner), HashSet::from(["apt-1007".to_string()]));

    let by_email = list(&app, "?search=dkim@").await;
    assert_eq!(by_email["meta"]["total"], 1);
}

#[tokio::test]
async fn test_requires_follow_up_filter() {
    let app = seeded_app();
    let body = list(&app, "?requiresFollowUp=true").await;

    let data = body["data"].as_array().unwrap();
    assert!(!data.is_empty());
    assert!(data.iter().all(|c| c["requiresFollowUp"] == true));
}

#[tokio::test]
async fn test_sorting_by_name_descending() {
    let app = seeded_app();
    let body = list(&app, "?sortBy=patientName&sortOrder=desc").await;

    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["patientName"].as_str().unwrap())
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    sorted.reverse();
    assert_eq!(names, sorted);
}

#[tokio::test]
async fn test_default_sort_is_appointment_start_ascending() {
    let app = seeded_app();
    let body = list(&app, "").await;

    let starts: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["appointmentStart"].as_str().unwrap())
        .collect();
    assert_eq!(body["data"][0]["appointmentId"], "apt-1006");
    assert_eq!(starts.len(), 8);
}

#[tokio::test]
async fn test_unknown_sort_field_keeps_store_order() {
    let app = seeded_app();
    let body = list(&app, "?sortBy=favouriteColour").await;

    assert_eq!(body["data"][0]["appointmentId"], "apt-1001");
    assert_eq!(body["data"][7]["appointmentId"], "apt-1008");
}

#[tokio::test]
async fn test_pagination_slices_and_counts_pages() {
    let app = seeded_app();

    let body = list(&app, "?page=2&limit=3").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
    assert_eq!(body["meta"]["totalPages"], 3);

    let last = list(&app, "?page=3&limit=3").await;
    assert_eq!(last["data"].as_array().unwrap().len(), 2);

    let beyond = list(&app, "?page=40&limit=3").await;
    assert!(beyond["data"].as_array().unwrap().is_empty());
    assert_eq!(beyond["meta"]["total"], 8);

    let negative = list(&app, "?page=-2").await;
    assert!(negative["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_confirmation_returns_created_pending_record() {
    let app = empty_app();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/", &new_confirmation("apt-2001")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = read_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["escalationLevel"], "none");
    assert_eq!(body["data"]["escalationAttempts"], 0);
    assert_eq!(body["data"]["primaryChannel"], "sms");
    assert_eq!(body["data"]["noShowRisk"], "high");
    assert!(body["data"]["sentAt"].is_string());

    let listed = list(&app, "").await;
    assert_eq!(listed["meta"]["total"], 1);
}

#[tokio::test]
async fn test_duplicate_pending_confirmation_is_rejected() {
    let app = empty_app();

    let first = app
        .clone()
        .oneshot(json_request("POST", "/", &new_confirmation("apt-2002")))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .clone()
        .oneshot(json_request("POST", "/", &new_confirmation("apt-2002")))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);

    let body = read_json(second).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("apt-2002"));
}

#[tokio::test]
async fn test_new_confirmation_allowed_once_previous_is_resolved() {
    let app = empty_app();

    app.clone()
        .oneshot(json_request("POST", "/", &new_confirmation("apt-2003")))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_request("PUT", "/apt-2003", &json!({ "action": "cancelled" })))
        .await
        .unwrap();

    let again = app
        .clone()
        .oneshot(json_request("POST", "/", &new_confirmation("apt-2003")))
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::CREATED);

    let fetched = read_json(app.clone().oneshot(get_request("/apt-2003")).await.unwrap()).await;
    assert_eq!(fetched["data"]["status"], "pending", "latest record wins");
}

#[tokio::test]
async fn test_create_lists_missing_fields() {
    let app = empty_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            &json!({ "appointmentId": "apt-2004", "patientName": "  " }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = read_json(response).await;
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("patientId"));
    assert!(error.contains("patientName"));
    assert!(error.contains("appointmentEnd"));
    assert!(!error.contains("appointmentId"));
}

#[tokio::test]
async fn test_create_rejects_end_before_start() {
    let app = empty_app();
    let mut body = new_confirmation("apt-2005");
    body["appointmentEnd"] = json!("2030-05-01T14:00:00Z");

    let response = app.oneshot(json_request("POST", "/", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = empty_app();
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_update_unknown_appointment_is_not_found() {
    let app = seeded_app();

    let response = app
        .oneshot(json_request("PUT", "/apt-missing", &json!({ "action": "confirmed" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_invalid_status_lists_valid_values() {
    let app = seeded_app();

    let response = app
        .oneshot(json_request("PUT", "/apt-1002", &json!({ "status": "ghosted" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = read_json(response).await;
    let error = body["error"].as_str().unwrap();
    for status in ["pending", "confirmed", "rescheduled", "no_response", "cancelled"] {
        assert!(error.contains(status), "missing {} in {}", status, error);
    }
}

#[tokio::test]
async fn test_escalate_then_confirm_over_http() {
    let app = empty_app();
    app.clone()
        .oneshot(json_request("POST", "/", &new_confirmation("apt-2006")))
        .await
        .unwrap();

    let escalate = json!({
        "action": "escalate",
        "escalationReason": "No reply",
        "updatedBy": "staff-7"
    });
    let first = read_json(
        app.clone()
            .oneshot(json_request("PUT", "/apt-2006", &escalate))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(first["data"]["escalationLevel"], "warning");
    assert_eq!(first["data"]["status"], "pending");
    assert_eq!(first["data"]["updatedBy"], "staff-7");

    let second = read_json(
        app.clone()
            .oneshot(json_request("PUT", "/apt-2006", &escalate))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(second["data"]["escalationLevel"], "escalated");
    assert_eq!(second["data"]["escalationAttempts"], 2);
    assert_eq!(second["data"]["requiresFollowUp"], true);

    let confirmed = read_json(
        app.clone()
            .oneshot(json_request("PUT", "/apt-2006", &json!({ "action": "confirmed" })))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(confirmed["data"]["status"], "confirmed");
    assert_eq!(confirmed["data"]["escalationLevel"], "none");
    assert_eq!(confirmed["data"]["requiresFollowUp"], false);
    assert!(confirmed["data"]["responseTimeMinutes"].is_number());
}

#[tokio::test]
async fn test_concurrent_escalations_are_all_counted() {
    let app = empty_app();
    app.clone()
        .oneshot(json_request("POST", "/", &new_confirmation("apt-2007")))
        .await
        .unwrap();

    let mut tasks = Vec::new();
    for _ in 0..10 {
        let app = app.clone();
        tasks.push(tokio::spawn(async move {
            app.oneshot(json_request("PUT", "/apt-2007", &json!({ "action": "escalate" })))
                .await
                .unwrap()
                .status()
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::OK);
    }

    let fetched = read_json(app.oneshot(get_request("/apt-2007")).await.unwrap()).await;
    assert_eq!(fetched["data"]["escalationAttempts"], 10);
}

#[tokio::test]
async fn test_get_unknown_confirmation_is_not_found() {
    let app = seeded_app();
    let response = app.oneshot(get_request("/apt-nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
