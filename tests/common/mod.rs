//! Shared helpers for integration tests against a mock backend.

#![allow(dead_code)]

use graduation_client_lib::models::UserProfile;
use graduation_client_lib::services::{AuthTokens, MemoryTokenStore};
use graduation_client_lib::{AppState, ClientSettings};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::MockServer;

/// State pointed at the mock server, with no one signed in.
pub fn state_for(server: &MockServer) -> AppState {
    let settings = ClientSettings {
        api_base_url: server.uri(),
        timeout_secs: 5,
        page_size: 50,
    };
    AppState::new(settings, Arc::new(MemoryTokenStore::new())).unwrap()
}

/// State pointed at the mock server with `user` signed in.
pub async fn signed_in(server: &MockServer, user: Value) -> AppState {
    let state = state_for(server);
    let profile: UserProfile = serde_json::from_value(user).unwrap();
    state
        .session
        .set_user(
            profile,
            AuthTokens {
                access_token: "access-1".to_string(),
                refresh_token: Some("refresh-1".to_string()),
            },
        )
        .await
        .unwrap();
    state
}

pub fn advisor_user(id: i64) -> Value {
    json!({
        "id": id,
        "email": "advisor@uni.edu",
        "name": "Mehmet",
        "surname": "Demir",
        "userType": "advisor",
        "department": "Computer Engineering"
    })
}

pub fn staff_user(id: i64, staff_role: i32) -> Value {
    json!({
        "id": id,
        "email": "staff@uni.edu",
        "name": "Zeynep",
        "surname": "Arslan",
        "userType": "staff",
        "staffRole": staff_role,
        "department": "Computer Engineering",
        "faculty": "Engineering"
    })
}

pub fn student_json(id: i64) -> Value {
    json!({
        "id": id,
        "userId": 100 + id,
        "name": format!("Student{}", id),
        "surname": "Yilmaz",
        "department": "Computer Engineering",
        "faculty": "Engineering",
        "studentNumber": format!("2020{:04}", id)
    })
}

/// A single-page roster response.
pub fn page_of(items: Vec<Value>) -> Value {
    let total = items.len();
    json!({
        "content": items,
        "page": 0,
        "size": 50,
        "totalPages": 1,
        "totalElements": total
    })
}

pub fn record_json(
    id: i64,
    student_id: i64,
    advisor: Option<bool>,
    department_secretary: Option<bool>,
) -> Value {
    json!({
        "id": id,
        "studentId": student_id,
        "advisor": advisor,
        "departmentSecretary": department_secretary,
        "facultyDeansOffice": null,
        "studentAffairs": null,
        "rectorate": null
    })
}
