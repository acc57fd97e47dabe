//! Session lifecycle verification: login, token refresh, logout, and the
//! smaller screens that ride on the session.

mod common;

use common::{advisor_user, page_of, record_json, signed_in, staff_user, state_for, student_json};
use graduation_client_lib::commands::approval::{open_approval_screen, StageAccess};
use graduation_client_lib::commands::{auth, ceremonies, dashboard, messages, profile};
use graduation_client_lib::models::{
    ApprovalGate, CeremonyInput, DashboardKind, NewMessage, Stage, UserType,
};
use graduation_client_lib::AppError;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn student_user() -> serde_json::Value {
    json!({
        "id": 101,
        "email": "student@uni.edu",
        "name": "Elif",
        "surname": "Sahin",
        "userType": "student",
        "studentNumber": "20200001",
        "studentId": 1,
        "advisorId": 7
    })
}

#[tokio::test]
async fn login_stores_session_and_picks_dashboard() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "student@uni.edu", "password": "secret123"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "acc",
            "refreshToken": "ref",
            "user": student_user()
        })))
        .mount(&server)
        .await;

    let state = state_for(&server);
    let result = auth::login(
        &state,
        auth::LoginInput {
            email: " student@uni.edu ".to_string(),
            password: "secret123".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(result.dashboard, DashboardKind::Student);
    assert_eq!(result.user.user_type, UserType::Student);
    assert_eq!(state.session.access_token().await.as_deref(), Some("acc"));
    assert_eq!(state.session.refresh_token().await.as_deref(), Some("ref"));
}

#[tokio::test]
async fn login_with_bad_credentials_is_an_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let state = state_for(&server);
    let err = auth::login(
        &state,
        auth::LoginInput {
            email: "student@uni.edu".to_string(),
            password: "wrong".to_string(),
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::Authentication { .. }));
    assert!(!state.session.is_authenticated().await);
}

#[tokio::test]
async fn expired_access_token_is_refreshed_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("Authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_json(json!({"refreshToken": "refresh-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "access-2"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("Authorization", "Bearer access-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(advisor_user(7)))
        .expect(1)
        .mount(&server)
        .await;

    let state = signed_in(&server, advisor_user(7)).await;
    let user = auth::current_user(&state).await.unwrap();

    assert_eq!(user.id, 7);
    assert_eq!(state.session.access_token().await.as_deref(), Some("access-2"));
    // The old refresh token is kept when the backend does not rotate it.
    assert_eq!(
        state.session.refresh_token().await.as_deref(),
        Some("refresh-1")
    );
}

#[tokio::test]
async fn concurrent_lookups_share_one_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_of(vec![
            student_json(1),
            student_json(2),
            student_json(3),
        ])))
        .mount(&server)
        .await;

    for id in [1, 2, 3] {
        Mock::given(method("GET"))
            .and(path(format!("/approvals/student/{}", id)))
            .and(header("Authorization", "Bearer access-2"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(record_json(10 + id, id, Some(true), None)),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path_regex(r"^/approvals/student/\d+$"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    // The backend rotates refresh tokens, so only the first exchange works.
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_json(json!({"refreshToken": "refresh-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "access-2",
            "refreshToken": "refresh-2"
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(401))
        .expect(0)
        .mount(&server)
        .await;

    let state = signed_in(&server, staff_user(40, 1)).await;
    let screen = match open_approval_screen(&state).await.unwrap() {
        StageAccess::Ready(screen) => screen,
        StageAccess::NotAccessible => panic!("expected an approval screen"),
    };

    assert_eq!(screen.rows.len(), 3);
    assert!(screen.rows.iter().all(|r| r.view.record_loaded));
    assert!(state.session.is_authenticated().await);
    assert_eq!(state.session.access_token().await.as_deref(), Some("access-2"));
    assert_eq!(
        state.session.refresh_token().await.as_deref(),
        Some("refresh-2")
    );
}

#[tokio::test]
async fn failed_refresh_clears_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let state = signed_in(&server, advisor_user(7)).await;
    let err = auth::current_user(&state).await.unwrap_err();

    assert!(err.is_authentication_expired());
    assert!(!state.session.is_authenticated().await);
    assert!(state.session.current_user().await.is_none());
}

#[tokio::test]
async fn logout_clears_session_even_if_backend_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let state = signed_in(&server, advisor_user(7)).await;
    auth::logout(&state).await.unwrap();

    assert!(!state.session.is_authenticated().await);
}

#[tokio::test]
async fn student_dashboard_without_record_shows_all_pending() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/approvals/student/1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let state = signed_in(&server, student_user()).await;
    match dashboard::load_dashboard(&state).await.unwrap() {
        dashboard::Dashboard::Student {
            progress,
            record_found,
            ..
        } => {
            assert!(!record_found);
            assert_eq!(progress.current, Some(ApprovalGate::Chain(Stage::Advisor)));
            assert!(!progress.completed);
        }
        other => panic!("unexpected dashboard: {:?}", other),
    }
}

#[tokio::test]
async fn ceremony_changes_need_a_manager() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ceremonies"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 3,
            "name": "Spring 2026",
            "location": "Main Hall",
            "scheduledAt": "2026-06-20T14:00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let input = CeremonyInput {
        name: "Spring 2026".to_string(),
        location: "Main Hall".to_string(),
        scheduled_at: chrono::NaiveDate::from_ymd_opt(2026, 6, 20)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap(),
        faculty: None,
        capacity: None,
        description: None,
    };

    let advisor = signed_in(&server, advisor_user(7)).await;
    let err = ceremonies::create_ceremony(&advisor, input.clone())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(403));

    let student_affairs = signed_in(&server, staff_user(40, 1)).await;
    let created = ceremonies::create_ceremony(&student_affairs, input)
        .await
        .unwrap();
    assert_eq!(created.id, 3);
}

#[tokio::test]
async fn student_can_only_message_own_advisor() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9,
            "senderId": 101,
            "receiverId": 7,
            "subject": "Transcript",
            "content": "Could you check my transcript?",
            "sentAt": "2026-05-01T09:30:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = signed_in(&server, student_user()).await;

    let to_stranger = NewMessage {
        receiver_id: 8,
        subject: "Hi".to_string(),
        content: "Hello".to_string(),
    };
    assert!(messages::send_message(&state, to_stranger).await.is_err());

    let to_advisor = NewMessage {
        receiver_id: 7,
        subject: "Transcript".to_string(),
        content: "Could you check my transcript?".to_string(),
    };
    let sent = messages::send_message(&state, to_advisor).await.unwrap();
    assert_eq!(sent.id, 9);
}

#[tokio::test]
async fn password_change_is_validated_before_sending() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/users/me/password"))
        .and(body_json(json!({
            "currentPassword": "oldpassword",
            "newPassword": "newpassword1"
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let state = signed_in(&server, advisor_user(7)).await;

    let mismatch = profile::PasswordChangeInput {
        current_password: "oldpassword".to_string(),
        new_password: "newpassword1".to_string(),
        confirm_password: "newpassword2".to_string(),
    };
    assert!(profile::change_password(&state, mismatch).await.is_err());

    let valid = profile::PasswordChangeInput {
        current_password: "oldpassword".to_string(),
        new_password: "newpassword1".to_string(),
        confirm_password: "newpassword1".to_string(),
    };
    profile::change_password(&state, valid).await.unwrap();
}
