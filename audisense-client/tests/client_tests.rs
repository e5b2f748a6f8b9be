//! End-to-end tests for audisense-client against a live server
//!
//! Tests cover:
//! - Controller CRUD through the HTTP gateway
//! - Two-call update failing on the re-read
//! - Transport, decode and server-side validation failures
//! - Presenter list ordering over seeded data

use audisense_api::{build_router, AppState};
use audisense_client::presentation::{FormAction, Mode};
use audisense_client::{HearingTestClient, HearingTestsPresenter, HttpDataGateway};
use audisense_common::config::ApiSettings;
use audisense_common::HearingTestRequest;
use axum::{
    http::StatusCode,
    routing::{get, put},
    Router,
};
use chrono::{Duration, TimeZone, Utc};

/// Test helper: Serve `router` on an ephemeral port, return its base URL
async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Should bind");
    let addr = listener.local_addr().expect("Should have address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Server error");
    });
    format!("http://{}", addr)
}

fn client_for(base_url: &str) -> HearingTestClient<HttpDataGateway> {
    let settings = ApiSettings {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
    };
    HearingTestClient::new(HttpDataGateway::new(&settings).expect("Should build client"))
}

fn smith() -> HearingTestRequest {
    HearingTestRequest {
        tester_name: "Dr. Smith".to_string(),
        date_conducted: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        result: "Normal hearing range".to_string(),
    }
}

// =============================================================================
// Controller over HTTP
// =============================================================================

#[tokio::test]
async fn test_crud_round_trip() {
    let base_url = spawn_server(build_router(AppState::in_memory())).await;
    let client = client_for(&base_url);

    assert_eq!(client.list().await, Some(Vec::new()));

    let created = client.create(&smith()).await.expect("Create should succeed");
    assert_eq!(created.id, 1);
    assert_eq!(created.tester_name, "Dr. Smith");
    assert_eq!(created.date_conducted, smith().date_conducted);

    assert_eq!(client.get(1).await, Some(created.clone()));
    assert_eq!(client.list().await, Some(vec![created]));

    let changed = HearingTestRequest {
        result: "Mild hearing loss detected".to_string(),
        ..smith()
    };
    let updated = client.update(1, &changed).await.expect("Update should succeed");
    assert_eq!(updated.id, 1);
    assert_eq!(updated.result, "Mild hearing loss detected");

    assert!(client.delete(1).await);
    assert_eq!(client.get(1).await, None);
    assert!(!client.delete(1).await);
    assert!(client.update(1, &smith()).await.is_none());
}

#[tokio::test]
async fn test_base_url_with_api_suffix() {
    let base_url = spawn_server(build_router(AppState::in_memory())).await;
    let client = client_for(&format!("{}/api/", base_url));

    assert!(client.create(&smith()).await.is_some());
    assert_eq!(client.list().await.map(|l| l.len()), Some(1));
}

#[tokio::test]
async fn test_update_fails_when_refetch_fails() {
    // PUT accepted, GET of the same record answers 404
    let router = Router::new().route(
        "/api/hearingtests/:id",
        put(|| async { StatusCode::OK }).get(|| async { StatusCode::NOT_FOUND }),
    );
    let base_url = spawn_server(router).await;
    let client = client_for(&base_url);

    assert!(client.update(7, &smith()).await.is_none());
}

#[tokio::test]
async fn test_server_rejection_is_none() {
    let base_url = spawn_server(build_router(AppState::in_memory())).await;
    let client = client_for(&base_url);

    let too_long = HearingTestRequest {
        tester_name: "a".repeat(101),
        ..smith()
    };
    assert!(client.create(&too_long).await.is_none());
    assert_eq!(client.list().await, Some(Vec::new()));
}

#[tokio::test]
async fn test_undecodable_body_is_none() {
    // 200 responses whose bodies are not hearing tests
    let router = Router::new()
        .route("/api/hearingtests", get(|| async { "not json" }))
        .route(
            "/api/hearingtests/:id",
            get(|| async { r#"{"id": 1, "testerName": "Dr. Smith"}"# }),
        );
    let base_url = spawn_server(router).await;
    let client = client_for(&base_url);

    assert_eq!(client.list().await, None);
    assert_eq!(client.get(1).await, None);
}

#[tokio::test]
async fn test_unreachable_server() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Should bind");
    let addr = listener.local_addr().expect("Should have address");
    drop(listener);

    let client = client_for(&format!("http://{}", addr));
    assert_eq!(client.list().await, None);
    assert!(client.create(&smith()).await.is_none());
    assert!(!client.delete(1).await);
}

// =============================================================================
// Presenter end to end
// =============================================================================

#[tokio::test]
async fn test_presenter_lists_seeded_data_newest_first() {
    let state = AppState::in_memory();
    state
        .service
        .seed_sample_data(Utc::now())
        .await
        .expect("Seeding should succeed");
    let base_url = spawn_server(build_router(state)).await;

    let mut presenter = HearingTestsPresenter::new(client_for(&base_url));
    assert!(presenter.show_list().await);

    let rows: Vec<(&str, String)> = presenter
        .items()
        .iter()
        .map(|item| (item.tester_name(), item.days_ago(presenter.now())))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Dr. Johnson", "3 days ago".to_string()),
            ("Dr. Smith", "7 days ago".to_string()),
        ]
    );
    assert_eq!(presenter.status(), "Loaded 2 hearing tests");
}

#[tokio::test]
async fn test_presenter_create_edit_delete() {
    let base_url = spawn_server(build_router(AppState::in_memory())).await;
    let mut presenter = HearingTestsPresenter::new(client_for(&base_url));
    presenter.show_list().await;

    presenter.begin_create();
    presenter.form_mut().tester_name = "Dr. Smith".to_string();
    presenter.form_mut().date_conducted = Utc::now() - Duration::days(1);
    presenter.form_mut().result = "Normal hearing range".to_string();
    assert!(presenter.submit(FormAction::Save).await);
    assert_eq!(presenter.items().len(), 1);

    let id = presenter.items()[0].id();
    assert!(presenter.begin_edit(id));
    presenter.form_mut().tester_name = "Dr. Johnson".to_string();
    assert!(presenter.submit(FormAction::Save).await);
    assert_eq!(presenter.mode(), Mode::ViewingList);
    assert_eq!(presenter.items()[0].tester_name(), "Dr. Johnson");

    assert!(presenter.delete(id).await);
    assert!(presenter.items().is_empty());
    assert_eq!(presenter.client().get(id).await, None);
}
