//! End-to-end pipeline tests against a mock backend
//!
//! Covers the cross-cutting contracts of the client: header
//! composition, the single-shot 401 refresh-and-retry discipline,
//! token clearance after a failed refresh, query construction, and
//! error normalization.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use campushub_client::endpoints::courses::CourseFilter;
use campushub_client::vault::{MemoryVault, TokenVault};
use campushub_client::{ApiClient, ErrorKind};
use campushub_domain::{ClientConfig, TokenPair};

async fn client_for(server: &MockServer, vault: Arc<MemoryVault>) -> ApiClient {
    let mut config = ClientConfig::default();
    config.api_base_url = server.uri();
    ApiClient::new(config, vault as Arc<dyn TokenVault>).await.expect("client")
}

async fn vault_with_tokens() -> Arc<MemoryVault> {
    let vault = Arc::new(MemoryVault::new());
    vault.store_tokens(&TokenPair::new("old-access", "old-refresh")).await.unwrap();
    vault
}

fn refresh_success_mock() -> Mock {
    Mock::given(method("POST")).and(path("/auth/refresh")).respond_with(
        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"access_token": "new-access", "refresh_token": "new-refresh"}
        })),
    )
}

fn course_body() -> serde_json::Value {
    json!({
        "success": true,
        "data": [{"id": "c1", "code": "CS101", "title": "Intro to CS"}]
    })
}

#[tokio::test]
async fn authorized_request_carries_bearer_and_device_headers() {
    let server = MockServer::start().await;
    let vault = vault_with_tokens().await;
    let device_id = vault.get_or_create_device_id().await.unwrap();

    Mock::given(method("GET"))
        .and(path("/courses"))
        .and(header("Authorization", "Bearer old-access"))
        .and(header("X-Device-Id", device_id.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(course_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, vault).await;
    let courses = client.list_courses(&CourseFilter::default()).await.expect("courses");

    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].code, "CS101");
}

#[tokio::test]
async fn unauthenticated_request_omits_authorization_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/courses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(course_body()))
        .expect(1)
        .mount(&server)
        .await;

    let vault = Arc::new(MemoryVault::new());
    let client = client_for(&server, vault).await;
    client.list_courses(&CourseFilter::default()).await.expect("courses");

    let requests = server.received_requests().await.unwrap();
    // Never "Bearer null": the header is absent entirely without a token.
    assert!(requests[0].headers.get("authorization").is_none());
    assert!(requests[0].headers.get("x-device-id").is_some());
}

#[tokio::test]
async fn expired_token_is_refreshed_and_request_replayed() {
    let server = MockServer::start().await;

    // First attempt with the stale token is rejected.
    Mock::given(method("GET"))
        .and(path("/courses"))
        .and(header("Authorization", "Bearer old-access"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    // The replay with the refreshed token succeeds.
    Mock::given(method("GET"))
        .and(path("/courses"))
        .and(header("Authorization", "Bearer new-access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(course_body()))
        .expect(1)
        .mount(&server)
        .await;

    refresh_success_mock().expect(1).mount(&server).await;

    let vault = vault_with_tokens().await;
    let client = client_for(&server, vault.clone()).await;

    let courses = client.list_courses(&CourseFilter::default()).await.expect("courses");
    assert_eq!(courses[0].id, "c1");

    // The new pair replaced the old one atomically.
    let tokens = vault.tokens().await.unwrap().unwrap();
    assert_eq!(tokens.access_token, "new-access");
    assert_eq!(tokens.refresh_token, "new-refresh");
}

#[tokio::test]
async fn failed_refresh_clears_tokens_and_surfaces_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/courses"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "refresh token revoked"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let vault = vault_with_tokens().await;
    let client = client_for(&server, vault.clone()).await;

    let err = client.list_courses(&CourseFilter::default()).await.expect_err("failure");

    // The caller sees the original 401-derived error, not a
    // refresh-specific one, and the session is gone.
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert!(vault.tokens().await.unwrap().is_none());
    assert!(!vault.is_authenticated().await);
}

#[tokio::test]
async fn retried_request_is_never_retried_twice() {
    let server = MockServer::start().await;

    // Both the original attempt and the replay are rejected.
    Mock::given(method("GET"))
        .and(path("/courses"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    // Exactly one refresh despite two 401s on the same logical request.
    refresh_success_mock().expect(1).mount(&server).await;

    let vault = vault_with_tokens().await;
    let client = client_for(&server, vault).await;

    let err = client.list_courses(&CourseFilter::default()).await.expect_err("failure");
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    let requests = server.received_requests().await.unwrap();
    let course_calls = requests.iter().filter(|r| r.url.path() == "/courses").count();
    let refresh_calls = requests.iter().filter(|r| r.url.path() == "/auth/refresh").count();
    assert_eq!(course_calls, 2);
    assert_eq!(refresh_calls, 1);
}

#[tokio::test]
async fn refresh_rejection_does_not_recurse() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/courses"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    // The refresh endpoint itself answers 401; the coordinator must
    // treat that as a plain failure, not re-enter the retry logic.
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let vault = vault_with_tokens().await;
    let client = client_for(&server, vault.clone()).await;

    let err = client.list_courses(&CourseFilter::default()).await.expect_err("failure");
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert!(vault.tokens().await.unwrap().is_none());
}

#[tokio::test]
async fn list_filters_omit_empty_values() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/courses"))
        .and(query_param("department", "CS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(course_body()))
        .expect(1)
        .mount(&server)
        .await;

    let vault = Arc::new(MemoryVault::new());
    let client = client_for(&server, vault).await;

    let filter = CourseFilter {
        department: Some("CS".to_string()),
        academic_year: Some(String::new()),
        ..Default::default()
    };
    client.list_courses(&filter).await.expect("courses");

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default();
    assert!(query.contains("department=CS"));
    assert!(!query.contains("academic_year"));
}

#[tokio::test]
async fn server_error_statuses_map_to_fixed_kinds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/courses"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"success": false, "message": "No such catalog"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/staff"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let vault = Arc::new(MemoryVault::new());
    let client = client_for(&server, vault).await;

    let not_found =
        client.list_courses(&CourseFilter::default()).await.expect_err("not found");
    assert_eq!(not_found.kind(), ErrorKind::NotFound);
    // Server-supplied message is preserved verbatim.
    assert_eq!(not_found.message(), "No such catalog");

    let staff_err = client
        .staff_directory(&campushub_client::endpoints::staff::StaffFilter::default())
        .await
        .expect_err("server error");
    assert_eq!(staff_err.kind(), ErrorKind::Server);
    assert!(!staff_err.message().is_empty());
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error_without_retry() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener); // free the port so connections are refused

    let vault = Arc::new(MemoryVault::new());
    let mut config = ClientConfig::default();
    config.api_base_url = format!("http://{}", addr);
    let client =
        ApiClient::new(config, vault as Arc<dyn TokenVault>).await.expect("client");

    let err = client.list_courses(&CourseFilter::default()).await.expect_err("network");
    assert_eq!(err.kind(), ErrorKind::Network);
}

#[tokio::test]
async fn login_stores_pair_and_logout_clears_it() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "user": {
                    "id": "u1",
                    "email": "amina@school.edu",
                    "full_name": "Amina Diallo",
                    "role": "student"
                },
                "access_token": "a1",
                "refresh_token": "r1"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let vault = Arc::new(MemoryVault::new());
    let client = client_for(&server, vault.clone()).await;

    let profile = client
        .login(&campushub_client::endpoints::auth::LoginRequest {
            email: "amina@school.edu".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .expect("login");
    assert_eq!(profile.full_name, "Amina Diallo");

    let tokens = vault.tokens().await.unwrap().expect("pair stored");
    assert_eq!(tokens.access_token, "a1");
    assert_eq!(tokens.refresh_token, "r1");

    client.logout().await.expect("logout");
    assert!(vault.tokens().await.unwrap().is_none());
}

#[tokio::test]
async fn cached_get_reuses_payload_within_ttl() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/staff/departments"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "data": ["Science", "Arts"]})),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    let vault = Arc::new(MemoryVault::new());
    let client = client_for(&server, vault).await;

    let first: Vec<String> = client.get_cached("/staff/departments").await.expect("first");
    let second: Vec<String> = client.get_cached("/staff/departments").await.expect("second");
    assert_eq!(first, second);
    assert_eq!(first, ["Science", "Arts"]);

    // Invalidation forces the next call back to the network.
    client.invalidate_cached("/staff/departments");
    Mock::given(method("GET"))
        .and(path("/staff/departments"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "data": ["Science"]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let third: Vec<String> = client.get_cached("/staff/departments").await.expect("third");
    assert_eq!(third, ["Science"]);
}

#[tokio::test]
async fn envelope_failure_on_success_status_is_a_validation_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/courses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Semester is not open yet"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let vault = Arc::new(MemoryVault::new());
    let client = client_for(&server, vault).await;

    let err = client.list_courses(&CourseFilter::default()).await.expect_err("failure");
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.message(), "Semester is not open yet");
}
