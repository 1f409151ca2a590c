// tests/api_integration.rs
//! End-to-end tests against a demo-mode server with no extraction token,
//! so nothing ever leaves the process.

use rocket::http::{ContentType, Header, Status};
use rocket::local::asynchronous::Client;
use serde_json::Value;

use outreach_kit::auth::{AuthConfig, AuthMode};
use outreach_kit::database::DatabaseConfig;
use outreach_kit::extraction::ExtractionClient;
use outreach_kit::web::build_rocket;

async fn test_client() -> Client {
    let db_path = std::env::temp_dir().join(format!(
        "hireloophole_test_{}.db",
        uuid::Uuid::new_v4()
    ));
    let mut db_config = DatabaseConfig::new(db_path);
    db_config.init_pool().await.expect("init pool");
    db_config.migrate().await.expect("migrate");

    let auth_config =
        AuthConfig::new(AuthMode::Demo, "integration-test-secret".to_string()).expect("auth");
    // No token configured: the extraction client must not be reached for
    // invalid URLs and serves the fallback payload for valid ones.
    let extraction = ExtractionClient::new("http://127.0.0.1:1/unreachable".to_string(), None, 5)
        .expect("client");

    let rocket = build_rocket(
        rocket::Config::figment(),
        auth_config,
        db_config,
        extraction,
    );
    Client::tracked(rocket).await.expect("rocket client")
}

async fn demo_token(client: &Client) -> String {
    let response = client
        .post("/api/auth/login")
        .header(ContentType::JSON)
        .body(r#"{"email": "jane@example.com", "password": "anything"}"#)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let body: Value = response.into_json().await.expect("json body");
    assert_eq!(body["success"], true);
    body["data"]["token"].as_str().expect("token").to_string()
}

fn bearer(token: &str) -> Header<'static> {
    Header::new("Authorization", format!("Bearer {}", token))
}

#[rocket::async_test]
async fn demo_login_accepts_arbitrary_credentials() {
    let client = test_client().await;
    let token = demo_token(&client).await;

    let response = client
        .get("/api/me")
        .header(bearer(&token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["email"], "jane@example.com");
}

#[rocket::async_test]
async fn invalid_url_is_rejected_before_any_outbound_call() {
    let client = test_client().await;
    let token = demo_token(&client).await;

    let response = client
        .post("/api/generate")
        .header(ContentType::JSON)
        .header(bearer(&token))
        .body(r#"{"jobUrl": "not a url"}"#)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error_code"], "INVALID_URL");
    assert_eq!(body["error"], "Please enter a company's job posting URL");

    // Nothing was generated or recorded.
    let history = client
        .get("/api/history")
        .header(bearer(&token))
        .dispatch()
        .await
        .into_json::<Value>()
        .await
        .unwrap();
    assert_eq!(history["data"].as_array().unwrap().len(), 0);
}

#[rocket::async_test]
async fn generate_serves_fallback_bundle_and_records_history() {
    let client = test_client().await;
    let token = demo_token(&client).await;

    let response = client
        .post("/api/generate")
        .header(ContentType::JSON)
        .header(bearer(&token))
        .body(
            r#"{
                "jobUrl": "https://techcorp.com/careers/42",
                "resumeFile": {"name": "resume.pdf", "size": 123456, "type": "application/pdf"}
            }"#,
        )
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["success"], true);
    let bundle = &body["data"];
    assert_eq!(bundle["jobDetails"]["url"], "https://techcorp.com/careers/42");
    assert!(bundle["linkedinMessages"]["standard"].is_string());
    assert!(bundle["emailMessages"]["silly"]["subject"].is_string());
    assert!(!bundle["tips"].as_array().unwrap().is_empty());

    let history = client
        .get("/api/history")
        .header(bearer(&token))
        .dispatch()
        .await
        .into_json::<Value>()
        .await
        .unwrap();
    let entries = history["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["url"], "https://techcorp.com/careers/42");
    assert_eq!(entries[0]["relativeTime"], "Just now");
}

#[rocket::async_test]
async fn deleting_history_leaves_loaded_bundle_available() {
    let client = test_client().await;
    let token = demo_token(&client).await;

    for i in 0..2 {
        client
            .post("/api/generate")
            .header(ContentType::JSON)
            .header(bearer(&token))
            .body(format!(r#"{{"jobUrl": "https://techcorp.com/careers/{}"}}"#, i))
            .dispatch()
            .await;
    }

    let history = client
        .get("/api/history")
        .header(bearer(&token))
        .dispatch()
        .await
        .into_json::<Value>()
        .await
        .unwrap();
    let id = history["data"][0]["id"].as_str().unwrap().to_string();

    // Load it, then delete it; the load result stays valid.
    let loaded = client
        .post("/api/history/load")
        .header(ContentType::JSON)
        .header(bearer(&token))
        .body(format!(r#"{{"id": "{}"}}"#, id))
        .dispatch()
        .await
        .into_json::<Value>()
        .await
        .unwrap();
    assert_eq!(loaded["success"], true);

    let deleted = client
        .post("/api/history/delete")
        .header(ContentType::JSON)
        .header(bearer(&token))
        .body(format!(r#"{{"id": "{}"}}"#, id))
        .dispatch()
        .await
        .into_json::<Value>()
        .await
        .unwrap();
    assert_eq!(deleted["success"], true);

    let history = client
        .get("/api/history")
        .header(bearer(&token))
        .dispatch()
        .await
        .into_json::<Value>()
        .await
        .unwrap();
    assert_eq!(history["data"].as_array().unwrap().len(), 1);
}

#[rocket::async_test]
async fn me_without_token_returns_auth_error() {
    let client = test_client().await;

    let response = client.get("/api/me").dispatch().await;
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error_code"], "AUTHORIZATION_ERROR");
}
