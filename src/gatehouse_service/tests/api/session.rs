use reqwest::header::COOKIE;

use crate::helpers::{COOKIE_NAME, TestApp, auth_cookie_header, login_body, register_body};

#[tokio::test]
async fn the_health_endpoint_answers() {
    let app = TestApp::new().await;

    let response = app
        .http_client
        .get(format!("{}/healthz", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn an_anonymous_request_sees_a_signed_out_session() {
    let app = TestApp::new().await;

    let response = app.get_session().await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("Body was not valid json");
    assert_eq!(body["isAuthenticated"], false);
    assert_eq!(body["displayName"], "");
}

#[tokio::test]
async fn the_auth_cookie_carries_the_session() {
    let app = TestApp::new().await;
    app.post_register(&register_body("alice", "alice@example.com", "Str0ngPassw0rd"))
        .await;
    let login = app.post_login(&login_body("alice", "Str0ngPassw0rd")).await;
    let cookie = auth_cookie_header(&login, COOKIE_NAME).expect("No auth cookie was set");

    let response = app
        .http_client
        .get(format!("{}/session", app.address))
        .header(COOKIE, cookie)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("Body was not valid json");
    assert_eq!(body["isAuthenticated"], true);
    assert_eq!(body["displayName"], "alice");
}

#[tokio::test]
async fn a_bearer_token_carries_the_session_without_cookies() {
    let app = TestApp::new().await;
    app.post_register(&register_body("alice", "alice@example.com", "Str0ngPassw0rd"))
        .await;
    let login: serde_json::Value = app
        .post_login(&login_body("alice", "Str0ngPassw0rd"))
        .await
        .json()
        .await
        .expect("Body was not valid json");
    let token = login["token"]
        .as_str()
        .expect("Login carried no token")
        .to_string();

    let response = app
        .http_client
        .get(format!("{}/session", app.address))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("Body was not valid json");
    assert_eq!(body["isAuthenticated"], true);
    assert_eq!(body["displayName"], "alice");
}

#[tokio::test]
async fn a_tampered_token_is_an_anonymous_session() {
    let app = TestApp::new().await;

    let response = app
        .http_client
        .get(format!("{}/session", app.address))
        .bearer_auth("not.a.token")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("Body was not valid json");
    assert_eq!(body["isAuthenticated"], false);
}

#[tokio::test]
async fn logging_out_sends_the_removal_cookie() {
    let app = TestApp::new().await;

    let response = app.post_logout().await;

    assert_eq!(response.status().as_u16(), 200);
    let removal = response
        .cookies()
        .find(|cookie| cookie.name() == COOKIE_NAME)
        .expect("No removal cookie was set");
    assert!(removal.value().is_empty());
}

#[tokio::test]
async fn the_partial_greets_the_signed_in_user() {
    let app = TestApp::new().await;
    app.post_register(&register_body("alice", "alice@example.com", "Str0ngPassw0rd"))
        .await;
    let login = app.post_login(&login_body("alice", "Str0ngPassw0rd")).await;
    let cookie = auth_cookie_header(&login, COOKIE_NAME).expect("No auth cookie was set");

    let html = app
        .http_client
        .get(format!("{}/session/partial", app.address))
        .header(COOKIE, cookie)
        .send()
        .await
        .expect("Failed to execute request")
        .text()
        .await
        .expect("Failed to read response body");

    assert!(html.contains("Hello alice"));
    assert!(html.contains("Log out"));
}

#[tokio::test]
async fn the_partial_offers_the_entry_links_when_signed_out() {
    let app = TestApp::new().await;

    let html = app
        .get_session_partial()
        .await
        .text()
        .await
        .expect("Failed to read response body");

    assert!(html.contains("Register"));
    assert!(html.contains("Log in"));
    assert!(!html.contains("Hello"));
}
