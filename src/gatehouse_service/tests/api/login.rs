use crate::helpers::{COOKIE_NAME, TestApp, login_body, register_body};

#[tokio::test]
async fn valid_credentials_yield_a_token_and_the_auth_cookie() {
    let app = TestApp::new().await;
    app.post_register(&register_body("alice", "alice@example.com", "Str0ngPassw0rd"))
        .await;

    let response = app.post_login(&login_body("alice", "Str0ngPassw0rd")).await;

    assert_eq!(response.status().as_u16(), 200);
    let cookie_value = response
        .cookies()
        .find(|cookie| cookie.name() == COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .expect("No auth cookie was set");
    assert!(!cookie_value.is_empty());

    let body: serde_json::Value = response.json().await.expect("Body was not valid json");
    assert_eq!(body["username"], "alice");
    assert!(body["token"].as_str().is_some_and(|token| !token.is_empty()));
}

#[tokio::test]
async fn the_username_is_matched_case_insensitively() {
    let app = TestApp::new().await;
    app.post_register(&register_body("Alice", "alice@example.com", "Str0ngPassw0rd"))
        .await;

    let response = app.post_login(&login_body("alice", "Str0ngPassw0rd")).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("Body was not valid json");
    // the summary carries the username as registered, not as typed
    assert_eq!(body["username"], "Alice");
}

#[tokio::test]
async fn every_refusal_reads_exactly_the_same() {
    let app = TestApp::new().await;
    app.post_register(&register_body("alice", "alice@example.com", "Str0ngPassw0rd"))
        .await;

    let wrong_password = app.post_login(&login_body("alice", "WrongPassw0rd")).await;
    let unknown_user = app.post_login(&login_body("nobody", "Str0ngPassw0rd")).await;

    assert_eq!(wrong_password.status().as_u16(), 401);
    assert_eq!(unknown_user.status().as_u16(), 401);

    let wrong_password: serde_json::Value =
        wrong_password.json().await.expect("Body was not valid json");
    let unknown_user: serde_json::Value =
        unknown_user.json().await.expect("Body was not valid json");
    assert_eq!(wrong_password, unknown_user);
    assert_eq!(wrong_password["error"], "invalid username or password");
}

#[tokio::test]
async fn five_failures_lock_out_even_the_correct_password() {
    let app = TestApp::new().await;
    app.post_register(&register_body("alice", "alice@example.com", "Str0ngPassw0rd"))
        .await;

    let expected: serde_json::Value = app
        .post_login(&login_body("alice", "WrongPassw0rd"))
        .await
        .json()
        .await
        .expect("Body was not valid json");
    for _ in 0..4 {
        let response = app.post_login(&login_body("alice", "WrongPassw0rd")).await;
        assert_eq!(response.status().as_u16(), 401);
    }

    // the lock is on, and the right password reads exactly like another
    // wrong one
    let response = app.post_login(&login_body("alice", "Str0ngPassw0rd")).await;
    assert_eq!(response.status().as_u16(), 401);
    let body: serde_json::Value = response.json().await.expect("Body was not valid json");
    assert_eq!(body, expected);
}

#[tokio::test]
async fn a_successful_login_resets_the_failure_count() {
    let app = TestApp::new().await;
    app.post_register(&register_body("alice", "alice@example.com", "Str0ngPassw0rd"))
        .await;

    for _ in 0..4 {
        app.post_login(&login_body("alice", "WrongPassw0rd")).await;
    }
    let response = app.post_login(&login_body("alice", "Str0ngPassw0rd")).await;
    assert_eq!(response.status().as_u16(), 200);

    // the counter started over, so one more failure is nowhere near a lock
    app.post_login(&login_body("alice", "WrongPassw0rd")).await;
    let response = app.post_login(&login_body("alice", "Str0ngPassw0rd")).await;
    assert_eq!(response.status().as_u16(), 200);
}
