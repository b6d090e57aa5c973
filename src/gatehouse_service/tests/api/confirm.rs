use crate::helpers::{TestApp, login_body, register_body};

#[tokio::test]
async fn an_unconfirmed_account_cannot_log_in_until_it_confirms() {
    let app = TestApp::with_confirmation_required().await;
    app.post_register(&register_body("alice", "alice@example.com", "Str0ngPassw0rd"))
        .await;

    let refused = app.post_login(&login_body("alice", "Str0ngPassw0rd")).await;
    assert_eq!(refused.status().as_u16(), 401);
    let body: serde_json::Value = refused.json().await.expect("Body was not valid json");
    // an unconfirmed account is indistinguishable from a bad password
    assert_eq!(body["error"], "invalid username or password");

    let token = app.last_confirmation_token().await;
    let confirmed = app
        .post_confirm(&serde_json::json!({ "token": token }))
        .await;
    assert_eq!(confirmed.status().as_u16(), 200);
    let body: serde_json::Value = confirmed.json().await.expect("Body was not valid json");
    assert_eq!(body["username"], "alice");

    let granted = app.post_login(&login_body("alice", "Str0ngPassw0rd")).await;
    assert_eq!(granted.status().as_u16(), 200);
}

#[tokio::test]
async fn the_confirmation_mail_goes_to_the_registered_address() {
    let app = TestApp::with_confirmation_required().await;

    app.post_register(&register_body("alice", "alice@example.com", "Str0ngPassw0rd"))
        .await;

    let sent = app.email_client.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, "alice@example.com");
    assert_eq!(sent[0].subject, "Confirm your account");
}

#[tokio::test]
async fn a_confirmation_token_spends_on_first_use() {
    let app = TestApp::with_confirmation_required().await;
    app.post_register(&register_body("alice", "alice@example.com", "Str0ngPassw0rd"))
        .await;
    let token = app.last_confirmation_token().await;

    let first = app
        .post_confirm(&serde_json::json!({ "token": token }))
        .await;
    assert_eq!(first.status().as_u16(), 200);

    let second = app
        .post_confirm(&serde_json::json!({ "token": token }))
        .await;
    assert_eq!(second.status().as_u16(), 400);
}

#[tokio::test]
async fn an_unknown_confirmation_token_is_refused() {
    let app = TestApp::with_confirmation_required().await;

    let response = app
        .post_confirm(&serde_json::json!({ "token": "nonsense" }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.expect("Body was not valid json");
    assert_eq!(body["error"], "invalid or expired confirmation token");
}
