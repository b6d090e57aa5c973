use crate::helpers::{TestApp, register_body};

#[tokio::test]
async fn registering_a_valid_account_returns_its_summary() {
    let app = TestApp::new().await;

    let response = app
        .post_register(&register_body("alice", "alice@example.com", "Str0ngPassw0rd"))
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.expect("Body was not valid json");
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@example.com");
    assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
    // no password material in the response, hashed or otherwise
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn a_duplicate_username_is_refused_whatever_its_case() {
    let app = TestApp::new().await;
    app.post_register(&register_body("alice", "alice@example.com", "Str0ngPassw0rd"))
        .await;

    let response = app
        .post_register(&register_body("ALICE", "other@example.com", "Str0ngPassw0rd"))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.expect("Body was not valid json");
    let codes: Vec<&str> = body["errors"]
        .as_array()
        .expect("Body carried no errors array")
        .iter()
        .filter_map(|entry| entry["code"].as_str())
        .collect();
    assert_eq!(codes, vec!["duplicate_username"]);
}

#[tokio::test]
async fn a_duplicate_email_is_refused_whatever_its_case() {
    let app = TestApp::new().await;
    app.post_register(&register_body("alice", "alice@example.com", "Str0ngPassw0rd"))
        .await;

    let response = app
        .post_register(&register_body("bob", "Alice@Example.COM", "Str0ngPassw0rd"))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.expect("Body was not valid json");
    let codes: Vec<&str> = body["errors"]
        .as_array()
        .expect("Body carried no errors array")
        .iter()
        .filter_map(|entry| entry["code"].as_str())
        .collect();
    assert_eq!(codes, vec!["duplicate_email"]);
}

#[tokio::test]
async fn every_violation_comes_back_in_a_single_response() {
    let app = TestApp::new().await;

    let response = app
        .post_register(&register_body("bad name!", "not-an-email", "weak"))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.expect("Body was not valid json");
    let codes: Vec<&str> = body["errors"]
        .as_array()
        .expect("Body carried no errors array")
        .iter()
        .filter_map(|entry| entry["code"].as_str())
        .collect();
    assert!(codes.contains(&"invalid_username"));
    assert!(codes.contains(&"invalid_email"));
    assert!(codes.contains(&"weak_password"));
}

#[tokio::test]
async fn violations_carry_a_message_a_user_can_act_on() {
    let app = TestApp::new().await;

    let response = app
        .post_register(&register_body("alice", "alice@example.com", "short"))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.expect("Body was not valid json");
    let messages: Vec<&str> = body["errors"]
        .as_array()
        .expect("Body carried no errors array")
        .iter()
        .filter_map(|entry| entry["message"].as_str())
        .collect();
    assert!(messages.iter().all(|message| !message.is_empty()));
}

#[tokio::test]
async fn no_confirmation_mail_goes_out_when_confirmation_is_off() {
    let app = TestApp::new().await;

    app.post_register(&register_body("alice", "alice@example.com", "Str0ngPassw0rd"))
        .await;

    assert!(app.email_client.sent().await.is_empty());
}
