//! End-to-end tests for the session authentication service.

use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;
use vuln_labs::Service;

mod common;

async fn start(ttl_secs: u64) -> (tempfile::TempDir, common::TestServer) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = common::test_config(dir.path());
    config.auth.session_ttl_secs = ttl_secs;
    let server = common::spawn_service(Service::Auth, config).await;
    (dir, server)
}

async fn login(server: &common::TestServer, body: Value) -> reqwest::Response {
    common::client()
        .post(server.url("/api/login"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

async fn me(server: &common::TestServer, token: &str) -> (StatusCode, Value) {
    let res = common::client()
        .get(server.url("/api/me"))
        .header("Cookie", format!("session={}", token))
        .send()
        .await
        .unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn test_login_me_logout() {
    let (_dir, server) = start(3600).await;

    let res = login(&server, json!({ "username": "student", "password": "password123" })).await;
    assert_eq!(res.status(), StatusCode::OK);

    let cookie = common::header_str(res.headers().get("set-cookie")).to_string();
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Max-Age=3600"));
    assert_eq!(common::header_str(res.headers().get("cache-control")), "no-store, no-cache, must-revalidate");

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    let token = body["token"].as_str().unwrap().to_string();
    assert!(cookie.starts_with(&format!("session={};", token)));

    let (status, body) = me(&server, &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "authenticated": true, "username": "student" }));

    for _ in 0..2 {
        let res = common::client()
            .post(server.url("/api/logout"))
            .header("Cookie", format!("session={}", token))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(common::header_str(res.headers().get("set-cookie")).contains("Max-Age=0"));
        assert_eq!(res.json::<Value>().await.unwrap(), json!({ "success": true }));
    }

    let (status, body) = me(&server, &token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "authenticated": false }));
}

#[tokio::test]
async fn test_failed_logins_are_identical() {
    let (_dir, server) = start(3600).await;

    let wrong_password = login(&server, json!({ "username": "student", "password": "nope" })).await;
    let unknown_user = login(&server, json!({ "username": "mallory", "password": "password123" })).await;
    let missing_fields = login(&server, json!({})).await;

    let mut bodies = Vec::new();
    for res in [wrong_password, unknown_user, missing_fields] {
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.headers().get("set-cookie").is_none());
        bodies.push(res.bytes().await.unwrap());
    }

    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(bodies[1], bodies[2]);
    let body: Value = serde_json::from_slice(&bodies[0]).unwrap();
    assert_eq!(body, json!({ "success": false, "message": "Invalid username or password" }));
}

#[tokio::test]
async fn test_me_without_or_with_bogus_cookie() {
    let (_dir, server) = start(3600).await;

    let res = common::client().get(server.url("/api/me")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let (status, _) = me(&server, "00000000-0000-4000-8000-000000000000").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_session_succeeds() {
    let (_dir, server) = start(3600).await;

    let res = common::client().post(server.url("/api/logout")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({ "success": true }));
}

#[tokio::test]
async fn test_session_expires() {
    let (_dir, server) = start(1).await;

    let res = login(&server, json!({ "username": "student", "password": "password123" })).await;
    let token = res.json::<Value>().await.unwrap()["token"].as_str().unwrap().to_string();

    assert_eq!(me(&server, &token).await.0, StatusCode::OK);
    tokio::time::sleep(Duration::from_millis(1200)).await;
    assert_eq!(me(&server, &token).await.0, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let (_dir, server) = start(3600).await;
    let creds = json!({ "username": "student", "password": "password123" });

    let first = login(&server, creds.clone()).await.json::<Value>().await.unwrap();
    let second = login(&server, creds).await.json::<Value>().await.unwrap();
    let (first, second) = (first["token"].as_str().unwrap(), second["token"].as_str().unwrap());
    assert_ne!(first, second);

    common::client()
        .post(server.url("/api/logout"))
        .header("Cookie", format!("session={}", first))
        .send()
        .await
        .unwrap();

    assert_eq!(me(&server, first).await.0, StatusCode::UNAUTHORIZED);
    assert_eq!(me(&server, second).await.0, StatusCode::OK);
}

#[tokio::test]
async fn test_wrong_method_is_not_found() {
    let (_dir, server) = start(3600).await;
    let client = common::client();

    let requests = [
        client.get(server.url("/api/login")),
        client.get(server.url("/api/logout")),
        client.post(server.url("/api/me")),
    ];
    for req in requests {
        let res = req.send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(res.text().await.unwrap(), "Not found");
    }
}
