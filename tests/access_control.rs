//! Access-control tests for /admin, /profile, and /me: anonymous visitors
//! get 403, authenticated non-admins get 401 on admin pages, admins get
//! through.

mod common;

use reqwest::header::COOKIE;

use common::{build_state, session_json, signed_session_cookie, spawn, test_config};

#[tokio::test]
async fn admin_page_rejects_anonymous_visitors() {
    let dir = tempfile::tempdir().unwrap();
    let state = build_state(test_config(dir.path().to_path_buf())).await;
    let (addr, shutdown) = spawn(state).await;

    let resp = reqwest::get(format!("http://{addr}/admin")).await.unwrap();
    assert_eq!(resp.status(), 403);
    assert_eq!(resp.text().await.unwrap(), "Authentication required");

    let _ = shutdown.send(());
}

#[tokio::test]
async fn admin_page_rejects_non_admin_users() {
    let dir = tempfile::tempdir().unwrap();
    let state = build_state(test_config(dir.path().to_path_buf())).await;
    let (addr, shutdown) = spawn(state).await;

    let config = test_config(dir.path().to_path_buf());
    let cookie = signed_session_cookie(&config, &session_json("grace", false, None));

    let resp = reqwest::Client::new()
        .get(format!("http://{addr}/admin"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    assert_eq!(resp.text().await.unwrap(), "Forbidden");

    let _ = shutdown.send(());
}

#[tokio::test]
async fn admin_page_renders_for_admins() {
    let dir = tempfile::tempdir().unwrap();
    let state = build_state(test_config(dir.path().to_path_buf())).await;
    let (addr, shutdown) = spawn(state).await;

    let config = test_config(dir.path().to_path_buf());
    let cookie = signed_session_cookie(&config, &session_json("grace", true, None));

    let resp = reqwest::Client::new()
        .get(format!("http://{addr}/admin"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("grace"));
    assert!(body.contains("(admin)"));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn profile_rejects_anonymous_visitors() {
    let dir = tempfile::tempdir().unwrap();
    let state = build_state(test_config(dir.path().to_path_buf())).await;
    let (addr, shutdown) = spawn(state).await;

    let resp = reqwest::get(format!("http://{addr}/profile")).await.unwrap();
    assert_eq!(resp.status(), 403);
    assert_eq!(resp.text().await.unwrap(), "Authentication required");

    let _ = shutdown.send(());
}

#[tokio::test]
async fn profile_renders_for_any_signed_in_user() {
    let dir = tempfile::tempdir().unwrap();
    let state = build_state(test_config(dir.path().to_path_buf())).await;
    let (addr, shutdown) = spawn(state).await;

    let config = test_config(dir.path().to_path_buf());
    let cookie = signed_session_cookie(&config, &session_json("grace", false, None));

    let resp = reqwest::Client::new()
        .get(format!("http://{addr}/profile"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.text().await.unwrap().contains("grace"));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn me_returns_the_session_identity() {
    let dir = tempfile::tempdir().unwrap();
    let state = build_state(test_config(dir.path().to_path_buf())).await;
    let (addr, shutdown) = spawn(state).await;

    let config = test_config(dir.path().to_path_buf());
    let cookie = signed_session_cookie(&config, &session_json("grace", true, None));

    let resp = reqwest::Client::new()
        .get(format!("http://{addr}/me"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["login"], "grace");
    assert_eq!(body["admin"], true);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn me_rejects_anonymous_visitors() {
    let dir = tempfile::tempdir().unwrap();
    let state = build_state(test_config(dir.path().to_path_buf())).await;
    let (addr, shutdown) = spawn(state).await;

    let resp = reqwest::get(format!("http://{addr}/me")).await.unwrap();
    assert_eq!(resp.status(), 403);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn validly_signed_garbage_session_is_a_client_error() {
    let dir = tempfile::tempdir().unwrap();
    let state = build_state(test_config(dir.path().to_path_buf())).await;
    let (addr, shutdown) = spawn(state).await;

    // The signature checks out but the payload is not session JSON: this
    // is a broken client, not an anonymous one.
    let config = test_config(dir.path().to_path_buf());
    let cookie = signed_session_cookie(&config, "this is not json");

    let resp = reqwest::Client::new()
        .get(format!("http://{addr}/admin"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn tampered_session_cookie_is_ignored_for_auth() {
    let dir = tempfile::tempdir().unwrap();
    let state = build_state(test_config(dir.path().to_path_buf())).await;
    let (addr, shutdown) = spawn(state).await;

    // A cookie not signed with the server key carries no identity.
    let forged = format!(
        "citydevs.sess={}",
        serde_json::json!({
            "user": { "user_id": "65f000000000000000000001", "login": "mallory", "name": null, "admin": true }
        })
    );
    let resp = reqwest::Client::new()
        .get(format!("http://{addr}/admin"))
        .header(COOKIE, forged)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn logout_clears_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let state = build_state(test_config(dir.path().to_path_buf())).await;
    let (addr, shutdown) = spawn(state).await;

    let config = test_config(dir.path().to_path_buf());
    let cookie = signed_session_cookie(&config, &session_json("grace", true, None));

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();
    let resp = client
        .get(format!("http://{addr}/logout"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers().get("location").unwrap(), "/");

    let set_cookie: Vec<_> = resp
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert!(
        set_cookie.iter().any(|c| c.starts_with("citydevs.sess=")),
        "logout should rewrite the session cookie: {set_cookie:?}"
    );

    let _ = shutdown.send(());
}
