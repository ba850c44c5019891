use reqwest::StatusCode;

use crate::common::mock_browser::{location, set_cookie_pair};
use crate::common::test_server::test_config;
use crate::common::{MockBrowser, TestServer};

#[tokio::test]
async fn test_root_is_public() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url, true);

    let response = browser.get("/").await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await?, "Hello World");

    Ok(())
}

#[tokio::test]
async fn test_protected_routes_redirect_anonymous() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url, true);

    for path in ["/dashboard", "/logout", "/home"] {
        let response = browser.get(path).await?;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location(&response).as_deref(), Some("/login"), "{path}");
    }

    Ok(())
}

#[tokio::test]
async fn test_home_requires_session() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url, true);

    browser.register("alice", "a@x.com", "p1").await?;
    browser.login("a@x.com", "p1").await?;

    let response = browser.get("/home").await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await?.contains("<h1>Home</h1>"));

    Ok(())
}

#[tokio::test]
async fn test_logout_returns_to_anonymous() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url, true);

    browser.register("alice", "a@x.com", "p1").await?;
    browser.login("a@x.com", "p1").await?;
    assert!(browser.is_authenticated().await?);

    let response = browser.get("/logout").await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/login"));

    let dashboard = browser.get("/dashboard").await?;
    assert_eq!(dashboard.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&dashboard).as_deref(), Some("/login"));

    Ok(())
}

#[tokio::test]
async fn test_old_cookie_is_dead_after_logout() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url, true);
    browser.register("alice", "a@x.com", "p1").await?;

    // A browser without a cookie jar replays the session cookie by hand
    let manual = MockBrowser::new(&server.base_url, false);
    let login = manual.login("a@x.com", "p1").await?;
    let cookie = set_cookie_pair(&login, "SessionId").expect("session cookie");

    let before = manual.get_with_cookie("/dashboard", &cookie).await?;
    assert_eq!(before.status(), StatusCode::OK);

    manual.get_with_cookie("/logout", &cookie).await?;

    let after = manual.get_with_cookie("/dashboard", &cookie).await?;
    assert_eq!(after.status(), StatusCode::SEE_OTHER);

    Ok(())
}

#[tokio::test]
async fn test_tampered_cookie_is_anonymous() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url, false);
    browser.register("alice", "a@x.com", "p1").await?;

    let login = browser.login("a@x.com", "p1").await?;
    let cookie = set_cookie_pair(&login, "SessionId").expect("session cookie");
    let (session_id, _) = cookie.rsplit_once('.').expect("signed cookie");

    let forged = format!("{session_id}.AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA");
    let response = browser.get_with_cookie("/dashboard", &forged).await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let unsigned = browser.get_with_cookie("/dashboard", session_id).await?;
    assert_eq!(unsigned.status(), StatusCode::SEE_OTHER);

    Ok(())
}

#[tokio::test]
async fn test_expired_session_is_anonymous() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = test_config();
    config.session_cookie_max_age = 1;
    let server = TestServer::start_with(config).await?;
    assert_eq!(server.config.session_cookie_max_age, 1);

    let browser = MockBrowser::new(&server.base_url, false);
    browser.register("alice", "a@x.com", "p1").await?;
    let login = browser.login("a@x.com", "p1").await?;
    let cookie = set_cookie_pair(&login, "SessionId").expect("session cookie");

    tokio::time::sleep(std::time::Duration::from_millis(2100)).await;

    let response = browser.get_with_cookie("/dashboard", &cookie).await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/login"));

    Ok(())
}

#[tokio::test]
async fn test_logout_shows_notice_once() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url, true);

    browser.register("alice", "a@x.com", "p1").await?;
    // Consume the registration flash
    browser.get("/login").await?;
    browser.login("a@x.com", "p1").await?;
    browser.get("/logout").await?;

    let login_page = browser.get("/login").await?.text().await?;
    assert!(login_page.contains("You have been logged out."));

    let again = browser.get("/login").await?.text().await?;
    assert!(!again.contains("You have been logged out."));

    Ok(())
}
