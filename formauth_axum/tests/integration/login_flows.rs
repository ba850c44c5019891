use reqwest::StatusCode;

use crate::common::mock_browser::location;
use crate::common::{MockBrowser, TestServer};

#[tokio::test]
async fn test_register_login_dashboard() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url, true);

    browser.register("alice", "a@x.com", "p1").await?;

    let response = browser.login("a@x.com", "p1").await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/dashboard"));

    let dashboard = browser.get("/dashboard").await?;
    assert_eq!(dashboard.status(), StatusCode::OK);
    assert!(dashboard.text().await?.contains("Hello, alice!"));

    Ok(())
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url, true);

    browser.register("alice", "Alice@X.com", "p1").await?;
    let response = browser.login("  alice@x.COM ", "p1").await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(browser.is_authenticated().await?);

    Ok(())
}

#[tokio::test]
async fn test_wrong_password_stays_anonymous() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url, true);

    browser.register("alice", "a@x.com", "p1").await?;
    let response = browser.login("a@x.com", "wrong").await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await?.contains("Invalid email or password"));
    assert!(!browser.is_authenticated().await?);

    Ok(())
}

#[tokio::test]
async fn test_unknown_email_matches_wrong_password() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url, true);

    browser.register("alice", "a@x.com", "p1").await?;
    // Follow the redirect so the registration notice is consumed
    browser.get("/login").await?;

    let wrong_password = browser.login("a@x.com", "nope").await?;
    let wrong_status = wrong_password.status();
    let wrong_cookies = wrong_password.headers().get_all("set-cookie").iter().count();
    let wrong_body = wrong_password.text().await?;

    // Same submitted email, so the pre-filled form is identical too
    let server2 = TestServer::start().await?;
    let other = MockBrowser::new(&server2.base_url, true);
    let unknown = other.login("a@x.com", "nope").await?;
    let unknown_status = unknown.status();
    let unknown_cookies = unknown.headers().get_all("set-cookie").iter().count();
    let unknown_body = unknown.text().await?;

    assert_eq!(wrong_status, unknown_status);
    assert_eq!(wrong_cookies, unknown_cookies);
    assert_eq!(wrong_body, unknown_body);
    assert!(!browser.is_authenticated().await?);
    assert!(!other.is_authenticated().await?);

    Ok(())
}

#[tokio::test]
async fn test_missing_login_fields_are_unprocessable() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url, true);

    let response = browser.post_form("/login", &[("email", "a@x.com")]).await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(!browser.is_authenticated().await?);

    Ok(())
}

#[tokio::test]
async fn test_session_cookie_attributes() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url, true);

    browser.register("alice", "a@x.com", "p1").await?;
    let response = browser.login("a@x.com", "p1").await?;

    let set_cookie = response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("SessionId="))
        .expect("session cookie")
        .to_string();

    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age=600"));

    Ok(())
}

#[tokio::test]
async fn test_failed_login_drops_earlier_notice() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url, true);

    browser.register("alice", "a@x.com", "p1").await?;
    let failed = browser.login("a@x.com", "wrong").await?;
    let failed_page = failed.text().await?;
    assert!(failed_page.contains("Invalid email or password"));
    assert!(!failed_page.contains("Registration successful!"));

    // The registration notice does not resurface later
    let later = browser.get("/login").await?.text().await?;
    assert!(!later.contains("Registration successful!"));

    Ok(())
}
