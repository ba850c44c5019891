use reqwest::StatusCode;

use crate::common::mock_browser::location;
use crate::common::{MockBrowser, TestServer};

#[tokio::test]
async fn test_register_redirects_to_login_with_one_time_flash() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url, true);

    let response = browser.register("alice", "a@x.com", "p1").await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/login"));

    let first = browser.get("/login").await?;
    assert_eq!(first.status(), StatusCode::OK);
    assert!(first.text().await?.contains("Registration successful!"));

    // The flash is consumed by the first render
    let second = browser.get("/login").await?;
    assert!(!second.text().await?.contains("Registration successful!"));

    Ok(())
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url, true);

    browser.register("alice", "a@x.com", "p1").await?;
    let response = browser.register("alice2", "a@x.com", "p2").await?;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(
        response
            .text()
            .await?
            .contains("Username or email is already registered")
    );

    // No second account was created with the new password
    let login = browser.login("a@x.com", "p2").await?;
    assert_eq!(login.status(), StatusCode::OK);
    assert!(!browser.is_authenticated().await?);

    Ok(())
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url, true);

    browser.register("alice", "a@x.com", "p1").await?;
    let response = browser.register("alice", "b@x.com", "p1").await?;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let login = browser.login("b@x.com", "p1").await?;
    assert_eq!(login.status(), StatusCode::OK);
    assert!(!browser.is_authenticated().await?);

    Ok(())
}

#[tokio::test]
async fn test_invalid_fields_rerender_form() -> Result<(), Box<dyn std::error::Error>> {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url, true);

    let cases = [
        ("", "a@x.com", "p1"),
        ("this-name-is-too-long", "a@x.com", "p1"),
        ("alice", "no-at-sign", "p1"),
        ("alice", "a@x.com", ""),
    ];

    for (username, email, password) in cases {
        let response = browser.register(username, email, password).await?;
        assert_eq!(
            response.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "({username:?}, {email:?}, {password:?})"
        );
        assert!(response.text().await?.contains("class=\"flash danger\""));
    }

    Ok(())
}
