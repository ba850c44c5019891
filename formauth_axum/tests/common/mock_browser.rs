use reqwest::{Client, Response, StatusCode};

/// Mock browser client for integration testing
///
/// Keeps cookies between requests and never follows redirects, so tests can
/// assert on each `303` and its `Location`.
pub struct MockBrowser {
    client: Client,
    base_url: String,
}

impl MockBrowser {
    pub fn new(base_url: &str, use_cookies: bool) -> Self {
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .cookie_store(use_cookies)
            .build()
            .expect("reqwest client");

        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    pub async fn get(&self, path: &str) -> Result<Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, path);
        self.client.get(&url).send().await
    }

    /// GET with an explicit `Cookie` header, for browsers without a cookie store
    pub async fn get_with_cookie(
        &self,
        path: &str,
        cookie: &str,
    ) -> Result<Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .get(&url)
            .header(reqwest::header::COOKIE, cookie)
            .send()
            .await
    }

    pub async fn post_form(
        &self,
        path: &str,
        form_data: &[(&str, &str)],
    ) -> Result<Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, path);
        self.client.post(&url).form(form_data).send().await
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Response, reqwest::Error> {
        self.post_form(
            "/register",
            &[
                ("username", username),
                ("email", email),
                ("password", password),
            ],
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Response, reqwest::Error> {
        self.post_form("/login", &[("email", email), ("password", password)])
            .await
    }

    /// True when `/dashboard` renders instead of redirecting to `/login`
    pub async fn is_authenticated(&self) -> Result<bool, reqwest::Error> {
        let response = self.get("/dashboard").await?;
        Ok(response.status() == StatusCode::OK)
    }
}

/// `Location` header of a redirect
pub fn location(response: &Response) -> Option<String> {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// `name=value` of the first `Set-Cookie` header for `name`
pub fn set_cookie_pair(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with(&format!("{name}=")))
        .map(str::to_string)
}
