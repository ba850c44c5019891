//! Signed session and flash cookies
//!
//! Every cookie value this module writes has the shape `<payload>.<tag>` where
//! `tag` is the base64url HMAC-SHA256 of `payload` under the server secret.
//! A cookie whose tag does not match is ignored as if it were absent.

use std::sync::Arc;

use headers::{Cookie, HeaderMapExt};
use hmac::{Hmac, Mac};
use http::HeaderMap;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::config::AuthConfig;
use crate::session::backend::SessionBackend;
use crate::session::errors::SessionError;
use crate::session::types::Flash;
use crate::userdb::UserId;
use crate::utils::{CookieAttrs, base64url_decode, base64url_encode, header_set_cookie};

type HmacSha256 = Hmac<Sha256>;

/// Cookie carrying a pending flash message
pub const FLASH_COOKIE_NAME: &str = "formauth_flash";
const FLASH_COOKIE_MAX_AGE: i64 = 60;
const EXPIRED_COOKIE_MAX_AGE: i64 = -86400;

/// Tracks which user, if any, a browser is logged in as
pub struct SessionManager {
    backend: Arc<dyn SessionBackend>,
    secret: Vec<u8>,
    cookie_name: String,
    max_age: u64,
    attrs: CookieAttrs,
}

impl SessionManager {
    pub fn new(backend: Arc<dyn SessionBackend>, config: &AuthConfig) -> Self {
        Self {
            backend,
            secret: config.server_secret.clone(),
            cookie_name: config.session_cookie_name.clone(),
            max_age: config.session_cookie_max_age,
            attrs: CookieAttrs {
                secure: config.session_cookie_secure,
            },
        }
    }

    /// User of the session named by the request's session cookie
    pub async fn current_user(&self, headers: &HeaderMap) -> Result<Option<UserId>, SessionError> {
        let Some(session_id) = self.session_id_from_headers(headers)? else {
            return Ok(None);
        };
        self.backend.current_user(&session_id).await
    }

    /// Start a session for `user_id`. The returned headers set the session cookie.
    #[tracing::instrument(skip(self), fields(user_id = %user_id))]
    pub async fn login(&self, user_id: UserId) -> Result<HeaderMap, SessionError> {
        let max_age = i64::try_from(self.max_age)
            .map_err(|_| SessionError::Cookie(format!("Max-Age {} is out of range", self.max_age)))?;
        let session_id = self.backend.login(user_id).await?;
        let value = self.sign(&session_id)?;

        let mut headers = HeaderMap::new();
        header_set_cookie(&mut headers, &self.cookie_name, &value, max_age, self.attrs)?;

        tracing::info!("Session established");
        Ok(headers)
    }

    /// End the request's session, if any. The returned headers expire the cookie.
    #[tracing::instrument(skip_all)]
    pub async fn logout(&self, headers: &HeaderMap) -> Result<HeaderMap, SessionError> {
        if let Some(session_id) = self.session_id_from_headers(headers)? {
            self.backend.logout(&session_id).await?;
            tracing::info!("Session ended");
        }

        let mut response_headers = HeaderMap::new();
        header_set_cookie(
            &mut response_headers,
            &self.cookie_name,
            "",
            EXPIRED_COOKIE_MAX_AGE,
            self.attrs,
        )?;
        Ok(response_headers)
    }

    /// Queue `flash` for the next page the browser renders
    pub fn set_flash(&self, headers: &mut HeaderMap, flash: &Flash) -> Result<(), SessionError> {
        let json = serde_json::to_vec(flash).map_err(|e| SessionError::Cookie(e.to_string()))?;
        let value = self.sign(&base64url_encode(&json))?;
        header_set_cookie(
            headers,
            FLASH_COOKIE_NAME,
            &value,
            FLASH_COOKIE_MAX_AGE,
            self.attrs,
        )?;
        Ok(())
    }

    /// Read the pending flash message.
    ///
    /// The returned headers clear the flash cookie whenever one was sent, so a
    /// message is shown at most once.
    pub fn take_flash(
        &self,
        headers: &HeaderMap,
    ) -> Result<(Option<Flash>, HeaderMap), SessionError> {
        let mut response_headers = HeaderMap::new();

        let Some(raw) = cookie_value(headers, FLASH_COOKIE_NAME) else {
            return Ok((None, response_headers));
        };

        header_set_cookie(
            &mut response_headers,
            FLASH_COOKIE_NAME,
            "",
            EXPIRED_COOKIE_MAX_AGE,
            self.attrs,
        )?;

        let flash = self
            .verify(&raw)?
            .and_then(|payload| base64url_decode(&payload).ok())
            .and_then(|json| serde_json::from_slice::<Flash>(&json).ok());

        if flash.is_none() {
            tracing::debug!("Ignoring invalid flash cookie");
        }

        Ok((flash, response_headers))
    }

    fn session_id_from_headers(&self, headers: &HeaderMap) -> Result<Option<String>, SessionError> {
        let Some(raw) = cookie_value(headers, &self.cookie_name) else {
            tracing::debug!("No session cookie '{}' found in cookies", self.cookie_name);
            return Ok(None);
        };

        let session_id = self.verify(&raw)?;
        if session_id.is_none() {
            tracing::warn!("Session cookie failed signature check");
        }
        Ok(session_id)
    }

    fn mac(&self) -> Result<HmacSha256, SessionError> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|_| SessionError::Crypto("Invalid HMAC key".to_string()))
    }

    fn sign(&self, payload: &str) -> Result<String, SessionError> {
        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        let tag = mac.finalize().into_bytes();
        Ok(format!("{payload}.{}", base64url_encode(&tag)))
    }

    /// Payload of a signed value, or `None` if the tag is missing or wrong
    fn verify(&self, signed: &str) -> Result<Option<String>, SessionError> {
        let Some((payload, tag)) = signed.rsplit_once('.') else {
            return Ok(None);
        };
        let Ok(tag) = base64url_decode(tag) else {
            return Ok(None);
        };

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        let expected = mac.finalize().into_bytes();

        if bool::from(expected.as_slice().ct_eq(tag.as_slice())) {
            Ok(Some(payload.to_string()))
        } else {
            Ok(None)
        }
    }
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .typed_get::<Cookie>()
        .and_then(|cookies| cookies.get(name).map(str::to_string))
        .filter(|value| !value.is_empty())
}
