//! Session cookie parsing and `Set-Cookie` construction.

use axum::http::{header, HeaderMap, HeaderValue};

use crate::config::AuthConfig;

/// Attributes applied to the session cookie.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    pub max_age_secs: u64,
    pub secure: bool,
}

impl CookieSettings {
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            name: config.cookie_name.clone(),
            max_age_secs: config.session_ttl_secs,
            secure: config.cookie_secure,
        }
    }

    /// `Set-Cookie` value carrying `token`: HttpOnly, SameSite=Strict.
    pub fn issue(&self, token: &str) -> Option<HeaderValue> {
        let mut cookie = format!(
            "{}={}; Max-Age={}; Path=/; HttpOnly; SameSite=Strict",
            self.name, token, self.max_age_secs
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie).ok()
    }

    /// `Set-Cookie` value that makes the browser drop the cookie.
    pub fn clear(&self) -> Option<HeaderValue> {
        let mut cookie = format!(
            "{}=; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Path=/; HttpOnly; SameSite=Strict",
            self.name
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie).ok()
    }

    /// Value of this cookie in the request, if present and non-empty.
    pub fn read(&self, headers: &HeaderMap) -> Option<String> {
        parse_cookie(headers, &self.name).filter(|v| !v.is_empty())
    }
}

/// Find cookie `name` across all `Cookie` headers.
pub fn parse_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, val) = pair.trim().split_once('=')?;
            (key.trim() == name).then(|| val.trim().trim_matches('"').to_string())
        })
}
