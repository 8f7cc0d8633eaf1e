//! Cookie-backed media server session.
//!
//! The browser holds the upstream token and user ID in two `HttpOnly`
//! cookies. The auth guard validates them and stores the resulting
//! [`Session`] in request extensions, where handlers pick it up through the
//! extractor below.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const TOKEN_COOKIE: &str = "token";
pub const USER_ID_COOKIE: &str = "userId";
pub const LOGIN_PATH: &str = "/mediamanager/login";

/// Token/user pair proving an authenticated upstream identity
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    token: String,
    user_id: String,
}

impl Session {
    pub fn new(token: String, user_id: String) -> Self {
        Self { token, user_id }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Both cookies must be present and non-empty
    pub fn from_jar(jar: &CookieJar) -> Option<Self> {
        let token = jar.get(TOKEN_COOKIE).map(Cookie::value)?;
        let user_id = jar.get(USER_ID_COOKIE).map(Cookie::value)?;
        if token.is_empty() || user_id.is_empty() {
            return None;
        }
        Some(Self::new(token.to_string(), user_id.to_string()))
    }

    pub fn store(&self, jar: CookieJar, secure: bool) -> CookieJar {
        jar.add(session_cookie(TOKEN_COOKIE, self.token.clone(), secure))
            .add(session_cookie(USER_ID_COOKIE, self.user_id.clone(), secure))
    }
}

fn session_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Expire both session cookies, whether or not the request carried them
pub fn clear(jar: CookieJar) -> CookieJar {
    [TOKEN_COOKIE, USER_ID_COOKIE]
        .into_iter()
        .fold(jar, |jar, name| {
            let mut cookie = session_cookie(name, String::new(), false);
            cookie.make_removal();
            jar.add(cookie)
        })
}

/// Available only behind the auth guard, anywhere else it sends the browser to login
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| Redirect::to(LOGIN_PATH))
    }
}
