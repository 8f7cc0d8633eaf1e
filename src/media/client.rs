use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, trace};

use super::error::MediaError;
use super::types::{AuthenticationResult, ItemList, MediaItem, User};
use crate::session::Session;

/// Header carrying the session token on every authenticated call
pub const TOKEN_HEADER: &str = "X-Emby-Token";
const AUTHORIZATION_HEADER: &str = "X-Emby-Authorization";
const CLIENT_NAME: &str = "homepage";
const VERSION: &str = env!("APP_VERSION");

/// Client for the upstream (Jellyfin-compatible) media server
#[derive(Clone, Debug)]
pub struct MediaClient {
    base_url: String,
    device_id: String,
    http: Client,
}

impl MediaClient {
    /// Every request made by the client is bounded by `timeout`
    pub fn new(base_url: &str, device_id: &str, timeout: Duration) -> Result<Self, MediaError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            device_id: device_id.to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorization(&self) -> String {
        format!(
            r#"MediaBrowser Client="{CLIENT_NAME}", Device="{CLIENT_NAME}", DeviceId="{}", Version="{VERSION}""#,
            self.device_id
        )
    }

    async fn check_response(resp: Response) -> Result<Response, MediaError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(MediaError::Upstream { status, body })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        session: &Session,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, MediaError> {
        trace!(path, "upstream request");
        let resp = self
            .http
            .get(self.url(path))
            .header(TOKEN_HEADER, session.token())
            .query(query)
            .send()
            .await?;
        let resp = Self::check_response(resp).await?;
        Ok(resp.json().await?)
    }

    /// Exchange credentials for a session.
    ///
    /// Only the access token and the user ID are taken from the response.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Session, MediaError> {
        let resp = self
            .http
            .post(self.url("/Users/AuthenticateByName"))
            .header(AUTHORIZATION_HEADER, self.authorization())
            .json(&json!({ "Username": username, "Pw": password }))
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            debug!(%status, username, "authentication rejected");
            return Err(MediaError::Auth(format!("upstream responded with {status}")));
        }
        let result: AuthenticationResult = resp
            .json()
            .await
            .map_err(|err| MediaError::Auth(format!("unreadable response: {err}")))?;
        let user_id = result.user.map(|u| u.id).unwrap_or_default();
        if result.access_token.is_empty() || user_id.is_empty() {
            return Err(MediaError::Auth("response carried no token or user".to_string()));
        }
        Ok(Session::new(result.access_token, user_id))
    }

    /// Top-level libraries visible to the session user
    pub async fn list_views(&self, session: &Session) -> Result<ItemList, MediaError> {
        let path = format!("/Users/{}/Views", session.user_id());
        self.get_json(session, &path, &[]).await
    }

    pub async fn list_items(
        &self,
        session: &Session,
        parent_id: &str,
        item_type: &str,
    ) -> Result<ItemList, MediaError> {
        let path = format!("/Users/{}/Items", session.user_id());
        let query = [
            ("ParentId", parent_id),
            ("IncludeItemTypes", item_type),
            ("Recursive", "true"),
            ("SortBy", "SortName"),
        ];
        self.get_json(session, &path, &query).await
    }

    pub async fn get_item(&self, session: &Session, item_id: &str) -> Result<MediaItem, MediaError> {
        let path = format!("/Users/{}/Items/{item_id}", session.user_id());
        self.get_json(session, &path, &[]).await
    }

    pub async fn list_episodes(
        &self,
        session: &Session,
        show_id: &str,
    ) -> Result<ItemList, MediaError> {
        let path = format!("/Shows/{show_id}/Episodes");
        let query = [("UserId", session.user_id())];
        self.get_json(session, &path, &query).await
    }

    pub async fn get_user(&self, session: &Session, user_id: &str) -> Result<User, MediaError> {
        let path = format!("/Users/{user_id}");
        self.get_json(session, &path, &[]).await
    }

    /// Revoke the session token upstream
    pub async fn logout(&self, session: &Session) -> Result<(), MediaError> {
        let resp = self
            .http
            .post(self.url("/Sessions/Logout"))
            .header(TOKEN_HEADER, session.token())
            .send()
            .await?;
        Self::check_response(resp).await?;
        Ok(())
    }

    /// Direct-stream URL for the browser's video element.
    ///
    /// A `<video>` element cannot send the `X-Emby-Token` header, so the token
    /// travels as `api_key` and is readable by the page even though the session
    /// cookie is `HttpOnly`. The bytes go straight from the media server to the
    /// browser instead of through this process.
    pub fn stream_url(&self, session: &Session, item_id: &str) -> String {
        format!(
            "{}/Videos/{item_id}/stream?static=true&api_key={}",
            self.base_url,
            session.token()
        )
    }
}

/// Upstream identifiers are GUID-like; anything else never reaches the server
pub fn is_item_id(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
