//! # Auth Subsystem
//!
//! The hosted service's auth endpoints, consumed as-is:
//!
//! - `POST /auth/v1/token?grant_type=password` — sign in
//! - `POST /auth/v1/signup` — sign up with `{name, phone}` profile metadata
//! - `POST /auth/v1/logout` — revoke the current token
//! - `GET  /auth/v1/user` — validate a held token
//!
//! The client caches the signed-in session in memory and broadcasts every
//! change on a watch channel; the server's session accessor subscribes to
//! that feed. Before any sign-in/up/out call the cached keys are wiped so
//! a stale session can never leak into a fresh one.

use std::sync::Mutex;

use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::watch;
use tracing::warn;

use crate::error::StoreError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserMetadata {
    pub name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user: AuthUser,
}

pub struct AuthClient {
    http: Client,
    base_url: String,
    api_key: String,
    cached: Mutex<Option<Session>>,
    changes: watch::Sender<Option<Session>>,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let (changes, _) = watch::channel(None);
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            cached: Mutex::new(None),
            changes,
        }
    }

    /// Session-change notifications. The receiver always holds the latest
    /// session; `None` means signed out.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.changes.subscribe()
    }

    /// Housekeeping before sign-in/up/out: drop any locally cached auth
    /// state so a stale session cannot survive the call. Does not notify
    /// subscribers.
    pub fn clear_cached_session(&self) {
        *self.cached.lock().unwrap() = None;
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, StoreError> {
        self.clear_cached_session();

        let response = self
            .http
            .post(self.endpoint("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.api_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let session: Session = auth_json(response).await?;

        self.publish(Some(session.clone()));
        Ok(session)
    }

    /// Sign-up does not sign the user in; the store sends a confirmation
    /// email first.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: &str,
        phone: Option<&str>,
    ) -> Result<(), StoreError> {
        self.clear_cached_session();

        let response = self
            .http
            .post(self.endpoint("signup"))
            .header("apikey", &self.api_key)
            .json(&json!({
                "email": email,
                "password": password,
                "data": { "name": name, "phone": phone },
            }))
            .send()
            .await?;
        let _: Value = auth_json(response).await?;
        Ok(())
    }

    /// Signs out locally first, then best-effort revokes the token. A
    /// failed revoke leaves the user signed out on this side regardless.
    pub async fn sign_out(&self) -> Result<(), StoreError> {
        let session = self.cached.lock().unwrap().take();
        self.changes.send_replace(None);

        if let Some(session) = session {
            let response = self
                .http
                .post(self.endpoint("logout"))
                .header("apikey", &self.api_key)
                .bearer_auth(&session.access_token)
                .send()
                .await?;
            if !response.status().is_success() {
                warn!("Token revoke failed with {}", response.status());
            }
        }
        Ok(())
    }

    /// The startup fetch: validates whatever session is cached against the
    /// auth subsystem. An invalid token resolves to signed out.
    pub async fn current_session(&self) -> Result<Option<Session>, StoreError> {
        let cached = self.cached.lock().unwrap().clone();
        let Some(session) = cached else {
            return Ok(None);
        };

        let response = self
            .http
            .get(self.endpoint("user"))
            .header("apikey", &self.api_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;
        if response.status().is_success() {
            Ok(Some(session))
        } else {
            self.publish(None);
            Ok(None)
        }
    }

    fn publish(&self, session: Option<Session>) {
        *self.cached.lock().unwrap() = session.clone();
        self.changes.send_replace(session);
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }
}

/// The auth subsystem reports failures as JSON with a human-readable
/// message under varying keys; surface that message, not the raw body.
async fn auth_json<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| {
            ["error_description", "msg", "message", "error"]
                .iter()
                .find_map(|key| v.get(key).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| format!("auth request failed with {status}"));
    Err(StoreError::Auth { message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_cached_session_is_silent() {
        let auth = AuthClient::new("http://localhost:0", "key");
        let rx = auth.subscribe();
        auth.clear_cached_session();
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn current_session_without_cache_resolves_signed_out() {
        // No cached session means no network call at all.
        let auth = AuthClient::new("http://localhost:0", "key");
        let session = auth.current_session().await.unwrap();
        assert!(session.is_none());
    }

    #[tokio::test]
    async fn sign_out_notifies_subscribers() {
        let auth = AuthClient::new("http://localhost:0", "key");
        let mut rx = auth.subscribe();
        auth.sign_out().await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_none());
    }
}
