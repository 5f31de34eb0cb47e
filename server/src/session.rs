//! # Session Accessor
//!
//! Process-wide `{user, session, loading}` state. On init it subscribes
//! to the auth client's change feed, then resolves the one startup fetch;
//! `loading` stays true until that fetch lands, and consumers must not
//! read "signed out" into the state before then. Dropping the accessor
//! tears the subscription down.

use std::sync::Arc;

use store::{AuthClient, AuthUser, Session};
use tokio::{sync::watch, task::JoinHandle};
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub user: Option<AuthUser>,
    pub session: Option<Session>,
    pub loading: bool,
}

impl SessionState {
    fn unresolved() -> Self {
        Self {
            user: None,
            session: None,
            loading: true,
        }
    }

    fn resolved(session: Option<Session>) -> Self {
        Self {
            user: session.as_ref().map(|s| s.user.clone()),
            session,
            loading: false,
        }
    }
}

pub struct SessionAccessor {
    state: watch::Receiver<SessionState>,
    forwarder: JoinHandle<()>,
}

impl SessionAccessor {
    pub fn init(auth: Arc<AuthClient>) -> Self {
        let (tx, state) = watch::channel(SessionState::unresolved());
        let mut changes = auth.subscribe();

        let forwarder = tokio::spawn(async move {
            let initial = match auth.current_session().await {
                Ok(session) => session,
                Err(error) => {
                    warn!("Initial session fetch failed: {error}");
                    None
                }
            };
            // A change that raced the startup fetch wins over its result.
            let raced = changes.borrow_and_update().clone();
            tx.send_replace(SessionState::resolved(raced.or(initial)));

            while changes.changed().await.is_ok() {
                let session = changes.borrow_and_update().clone();
                tx.send_replace(SessionState::resolved(session));
            }
        });

        Self { state, forwarder }
    }

    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn signed_in(&self) -> bool {
        self.current().user.is_some()
    }
}

impl Drop for SessionAccessor {
    fn drop(&mut self) {
        self.forwarder.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    async fn settled(accessor: &SessionAccessor) -> SessionState {
        for _ in 0..50 {
            let state = accessor.current();
            if !state.loading {
                return state;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("session accessor never resolved");
    }

    #[tokio::test]
    async fn starts_loading_then_resolves_signed_out() {
        // Nothing cached, so the startup fetch resolves without network.
        let auth = Arc::new(AuthClient::new("http://localhost:0", "key"));
        let accessor = SessionAccessor::init(auth);

        let state = settled(&accessor).await;
        assert!(state.user.is_none());
        assert!(state.session.is_none());
        assert!(!accessor.signed_in());
    }

    #[tokio::test]
    async fn forwards_sign_out_notifications() {
        let auth = Arc::new(AuthClient::new("http://localhost:0", "key"));
        let accessor = SessionAccessor::init(auth.clone());
        settled(&accessor).await;

        auth.sign_out().await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let state = accessor.current();
        assert!(!state.loading);
        assert!(state.user.is_none());
    }
}
