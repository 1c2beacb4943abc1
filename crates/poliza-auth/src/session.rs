//! The signed-in session handed to every front end.
//!
//! A [`SessionContext`] is built once at startup by [`SessionContext::hydrate`]
//! and passed explicitly to whatever needs the user, the token, or the
//! conversation thread. Logging out goes through
//! [`SessionContext::teardown`], which empties storage and memory together.

use poliza_core::models::chat::ConversationThread;
use poliza_core::models::user::{AuthTokens, User};
use tracing::{info, warn};

use crate::error::AuthError;
use crate::jwt;
use crate::store::{SessionStore, StoredSession};

#[derive(Debug)]
pub struct SessionContext<S: SessionStore> {
    store: S,
    state: StoredSession,
}

impl<S: SessionStore> SessionContext<S> {
    /// Load the stored session. An expired or unreadable access token, or a
    /// store that cannot be read, leaves the context signed out and clears
    /// storage.
    pub fn hydrate(store: S, now: jiff::Timestamp) -> Self {
        let state = match store.load() {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "stored session unreadable, discarding");
                StoredSession::default()
            }
        };
        let mut ctx = Self { store, state };

        if let Some(token) = ctx.state.access_token.as_deref() {
            let drop_reason = match jwt::is_expired(token, now) {
                Ok(false) => None,
                Ok(true) => Some("expired".to_string()),
                Err(e) => Some(e.to_string()),
            };
            if let Some(reason) = drop_reason {
                info!(reason = %reason, "dropping stored session");
                ctx.state = StoredSession::default();
                if let Err(e) = ctx.store.clear() {
                    warn!(error = %e, "failed to clear stored session");
                }
            }
        }
        ctx
    }

    /// Record a fresh sign-in and persist it. The conversation thread starts
    /// over.
    pub fn establish(&mut self, tokens: AuthTokens) -> Result<(), AuthError> {
        let state = StoredSession {
            access_token: Some(tokens.access_token),
            refresh_token: Some(tokens.refresh_token),
            user: Some(tokens.user),
            thread_id: None,
        };
        self.store.save(&state)?;
        self.state = state;
        info!(
            user_id = self.user().map(|u| u.user_id.as_str()).unwrap_or_default(),
            "session established"
        );
        Ok(())
    }

    /// Sign out: clear storage first, then memory.
    pub fn teardown(&mut self) -> Result<(), AuthError> {
        self.store.clear()?;
        self.state = StoredSession::default();
        info!("session torn down");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.access_token.is_some() && self.state.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.state.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.state.refresh_token.as_deref()
    }

    /// The access token, or [`AuthError::NotAuthenticated`].
    pub fn require_token(&self) -> Result<&str, AuthError> {
        match (self.access_token(), self.user()) {
            (Some(token), Some(_)) => Ok(token),
            _ => Err(AuthError::NotAuthenticated),
        }
    }

    pub fn thread(&self) -> Option<ConversationThread> {
        self.state.thread_id
    }

    /// The current conversation thread, starting and persisting one if
    /// there is none yet.
    pub fn ensure_thread(&mut self) -> Result<ConversationThread, AuthError> {
        match self.state.thread_id {
            Some(thread) => Ok(thread),
            None => self.reset_thread(),
        }
    }

    /// Start a new conversation thread and persist it.
    pub fn reset_thread(&mut self) -> Result<ConversationThread, AuthError> {
        let thread = ConversationThread::generate();
        let mut next = self.state.clone();
        next.thread_id = Some(thread);
        self.store.save(&next)?;
        self.state = next;
        info!(thread_id = %thread, "conversation thread started");
        Ok(thread)
    }

    pub fn stored(&self) -> &StoredSession {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
