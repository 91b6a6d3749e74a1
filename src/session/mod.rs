pub mod store;

use crate::error::SessionError;
use crate::session::store::{CredentialStore, TOKEN_KEY, USER_KEY};
use crate::types::UserProfile;

/// Client-held proof of authentication and its derived flags.
///
/// An explicit context object constructed over a [`CredentialStore`] and
/// passed down by the caller, rather than ambient module-level state. State
/// invariant: `is_authenticated() == (token present AND user present)` -
/// the session is never partially populated.
///
/// State changes only through [`SessionContext::login`],
/// [`SessionContext::logout`], or a fresh [`SessionContext::init`]. There is
/// no automatic expiry, refresh, or cross-process broadcast.
pub struct SessionContext<S: CredentialStore> {
    store: S,
    token: Option<String>,
    user: Option<UserProfile>,
    loading: bool,
}

impl<S: CredentialStore> SessionContext<S> {
    /// A fresh context starts loading and unauthenticated until `init` runs.
    pub fn new(store: S) -> Self {
        Self {
            store,
            token: None,
            user: None,
            loading: true,
        }
    }

    /// Bootstrap the session from the credential store. Run once.
    ///
    /// Both keys present and a well-formed user profile mean an authenticated
    /// session; anything else - a missing key, an empty stored token (which
    /// reads as absent), malformed JSON, or a storage read error - is logged
    /// and collapsed into the unauthenticated state. Never errors, never
    /// touches the network, and always settles `is_loading` to false exactly
    /// once.
    pub fn init(&mut self) {
        match self.read_credentials() {
            Ok(Some((token, user))) => {
                self.token = Some(token);
                self.user = Some(user);
            }
            Ok(None) => {
                self.clear_state();
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to restore session, starting unauthenticated");
                self.clear_state();
            }
        }
        self.loading = false;
    }

    fn read_credentials(&self) -> Result<Option<(String, UserProfile)>, SessionError> {
        let token = self.store.get(TOKEN_KEY)?;
        let raw_user = self.store.get(USER_KEY)?;

        match (token, raw_user) {
            (Some(token), Some(raw_user)) if !token.is_empty() => {
                let user: UserProfile = serde_json::from_str(&raw_user)?;
                Ok(Some((token, user)))
            }
            _ => Ok(None),
        }
    }

    /// Persist a new session and mark it authenticated.
    ///
    /// Writes through to the credential store first (token, then serialized
    /// user), then updates in-memory state. The token is opaque and not
    /// validated here. Calling twice with identical arguments leaves both the
    /// store and the in-memory state unchanged from a single call.
    pub fn login(&mut self, user: UserProfile, token: String) -> Result<(), SessionError> {
        let serialized = serde_json::to_string(&user)?;

        self.store.put(TOKEN_KEY, &token)?;
        if let Err(e) = self.store.put(USER_KEY, &serialized) {
            // Keys are paired: do not leave a token behind without a user.
            if let Err(cleanup) = self.store.delete(TOKEN_KEY) {
                tracing::warn!(error = %cleanup, "failed to roll back orphaned token");
            }
            return Err(e.into());
        }

        self.token = Some(token);
        self.user = Some(user);
        Ok(())
    }

    /// Clear the session from both the store and memory.
    ///
    /// In-memory state is cleared even when a delete fails, so the process
    /// never keeps acting authenticated on a credential it tried to discard.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        let token_result = self.store.delete(TOKEN_KEY);
        let user_result = self.store.delete(USER_KEY);

        self.clear_state();

        token_result?;
        user_result?;
        Ok(())
    }

    fn clear_state(&mut self) {
        self.token = None;
        self.user = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
