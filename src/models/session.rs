//! Authenticated identity context.
//!
//! The authentication provider is external. Whatever signs the user in
//! builds a [`Session`] and hands it to the services that need to know who
//! is acting; nothing in this crate reads identity from global state.

use serde::{Deserialize, Serialize};

use super::Barillet;
use crate::{Error, Result};

/// The signed-in user as reported by the authentication provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable user identifier.
    pub uid: String,
    /// Email address, when the provider exposes one.
    #[serde(default)]
    pub email: Option<String>,
}

impl Identity {
    /// Creates an identity with no email.
    #[must_use]
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: None,
        }
    }

    /// Sets the email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Who is acting, if anyone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    identity: Option<Identity>,
}

impl Session {
    /// A session with nobody signed in.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { identity: None }
    }

    /// A session for `identity`.
    #[must_use]
    pub const fn signed_in(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// Returns the current identity.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Returns the current user id.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.identity.as_ref().map(|i| i.uid.as_str())
    }

    /// Returns the current identity, or [`Error::Unauthenticated`].
    ///
    /// # Errors
    ///
    /// Returns an error when nobody is signed in or the uid is empty.
    pub fn require_identity(&self) -> Result<&Identity> {
        self.identity
            .as_ref()
            .filter(|i| !i.uid.is_empty())
            .ok_or(Error::Unauthenticated)
    }

    /// Returns `true` when the current user owns `barillet`.
    #[must_use]
    pub fn is_owner(&self, barillet: &Barillet) -> bool {
        self.user_id().is_some_and(|uid| barillet.is_owned_by(uid))
    }
}
