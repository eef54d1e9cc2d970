//! Newtype domain identifiers.
//!
//! Every GitHub concept that has an identity is represented as a distinct newtype
//! wrapping a primitive. This prevents accidentally interchanging, for example,
//! the queried [`Username`] (validated user input) with a followee [`Login`]
//! (taken verbatim from an API response) even though both are strings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ValidationError;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers: GitHub-integer-backed
// ---------------------------------------------------------------------------

/// The GitHub-assigned numeric id of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FolloweeId(u64);

impl FolloweeId {
    /// Creates a new identifier from a raw integer.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for FolloweeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers: UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies one interactive or one-shot tracker session.
///
/// Generated fresh for every CLI invocation; recorded on every tracing span so
/// all requests issued by one session can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generates a new random session identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers: String-backed
// ---------------------------------------------------------------------------

string_id! {
    /// A GitHub account login as returned by the API (e.g. `"octocat"`).
    ///
    /// Unique within one page of results; not guaranteed unique across calls.
    Login
}

/// A queried GitHub username after input validation.
///
/// Always trimmed and non-empty. Constructed only through [`Username::parse`],
/// so holding a `Username` proves the validation step already happened.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// Trims `raw` and rejects empty or whitespace-only input.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyUsername);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the username as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The same account, viewed as a [`Login`].
    pub fn to_login(&self) -> Login {
        Login(self.0.clone())
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_is_trimmed() {
        let name = Username::parse("  alice \t").unwrap();
        assert_eq!(name.as_str(), "alice");
    }

    #[test]
    fn whitespace_only_username_is_rejected() {
        assert_eq!(Username::parse(""), Err(ValidationError::EmptyUsername));
        assert_eq!(Username::parse(" \n\t "), Err(ValidationError::EmptyUsername));
    }

    #[test]
    fn empty_login_is_rejected() {
        assert!(Login::new("").is_none());
        assert_eq!(Login::new("bob").unwrap().to_string(), "bob");
    }

    #[test]
    fn username_converts_to_login() {
        let name = Username::parse("alice").unwrap();
        assert_eq!(name.to_login(), Login::new("alice").unwrap());
    }
}
