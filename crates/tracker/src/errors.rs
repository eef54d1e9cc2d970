//! Error taxonomy for the following tracker.
//!
//! Every error the tracker can produce ends up as a single user-facing message
//! string in the session; none of them is fatal. The variants are kept distinct
//! so the shell and the logs can tell a missing account from an exhausted quota.
//!
//! | Error | Raised by | Effect |
//! |-------|-----------|--------|
//! | [`ValidationError`] | username parsing | message, no network call |
//! | [`FetchError`] | followee fetcher | message, table left as it was |
//! | [`CheckError`] | relationship checker | logged, login stays unknown |

use thiserror::Error;

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

/// Rejected user input. Handled locally; never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The submitted username was empty or whitespace-only.
    #[error("Please enter a username")]
    EmptyUsername,
}

// ---------------------------------------------------------------------------
// Followee listing
// ---------------------------------------------------------------------------

/// Failure to fetch one page of followees.
///
/// None of these variants is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The account does not exist, or the requested page holds no followees.
    #[error("User not found")]
    NotFound,

    /// The upstream request quota is exhausted.
    #[error("The quota exceeded, please try again later")]
    RateLimited,

    /// Network failure, unexpected status, or an undecodable body.
    #[error("Could not reach GitHub, please try again later")]
    Transport(
        /// Diagnostic detail for logs. Not shown to the user.
        String,
    ),
}

// ---------------------------------------------------------------------------
// Relationship checks
// ---------------------------------------------------------------------------

/// Failure of a single follow-relationship lookup.
///
/// Never coerced to "not following": the reconciler logs it and leaves the
/// candidate's status unknown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// The upstream request quota is exhausted.
    #[error("rate limited")]
    RateLimited,

    /// Network failure or a server-side error.
    #[error("transport failure: {0}")]
    Transport(String),
}

// ---------------------------------------------------------------------------
// Umbrella
// ---------------------------------------------------------------------------

/// Any error surfaced to the session as a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl TrackerError {
    /// The message shown in the error banner.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
