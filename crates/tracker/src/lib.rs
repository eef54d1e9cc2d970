//! Core domain for the GitHub following tracker.
//!
//! Given a username, the tracker fetches one page of the accounts that user
//! follows and checks, for each of them, a follow relationship against a
//! viewer. Statuses accumulate across pages in a [`FollowStatusMap`].
//! Infrastructure crates implement the port traits defined here; they never
//! add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; the `github` crate defines *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`Login`, `Username`, `SessionId`, ...) |
//! | [`types`] | Value types (`PageNumber`, `Followee`, `Theme`, ...) |
//! | [`status`] | `FollowStatus`, `FollowStatusMap` and its merge rule |
//! | [`errors`] | Validation, fetch and check error taxonomy |
//! | [`ports`] | `FollowingSource` / `RelationshipChecker` traits and `MockGithub` |
//! | [`fetcher`] | Followee fetcher |
//! | [`checker`] | Relationship check with partial-failure policy |
//! | [`reconcile`] | Parallel reconcile rounds |
//! | [`pagination`] | Page cursor |
//! | [`session`] | Submission state machine |
//! | [`driver`] | Async `Tracker` tying the above to the ports |

pub mod checker;
pub mod driver;
pub mod errors;
pub mod fetcher;
pub mod identifiers;
pub mod pagination;
pub mod ports;
pub mod reconcile;
pub mod session;
pub mod status;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use driver::Tracker;
pub use errors::{CheckError, FetchError, TrackerError, ValidationError};
pub use identifiers::{FolloweeId, Login, SessionId, Username};
pub use pagination::Pagination;
pub use session::{
    FetchRequest, Phase, ReconcileOutcome, ReconcileRequest, RequestGeneration, Session,
    SessionSettings, TableRow,
};
pub use status::{FollowStatus, FollowStatusMap, Resolutions};
pub use types::{
    CheckDirection, Followee, FolloweePage, PageNumber, PageSize, StaleResponsePolicy, Theme,
    Timestamp,
};
