//! Submission and session state machine.
//!
//! [`Session`] holds everything the presentation shell renders and is mutated
//! only by user actions (`submit`, `next_page`, `prev_page`, `toggle_theme`)
//! and by completions (`apply_fetch`, `apply_reconcile`). It performs no I/O:
//! user actions return a [`FetchRequest`] describing the call to make, and the
//! caller feeds the result back in. This keeps the ordering of overlapping
//! requests explicit and testable.
//!
//! ```text
//! Idle → Validating ─(empty)→ Idle
//!            │
//!            └→ Fetching → { Success → Reconciling → Idle
//!                          , NotFound | RateLimited | Transport → Idle }
//! ```
//!
//! Overlapping fetches race: with [`StaleResponsePolicy::Apply`] the last
//! response to arrive replaces the visible set; with
//! [`StaleResponsePolicy::Discard`] responses to superseded requests are
//! dropped. Reconcile outcomes always merge into the status map, except when
//! they belong to a username that is no longer current.

use serde::Serialize;
use tracing::debug;

use crate::pagination::Pagination;
use crate::{
    CheckDirection, FetchError, FollowStatus, FollowStatusMap, Followee, FolloweePage, Login,
    PageNumber, Resolutions, StaleResponsePolicy, Theme, Username, ValidationError,
};

// ---------------------------------------------------------------------------
// Requests and outcomes
// ---------------------------------------------------------------------------

/// Monotonic sequence number assigned to every issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestGeneration(u64);

impl RequestGeneration {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestGeneration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A followee fetch the caller must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: RequestGeneration,
    pub username: Username,
    pub page: PageNumber,
}

/// A reconcile round the caller must perform after a successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileRequest {
    pub generation: RequestGeneration,
    pub username: Username,
    pub viewer: Login,
    pub direction: CheckDirection,
    pub followees: Vec<Followee>,
}

impl ReconcileRequest {
    /// Pairs this request with what the round resolved.
    pub fn complete(self, resolutions: Resolutions) -> ReconcileOutcome {
        ReconcileOutcome {
            generation: self.generation,
            username: self.username,
            resolutions,
        }
    }
}

/// The settled result of a reconcile round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub generation: RequestGeneration,
    pub username: Username,
    pub resolutions: Resolutions,
}

// ---------------------------------------------------------------------------
// Settings and observable state
// ---------------------------------------------------------------------------

/// Behavioural knobs fixed for the lifetime of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSettings {
    /// Identity whose relationships are checked. Defaults to the queried username.
    pub viewer: Option<Login>,
    pub direction: CheckDirection,
    pub stale_responses: StaleResponsePolicy,
    pub theme: Theme,
}

/// Coarse activity indicator for the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Fetching,
    Reconciling,
}

/// One rendered line of the followee table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub login: Login,
    pub avatar_url: String,
    pub profile_url: String,
    pub status: FollowStatus,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Tracker state for one shell.
#[derive(Debug, Clone)]
pub struct Session {
    settings: SessionSettings,
    username: Option<Username>,
    pagination: Pagination,
    error_message: Option<String>,
    fetches_in_flight: usize,
    reconciles_in_flight: usize,
    last_issued: u64,
    visible: Option<FolloweePage>,
    statuses: FollowStatusMap,
    theme: Theme,
}

impl Session {
    pub fn new(settings: SessionSettings) -> Self {
        let theme = settings.theme;
        Self {
            settings,
            username: None,
            pagination: Pagination::new(),
            error_message: None,
            fetches_in_flight: 0,
            reconciles_in_flight: 0,
            last_issued: 0,
            visible: None,
            statuses: FollowStatusMap::new(),
            theme,
        }
    }

    // -- user actions -------------------------------------------------------

    /// Validates `raw` and, if it is a username, requests the current page.
    ///
    /// An empty or whitespace-only input sets the validation message and
    /// returns the error without touching anything else. A username different
    /// from the current one resets the page to 1 and clears the visible set
    /// and the status map.
    pub fn submit(&mut self, raw: &str) -> Result<FetchRequest, ValidationError> {
        let username = match Username::parse(raw) {
            Ok(username) => username,
            Err(error) => {
                self.error_message = Some(error.to_string());
                return Err(error);
            }
        };

        if self.username.as_ref() != Some(&username) {
            debug!(%username, "username changed; resetting page and statuses");
            self.pagination.reset();
            self.visible = None;
            self.statuses.clear();
            self.username = Some(username.clone());
        }

        self.error_message = None;
        Ok(self.issue_fetch(username))
    }

    /// Moves to the next page. `None` until a username has been submitted.
    pub fn next_page(&mut self) -> Option<FetchRequest> {
        let username = self.username.clone()?;
        self.pagination.advance();
        Some(self.issue_fetch(username))
    }

    /// Moves to the previous page. `None`, with no state change, on page 1 or
    /// before a username has been submitted.
    pub fn prev_page(&mut self) -> Option<FetchRequest> {
        let username = self.username.clone()?;
        self.pagination.retreat()?;
        Some(self.issue_fetch(username))
    }

    /// Switches between dark and light. Never triggers a fetch or reconcile.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggle();
        self.theme
    }

    fn issue_fetch(&mut self, username: Username) -> FetchRequest {
        self.last_issued += 1;
        self.fetches_in_flight += 1;
        FetchRequest {
            generation: RequestGeneration(self.last_issued),
            username,
            page: self.pagination.current(),
        }
    }

    // -- completions --------------------------------------------------------

    /// Applies the outcome of `request`.
    ///
    /// A response for a username that is no longer current is dropped under
    /// either stale-response policy, matching [`Session::apply_reconcile`].
    ///
    /// On success the error message is cleared, the fetched page replaces the
    /// visible set, and a reconcile round is requested. On failure the matching
    /// message is set and the visible set and status map are left as they were.
    pub fn apply_fetch(
        &mut self,
        request: FetchRequest,
        result: Result<FolloweePage, FetchError>,
    ) -> Option<ReconcileRequest> {
        self.fetches_in_flight = self.fetches_in_flight.saturating_sub(1);

        if self.username.as_ref() != Some(&request.username) {
            debug!(
                generation = %request.generation,
                username = %request.username,
                "dropping page for a username that is no longer current"
            );
            return None;
        }
        if self.is_stale(&request) {
            debug!(generation = %request.generation, "discarding superseded fetch response");
            return None;
        }

        match result {
            Ok(page) => {
                self.error_message = None;
                let viewer = self
                    .settings
                    .viewer
                    .clone()
                    .unwrap_or_else(|| request.username.to_login());
                let followees = page.followees.clone();
                self.visible = Some(page);
                self.reconciles_in_flight += 1;
                Some(ReconcileRequest {
                    generation: request.generation,
                    username: request.username,
                    viewer,
                    direction: self.settings.direction,
                    followees,
                })
            }
            Err(error) => {
                self.error_message = Some(error.to_string());
                None
            }
        }
    }

    /// Merges a settled reconcile round into the status map.
    pub fn apply_reconcile(&mut self, outcome: ReconcileOutcome) {
        self.reconciles_in_flight = self.reconciles_in_flight.saturating_sub(1);

        if self.username.as_ref() != Some(&outcome.username) {
            debug!(
                generation = %outcome.generation,
                username = %outcome.username,
                "dropping statuses for a username that is no longer current"
            );
            return;
        }

        self.statuses = self.statuses.merge(&outcome.resolutions);
    }

    fn is_stale(&self, request: &FetchRequest) -> bool {
        self.settings.stale_responses == StaleResponsePolicy::Discard
            && request.generation.get() < self.last_issued
    }

    // -- observation --------------------------------------------------------

    pub fn username(&self) -> Option<&Username> {
        self.username.as_ref()
    }

    pub fn current_page(&self) -> PageNumber {
        self.pagination.current()
    }

    /// The message for the error banner, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.fetches_in_flight > 0
    }

    pub fn phase(&self) -> Phase {
        if self.fetches_in_flight > 0 {
            Phase::Fetching
        } else if self.reconciles_in_flight > 0 {
            Phase::Reconciling
        } else {
            Phase::Idle
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// The most recently applied page, if any.
    pub fn visible_page(&self) -> Option<&FolloweePage> {
        self.visible.as_ref()
    }

    /// The visible followees in API order.
    pub fn followees(&self) -> &[Followee] {
        self.visible
            .as_ref()
            .map_or(&[][..], |page| page.followees.as_slice())
    }

    pub fn statuses(&self) -> &FollowStatusMap {
        &self.statuses
    }

    /// The table as it should be rendered: visible followees with their status.
    pub fn rows(&self) -> Vec<TableRow> {
        self.followees()
            .iter()
            .map(|followee| TableRow {
                login: followee.login.clone(),
                avatar_url: followee.avatar_url.clone(),
                profile_url: followee.profile_url.clone(),
                status: self.statuses.status(&followee.login),
            })
            .collect()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}
