//! Shared value types for the following tracker.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! values with invariants (page numbers start at 1, page sizes are bounded by
//! the API) and participate in domain computations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{FolloweeId, Login, Username};

// ---------------------------------------------------------------------------
// Pagination primitives
// ---------------------------------------------------------------------------

/// A 1-based page number in the followee listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PageNumber(u32);

impl PageNumber {
    /// The first page.
    pub const FIRST: PageNumber = PageNumber(1);

    /// Creates a [`PageNumber`], returning `None` for zero.
    #[must_use]
    pub fn new(value: u32) -> Option<Self> {
        if value == 0 {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Returns the underlying integer value.
    pub fn get(self) -> u32 {
        self.0
    }

    /// The following page. Saturates at `u32::MAX`.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The preceding page, or `None` when already on the first page.
    pub fn prev(self) -> Option<Self> {
        if self.0 > 1 {
            Some(Self(self.0 - 1))
        } else {
            None
        }
    }

    /// Returns `true` on page 1.
    pub fn is_first(self) -> bool {
        self.0 == 1
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl std::fmt::Display for PageNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------

/// Number of followees requested per page.
///
/// GitHub accepts `1..=100`; the tracker defaults to 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSize(u8);

impl PageSize {
    /// The page size used when none is configured.
    pub const DEFAULT: PageSize = PageSize(10);

    /// Largest page size the API honours.
    pub const MAX: u8 = 100;

    /// Creates a [`PageSize`], returning `None` outside `1..=100`.
    #[must_use]
    pub fn new(value: u8) -> Option<Self> {
        if (1..=Self::MAX).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Returns the underlying integer value.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ---------------------------------------------------------------------------
// Followees
// ---------------------------------------------------------------------------

/// An account the queried user follows.
///
/// Built from one item of the listing response and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Followee {
    pub id: FolloweeId,
    pub login: Login,
    pub avatar_url: String,
    pub profile_url: String,
}

/// One successfully fetched page of followees, in API order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolloweePage {
    pub username: Username,
    pub page: PageNumber,
    pub followees: Vec<Followee>,
    pub fetched_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Relationship semantics
// ---------------------------------------------------------------------------

/// Which relationship the reconciler asks about for each followee.
///
/// Regardless of direction, statuses are keyed by the followee's login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckDirection {
    /// Does the followee follow the viewer back?
    #[default]
    FollowsBack,
    /// Does the viewer follow the followee?
    ViewerFollows,
}

impl CheckDirection {
    /// Orders `(viewer, candidate)` into the `(follower, target)` pair to look up.
    pub fn pair<'a>(self, viewer: &'a Login, candidate: &'a Login) -> (&'a Login, &'a Login) {
        match self {
            CheckDirection::FollowsBack => (candidate, viewer),
            CheckDirection::ViewerFollows => (viewer, candidate),
        }
    }
}

/// What to do with a fetch response that arrives after a newer fetch was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleResponsePolicy {
    /// Apply every response as it arrives; the last one to arrive wins.
    #[default]
    Apply,
    /// Drop responses belonging to a superseded request.
    Discard,
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// Colour scheme of the presentation shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// The other theme.
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S UTC"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_zero_is_rejected() {
        assert!(PageNumber::new(0).is_none());
        assert_eq!(PageNumber::new(3).unwrap().get(), 3);
    }

    #[test]
    fn prev_stops_at_first_page() {
        assert_eq!(PageNumber::FIRST.prev(), None);
        assert_eq!(PageNumber::new(2).unwrap().prev(), Some(PageNumber::FIRST));
    }

    #[test]
    fn next_always_increments() {
        assert_eq!(PageNumber::FIRST.next().get(), 2);
        assert_eq!(PageNumber::new(u32::MAX).unwrap().next().get(), u32::MAX);
    }

    #[test]
    fn page_size_bounds() {
        assert!(PageSize::new(0).is_none());
        assert!(PageSize::new(101).is_none());
        assert_eq!(PageSize::new(100).unwrap().get(), 100);
        assert_eq!(PageSize::default().get(), 10);
    }

    #[test]
    fn follows_back_swaps_the_pair() {
        let viewer = Login::new("alice").unwrap();
        let candidate = Login::new("bob").unwrap();

        let (follower, target) = CheckDirection::FollowsBack.pair(&viewer, &candidate);
        assert_eq!((follower.as_str(), target.as_str()), ("bob", "alice"));

        let (follower, target) = CheckDirection::ViewerFollows.pair(&viewer, &candidate);
        assert_eq!((follower.as_str(), target.as_str()), ("alice", "bob"));
    }

    #[test]
    fn theme_toggles_back_and_forth() {
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Dark.toggle().toggle(), Theme::Dark);
    }
}
