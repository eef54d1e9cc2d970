//! Follow-status bookkeeping.
//!
//! [`FollowStatusMap`] accumulates resolved statuses across pages by union. A
//! login absent from the map is [`FollowStatus::Unknown`]; once present it is
//! never removed except by [`FollowStatusMap::clear`]. Entries for logins that
//! are no longer on screen are retained.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Login;

/// Tri-state relationship status of one followee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowStatus {
    /// No check has succeeded for this login yet.
    Unknown,
    Following,
    NotFollowing,
}

impl FollowStatus {
    /// Label shown in the status column.
    pub fn label(self) -> &'static str {
        match self {
            FollowStatus::Unknown => "Unknown",
            FollowStatus::Following => "Following",
            FollowStatus::NotFollowing => "Not Following",
        }
    }

    /// Returns `true` unless the status is [`FollowStatus::Unknown`].
    pub fn is_resolved(self) -> bool {
        !matches!(self, FollowStatus::Unknown)
    }
}

impl From<bool> for FollowStatus {
    fn from(following: bool) -> Self {
        if following {
            FollowStatus::Following
        } else {
            FollowStatus::NotFollowing
        }
    }
}

impl std::fmt::Display for FollowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Reconcile round output
// ---------------------------------------------------------------------------

/// Everything one reconcile round learned.
///
/// `resolved` holds the logins whose check succeeded; `unresolved` the logins
/// whose check failed. Unresolved logins do not touch the map when merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolutions {
    pub resolved: BTreeMap<Login, bool>,
    pub unresolved: Vec<Login>,
}

impl Resolutions {
    /// Records a successful check.
    pub fn resolve(&mut self, login: Login, following: bool) {
        self.resolved.insert(login, following);
    }

    /// Records a failed check.
    pub fn leave_unresolved(&mut self, login: Login) {
        self.unresolved.push(login);
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty() && self.unresolved.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Accumulated statuses
// ---------------------------------------------------------------------------

/// Mapping from followee login to resolved follow status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowStatusMap {
    entries: BTreeMap<Login, bool>,
}

impl FollowStatusMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status of `login`, [`FollowStatus::Unknown`] when never resolved.
    pub fn status(&self, login: &Login) -> FollowStatus {
        self.entries
            .get(login)
            .map_or(FollowStatus::Unknown, |&following| following.into())
    }

    /// Returns `prior ∪ round`: logins resolved in `round` take the new value,
    /// every other login keeps its prior value.
    #[must_use]
    pub fn merge(&self, round: &Resolutions) -> FollowStatusMap {
        let mut entries = self.entries.clone();
        for (login, &following) in &round.resolved {
            entries.insert(login.clone(), following);
        }
        FollowStatusMap { entries }
    }

    /// Forgets every status. Used when a different username is submitted.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of resolved logins.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over resolved logins in login order.
    pub fn iter(&self) -> impl Iterator<Item = (&Login, FollowStatus)> {
        self.entries
            .iter()
            .map(|(login, &following)| (login, following.into()))
    }
}

impl FromIterator<(Login, bool)> for FollowStatusMap {
    fn from_iter<I: IntoIterator<Item = (Login, bool)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
