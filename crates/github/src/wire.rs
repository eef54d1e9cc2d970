//! Response records of the GitHub REST API.

use serde::Deserialize;
use thiserror::Error;
use tracker::{Followee, FolloweeId, Login};

/// A listing body that cannot be turned into followees.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed listing: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record {index} (id {id}) has an empty login")]
    MissingLogin { index: usize, id: u64 },
}

/// One item of `GET /users/{username}/following`.
///
/// GitHub sends many more fields; only these are read.
#[derive(Debug, Clone, Deserialize)]
pub struct FolloweeRecord {
    pub id: u64,
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
}

impl FolloweeRecord {
    /// Converts to the domain type. `None` when the login is empty.
    pub fn into_followee(self) -> Option<Followee> {
        Some(Followee {
            id: FolloweeId::new(self.id),
            login: Login::new(self.login)?,
            avatar_url: self.avatar_url,
            profile_url: self.html_url,
        })
    }
}

/// Decodes a listing body into followees, preserving order.
///
/// Every record must convert; a single bad one fails the whole page so the
/// table never shows fewer rows than GitHub returned.
pub fn decode_followees(body: &[u8]) -> Result<Vec<Followee>, DecodeError> {
    let records: Vec<FolloweeRecord> = serde_json::from_slice(body)?;
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let id = record.id;
            record
                .into_followee()
                .ok_or(DecodeError::MissingLogin { index, id })
        })
        .collect()
}
