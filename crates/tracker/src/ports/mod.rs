//! Port traits for the external GitHub API.
//!
//! The domain only ever talks to GitHub through these two traits. The `github`
//! crate implements them over HTTP; [`MockGithub`] implements them in memory.
//!
//! Both traits are object-safe via `async-trait`.

mod mock;

pub use mock::MockGithub;

use async_trait::async_trait;

use crate::{CheckError, FetchError, Followee, Login, PageNumber, PageSize, Username};

/// Lists the accounts a user follows, one page at a time.
#[async_trait]
pub trait FollowingSource: Send + Sync {
    /// Returns page `page` of the accounts `username` follows, in API order.
    ///
    /// An empty vector is a valid answer here; interpreting it is the
    /// fetcher's job.
    async fn list_following(
        &self,
        username: &Username,
        page: PageNumber,
        per_page: PageSize,
    ) -> Result<Vec<Followee>, FetchError>;
}

/// Answers a single follow-relationship question.
#[async_trait]
pub trait RelationshipChecker: Send + Sync {
    /// Does `follower` follow `target`?
    async fn is_following(&self, follower: &Login, target: &Login) -> Result<bool, CheckError>;
}
