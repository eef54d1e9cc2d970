//! In-memory GitHub for tests and offline demos.
//!
//! Allows scripting listing pages and relationship answers, and records every
//! call for verification.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::{FollowingSource, RelationshipChecker};
use crate::{CheckError, FetchError, Followee, Login, PageNumber, PageSize, Username};

/// Scriptable implementation of both GitHub ports.
///
/// Unscripted pages answer with an empty list; unscripted relationship
/// questions answer `false`. Clones share state.
#[derive(Debug, Default, Clone)]
pub struct MockGithub {
    inner: Arc<Mutex<MockGithubInner>>,
}

#[derive(Debug, Default)]
struct MockGithubInner {
    pages: HashMap<(String, u32), Result<Vec<Followee>, FetchError>>,
    relationships: HashMap<(String, String), Result<bool, CheckError>>,
    list_calls: Vec<(String, u32, u8)>,
    check_calls: Vec<(String, String)>,
}

impl MockGithub {
    /// Create a new mock with nothing scripted.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockGithubInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Script the answer for `page` of `username`'s followees.
    pub fn set_page(&self, username: &str, page: u32, followees: Vec<Followee>) {
        self.lock()
            .pages
            .insert((username.to_owned(), page), Ok(followees));
    }

    /// Script a listing failure for `page` of `username`'s followees.
    pub fn fail_page(&self, username: &str, page: u32, error: FetchError) {
        self.lock()
            .pages
            .insert((username.to_owned(), page), Err(error));
    }

    /// Script whether `follower` follows `target`.
    pub fn set_following(&self, follower: &str, target: &str, following: bool) {
        self.lock()
            .relationships
            .insert((follower.to_owned(), target.to_owned()), Ok(following));
    }

    /// Script a failed relationship lookup.
    pub fn fail_check(&self, follower: &str, target: &str, error: CheckError) {
        self.lock()
            .relationships
            .insert((follower.to_owned(), target.to_owned()), Err(error));
    }

    /// Every listing call so far, as `(username, page, per_page)`.
    pub fn list_calls(&self) -> Vec<(String, u32, u8)> {
        self.lock().list_calls.clone()
    }

    /// Every relationship lookup so far, as `(follower, target)`.
    pub fn check_calls(&self) -> Vec<(String, String)> {
        self.lock().check_calls.clone()
    }

    /// Total number of calls of either kind.
    pub fn call_count(&self) -> usize {
        let inner = self.lock();
        inner.list_calls.len() + inner.check_calls.len()
    }
}

#[async_trait]
impl FollowingSource for MockGithub {
    async fn list_following(
        &self,
        username: &Username,
        page: PageNumber,
        per_page: PageSize,
    ) -> Result<Vec<Followee>, FetchError> {
        let mut inner = self.lock();
        inner
            .list_calls
            .push((username.as_str().to_owned(), page.get(), per_page.get()));

        let key = (username.as_str().to_owned(), page.get());
        match inner.pages.get(&key) {
            Some(Ok(followees)) => Ok(followees
                .iter()
                .take(usize::from(per_page.get()))
                .cloned()
                .collect()),
            Some(Err(error)) => Err(error.clone()),
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl RelationshipChecker for MockGithub {
    async fn is_following(&self, follower: &Login, target: &Login) -> Result<bool, CheckError> {
        let mut inner = self.lock();
        inner
            .check_calls
            .push((follower.as_str().to_owned(), target.as_str().to_owned()));

        let key = (follower.as_str().to_owned(), target.as_str().to_owned());
        inner.relationships.get(&key).cloned().unwrap_or(Ok(false))
    }
}
