//! Async driver that runs fetch and reconcile cycles against the ports.
//!
//! [`Tracker`] owns a [`Session`] and performs the requests it emits, one
//! cycle at a time: fetch the page, apply it, reconcile the new followees,
//! merge. Callers that want overlapping cycles can drive the [`Session`]
//! directly with [`fetch_followees`] and [`resolve_round`].

use tracing::instrument;

use crate::fetcher::fetch_followees;
use crate::ports::{FollowingSource, RelationshipChecker};
use crate::reconcile::resolve_round;
use crate::session::{FetchRequest, Session, SessionSettings};
use crate::{PageNumber, PageSize, SessionId, TrackerError};

/// A session bound to a followee source and a relationship checker.
pub struct Tracker<S, C> {
    source: S,
    checker: C,
    per_page: PageSize,
    session: Session,
    session_id: SessionId,
}

impl<S, C> Tracker<S, C>
where
    S: FollowingSource,
    C: RelationshipChecker,
{
    pub fn new(source: S, checker: C, per_page: PageSize, settings: SessionSettings) -> Self {
        Self {
            source,
            checker,
            per_page,
            session: Session::new(settings),
            session_id: SessionId::new_random(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable access for actions that issue no requests (theme toggling).
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Submits `raw` as the username and runs a full cycle for the current page.
    ///
    /// Validation failures return before any network call. Fetch failures are
    /// recorded in the session and also returned.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn submit(&mut self, raw: &str) -> Result<(), TrackerError> {
        let request = self.session.submit(raw)?;
        self.run_cycle(request).await
    }

    /// Advances one page and runs a cycle. Returns the page moved to, or
    /// `None` when nothing has been submitted yet.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn next_page(&mut self) -> Result<Option<PageNumber>, TrackerError> {
        match self.session.next_page() {
            Some(request) => {
                let page = request.page;
                self.run_cycle(request).await?;
                Ok(Some(page))
            }
            None => Ok(None),
        }
    }

    /// Goes back one page and runs a cycle. Returns `None`, without any
    /// request, when already on page 1.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn prev_page(&mut self) -> Result<Option<PageNumber>, TrackerError> {
        match self.session.prev_page() {
            Some(request) => {
                let page = request.page;
                self.run_cycle(request).await?;
                Ok(Some(page))
            }
            None => Ok(None),
        }
    }

    #[instrument(
        skip(self, request),
        fields(username = %request.username, page = %request.page, generation = %request.generation)
    )]
    async fn run_cycle(&mut self, request: FetchRequest) -> Result<(), TrackerError> {
        let result =
            fetch_followees(&self.source, &request.username, request.page, self.per_page).await;
        let failure = result.as_ref().err().cloned();

        if let Some(round) = self.session.apply_fetch(request, result) {
            let resolutions =
                resolve_round(&self.checker, round.direction, &round.viewer, &round.followees)
                    .await;
            self.session.apply_reconcile(round.complete(resolutions));
        }

        match failure {
            Some(error) => Err(error.into()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockGithub;
    use crate::session::Phase;
    use crate::{FetchError, FollowStatus, Followee, FolloweeId, Login};

    fn followee(id: u64, name: &str) -> Followee {
        Followee {
            id: FolloweeId::new(id),
            login: Login::new(name).unwrap(),
            avatar_url: String::new(),
            profile_url: format!("https://github.com/{name}"),
        }
    }

    fn tracker(github: &MockGithub) -> Tracker<MockGithub, MockGithub> {
        Tracker::new(
            github.clone(),
            github.clone(),
            PageSize::DEFAULT,
            SessionSettings::default(),
        )
    }

    #[tokio::test]
    async fn submit_runs_fetch_then_reconcile() {
        let github = MockGithub::new();
        github.set_page("alice", 1, vec![followee(1, "bob")]);
        github.set_following("bob", "alice", true);
        let mut tracker = tracker(&github);

        tracker.submit("alice").await.unwrap();

        let rows = tracker.session().rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, FollowStatus::Following);
        assert_eq!(tracker.session().phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn fetch_error_is_returned_and_recorded() {
        let github = MockGithub::new();
        github.fail_page("alice", 1, FetchError::Transport("reset".into()));
        let mut tracker = tracker(&github);

        let err = tracker.submit("alice").await.unwrap_err();

        assert_eq!(err, TrackerError::Fetch(FetchError::Transport("reset".into())));
        assert_eq!(
            tracker.session().error_message(),
            Some("Could not reach GitHub, please try again later")
        );
        assert!(github.check_calls().is_empty());
    }

    #[tokio::test]
    async fn next_before_submit_does_nothing() {
        let github = MockGithub::new();
        let mut tracker = tracker(&github);

        assert_eq!(tracker.next_page().await.unwrap(), None);
        assert_eq!(github.call_count(), 0);
    }
}
