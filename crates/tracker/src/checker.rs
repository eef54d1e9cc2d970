//! Follow-relationship checker with the partial-failure policy applied.

use tracing::{debug, warn};

use crate::ports::RelationshipChecker;
use crate::{CheckDirection, Login};

/// Checks the relationship between `viewer` and `candidate`.
///
/// Returns `Some(true)` / `Some(false)` when the lookup succeeded and `None`
/// when it failed. A failure is logged and never coerced to `false`.
pub async fn check_relationship<C>(
    checker: &C,
    direction: CheckDirection,
    viewer: &Login,
    candidate: &Login,
) -> Option<bool>
where
    C: RelationshipChecker + ?Sized,
{
    let (follower, target) = direction.pair(viewer, candidate);
    match checker.is_following(follower, target).await {
        Ok(following) => {
            debug!(%follower, %target, following, "relationship resolved");
            Some(following)
        }
        Err(error) => {
            warn!(%follower, %target, %error, "relationship check failed; status left unknown");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockGithub;
    use crate::CheckError;

    fn login(s: &str) -> Login {
        Login::new(s).unwrap()
    }

    #[tokio::test]
    async fn follows_back_asks_whether_the_candidate_follows_the_viewer() {
        let github = MockGithub::new();
        github.set_following("bob", "alice", true);

        let result = check_relationship(
            &github,
            CheckDirection::FollowsBack,
            &login("alice"),
            &login("bob"),
        )
        .await;

        assert_eq!(result, Some(true));
        assert_eq!(github.check_calls(), vec![("bob".into(), "alice".into())]);
    }

    #[tokio::test]
    async fn failure_is_not_coerced_to_false() {
        let github = MockGithub::new();
        github.fail_check("alice", "bob", CheckError::Transport("timeout".into()));

        let result = check_relationship(
            &github,
            CheckDirection::ViewerFollows,
            &login("alice"),
            &login("bob"),
        )
        .await;

        assert_eq!(result, None);
    }
}
