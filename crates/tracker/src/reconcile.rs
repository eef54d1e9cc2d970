//! Status reconciler.
//!
//! One reconcile round fans out a relationship check per followee, waits for
//! every check to settle, and only then produces its [`Resolutions`]. Checks
//! are never cancelled and one failure never aborts its siblings.
//!
//! Merging into the accumulated map is a separate, pure step
//! ([`FollowStatusMap::merge`]) so that overlapping rounds can be applied in
//! whatever order they finish without any shared mutable state.

use futures_util::future::join_all;
use tracing::info;

use crate::checker::check_relationship;
use crate::ports::RelationshipChecker;
use crate::{CheckDirection, FollowStatusMap, Followee, Login, Resolutions};

/// Runs one reconcile round and returns what it resolved.
///
/// All checks are in flight concurrently; the result is available only after
/// the slowest one settles.
pub async fn resolve_round<C>(
    checker: &C,
    direction: CheckDirection,
    viewer: &Login,
    followees: &[Followee],
) -> Resolutions
where
    C: RelationshipChecker + ?Sized,
{
    let checks = followees.iter().map(|followee| async move {
        let outcome = check_relationship(checker, direction, viewer, &followee.login).await;
        (followee.login.clone(), outcome)
    });

    let mut resolutions = Resolutions::default();
    for (login, outcome) in join_all(checks).await {
        match outcome {
            Some(following) => resolutions.resolve(login, following),
            None => resolutions.leave_unresolved(login),
        }
    }

    info!(
        %viewer,
        resolved = resolutions.resolved.len(),
        unresolved = resolutions.unresolved.len(),
        "reconcile round settled"
    );
    resolutions
}

/// Resolves `followees` and merges the results over `prior`.
pub async fn reconcile<C>(
    checker: &C,
    direction: CheckDirection,
    viewer: &Login,
    followees: &[Followee],
    prior: &FollowStatusMap,
) -> FollowStatusMap
where
    C: RelationshipChecker + ?Sized,
{
    let round = resolve_round(checker, direction, viewer, followees).await;
    prior.merge(&round)
}
