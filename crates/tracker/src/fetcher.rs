//! Followee fetcher: one page of "accounts this user follows".

use tracing::{debug, info, warn};

use crate::ports::FollowingSource;
use crate::{FetchError, FolloweePage, PageNumber, PageSize, Timestamp, Username};

/// Fetches `page` of the accounts `username` follows.
///
/// Items are returned in API order with no reordering or de-duplication. An
/// empty page means the user does not exist or has no more followees, and is
/// reported as [`FetchError::NotFound`]. Nothing is retried.
pub async fn fetch_followees<S>(
    source: &S,
    username: &Username,
    page: PageNumber,
    per_page: PageSize,
) -> Result<FolloweePage, FetchError>
where
    S: FollowingSource + ?Sized,
{
    debug!(%username, %page, per_page = per_page.get(), "fetching followees");

    let followees = match source.list_following(username, page, per_page).await {
        Ok(followees) => followees,
        Err(error) => {
            warn!(%username, %page, error = ?error, "followee fetch failed");
            return Err(error);
        }
    };

    if followees.is_empty() {
        info!(%username, %page, "followee page is empty");
        return Err(FetchError::NotFound);
    }

    info!(%username, %page, count = followees.len(), "fetched followees");
    Ok(FolloweePage {
        username: username.clone(),
        page,
        followees,
        fetched_at: Timestamp::now(),
    })
}
