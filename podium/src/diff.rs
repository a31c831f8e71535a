use anyhow::bail;
use shared::{LeaderboardDocument, StatsSnapshot, UserId};
use tracing::trace;

/// Users of the current snapshot whose points or stars differ from the old
/// snapshot, in current snapshot order.
///
/// Every user of the current snapshot has to be present in the old one; a new
/// user is a lookup failure rather than a change.
pub fn changed_users(current: &StatsSnapshot, old: &StatsSnapshot) -> anyhow::Result<Vec<UserId>> {
    let mut changed = vec![];
    for (user_id, record) in current.iter() {
        let Some(old_record) = old.get(user_id) else {
            bail!("User {user_id} is missing from the old stats snapshot");
        };
        if record != old_record {
            trace!("User {user_id} changed from {old_record:?} to {record:?}");
            changed.push(user_id);
        }
    }
    Ok(changed)
}

pub fn resolve_names<'a>(
    user_ids: &[UserId],
    leaderboard: &'a LeaderboardDocument,
) -> Vec<Option<&'a str>> {
    user_ids
        .iter()
        .map(|user_id| leaderboard.name_of(*user_id))
        .collect()
}
