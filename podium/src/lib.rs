use shared::{load_snapshot_pair, LeaderboardDocument};
use tracing::{debug, info, instrument};

pub mod config;
pub mod diff;
pub mod messages;

pub use config::Config;

/// Compares the two stats snapshots and builds the podium sentence for every
/// user whose points or stars changed.
#[instrument(skip(config))]
pub fn run(config: &Config) -> anyhow::Result<String> {
    let (current, old) = load_snapshot_pair(&config.stats_file, &config.old_stats_file)?;
    let leaderboard = LeaderboardDocument::load_from_file(&config.leaderboard_file)?;
    debug!(
        "Leaderboard standings:\n{}",
        messages::standings_text(&leaderboard)
    );

    let changed = diff::changed_users(&current, &old)?;
    info!("{} users climbed since the last snapshot", changed.len());

    let names = diff::resolve_names(&changed, &leaderboard);
    messages::podium_sentence(&names)
}
