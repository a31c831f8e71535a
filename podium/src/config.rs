use std::path::PathBuf;

use serde::Deserialize;

pub const ENV_PREFIX: &str = "PODIUM_";

/// Input locations. Every field can be overridden with a `PODIUM_`-prefixed
/// environment variable, e.g. `PODIUM_OLD_STATS_FILE`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default = "default_stats_file")]
    pub stats_file: PathBuf,
    #[serde(default = "default_old_stats_file")]
    pub old_stats_file: PathBuf,
    #[serde(default = "default_leaderboard_file")]
    pub leaderboard_file: PathBuf,
}

fn default_stats_file() -> PathBuf {
    PathBuf::from("stats")
}

fn default_old_stats_file() -> PathBuf {
    PathBuf::from("stats.old")
}

fn default_leaderboard_file() -> PathBuf {
    PathBuf::from("leaderboard.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stats_file: default_stats_file(),
            old_stats_file: default_old_stats_file(),
            leaderboard_file: default_leaderboard_file(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(envy::prefixed(ENV_PREFIX).from_env::<Self>()?)
    }
}
