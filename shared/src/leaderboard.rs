use std::{collections::HashMap, fs, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::UserId;

/// Private leaderboard export. Only `members` is read, other top level keys
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardDocument {
    #[serde(default)]
    pub members: HashMap<String, Member>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub id: Option<UserId>,
    // null for anonymous users
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub local_score: i64,
    #[serde(default)]
    pub stars: i64,
}

impl Member {
    /// `key` is the member's key in the document, used for anonymous members
    /// without an `id` field.
    pub fn display_name(&self, key: &str) -> String {
        match (self.name.as_deref(), self.id) {
            (Some(name), _) if !name.is_empty() => name.to_string(),
            (_, Some(id)) => format!("Anonym bruker ({id})"),
            (_, None) => format!("Anonym bruker ({key})"),
        }
    }

    pub fn format_text(&self, key: &str) -> String {
        format!(
            "*{}* Poeng: {}, :star: {}",
            self.display_name(key),
            self.local_score,
            self.stars
        )
    }

    const fn total(&self) -> i64 {
        self.local_score.saturating_add(self.stars)
    }
}

impl LeaderboardDocument {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let file_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read leaderboard {}", path.display()))?;
        let result = Self::from_json(&file_content)
            .with_context(|| format!("Failed to parse leaderboard {}", path.display()))?;
        tracing::trace!("Loaded leaderboard with {} members", result.members.len());
        Ok(result)
    }

    pub fn member(&self, user_id: UserId) -> Option<&Member> {
        self.members.get(&user_id.to_string())
    }

    /// Display name as stored in the document, `None` if the user is unknown
    /// or has no name.
    pub fn name_of(&self, user_id: UserId) -> Option<&str> {
        self.member(user_id)?.name.as_deref()
    }

    /// Members ordered by score plus stars, highest first. Ties are ordered by
    /// member key.
    pub fn standings(&self) -> Vec<(&str, &Member)> {
        let mut members: Vec<_> = self
            .members
            .iter()
            .map(|(key, member)| (key.as_str(), member))
            .collect();
        members.sort_by(|(key1, member1), (key2, member2)| {
            member2
                .total()
                .cmp(&member1.total())
                .then_with(|| key1.cmp(key2))
        });
        members
    }
}
