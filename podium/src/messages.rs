use anyhow::anyhow;
use itertools::Itertools;
use shared::LeaderboardDocument;

pub const PODIUM_SUFFIX: &str = " har klatret på pallen!";

/// Joins the names as `A, B og C` and appends the podium suffix.
/// A missing name fails the whole sentence.
pub fn podium_sentence(names: &[Option<&str>]) -> anyhow::Result<String> {
    let names = names
        .iter()
        .enumerate()
        .map(|(index, &name)| {
            name.ok_or_else(|| anyhow!("Changed user #{} has no display name", index + 1))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let listed = match names.as_slice() {
        [] => String::new(),
        [single] => single.to_string(),
        [rest @ .., last] => format!("{} og {}", rest.iter().join(", "), last),
    };

    Ok(format!("{listed}{PODIUM_SUFFIX}"))
}

pub fn standings_text(leaderboard: &LeaderboardDocument) -> String {
    leaderboard
        .standings()
        .into_iter()
        .enumerate()
        .map(|(place, (key, member))| {
            let medal = if member.local_score > 0 {
                match place {
                    0 => ":first_place_medal: ".to_string(),
                    1 => ":second_place_medal: ".to_string(),
                    2 => ":third_place_medal: ".to_string(),
                    n => format!(":number-{}: ", n + 1),
                }
            } else {
                String::new()
            };
            format!("{medal}{}", member.format_text(key))
        })
        .join("\n")
}
