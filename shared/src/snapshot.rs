use std::{
    collections::HashMap,
    fmt,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{bail, Context};

use super::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatsRecord {
    pub points: i64,
    pub stars: i64,
}

impl StatsRecord {
    pub const fn new(points: i64, stars: i64) -> Self {
        Self { points, stars }
    }

    pub fn to_line(&self, user_id: UserId) -> String {
        format!("{}:{}:{}", self.points, self.stars, user_id)
    }
}

/// Parses a single `points:stars:userid` line.
pub fn parse_stats_line(line: &str) -> anyhow::Result<(UserId, StatsRecord)> {
    let fields: Vec<&str> = line.split(':').collect();
    let [points, stars, user_id] = fields.as_slice() else {
        bail!(
            "expected 3 fields `points:stars:userid`, found {} in {:?}",
            fields.len(),
            line
        );
    };

    let points = points
        .trim()
        .parse::<i64>()
        .with_context(|| format!("invalid points value {points:?}"))?;
    let stars = stars
        .trim()
        .parse::<i64>()
        .with_context(|| format!("invalid stars value {stars:?}"))?;
    let user_id = user_id
        .trim()
        .parse::<UserId>()
        .with_context(|| format!("invalid user id {user_id:?}"))?;

    Ok((user_id, StatsRecord::new(points, stars)))
}

/// Point-in-time stats of every user, iterated in the order ids were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    order: Vec<UserId>,
    records: HashMap<UserId, StatsRecord>,
}

impl StatsSnapshot {
    // A repeated id overwrites the record but keeps its first position
    pub fn insert(&mut self, user_id: UserId, record: StatsRecord) {
        if self.records.insert(user_id, record).is_none() {
            self.order.push(user_id);
        }
    }

    pub fn get(&self, user_id: UserId) -> Option<&StatsRecord> {
        self.records.get(&user_id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (UserId, &StatsRecord)> + '_ {
        self.order
            .iter()
            .filter_map(|user_id| self.records.get(user_id).map(|record| (*user_id, record)))
    }

    pub fn from_reader<R: BufRead>(reader: R) -> anyhow::Result<Self> {
        let mut snapshot = Self::default();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let (user_id, record) =
                parse_stats_line(&line).with_context(|| format!("line {}", index + 1))?;
            snapshot.insert(user_id, record);
        }
        Ok(snapshot)
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let file = open(path)?;
        parse_file(path, file)
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (user_id, record) in self.iter() {
            writeln!(f, "{}", record.to_line(user_id))?;
        }
        Ok(())
    }
}

/// Reads the current and the old snapshot. Both files are opened before either
/// is parsed and both are closed when this returns.
pub fn load_snapshot_pair(
    current: &Path,
    old: &Path,
) -> anyhow::Result<(StatsSnapshot, StatsSnapshot)> {
    let current_file = open(current)?;
    let old_file = open(old)?;

    let current_snapshot = parse_file(current, current_file)?;
    let old_snapshot = parse_file(old, old_file)?;
    tracing::debug!(
        "Loaded {} current and {} old stats records",
        current_snapshot.len(),
        old_snapshot.len()
    );

    Ok((current_snapshot, old_snapshot))
}

fn open(path: &Path) -> anyhow::Result<File> {
    File::open(path).with_context(|| format!("Failed to open stats file {}", path.display()))
}

fn parse_file(path: &Path, file: File) -> anyhow::Result<StatsSnapshot> {
    StatsSnapshot::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse stats file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn snapshot(text: &str) -> StatsSnapshot {
        StatsSnapshot::from_reader(text.as_bytes()).unwrap()
    }

    #[test]
    fn parse_line() {
        let (user_id, record) = parse_stats_line("120:14:1234567").unwrap();
        assert_eq!(user_id, 1234567);
        assert_eq!(record, StatsRecord::new(120, 14));
    }

    #[test]
    fn parse_line_tolerates_whitespace() {
        let (user_id, record) = parse_stats_line(" 5 :2: 42\r").unwrap();
        assert_eq!(user_id, 42);
        assert_eq!(record, StatsRecord::new(5, 2));
    }

    #[test]
    fn parse_line_negative_id() {
        let (user_id, record) = parse_stats_line("5:1:-3").unwrap();
        assert_eq!(user_id, -3);
        assert_eq!(record, StatsRecord::new(5, 1));
    }

    #[test]
    fn parse_line_rejects_wrong_field_count() {
        assert!(parse_stats_line("1:2").is_err());
        assert!(parse_stats_line("1:2:3:4").is_err());
        assert!(parse_stats_line("").is_err());
    }

    #[test]
    fn parse_line_rejects_non_integers() {
        let err = parse_stats_line("1:two:3").unwrap_err();
        assert!(err.to_string().contains("stars"));
        assert!(parse_stats_line("1:2:abc").is_err());
        assert!(parse_stats_line("1.5:2:3").is_err());
    }

    #[test]
    fn keeps_file_order() {
        let snapshot = snapshot("10:1:30\n20:2:10\n30:3:20\n");
        let ids: Vec<_> = snapshot.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![30, 10, 20]);
    }

    #[test]
    fn repeated_id_keeps_first_position() {
        let snapshot = snapshot("10:1:30\n20:2:10\n99:9:30\n");
        let entries: Vec<_> = snapshot.iter().map(|(id, r)| (id, *r)).collect();
        assert_eq!(
            entries,
            vec![(30, StatsRecord::new(99, 9)), (10, StatsRecord::new(20, 2))]
        );
    }

    #[test]
    fn reports_failing_line() {
        let err = StatsSnapshot::from_reader("1:1:1\n\n2:2:2\n".as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }

    #[test]
    fn lines_survive_reparse() {
        let text = "154:22:1001\n0:0:1002\n98:18:1003\n";
        assert_eq!(snapshot(text).to_string(), text);
    }

    #[test]
    fn load_pair_from_files() {
        let mut current = tempfile::NamedTempFile::new().unwrap();
        let mut old = tempfile::NamedTempFile::new().unwrap();
        writeln!(current, "10:2:1\n4:1:2").unwrap();
        writeln!(old, "8:1:1\n4:1:2").unwrap();

        let (current, old) = load_snapshot_pair(current.path(), old.path()).unwrap();
        assert_eq!(current.get(1), Some(&StatsRecord::new(10, 2)));
        assert_eq!(old.get(1), Some(&StatsRecord::new(8, 1)));
        assert_eq!(current.len(), 2);
    }

    #[test]
    fn load_single_file_names_it_on_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1:1:1\n1:x:2").unwrap();

        let err = StatsSnapshot::load_from_file(file.path()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains(&file.path().display().to_string()));
        assert!(message.contains("line 2"));
    }

    #[test]
    fn load_pair_fails_on_missing_file() {
        let current = tempfile::NamedTempFile::new().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("stats.old");

        let err = load_snapshot_pair(current.path(), &missing).unwrap_err();
        assert!(err.to_string().contains("stats.old"));
    }
}
