//! JSON Lines record of finished matches.
//!
//! Each line of `matches.jsonl` is one [`MatchRecord`]. The file is opened
//! in append mode so successive referee runs accumulate into it.

use anyhow::{Context, Result};
use engine_core::Side;
use games_brave_rats::{MatchStatus, RoundRecord};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Everything needed to replay one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: u32,
    pub red_brain: String,
    pub blue_brain: String,
    pub rounds: Vec<RoundRecord>,
    pub red_points: u8,
    pub blue_points: u8,
    /// None for a tie
    pub winner: Option<Side>,
    pub duration_ms: u64,
    pub timestamp: u64,
}

impl MatchRecord {
    pub fn from_status(
        match_id: u32,
        red_brain: &str,
        blue_brain: &str,
        status: &MatchStatus,
        duration_ms: u64,
    ) -> Self {
        Self {
            match_id,
            red_brain: red_brain.to_string(),
            blue_brain: blue_brain.to_string(),
            rounds: status.rounds().to_vec(),
            red_points: status.points(Side::Red),
            blue_points: status.points(Side::Blue),
            winner: status.winner(),
            duration_ms,
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }
}

/// Appends match records to a JSON Lines file.
pub struct ReplayWriter {
    writer: BufWriter<File>,
    written: u64,
}

impl ReplayWriter {
    /// Open `path` for appending, creating parent directories if needed.
    pub fn open(path: &str) -> Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open replay file {path}"))?;

        Ok(Self {
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    /// Write one record and flush it, so a crash loses at most the match in
    /// progress.
    pub fn append(&mut self, record: &MatchRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.written += 1;
        Ok(())
    }

    /// Records written through this writer.
    pub fn written(&self) -> u64 {
        self.written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_brave_rats::{Card, Match};
    use std::io::{BufRead, BufReader};
    use tempfile::tempdir;

    /// Read every record from a JSON Lines file, skipping blank lines.
    fn read_records(path: &str) -> Result<Vec<MatchRecord>> {
        let file = File::open(path).with_context(|| format!("Failed to open {path}"))?;
        let mut records = Vec::new();

        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line)
                .with_context(|| format!("Bad record on line {} of {path}", idx + 1))?;
            records.push(record);
        }
        Ok(records)
    }

    fn finished_match() -> Match {
        let mut game = Match::new();
        game.play(Card::General, Card::Spy).unwrap();
        game.play(Card::Musician, Card::Musician).unwrap();
        game.play(Card::Princess, Card::Prince).unwrap();
        game
    }

    #[test]
    fn test_record_from_status() {
        let game = finished_match();
        let record = MatchRecord::from_status(4, "uct", "random", game.status(), 12);

        assert_eq!(record.match_id, 4);
        assert_eq!(record.rounds.len(), 3);
        assert_eq!(record.rounds[0].red, Card::General);
        assert_eq!(record.red_points, 1);
        assert_eq!(record.blue_points, 0);
        assert_eq!(record.winner, Some(Side::Red));
    }

    #[test]
    fn test_append_and_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("matches.jsonl");
        let path = path.to_str().unwrap();
        let game = finished_match();

        let mut writer = ReplayWriter::open(path).unwrap();
        for id in 0..3 {
            let record = MatchRecord::from_status(id, "uct", "uct", game.status(), 5);
            writer.append(&record).unwrap();
        }
        assert_eq!(writer.written(), 3);

        let records = read_records(path).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].match_id, 2);
        assert_eq!(records[0].rounds, game.status().rounds().to_vec());
    }

    #[test]
    fn test_reopen_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/matches.jsonl");
        let path = path.to_str().unwrap();
        let game = finished_match();
        let record = MatchRecord::from_status(0, "random", "random", game.status(), 1);

        ReplayWriter::open(path).unwrap().append(&record).unwrap();
        ReplayWriter::open(path).unwrap().append(&record).unwrap();

        assert_eq!(read_records(path).unwrap().len(), 2);
    }

    #[test]
    fn test_one_json_object_per_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("matches.jsonl");
        let path = path.to_str().unwrap();
        let game = finished_match();

        let mut writer = ReplayWriter::open(path).unwrap();
        writer
            .append(&MatchRecord::from_status(0, "uct", "random", game.status(), 3))
            .unwrap();

        let content = fs::read_to_string(path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 1);
        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["winner"], "red");
        assert_eq!(value["rounds"][2]["outcome"]["match_won"], "red");
    }

    #[test]
    fn test_bad_line_reports_position() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("matches.jsonl");
        fs::write(&path, "\n{not json}\n").unwrap();

        let err = read_records(path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
