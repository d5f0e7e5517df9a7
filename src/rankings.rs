//! Best score per game mode
//!
//! Persisted as plain text, one `label:score` per line.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RankingError {
    #[error("cannot read rankings from {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("cannot write rankings to {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Receives `(mode label, final score)` when a game ends
pub trait RankingSink {
    fn report(&mut self, label: &str, score: u32) -> Result<(), RankingError>;
}

/// Ranking table keyed by mode label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rankings {
    entries: BTreeMap<String, u32>,
    /// Backing file; `None` keeps the table in memory only
    path: Option<PathBuf>,
}

impl Rankings {
    /// Table that is never written to disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load from `path`. A missing file is an empty table; malformed lines
    /// are skipped.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, RankingError> {
        let path = path.into();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No rankings at {}, starting fresh", path.display());
                String::new()
            }
            Err(source) => return Err(RankingError::Read { path, source }),
        };

        let entries = parse(&text);
        log::info!("Loaded {} rankings", entries.len());
        Ok(Self {
            entries,
            path: Some(path),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Best score recorded for `label`
    pub fn best(&self, label: &str) -> Option<u32> {
        self.entries.get(label).copied()
    }

    /// Entries in label order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record `score` for `label` if it beats the stored best, and persist.
    /// Returns true if the table changed.
    pub fn update(&mut self, label: &str, score: u32) -> Result<bool, RankingError> {
        if self.best(label).is_some_and(|best| best >= score) {
            return Ok(false);
        }
        self.entries.insert(label.to_string(), score);
        log::info!("New best for {}: {}", label, score);
        self.save()?;
        Ok(true)
    }

    /// Write the table to its backing file (no-op when in memory)
    pub fn save(&self) -> Result<(), RankingError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        fs::write(path, self.to_text()).map_err(|source| RankingError::Write {
            path: path.clone(),
            source,
        })
    }

    fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(|(label, score)| format!("{label}:{score}\n"))
            .collect()
    }
}

impl RankingSink for Rankings {
    fn report(&mut self, label: &str, score: u32) -> Result<(), RankingError> {
        self.update(label, score).map(|_| ())
    }
}

fn parse(text: &str) -> BTreeMap<String, u32> {
    let mut entries = BTreeMap::new();
    for line in text.lines() {
        let Some((label, score)) = line.rsplit_once(':') else {
            if !line.trim().is_empty() {
                log::warn!("Skipping ranking line {:?}", line);
            }
            continue;
        };
        match score.trim().parse::<u32>() {
            Ok(score) if !label.is_empty() => {
                entries.insert(label.to_string(), score);
            }
            _ => log::warn!("Skipping ranking line {:?}", line),
        }
    }
    entries
}
