//! Loads match datasets from a directory of JSON files.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ps_domain::dataset::MatchDataset;
use ps_domain::error::{Error, Result};
use ps_domain::trace::TraceEvent;

/// Reads `*.json` match files from one directory.  Nothing is cached: each
/// call re-reads the files so a workflow run always sees current data.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    dir: PathBuf,
}

impl DatasetLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Every dataset in the directory, ordered by `match_id`.
    pub async fn load_all(&self) -> Result<Vec<MatchDataset>> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| dataset_error(&self.dir, e))?;

        let mut matches = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| dataset_error(&self.dir, e))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            matches.push(read_dataset(&path).await?);
        }

        matches.sort_by(|a, b| a.match_id.cmp(&b.match_id));

        TraceEvent::DatasetsLoaded {
            dir: self.dir.display().to_string(),
            count: matches.len(),
        }
        .emit();
        Ok(matches)
    }

    /// The dataset stored as `match-<id>.json`, or `None` when that file
    /// does not exist.
    pub async fn load(&self, match_id: &str) -> Result<Option<MatchDataset>> {
        let path = self.dir.join(format!("match-{match_id}.json"));
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => parse_dataset(&path, &raw).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(dataset_error(&path, e)),
        }
    }
}

async fn read_dataset(path: &Path) -> Result<MatchDataset> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| dataset_error(path, e))?;
    parse_dataset(path, &raw)
}

fn parse_dataset(path: &Path, raw: &str) -> Result<MatchDataset> {
    serde_json::from_str(raw).map_err(|e| dataset_error(path, e))
}

fn dataset_error(path: &Path, err: impl std::fmt::Display) -> Error {
    Error::Dataset {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}
