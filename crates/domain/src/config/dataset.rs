use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Directory holding one `match-<id>.json` file per match.
    #[serde(default = "d_dir")]
    pub dir: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self { dir: d_dir() }
    }
}

fn d_dir() -> PathBuf {
    PathBuf::from("data/matches")
}
