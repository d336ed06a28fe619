//! Where the data files live and how to link them.

use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use crate::database::{LinkPolicy, NeoDatabase};
use crate::errors::NeoResult;
use crate::extract::{load_approaches, load_neos};

pub const DEFAULT_NEO_FILE: &str = "data/neos.csv";
pub const DEFAULT_CAD_FILE: &str = "data/cad.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataConfig {
    /// CSV file of near-Earth objects.
    pub neo_file: PathBuf,
    /// JSON file of close approaches.
    pub cad_file: PathBuf,
    pub link_policy: LinkPolicy,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            neo_file: PathBuf::from(DEFAULT_NEO_FILE),
            cad_file: PathBuf::from(DEFAULT_CAD_FILE),
            link_policy: LinkPolicy::default(),
        }
    }
}

impl DataConfig {
    pub fn with_neo_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.neo_file = path.into();
        self
    }

    pub fn with_cad_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.cad_file = path.into();
        self
    }

    pub fn with_link_policy(mut self, policy: LinkPolicy) -> Self {
        self.link_policy = policy;
        self
    }

    /// Loads both files and links them into a database.
    pub fn load(&self) -> NeoResult<NeoDatabase> {
        let start = Instant::now();
        let neos = load_neos(&self.neo_file)?;
        let approaches = load_approaches(&self.cad_file)?;
        let db = NeoDatabase::builder()
            .with_link_policy(self.link_policy)
            .build(neos, approaches)?;
        info!(
            neos = db.neo_count(),
            approaches = db.approach_count(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "loaded database"
        );
        Ok(db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = DataConfig::default();
        assert_eq!(config.neo_file, PathBuf::from("data/neos.csv"));
        assert_eq!(config.cad_file, PathBuf::from("data/cad.json"));
        assert_eq!(config.link_policy, LinkPolicy::Lenient);
    }

    #[test]
    fn test_builder_overrides() {
        let config = DataConfig::default()
            .with_neo_file("a.csv")
            .with_cad_file("b.json")
            .with_link_policy(LinkPolicy::Strict);
        assert_eq!(config.neo_file, PathBuf::from("a.csv"));
        assert_eq!(config.cad_file, PathBuf::from("b.json"));
        assert_eq!(config.link_policy, LinkPolicy::Strict);
    }

    #[test]
    fn test_load_missing_files() {
        let config = DataConfig::default().with_neo_file("/nonexistent/neos.csv");
        assert!(config.load().is_err());
    }
}
