use crate::error::LoadError;
use crate::types::ContentItem;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const BUNDLED_DATASET: &str = include_str!("../../data/salawat.json");

#[derive(Debug, Clone)]
enum DatasetSource {
    Bundled,
    File(PathBuf),
}

/// Reads the Salawat dataset once at startup.
#[derive(Debug, Clone)]
pub struct ContentLoader {
    source: DatasetSource,
}

impl ContentLoader {
    pub fn bundled() -> Self {
        Self {
            source: DatasetSource::Bundled,
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            source: DatasetSource::File(path.as_ref().to_path_buf()),
        }
    }

    pub fn load(&self) -> Result<Vec<ContentItem>, LoadError> {
        match &self.source {
            DatasetSource::Bundled => {
                if BUNDLED_DATASET.trim().is_empty() {
                    return Err(LoadError::MissingResource("bundled salawat.json".to_string()));
                }
                parse_dataset(BUNDLED_DATASET)
            }
            DatasetSource::File(path) => {
                if !path.exists() {
                    return Err(LoadError::MissingResource(path.display().to_string()));
                }
                let json = fs::read_to_string(path)
                    .map_err(|e| LoadError::MissingResource(format!("{}: {}", path.display(), e)))?;
                parse_dataset(&json)
            }
        }
    }
}

/// Parses the dataset and orders it by index. Duplicate indices are rejected.
pub fn parse_dataset(json: &str) -> Result<Vec<ContentItem>, LoadError> {
    let mut items: Vec<ContentItem> = serde_json::from_str(json)?;

    let mut seen = HashSet::new();
    for item in &items {
        if !seen.insert(item.index) {
            return Err(LoadError::ParseError(format!(
                "duplicate index {}",
                item.index
            )));
        }
    }

    items.sort_by_key(|item| item.index);
    Ok(items)
}
