use crate::error::PreferenceError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

pub const LAUNCH_COUNT_KEY: &str = "launch_count";
pub const LAST_PROMPT_DATE_KEY: &str = "last_prompt_date";
pub const HAS_REVIEWED_KEY: &str = "has_reviewed";
pub const NOTIFICATIONS_ENABLED_KEY: &str = "notifications_enabled";
pub const SHOW_TRANSLATION_KEY: &str = "show_translation";
pub const FONT_SIZE_KEY: &str = "font_size";
pub const DAILY_HOUR_KEY: &str = "daily_reminder_hour";
pub const DAILY_MINUTE_KEY: &str = "daily_reminder_minute";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreferenceValue {
    Bool(bool),
    Int(i64),
    Date(DateTime<Utc>),
}

/// Key-value settings storage. A missing key or a key holding another type
/// reads as `None`. Reads come from memory; writes may touch disk.
#[async_trait]
pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Option<PreferenceValue>;
    async fn set(&mut self, key: &str, value: PreferenceValue) -> Result<(), PreferenceError>;

    fn get_int(&self, key: &str) -> Option<i64> {
        match self.get(key) {
            Some(PreferenceValue::Int(v)) => Some(v),
            _ => None,
        }
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key) {
            Some(PreferenceValue::Bool(v)) => Some(v),
            _ => None,
        }
    }

    fn get_date(&self, key: &str) -> Option<DateTime<Utc>> {
        match self.get(key) {
            Some(PreferenceValue::Date(v)) => Some(v),
            _ => None,
        }
    }

    fn get_int_or(&self, key: &str, default: i64) -> i64 {
        self.get_int(key).unwrap_or(default)
    }

    fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.get_bool(key).unwrap_or(default)
    }

    async fn set_int(&mut self, key: &str, value: i64) -> Result<(), PreferenceError> {
        self.set(key, PreferenceValue::Int(value)).await
    }

    async fn set_bool(&mut self, key: &str, value: bool) -> Result<(), PreferenceError> {
        self.set(key, PreferenceValue::Bool(value)).await
    }

    async fn set_date(&mut self, key: &str, value: DateTime<Utc>) -> Result<(), PreferenceError> {
        self.set(key, PreferenceValue::Date(value)).await
    }
}

#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, PreferenceValue>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<PreferenceValue> {
        self.values.get(key).cloned()
    }

    async fn set(&mut self, key: &str, value: PreferenceValue) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Preferences kept as a JSON object on disk, rewritten on every change.
#[derive(Debug)]
pub struct JsonPreferenceStore {
    path: PathBuf,
    values: HashMap<String, PreferenceValue>,
}

impl JsonPreferenceStore {
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, PreferenceError> {
        let path = path.as_ref().to_path_buf();

        if !fs::try_exists(&path).await? {
            log::info!("Creating new preferences file at {}", path.display());
            let store = Self {
                path,
                values: HashMap::new(),
            };
            store.save().await?;
            return Ok(store);
        }

        log::info!("Loading existing preferences from {}", path.display());
        let json = fs::read_to_string(&path).await?;
        let values = if json.trim().is_empty() {
            HashMap::new()
        } else {
            serde_json::from_str(&json)?
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn save(&self) -> Result<(), PreferenceError> {
        let json = serde_json::to_string_pretty(&self.values)?;

        // Write next to the target, then rename over it.
        let temp_path = self.path.with_extension("tmp.json");
        let mut temp_file = File::create(&temp_path).await?;
        temp_file.write_all(json.as_bytes()).await?;
        temp_file.flush().await?;
        drop(temp_file);

        fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for JsonPreferenceStore {
    fn get(&self, key: &str) -> Option<PreferenceValue> {
        self.values.get(key).cloned()
    }

    async fn set(&mut self, key: &str, value: PreferenceValue) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value);
        self.save().await
    }
}
