use crate::error::AppError;
use crate::state::DEFAULT_REVIEW_PROMPT_DELAY;
use crate::types::Permission;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DATASET_VAR: &str = "SALAWAT_DATASET";
pub const PREFERENCES_VAR: &str = "SALAWAT_PREFERENCES";
pub const REVIEW_DELAY_VAR: &str = "SALAWAT_REVIEW_DELAY_SECS";
pub const NOTIFICATIONS_VAR: &str = "SALAWAT_NOTIFICATIONS";
pub const STORE_URL_VAR: &str = "SALAWAT_STORE_URL";

pub const DEFAULT_PREFERENCES_FILE: &str = "salawat_preferences.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Overrides the bundled dataset when set.
    pub dataset_path: Option<PathBuf>,
    pub preferences_path: PathBuf,
    pub review_prompt_delay: Duration,
    pub notification_permission: Permission,
    pub store_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: None,
            preferences_path: PathBuf::from(DEFAULT_PREFERENCES_FILE),
            review_prompt_delay: DEFAULT_REVIEW_PROMPT_DELAY,
            notification_permission: Permission::Granted,
            store_url: None,
        }
    }
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = value(DATASET_VAR) {
            config.dataset_path = Some(PathBuf::from(path));
        }
        if let Some(path) = value(PREFERENCES_VAR) {
            config.preferences_path = PathBuf::from(path);
        }
        if let Some(secs) = value(REVIEW_DELAY_VAR) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                AppError::Config(format!("{} must be a number of seconds, got {:?}", REVIEW_DELAY_VAR, secs))
            })?;
            config.review_prompt_delay = Duration::from_secs(secs);
        }
        if let Some(policy) = value(NOTIFICATIONS_VAR) {
            config.notification_permission = match policy.trim().to_lowercase().as_str() {
                "grant" | "granted" | "allow" => Permission::Granted,
                "deny" | "denied" => Permission::Denied,
                other => {
                    return Err(AppError::Config(format!(
                        "{} must be grant or deny, got {:?}",
                        NOTIFICATIONS_VAR, other
                    )))
                }
            };
        }
        config.store_url = value(STORE_URL_VAR);

        Ok(config)
    }
}
