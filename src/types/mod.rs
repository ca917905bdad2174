use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod reminder;
pub use reminder::*;

/// Headline items (index 0 and 1) are always shown at this size.
pub const HEADLINE_FONT_SIZE: u32 = 32;
pub const DEFAULT_FONT_SIZE: u32 = 20;
pub const MIN_FONT_SIZE: u32 = 12;
pub const MAX_FONT_SIZE: u32 = 40;
pub const FONT_SIZE_STEP: u32 = 2;

/// One devotional passage from the bundled dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub index: u32,
    #[serde(rename = "arabic")]
    pub arabic_text: String,
    pub translation: String,
}

impl ContentItem {
    /// Index 0 and 1 open the screen at a fixed, larger size.
    pub fn is_headline(&self) -> bool {
        self.index <= 1
    }

    /// Number shown next to the item in the list, if any.
    pub fn display_number(&self) -> Option<u32> {
        if self.is_headline() {
            None
        } else {
            Some(self.index - 1)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReminderState {
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewPromptState {
    pub launch_count: u32,
    pub last_prompt_date: Option<DateTime<Utc>>,
    pub has_reviewed: bool,
}

/// Events produced off the main loop and rendered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Notification { id: String, body: String },
    ReviewPrompt,
}
