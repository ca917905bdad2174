use crate::error::PreferenceError;
use crate::handlers::ReminderScheduler;
use crate::services::{NotificationService, ReviewService};
use crate::types::{
    ContentItem, DailyTime, ReminderState, ReviewPromptState, UiEvent, DEFAULT_FONT_SIZE,
    FONT_SIZE_STEP, MAX_FONT_SIZE, MIN_FONT_SIZE,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};

mod content;
mod preferences;

pub use content::*;
pub use preferences::*;

pub const DEFAULT_REVIEW_PROMPT_DELAY: Duration = Duration::from_secs(2);

/// User settings backed by a preference store. Every setter writes through;
/// a failed write is logged and the in-memory value still applies.
pub struct Settings {
    store: Box<dyn PreferenceStore>,
}

impl Settings {
    pub fn new(store: Box<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryPreferenceStore::new()))
    }

    fn persist(&self, key: &str, result: Result<(), PreferenceError>) {
        if let Err(e) = result {
            log::error!("Failed to save preference {}: {}", key, e);
        }
    }

    pub fn show_translation(&self) -> bool {
        self.store.get_bool_or(SHOW_TRANSLATION_KEY, true)
    }

    pub async fn set_show_translation(&mut self, show: bool) {
        let result = self.store.set_bool(SHOW_TRANSLATION_KEY, show).await;
        self.persist(SHOW_TRANSLATION_KEY, result);
    }

    pub fn font_size(&self) -> u32 {
        let stored = self
            .store
            .get_int_or(FONT_SIZE_KEY, i64::from(DEFAULT_FONT_SIZE));
        stored.clamp(i64::from(MIN_FONT_SIZE), i64::from(MAX_FONT_SIZE)) as u32
    }

    /// Stores `size` clamped to the supported range and returns what was applied.
    pub async fn set_font_size(&mut self, size: u32) -> u32 {
        let size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        let result = self.store.set_int(FONT_SIZE_KEY, i64::from(size)).await;
        self.persist(FONT_SIZE_KEY, result);
        size
    }

    pub async fn increase_font(&mut self) -> u32 {
        let next = self.font_size().saturating_add(FONT_SIZE_STEP);
        self.set_font_size(next).await
    }

    pub async fn decrease_font(&mut self) -> u32 {
        let next = self.font_size().saturating_sub(FONT_SIZE_STEP);
        self.set_font_size(next).await
    }

    pub fn reminder_state(&self) -> ReminderState {
        ReminderState {
            enabled: self.store.get_bool_or(NOTIFICATIONS_ENABLED_KEY, false),
        }
    }

    pub async fn set_notifications_enabled(&mut self, enabled: bool) {
        let result = self.store.set_bool(NOTIFICATIONS_ENABLED_KEY, enabled).await;
        self.persist(NOTIFICATIONS_ENABLED_KEY, result);
    }

    /// Daily reminder time drawn by the last enable, if one was saved.
    pub fn daily_time(&self) -> Option<DailyTime> {
        let hour = u32::try_from(self.store.get_int(DAILY_HOUR_KEY)?).ok()?;
        let minute = u32::try_from(self.store.get_int(DAILY_MINUTE_KEY)?).ok()?;
        DailyTime::new(hour, minute)
    }

    pub async fn set_daily_time(&mut self, time: DailyTime) {
        let result = self.store.set_int(DAILY_HOUR_KEY, i64::from(time.hour)).await;
        self.persist(DAILY_HOUR_KEY, result);
        let result = self
            .store
            .set_int(DAILY_MINUTE_KEY, i64::from(time.minute))
            .await;
        self.persist(DAILY_MINUTE_KEY, result);
    }

    pub fn review_state(&self) -> ReviewPromptState {
        let launch_count = self
            .store
            .get_int_or(LAUNCH_COUNT_KEY, 0)
            .clamp(0, i64::from(u32::MAX)) as u32;
        ReviewPromptState {
            launch_count,
            last_prompt_date: self.store.get_date(LAST_PROMPT_DATE_KEY),
            has_reviewed: self.store.get_bool_or(HAS_REVIEWED_KEY, false),
        }
    }

    pub async fn save_review_state(&mut self, state: &ReviewPromptState) {
        let result = self
            .store
            .set_int(LAUNCH_COUNT_KEY, i64::from(state.launch_count))
            .await;
        self.persist(LAUNCH_COUNT_KEY, result);

        if let Some(date) = state.last_prompt_date {
            let result = self.store.set_date(LAST_PROMPT_DATE_KEY, date).await;
            self.persist(LAST_PROMPT_DATE_KEY, result);
        }

        let result = self
            .store
            .set_bool(HAS_REVIEWED_KEY, state.has_reviewed)
            .await;
        self.persist(HAS_REVIEWED_KEY, result);
    }
}

pub struct AppState {
    pub content: Vec<ContentItem>,
    pub settings: Mutex<Settings>,
    pub reminders: ReminderScheduler,
    pub reviews: Arc<dyn ReviewService>,
    pub review_prompt_delay: Duration,
    pub foreground: AtomicBool,
    pub events: mpsc::UnboundedSender<UiEvent>,
}

impl AppState {
    pub fn new(
        content: Vec<ContentItem>,
        settings: Settings,
        notifications: Arc<dyn NotificationService>,
        reviews: Arc<dyn ReviewService>,
        events: mpsc::UnboundedSender<UiEvent>,
    ) -> Self {
        Self {
            content,
            settings: Mutex::new(settings),
            reminders: ReminderScheduler::new(notifications, StdRng::from_entropy()),
            reviews,
            review_prompt_delay: DEFAULT_REVIEW_PROMPT_DELAY,
            foreground: AtomicBool::new(false),
            events,
        }
    }

    pub fn with_review_delay(mut self, delay: Duration) -> Self {
        self.review_prompt_delay = delay;
        self
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.reminders = self.reminders.with_rng(rng);
        self
    }

    pub fn is_foreground(&self) -> bool {
        self.foreground.load(Ordering::SeqCst)
    }

    pub fn set_foreground(&self, foreground: bool) {
        self.foreground.store(foreground, Ordering::SeqCst);
    }
}
