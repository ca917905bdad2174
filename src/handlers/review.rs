use crate::error::ReviewError;
use crate::state::AppState;
use crate::types::{ReviewPromptState, UiEvent};
use chrono::{DateTime, Utc};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Launches required before the first prompt.
pub const MIN_LAUNCHES_BEFORE_PROMPT: u32 = 3;
/// Calendar days between two prompts.
pub const DAYS_BETWEEN_PROMPTS: i64 = 30;

pub struct ReviewPromptPolicy;

impl ReviewPromptPolicy {
    pub fn should_prompt(state: &ReviewPromptState, now: DateTime<Utc>) -> bool {
        if state.has_reviewed || state.launch_count < MIN_LAUNCHES_BEFORE_PROMPT {
            return false;
        }

        match state.last_prompt_date {
            None => true,
            Some(last) => {
                (now.date_naive() - last.date_naive()).num_days() >= DAYS_BETWEEN_PROMPTS
            }
        }
    }

    pub fn record_launch(state: &ReviewPromptState) -> ReviewPromptState {
        ReviewPromptState {
            launch_count: state.launch_count.saturating_add(1),
            ..state.clone()
        }
    }
}

/// App came to the foreground: counts the launch and schedules the deferred
/// prompt check. Returns `None` when the app was already in the foreground,
/// otherwise a handle that resolves to whether the prompt was shown.
pub async fn on_foreground(state: Arc<AppState>) -> Option<JoinHandle<bool>> {
    if state.foreground.swap(true, Ordering::SeqCst) {
        log::debug!("Already in the foreground, launch not counted");
        return None;
    }

    {
        let mut settings = state.settings.lock().await;
        let updated = ReviewPromptPolicy::record_launch(&settings.review_state());
        log::info!("App launch #{}", updated.launch_count);
        settings.save_review_state(&updated).await;
    }

    let delay = state.review_prompt_delay;
    Some(tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        maybe_show_prompt(&state, Utc::now()).await
    }))
}

pub fn on_background(state: &AppState) {
    state.set_foreground(false);
}

async fn maybe_show_prompt(state: &AppState, now: DateTime<Utc>) -> bool {
    if !state.is_foreground() {
        log::debug!("Review prompt suppressed, app not in foreground");
        return false;
    }

    let mut settings = state.settings.lock().await;
    let mut review = settings.review_state();
    if !ReviewPromptPolicy::should_prompt(&review, now) {
        return false;
    }

    review.last_prompt_date = Some(now);
    settings.save_review_state(&review).await;
    drop(settings);

    if state.events.send(UiEvent::ReviewPrompt).is_err() {
        log::warn!("Review prompt dropped, UI channel closed");
        return false;
    }
    log::info!("Review prompt shown");
    true
}

/// User chose to rate. The reviewed flag is set before the store opens and
/// stays set if opening fails.
pub async fn rate(state: &AppState) -> Result<(), ReviewError> {
    {
        let mut settings = state.settings.lock().await;
        let mut review = settings.review_state();
        review.has_reviewed = true;
        settings.save_review_state(&review).await;
    }

    state.reviews.open_store_page().await.map_err(|e| {
        log::error!("Failed to open store page: {}", e);
        e
    })
}

/// Dismissing does not count as reviewing; the prompt returns after the interval.
pub fn dismiss() {
    log::info!("Review prompt dismissed");
}
