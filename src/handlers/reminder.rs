use crate::error::NotificationError;
use crate::services::NotificationService;
use crate::state::AppState;
use crate::types::{
    random_blessing, DailyTime, Permission, ReminderSchedule, DAILY_REMINDER_BODY,
    DAILY_REMINDER_ID, WELCOME_REMINDER_DELAY, WELCOME_REMINDER_ID,
};
use rand::rngs::StdRng;
use std::sync::Arc;
use tokio::sync::Mutex;

const REMINDER_IDS: [&str; 2] = [WELCOME_REMINDER_ID, DAILY_REMINDER_ID];

/// Turns the reminder toggle into notification requests.
///
/// Enabling asks for permission, then schedules a welcome reminder a few
/// seconds out and one daily reminder at a random time between 09:00 and
/// 21:59. The daily time is drawn once per enable and stays fixed until the
/// toggle changes again.
pub struct ReminderScheduler {
    notifications: Arc<dyn NotificationService>,
    rng: Mutex<StdRng>,
    schedule: Mutex<Option<ReminderSchedule>>,
}

impl ReminderScheduler {
    pub fn new(notifications: Arc<dyn NotificationService>, rng: StdRng) -> Self {
        Self {
            notifications,
            rng: Mutex::new(rng),
            schedule: Mutex::new(None),
        }
    }

    pub fn with_rng(self, rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            ..self
        }
    }

    /// What is currently scheduled, `None` while reminders are off.
    pub async fn schedule(&self) -> Option<ReminderSchedule> {
        self.schedule.lock().await.clone()
    }

    pub async fn set_enabled(&self, enabled: bool) -> Result<(), NotificationError> {
        if !enabled {
            self.cancel_all().await;
            log::info!("Reminders disabled");
            return Ok(());
        }

        match self.notifications.request_permission().await {
            Ok(Permission::Granted) => {}
            Ok(Permission::Denied) => {
                log::warn!("Notification permission denied");
                self.cancel_all().await;
                return Err(NotificationError::PermissionDenied);
            }
            Err(e) => {
                log::error!("Failed to request notification permission: {}", e);
                self.cancel_all().await;
                return Err(e);
            }
        }

        let (welcome_body, daily_time) = {
            let mut rng = self.rng.lock().await;
            (random_blessing(&mut *rng), DailyTime::random(&mut *rng))
        };

        // Replace whatever an earlier enable left behind.
        self.cancel_all().await;

        if let Err(e) = self
            .notifications
            .schedule_one_shot(WELCOME_REMINDER_ID, welcome_body, WELCOME_REMINDER_DELAY)
            .await
        {
            log::error!("Failed to schedule welcome reminder: {}", e);
            return Err(e);
        }

        self.schedule_daily(daily_time, Some(welcome_body.to_string())).await?;
        log::info!("Reminders enabled, daily reminder at {}", daily_time);
        Ok(())
    }

    /// Re-registers the daily reminder at a previously drawn time. No new draw
    /// and no welcome reminder.
    pub async fn resume(&self, daily_time: DailyTime) -> Result<(), NotificationError> {
        match self.notifications.request_permission().await {
            Ok(Permission::Granted) => {}
            Ok(Permission::Denied) => {
                log::warn!("Notification permission revoked since reminders were enabled");
                self.cancel_all().await;
                return Err(NotificationError::PermissionDenied);
            }
            Err(e) => {
                log::error!("Failed to request notification permission: {}", e);
                self.cancel_all().await;
                return Err(e);
            }
        }

        self.notifications.cancel(&[DAILY_REMINDER_ID]).await;
        self.schedule_daily(daily_time, None).await?;
        log::info!("Daily reminder resumed at {}", daily_time);
        Ok(())
    }

    async fn schedule_daily(
        &self,
        daily_time: DailyTime,
        welcome_body: Option<String>,
    ) -> Result<(), NotificationError> {
        if let Err(e) = self
            .notifications
            .schedule_daily_repeating(DAILY_REMINDER_ID, DAILY_REMINDER_BODY, daily_time)
            .await
        {
            log::error!("Failed to schedule daily reminder: {}", e);
            self.cancel_all().await;
            return Err(e);
        }

        *self.schedule.lock().await = Some(ReminderSchedule {
            welcome_body,
            daily_body: DAILY_REMINDER_BODY.to_string(),
            daily_time,
        });
        Ok(())
    }

    async fn cancel_all(&self) {
        self.notifications.cancel(&REMINDER_IDS).await;
        *self.schedule.lock().await = None;
    }
}

/// Applies the reminder toggle: persists the flag and the drawn daily time,
/// and rolls the flag back to off when enabling fails.
pub async fn toggle_reminders(state: &AppState, enabled: bool) -> Result<(), NotificationError> {
    state.settings.lock().await.set_notifications_enabled(enabled).await;

    match state.reminders.set_enabled(enabled).await {
        Ok(()) => {
            if let Some(schedule) = state.reminders.schedule().await {
                state
                    .settings
                    .lock()
                    .await
                    .set_daily_time(schedule.daily_time)
                    .await;
            }
            Ok(())
        }
        Err(e) => {
            if enabled {
                log::info!("Reverting reminder toggle after error: {}", e);
                state
                    .settings
                    .lock()
                    .await
                    .set_notifications_enabled(false)
                    .await;
            }
            Err(e)
        }
    }
}

/// Timers do not survive a restart, so a persisted "on" is re-applied at
/// launch using the saved daily time.
pub async fn restore_reminders(state: &AppState) {
    let (enabled, saved_time) = {
        let settings = state.settings.lock().await;
        (settings.reminder_state().enabled, settings.daily_time())
    };
    if !enabled {
        return;
    }

    let Some(time) = saved_time else {
        log::info!("No saved reminder time, enabling reminders afresh");
        if let Err(e) = toggle_reminders(state, true).await {
            log::warn!("Could not restore reminders: {}", e);
        }
        return;
    };

    log::info!("Restoring daily reminder at {}", time);
    if let Err(e) = state.reminders.resume(time).await {
        log::warn!("Could not restore reminders: {}", e);
        state
            .settings
            .lock()
            .await
            .set_notifications_enabled(false)
            .await;
    }
}
