use crate::error::NotificationError;
use crate::types::{DailyTime, Permission, UiEvent};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Local, NaiveDateTime};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

/// Device notification capability. Identifiers are unique: scheduling an id
/// that is already pending replaces it.
#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn request_permission(&self) -> Result<Permission, NotificationError>;

    async fn schedule_one_shot(
        &self,
        id: &str,
        body: &str,
        delay: Duration,
    ) -> Result<(), NotificationError>;

    async fn schedule_daily_repeating(
        &self,
        id: &str,
        body: &str,
        time: DailyTime,
    ) -> Result<(), NotificationError>;

    /// Unknown ids are ignored.
    async fn cancel(&self, ids: &[&str]);

    async fn pending(&self) -> Vec<String>;
}

/// Next local occurrence of `time` strictly after `now`.
pub fn next_occurrence(now: NaiveDateTime, time: DailyTime) -> Option<NaiveDateTime> {
    let today = now.date().and_hms_opt(time.hour, time.minute, 0)?;
    if today > now {
        Some(today)
    } else {
        Some(today + ChronoDuration::days(1))
    }
}

/// Fire time after delivering the slot at `delivered`. The wall clock may
/// still read just before `delivered`, so the same slot is never picked again.
pub fn next_after_delivery(
    delivered: NaiveDateTime,
    now: NaiveDateTime,
    time: DailyTime,
) -> Option<NaiveDateTime> {
    let following = delivered + ChronoDuration::days(1);
    if following > now {
        Some(following)
    } else {
        // clock jumped past missed slots
        next_occurrence(now, time)
    }
}

/// In-process notifications on tokio timers, delivered as `UiEvent`s.
pub struct LocalNotificationService {
    permission: Permission,
    events: mpsc::UnboundedSender<UiEvent>,
    pending: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl LocalNotificationService {
    pub fn new(permission: Permission, events: mpsc::UnboundedSender<UiEvent>) -> Self {
        Self {
            permission,
            events,
            pending: Mutex::new(HashMap::new()),
        }
    }

    async fn register(&self, id: &str, handle: JoinHandle<()>) {
        let mut pending = self.pending.lock().await;
        if let Some(previous) = pending.insert(id.to_string(), handle) {
            log::debug!("Replacing pending notification {}", id);
            previous.abort();
        }
    }
}

#[async_trait]
impl NotificationService for LocalNotificationService {
    async fn request_permission(&self) -> Result<Permission, NotificationError> {
        log::info!("Notification permission requested: {:?}", self.permission);
        Ok(self.permission)
    }

    async fn schedule_one_shot(
        &self,
        id: &str,
        body: &str,
        delay: Duration,
    ) -> Result<(), NotificationError> {
        if self.events.is_closed() {
            return Err(NotificationError::Platform("delivery channel closed".to_string()));
        }

        let events = self.events.clone();
        let event = UiEvent::Notification {
            id: id.to_string(),
            body: body.to_string(),
        };
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if events.send(event).is_err() {
                log::warn!("Notification fired after the UI went away");
            }
        });

        self.register(id, handle).await;
        log::info!("Scheduled one-shot notification {} in {:?}", id, delay);
        Ok(())
    }

    async fn schedule_daily_repeating(
        &self,
        id: &str,
        body: &str,
        time: DailyTime,
    ) -> Result<(), NotificationError> {
        if self.events.is_closed() {
            return Err(NotificationError::Platform("delivery channel closed".to_string()));
        }

        let events = self.events.clone();
        let id_owned = id.to_string();
        let body = body.to_string();
        let handle = tokio::spawn(async move {
            let Some(mut next) = next_occurrence(Local::now().naive_local(), time) else {
                log::error!("Cannot compute next fire time for {}", time);
                return;
            };

            loop {
                let now = Local::now().naive_local();
                let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
                tokio::time::sleep(wait).await;

                let event = UiEvent::Notification {
                    id: id_owned.clone(),
                    body: body.clone(),
                };
                if events.send(event).is_err() {
                    log::warn!("Daily reminder channel closed, stopping {}", id_owned);
                    return;
                }

                match next_after_delivery(next, Local::now().naive_local(), time) {
                    Some(following) => next = following,
                    None => return,
                }
            }
        });

        self.register(id, handle).await;
        log::info!("Scheduled daily notification {} at {}", id, time);
        Ok(())
    }

    async fn cancel(&self, ids: &[&str]) {
        let mut pending = self.pending.lock().await;
        for id in ids {
            if let Some(handle) = pending.remove(*id) {
                handle.abort();
                log::info!("Cancelled notification {}", id);
            }
        }
    }

    async fn pending(&self) -> Vec<String> {
        let pending = self.pending.lock().await;
        let mut ids: Vec<String> = pending
            .iter()
            .filter(|(_, handle)| !handle.is_finished())
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }
}
