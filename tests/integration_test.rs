#[cfg(test)]
mod tests {
    use salawat::*;
    use std::error::Error;
    use std::io::Write;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::{tempdir, NamedTempFile};
    use tokio::sync::mpsc;

    struct TestApp {
        state: Arc<AppState>,
        notifications: Arc<LocalNotificationService>,
        rx: mpsc::UnboundedReceiver<UiEvent>,
    }

    // Helper to build app state over a real preferences file
    async fn create_test_state(
        prefs_path: &std::path::Path,
        permission: Permission,
        store_url: Option<&str>,
    ) -> TestApp {
        let (tx, rx) = mpsc::unbounded_channel();
        let store = JsonPreferenceStore::open(prefs_path).await.unwrap();
        let notifications = Arc::new(LocalNotificationService::new(permission, tx.clone()));
        let reviews = Arc::new(LogReviewService::new(store_url.map(str::to_string)));
        let content = ContentLoader::bundled().load().unwrap();

        let state = AppState::new(
            content,
            Settings::new(Box::new(store)),
            notifications.clone(),
            reviews,
            tx,
        )
        .with_review_delay(Duration::from_secs(2));
        TestApp {
            state: Arc::new(state),
            notifications,
            rx,
        }
    }

    async fn reopen_settings(path: &std::path::Path) -> Settings {
        Settings::new(Box::new(JsonPreferenceStore::open(path).await.unwrap()))
    }

    // Foreground, let the deferred review check run, return whether it prompted
    async fn launch(state: &Arc<AppState>) -> bool {
        let check = on_foreground(state.clone()).await.unwrap();
        let shown = check.await.unwrap();
        on_background(state);
        shown
    }

    // Helper function to create a temporary dataset file
    fn create_test_dataset(body: &str) -> Result<NamedTempFile, Box<dyn Error>> {
        let mut temp_file = NamedTempFile::new()?;
        write!(temp_file, "{}", body)?;
        Ok(temp_file)
    }

    #[test]
    fn test_load_dataset_from_file() -> Result<(), Box<dyn Error>> {
        let file = create_test_dataset(
            r#"[
                {"index": 3, "arabic": "د", "translation": "third"},
                {"index": 0, "arabic": "أ", "translation": "opening"},
                {"index": 1, "arabic": "ب", "translation": "verse"},
                {"index": 2, "arabic": "ج", "translation": "first"}
            ]"#,
        )?;

        let items = ContentLoader::from_path(file.path()).load()?;
        let indices: Vec<u32> = items.iter().map(|i| i.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(items[2].display_number(), Some(1));
        Ok(())
    }

    #[test]
    fn test_load_malformed_dataset() -> Result<(), Box<dyn Error>> {
        let file = create_test_dataset(r#"[{"index": 0, "arabic": "أ"}]"#)?;
        let result = ContentLoader::from_path(file.path()).load();
        assert!(matches!(result, Err(LoadError::ParseError(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_settings_survive_restart() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        {
            let mut settings = reopen_settings(&path).await;
            settings.set_font_size(26).await;
            settings.set_show_translation(false).await;
        }

        let settings = reopen_settings(&path).await;
        assert_eq!(settings.font_size(), 26);
        assert!(!settings.show_translation());
    }

    #[tokio::test(start_paused = true)]
    async fn test_review_prompt_on_third_launch() {
        let dir = tempdir().unwrap();
        let TestApp { state, mut rx, .. } =
            create_test_state(&dir.path().join("prefs.json"), Permission::Granted, None).await;

        assert!(!launch(&state).await);
        assert!(!launch(&state).await);
        assert!(launch(&state).await);
        assert_eq!(rx.recv().await, Some(UiEvent::ReviewPrompt));

        // prompted just now, so the next launch stays quiet
        assert!(!launch(&state).await);

        let review = state.settings.lock().await.review_state();
        assert_eq!(review.launch_count, 4);
        assert!(review.last_prompt_date.is_some());
        assert!(!review.has_reviewed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_review_prompt_suppressed_in_background() {
        let dir = tempdir().unwrap();
        let TestApp { state, mut rx, .. } =
            create_test_state(&dir.path().join("prefs.json"), Permission::Granted, None).await;
        state
            .settings
            .lock()
            .await
            .save_review_state(&ReviewPromptState {
                launch_count: 10,
                last_prompt_date: None,
                has_reviewed: false,
            })
            .await;

        let check = on_foreground(state.clone()).await.unwrap();
        on_background(&state);
        assert!(!check.await.unwrap());
        assert!(rx.try_recv().is_err());
        assert_eq!(state.settings.lock().await.review_state().last_prompt_date, None);
    }

    #[tokio::test]
    async fn test_rate_marks_reviewed_even_if_store_fails() {
        let dir = tempdir().unwrap();
        let TestApp { state, .. } =
            create_test_state(&dir.path().join("prefs.json"), Permission::Granted, None).await;

        let reply = command_handler(Command::Rate, state.clone()).await.unwrap();
        assert!(reply.contains("could not be opened"));
        assert!(state.settings.lock().await.review_state().has_reviewed);
    }

    #[tokio::test]
    async fn test_dismiss_does_not_mark_reviewed() {
        let dir = tempdir().unwrap();
        let TestApp { state, .. } =
            create_test_state(&dir.path().join("prefs.json"), Permission::Granted, None).await;

        command_handler(Command::Later, state.clone()).await.unwrap();
        assert!(!state.settings.lock().await.review_state().has_reviewed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remind_on_then_off_clears_pending() {
        let dir = tempdir().unwrap();
        let TestApp {
            state, notifications, rx: _rx
        } = create_test_state(&dir.path().join("prefs.json"), Permission::Granted, None).await;

        let reply = command_handler(Command::Remind(true), state.clone()).await.unwrap();
        assert!(reply.contains("daily reminder at"));
        assert_eq!(
            notifications.pending().await,
            vec![DAILY_REMINDER_ID.to_string(), WELCOME_REMINDER_ID.to_string()]
        );

        command_handler(Command::Remind(false), state.clone()).await.unwrap();
        assert!(notifications.pending().await.is_empty());
        assert!(!state.settings.lock().await.reminder_state().enabled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_welcome_reminder_is_delivered() {
        let dir = tempdir().unwrap();
        let TestApp { state, mut rx, .. } =
            create_test_state(&dir.path().join("prefs.json"), Permission::Granted, None).await;

        toggle_reminders(&state, true).await.unwrap();
        match rx.recv().await {
            Some(UiEvent::Notification { id, body }) => {
                assert_eq!(id, WELCOME_REMINDER_ID);
                assert!(BLESSING_PHRASES.contains(&body.as_str()));
            }
            other => panic!("expected welcome notification, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_remind_denied_reverts_toggle() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let TestApp {
            state, notifications, ..
        } = create_test_state(&path, Permission::Denied, None).await;

        let reply = command_handler(Command::Remind(true), state.clone()).await.unwrap();
        assert!(reply.contains("not allowed"));
        assert!(notifications.pending().await.is_empty());

        drop(state);
        let reopened = reopen_settings(&path).await;
        assert!(!reopened.reminder_state().enabled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_keeps_daily_time_without_welcome() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let first = create_test_state(&path, Permission::Granted, None).await;
        toggle_reminders(&first.state, true).await.unwrap();
        let enabled = first.state.reminders.schedule().await.unwrap();
        drop(first);

        let TestApp {
            state,
            notifications,
            mut rx,
        } = create_test_state(&path, Permission::Granted, None).await;
        restore_reminders(&state).await;

        let restored = state.reminders.schedule().await.unwrap();
        assert_eq!(restored.daily_time, enabled.daily_time);
        assert_eq!(restored.welcome_body, None);
        assert_eq!(notifications.pending().await, vec![DAILY_REMINDER_ID.to_string()]);

        tokio::time::sleep(WELCOME_REMINDER_DELAY * 2).await;
        assert!(rx.try_recv().is_err());
        assert!(state.settings.lock().await.reminder_state().enabled);
    }

    #[tokio::test]
    async fn test_list_respects_font_and_translation() {
        let dir = tempdir().unwrap();
        let TestApp { state, .. } =
            create_test_state(&dir.path().join("prefs.json"), Permission::Granted, None).await;

        command_handler(Command::Bigger, state.clone()).await.unwrap();
        command_handler(Command::Translation, state.clone()).await.unwrap();
        let list = command_handler(Command::List, state.clone()).await.unwrap();

        assert!(list.contains("1. [22pt]"));
        assert!(list.contains(&format!("[{}pt]", HEADLINE_FONT_SIZE)));
        assert!(!list.contains("In the name of Allah"));
    }
}
