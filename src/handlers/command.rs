use crate::commands::Command;
use crate::error::NotificationError;
use crate::handlers::{dismiss, on_background, on_foreground, rate, toggle_reminders};
use crate::state::AppState;
use crate::view::{render_list, settings_sheet, InfoSheet};
use std::error::Error;
use std::sync::Arc;

const WELCOME: &str = "🕌 Salawat: blessings upon the Prophet ﷺ
\n 📜 Use /list to read the collection.
\n 🔠 Use /bigger and /smaller to adjust the text size.
\n 🌐 Use /translation to show or hide the English meaning.
\n 🔔 Use /remind on to receive a daily reminder at a random time of day.
\n ❓ Use /help for all commands.";

pub async fn command_handler(
    cmd: Command,
    state: Arc<AppState>,
) -> Result<String, Box<dyn Error + Send + Sync>> {
    let reply = match cmd {
        Command::Start => WELCOME.to_string(),
        Command::List => {
            let settings = state.settings.lock().await;
            render_list(&state.content, &settings)
        }
        Command::Bigger => {
            let size = state.settings.lock().await.increase_font().await;
            format!("Text size: {}pt", size)
        }
        Command::Smaller => {
            let size = state.settings.lock().await.decrease_font().await;
            format!("Text size: {}pt", size)
        }
        Command::Translation => {
            let mut settings = state.settings.lock().await;
            let show = !settings.show_translation();
            settings.set_show_translation(show).await;
            if show {
                "Translation shown.".to_string()
            } else {
                "Translation hidden.".to_string()
            }
        }
        Command::Remind(enabled) => match toggle_reminders(&state, enabled).await {
            Ok(()) if enabled => match state.reminders.schedule().await {
                Some(schedule) => format!(
                    "✅ Reminders on. You'll get a daily reminder at {}.",
                    schedule.daily_time
                ),
                None => "✅ Reminders on.".to_string(),
            },
            Ok(()) => "🔕 Reminders off.".to_string(),
            Err(NotificationError::PermissionDenied) => {
                "Notifications are not allowed for this app, reminders stay off.".to_string()
            }
            Err(e) => format!("Could not schedule reminders ({}), reminders stay off.", e),
        },
        Command::Settings => {
            let schedule = state.reminders.schedule().await;
            let settings = state.settings.lock().await;
            settings_sheet(&settings, schedule.as_ref())
        }
        Command::Info(name) => match InfoSheet::from_name(&name) {
            Some(sheet) => sheet.render(),
            None => "Usage: /info about, /info virtues or /info usage".to_string(),
        },
        Command::Rate => match rate(&state).await {
            Ok(()) => "🙏 Thank you for rating the app!".to_string(),
            Err(e) => {
                log::warn!("Rating flow failed: {}", e);
                "Thank you! The store page could not be opened right now.".to_string()
            }
        },
        Command::Later => {
            dismiss();
            "Maybe later.".to_string()
        }
        Command::Background => {
            on_background(&state);
            "App moved to the background.".to_string()
        }
        Command::Foreground => match on_foreground(state.clone()).await {
            Some(_review_check) => "Welcome back.".to_string(),
            None => "The app is already open.".to_string(),
        },
        Command::Help => Command::descriptions(),
        Command::Quit => "Goodbye.".to_string(),
    };

    Ok(reply)
}
