use salawat::{
    command_handler, on_background, on_foreground, restore_reminders, AppError, AppState,
    Command, Config, ContentLoader, JsonPreferenceStore, LocalNotificationService,
    LogReviewService, Settings, UiEvent,
};
use std::error::Error;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();
    log::info!("Starting Salawat...");

    let config = Config::from_env()?;

    // The dataset is required; without it there is nothing to show.
    let loader = match &config.dataset_path {
        Some(path) => ContentLoader::from_path(path),
        None => ContentLoader::bundled(),
    };
    let content = loader.load().map_err(|e| {
        log::error!("Failed to load Salawat dataset: {}", e);
        AppError::from(e)
    })?;
    log::info!("Loaded {} Salawat", content.len());

    let settings = match JsonPreferenceStore::open(&config.preferences_path).await {
        Ok(store) => {
            log::info!("Preferences stored at {}", store.path().display());
            Settings::new(Box::new(store))
        }
        Err(e) => {
            log::error!(
                "Failed to open preferences: {}. Starting with defaults that will not be saved.",
                e
            );
            Settings::in_memory()
        }
    };

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let notifications = Arc::new(LocalNotificationService::new(
        config.notification_permission,
        events_tx.clone(),
    ));
    let reviews = Arc::new(LogReviewService::new(config.store_url.clone()));

    let state = Arc::new(
        AppState::new(content, settings, notifications, reviews, events_tx)
            .with_review_delay(config.review_prompt_delay),
    );

    restore_reminders(&state).await;
    let _review_check = on_foreground(state.clone()).await;

    let welcome = command_handler(Command::Start, state.clone())
        .await
        .map_err(|e| e.to_string())?;
    println!("{}\n", welcome);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line? {
                    Some(line) => line,
                    None => break,
                };
                if line.trim().is_empty() {
                    continue;
                }

                let cmd = match line.parse::<Command>() {
                    Ok(cmd) => cmd,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                let quit = cmd == Command::Quit;

                match command_handler(cmd, state.clone()).await {
                    Ok(reply) => println!("{}\n", reply),
                    Err(e) => log::error!("Command failed: {}", e),
                }
                if quit {
                    break;
                }
            }
            Some(event) = events_rx.recv() => match event {
                UiEvent::Notification { body, .. } => println!("🔔 {}\n", body),
                UiEvent::ReviewPrompt => println!(
                    "⭐ Enjoying Salawat? Use /rate to leave a review or /later to dismiss.\n"
                ),
            },
            _ = tokio::signal::ctrl_c() => {
                log::info!("Interrupted");
                break;
            }
        }
    }

    on_background(&state);
    log::info!("Salawat closed");
    Ok(())
}
