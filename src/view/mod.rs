use crate::state::Settings;
use crate::types::{ContentItem, ReminderSchedule, HEADLINE_FONT_SIZE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedItem {
    pub label: Option<String>,
    pub arabic: String,
    pub translation: Option<String>,
    pub font_size: u32,
}

pub fn render_item(item: &ContentItem, settings: &Settings) -> RenderedItem {
    let font_size = if item.is_headline() {
        HEADLINE_FONT_SIZE
    } else {
        settings.font_size()
    };

    RenderedItem {
        label: item.display_number().map(|n| format!("{}.", n)),
        arabic: item.arabic_text.clone(),
        translation: settings
            .show_translation()
            .then(|| item.translation.clone()),
        font_size,
    }
}

/// Main screen as text, one block per item.
pub fn render_list(items: &[ContentItem], settings: &Settings) -> String {
    let mut out = String::new();
    for item in items {
        let rendered = render_item(item, settings);
        match &rendered.label {
            Some(label) => out.push_str(&format!(
                "{} [{}pt] {}\n",
                label, rendered.font_size, rendered.arabic
            )),
            None => out.push_str(&format!("[{}pt] {}\n", rendered.font_size, rendered.arabic)),
        }
        if let Some(translation) = &rendered.translation {
            out.push_str(&format!("    {}\n", translation));
        }
        out.push('\n');
    }
    out
}

pub fn settings_sheet(settings: &Settings, schedule: Option<&ReminderSchedule>) -> String {
    let reminders = match schedule {
        Some(schedule) => format!("on (daily at {})", schedule.daily_time),
        None if settings.reminder_state().enabled => "on".to_string(),
        None => "off".to_string(),
    };

    format!(
        "⚙️ Settings\nFont size: {}pt\nTranslation: {}\nDaily reminders: {}",
        settings.font_size(),
        if settings.show_translation() { "shown" } else { "hidden" },
        reminders,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoSheet {
    About,
    Virtues,
    HowToUse,
}

impl InfoSheet {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "about" => Some(InfoSheet::About),
            "virtues" | "benefits" => Some(InfoSheet::Virtues),
            "usage" | "howto" | "help" => Some(InfoSheet::HowToUse),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            InfoSheet::About => "About Salawat",
            InfoSheet::Virtues => "Virtues of Durood",
            InfoSheet::HowToUse => "How to use",
        }
    }

    pub fn body(&self) -> &'static str {
        match self {
            InfoSheet::About => {
                "Salawat (Durood) are invocations of blessings upon the Prophet Muhammad ﷺ. \
                 This collection gathers well-known forms with their English meanings so they \
                 can be read and recited anywhere, without an internet connection."
            }
            InfoSheet::Virtues => {
                "\"Whoever sends blessings upon me once, Allah will send blessings upon him \
                 tenfold.\" (Sahih Muslim). Allah and His angels send blessings upon the \
                 Prophet, and the believers are commanded to do the same (Al-Ahzab 33:56)."
            }
            InfoSheet::HowToUse => {
                "Scroll through the list and recite at your own pace. Use /bigger and \
                 /smaller to adjust the text, /translation to show or hide the English, \
                 and /remind on to receive a gentle daily reminder."
            }
        }
    }

    pub fn render(&self) -> String {
        format!("📖 {}\n\n{}", self.title(), self.body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<ContentItem> {
        (0..4)
            .map(|index| ContentItem {
                index,
                arabic_text: format!("arabic-{}", index),
                translation: format!("translation-{}", index),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_headlines_use_fixed_size() {
        let mut settings = Settings::in_memory();
        settings.set_font_size(14).await;
        let items = items();

        let first = render_item(&items[0], &settings);
        assert_eq!(first.font_size, HEADLINE_FONT_SIZE);
        assert_eq!(first.label, None);

        let third = render_item(&items[2], &settings);
        assert_eq!(third.font_size, 14);
        assert_eq!(third.label.as_deref(), Some("1."));
    }

    #[tokio::test]
    async fn test_translation_toggle() {
        let mut settings = Settings::in_memory();
        let items = items();
        assert!(render_list(&items, &settings).contains("translation-3"));

        settings.set_show_translation(false).await;
        let list = render_list(&items, &settings);
        assert!(!list.contains("translation-"));
        assert!(list.contains("2. [20pt] arabic-3"));
    }

    #[test]
    fn test_settings_sheet_shows_schedule() {
        let settings = Settings::in_memory();
        let schedule = ReminderSchedule {
            welcome_body: Some("hi".to_string()),
            daily_body: "daily".to_string(),
            daily_time: crate::types::DailyTime::new(9, 5).unwrap(),
        };
        let sheet = settings_sheet(&settings, Some(&schedule));
        assert!(sheet.contains("daily at 09:05"));
        assert!(settings_sheet(&settings, None).contains("Daily reminders: off"));
    }

    #[test]
    fn test_info_sheet_lookup() {
        assert_eq!(InfoSheet::from_name("About"), Some(InfoSheet::About));
        assert_eq!(InfoSheet::from_name("benefits"), Some(InfoSheet::Virtues));
        assert_eq!(InfoSheet::from_name("nope"), None);
        assert!(InfoSheet::Virtues.render().starts_with("📖 Virtues of Durood"));
    }
}
