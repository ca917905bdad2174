use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::time::Duration;

pub const WELCOME_REMINDER_ID: &str = "salawat.reminder.welcome";
pub const DAILY_REMINDER_ID: &str = "salawat.reminder.daily";

/// The one-shot reminder fires this long after reminders are switched on.
pub const WELCOME_REMINDER_DELAY: Duration = Duration::from_secs(5);

/// Daily reminder hours are drawn from this inclusive range.
pub const DAILY_REMINDER_HOURS: (u32, u32) = (9, 21);

pub const BLESSING_PHRASES: &[&str] = &[
    "Send blessings upon the Prophet ﷺ today.",
    "اللَّهُمَّ صَلِّ عَلَى مُحَمَّدٍ وَعَلَى آلِ مُحَمَّدٍ",
    "Whoever sends one blessing upon me, Allah sends ten upon him.",
    "Take a moment for Durood Shareef.",
    "صَلَّى اللَّهُ عَلَيْهِ وَسَلَّمَ",
];

pub const DAILY_REMINDER_BODY: &str = "It's time for your daily Salawat.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Local time of day for a repeating reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DailyTime {
    pub hour: u32,
    pub minute: u32,
}

impl DailyTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    /// Hour uniform over 9..=21, minute uniform over 0..=59.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let (first, last) = DAILY_REMINDER_HOURS;
        Self {
            hour: rng.gen_range(first..=last),
            minute: rng.gen_range(0..60),
        }
    }
}

impl fmt::Display for DailyTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

pub fn random_blessing<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    BLESSING_PHRASES
        .choose(rng)
        .copied()
        .unwrap_or(DAILY_REMINDER_BODY)
}

/// What is registered with the notification service. `welcome_body` is `None`
/// when the daily reminder was restored at startup rather than freshly enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderSchedule {
    pub welcome_body: Option<String>,
    pub daily_body: String,
    pub daily_time: DailyTime,
}
