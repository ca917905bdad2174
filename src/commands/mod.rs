use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    List,
    Bigger,
    Smaller,
    Translation,
    Remind(bool),
    Settings,
    Info(String),
    Rate,
    Later,
    Background,
    Foreground,
    Help,
    Quit,
}

const DESCRIPTIONS: &[(&str, &str)] = &[
    ("/start", "Show the welcome screen"),
    ("/list", "Show all Salawat"),
    ("/bigger", "Increase the text size"),
    ("/smaller", "Decrease the text size"),
    ("/translation", "Show or hide the English translation"),
    ("/remind on|off", "Turn daily reminders on or off"),
    ("/settings", "Show your settings"),
    ("/info <about|virtues|usage>", "Show an information sheet"),
    ("/rate", "Rate the app"),
    ("/later", "Dismiss the rating prompt"),
    ("/background", "Send the app to the background"),
    ("/foreground", "Bring the app back to the foreground"),
    ("/help", "Show help message"),
    ("/quit", "Close the app"),
];

impl Command {
    pub fn descriptions() -> String {
        let mut text = String::from("Available commands:\n");
        for (usage, description) in DESCRIPTIONS {
            text.push_str(&format!("{}  {}\n", usage, description));
        }
        text
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCommandError(pub String);

impl fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n{}", self.0, Command::descriptions())
    }
}

impl std::error::Error for ParseCommandError {}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let (name, arg) = match input.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (input, ""),
        };
        let name = name.trim_start_matches('/').to_lowercase();

        let command = match name.as_str() {
            "start" => Command::Start,
            "list" => Command::List,
            "bigger" => Command::Bigger,
            "smaller" => Command::Smaller,
            "translation" => Command::Translation,
            "remind" => match arg.to_lowercase().as_str() {
                "on" => Command::Remind(true),
                "off" => Command::Remind(false),
                _ => {
                    return Err(ParseCommandError(
                        "Usage: /remind on or /remind off".to_string(),
                    ))
                }
            },
            "settings" => Command::Settings,
            "info" => Command::Info(arg.to_string()),
            "rate" => Command::Rate,
            "later" => Command::Later,
            "background" => Command::Background,
            "foreground" => Command::Foreground,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(ParseCommandError(format!("Unknown command: {}", input))),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_documented_commands() {
        let cases = [
            ("/start", Command::Start),
            ("/list", Command::List),
            ("/bigger", Command::Bigger),
            ("/smaller", Command::Smaller),
            ("/translation", Command::Translation),
            ("/remind on", Command::Remind(true)),
            ("/remind OFF", Command::Remind(false)),
            ("/settings", Command::Settings),
            ("/info virtues", Command::Info("virtues".to_string())),
            ("/rate", Command::Rate),
            ("/later", Command::Later),
            ("/background", Command::Background),
            ("/foreground", Command::Foreground),
            ("/help", Command::Help),
            ("/quit", Command::Quit),
            ("  list  ", Command::List),
        ];
        for (input, expected) in cases {
            assert_eq!(input.parse::<Command>().unwrap(), expected, "input {:?}", input);
        }
    }

    #[test]
    fn test_parse_errors_include_help() {
        let err = "/dance".parse::<Command>().unwrap_err();
        assert!(err.to_string().contains("Unknown command"));
        assert!(err.to_string().contains("Available commands"));
        assert!("/remind maybe".parse::<Command>().is_err());
    }
}
