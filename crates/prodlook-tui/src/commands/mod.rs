// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use crate::{app::AppState, theme::Theme};
use prodlook_core::export::ExportFormat;

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Close the app
    Quit,
    // Display help
    Help,
    // Change theme
    Theme(String),
    // Clear input, results and session
    New,
    // Run the search for whatever is in the input box
    Search,
    // Write the current results to disk
    Export(ExportFormat),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" | "q!" | "quit!" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "new" | "clear" => Ok(Command::New),
            "search" | "s" => Ok(Command::Search),
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            "export" | "w" => {
                if rest.is_empty() {
                    Err("usage: export <csv|xlsx>".to_string())
                } else {
                    rest.parse().map(Command::Export)
                }
            }
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => {
            s.quit = true;
        }
        Command::Help => {
            s.show_help = !s.show_help;
        }
        Command::Theme(name) => {
            tracing::debug!(theme = %name, "theme switched");
            s.theme = Theme::by_name(&name);
        }
        Command::New => s.new_search(),
        Command::Search => s.submit_search(),
        Command::Export(format) => s.export(format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit() {
        assert_eq!(Command::parse("q"), Ok(Command::Quit));
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
        assert_eq!(Command::parse("  quit!  "), Ok(Command::Quit));
    }

    #[test]
    fn parse_theme() {
        assert_eq!(
            Command::parse("theme gruvbox"),
            Ok(Command::Theme("gruvbox".to_string()))
        );
        assert!(Command::parse("theme").is_err());
    }

    #[test]
    fn parse_export() {
        assert_eq!(Command::parse("export csv"), Ok(Command::Export(ExportFormat::Csv)));
        assert_eq!(Command::parse("w xlsx"), Ok(Command::Export(ExportFormat::Xlsx)));
        assert!(Command::parse("export").is_err());
        assert!(Command::parse("export pdf").unwrap_err().contains("pdf"));
    }

    #[test]
    fn parse_new_and_search() {
        assert_eq!(Command::parse("new"), Ok(Command::New));
        assert_eq!(Command::parse("clear"), Ok(Command::New));
        assert_eq!(Command::parse("search"), Ok(Command::Search));
    }

    #[test]
    fn parse_empty_returns_sentinel_err() {
        assert_eq!(Command::parse(""), Err(String::new()));
        assert_eq!(Command::parse("  "), Err(String::new()));
    }

    #[test]
    fn parse_unknown() {
        let err = Command::parse("frobnicate").unwrap_err();
        assert!(err.contains("frobnicate"));
    }
}
