//! Configuration and CLI argument handling

use clap::Parser;

use crate::input::StartInputs;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "hourglass")]
#[command(about = "A countdown timer service with a one-shot warning threshold")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20560")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Start a countdown of this many hours at launch
    #[arg(short = 'H', long, value_name = "HOURS")]
    pub hours: Option<String>,

    /// Warning threshold in minutes for the launch countdown
    #[arg(short, long, value_name = "MINUTES")]
    pub warning_minutes: Option<String>,

    /// Warning message for the launch countdown
    #[arg(short, long)]
    pub message: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Countdown to start at launch, if `--hours` was given.
    ///
    /// Values are parsed leniently, so text that is not a number counts as 0.
    pub fn autostart(&self) -> Option<StartInputs> {
        let hours = self.hours.as_deref()?;
        Some(StartInputs::from_raw(
            hours,
            self.warning_minutes.as_deref().unwrap_or_default(),
            self.message.as_deref().unwrap_or_default(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DEFAULT_WARNING_MESSAGE;

    #[test]
    fn defaults_without_autostart() {
        let config = Config::try_parse_from(["hourglass"]).unwrap();
        assert_eq!(config.address(), "0.0.0.0:20560");
        assert_eq!(config.log_level(), "info");
        assert!(config.autostart().is_none());
    }

    #[test]
    fn hours_enable_autostart() {
        let config =
            Config::try_parse_from(["hourglass", "-H", "1.5", "-w", "10", "-v"]).unwrap();
        assert_eq!(config.log_level(), "debug");
        assert_eq!(
            config.autostart(),
            Some(StartInputs::new(1.5, 10.0, DEFAULT_WARNING_MESSAGE))
        );
    }

    #[test]
    fn missing_warning_counts_as_zero() {
        let config = Config::try_parse_from(["hourglass", "--hours", "2", "-m", "Wrap up"]).unwrap();
        assert_eq!(config.autostart(), Some(StartInputs::new(2.0, 0.0, "Wrap up")));
    }

    #[test]
    fn launch_values_are_parsed_leniently() {
        let config =
            Config::try_parse_from(["hourglass", "-H", "1.5h", "-w", "soon"]).unwrap();
        assert_eq!(
            config.autostart(),
            Some(StartInputs::new(1.5, 0.0, DEFAULT_WARNING_MESSAGE))
        );
    }
}
