use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Live scoreboard for team-based outdoor quiz events
///
/// Aggregates the event platform's two API dialects into one consistent
/// view: team rankings, the task catalog, and the photo gallery.
///
/// Without --game, lists the games the credential can see. With --game,
/// loads that game and either prints the ranking once (--once) or keeps
/// watching it, printing ranking changes and live-update notifications as
/// new answers arrive.
#[derive(Parser, Debug)]
#[command(author, about, long_about = None, version)]
#[command(styles = get_styles())]
pub struct Args {
    /// Credential for the event platform. Legacy keys carry the ApiKey-v1
    /// prefix, modern keys are bare tokens. Falls back to the saved config
    /// value or the QUIZBOARD_CREDENTIAL environment variable.
    #[arg(short = 'k', long = "credential")]
    pub credential: Option<String>,

    /// Game identifier to load. Omit to list available games.
    #[arg(short = 'g', long = "game")]
    pub game: Option<String>,

    /// Print the ranking once and exit instead of watching for updates
    #[arg(short, long)]
    pub once: bool,

    /// Include the photo gallery in the output
    #[arg(long = "photos", help_heading = "Display Options")]
    pub photos: bool,

    /// Poll interval in seconds (default: from config)
    #[arg(long = "interval", help_heading = "Display Options")]
    pub interval: Option<u64>,

    /// Save the supplied credential to the config file for later runs
    #[arg(long = "save-credential", help_heading = "Configuration")]
    pub save_credential: bool,

    /// Remove the saved credential from the config file
    #[arg(long = "clear-credential", help_heading = "Configuration")]
    pub clear_credential: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Enable debug logging to stdout in addition to the log file
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}
