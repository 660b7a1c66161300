use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};
use football_api::OutputFormat;

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

/// Query the football-api.com service from the command line.
///
/// Runs a single vendor action and prints the decoded response followed by
/// the remaining request quota. The API key is read from the config file or
/// the FOOTBALL_API_KEY environment variable.
///
/// Example: football_api standings -p comp_id=1204 --output-type array
#[derive(Parser, Debug)]
#[command(about, long_about = None, version)]
#[command(styles = get_styles())]
pub struct Args {
    /// Vendor action to call, e.g. today, fixtures, standings, commentaries
    pub action: String,

    /// Request parameter as key=value. Repeat for several parameters.
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Output type: JSON, XML, ARRAY, OBJECT, LINE, CONSOLE or VAR
    #[arg(short = 'o', long = "output-type", value_parser = parse_output_type, help_heading = "Request")]
    pub output_type: Option<OutputFormat>,

    /// Attach a content hash and the source URL to the response
    #[arg(long = "hash", help_heading = "Request")]
    pub generate_hash: bool,

    /// Bind outbound requests to this local IP address
    #[arg(long = "request-ip", help_heading = "Request")]
    pub request_ip: Option<String>,

    /// Read configuration from this file instead of the default location
    #[arg(long = "config", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Also write logs to stdout
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}

fn parse_output_type(value: &str) -> Result<OutputFormat, String> {
    value.parse().map_err(|e: football_api::AppError| e.to_string())
}
