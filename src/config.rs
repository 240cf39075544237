// Command-line configuration
//
// Everything the console needs comes from flags. RUST_LOG overrides --log-level.

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Interactive bank account management console
#[derive(Parser, Debug, Clone)]
#[command(name = "bank-console")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error); logs go to stderr
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Echo every input line after its prompt (useful with piped input)
    #[arg(long)]
    pub echo: bool,

    /// Print a JSON snapshot of all accounts after exiting the menu
    #[arg(long)]
    pub summary: bool,
}

/// Console behavior switches taken from the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub echo_input: bool,
}

impl From<&Cli> for ConsoleConfig {
    fn from(cli: &Cli) -> Self {
        ConsoleConfig {
            echo_input: cli.echo,
        }
    }
}

/// Install the global tracing subscriber, writing to stderr
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["bank-console"]).unwrap();
        assert_eq!(cli.log_level, "warn");
        assert!(!cli.echo);
        assert!(!cli.summary);
    }

    #[test]
    fn test_cli_flags() {
        let cli =
            Cli::try_parse_from(["bank-console", "--echo", "--summary", "--log-level", "debug"])
                .unwrap();
        assert_eq!(cli.log_level, "debug");
        assert!(cli.echo);
        assert!(cli.summary);

        let config = ConsoleConfig::from(&cli);
        assert!(config.echo_input);
    }

    #[test]
    fn test_cli_rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["bank-console", "--persist"]).is_err());
    }
}
