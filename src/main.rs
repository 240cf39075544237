use anyhow::{Context, Result};
use clap::Parser;
use std::io;

use bank_console::config::init_logging;
use bank_console::{Cli, Console, ConsoleConfig, VERSION};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    tracing::info!("bank-console v{}", VERSION);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock(), ConsoleConfig::from(&cli));

    console.run().context("console session failed")?;

    // Accounts are dropped with the registry when the console goes out of scope
    let registry = console.into_registry();
    if cli.summary {
        let json = serde_json::to_string_pretty(&registry.snapshot())
            .context("failed to serialize account summary")?;
        println!("{}", json);
    }

    Ok(())
}
