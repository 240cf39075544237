// Bank Console - Core Library
// Account model, registry and the menu controller, shared by the binary and tests

pub mod config;
pub mod console;
pub mod entities;
pub mod error;

// Re-export commonly used types
pub use config::{Cli, ConsoleConfig};
pub use console::{Console, ConsoleState, MenuChoice};
pub use entities::{
    format_money, Account, AccountKind, AccountRegistry, InterestReport, RegistrySnapshot,
};
pub use error::{BankError, BankResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
