// 🖥️ Console Controller - menu loop over the account registry
//
// States: MenuPrompt -> AwaitingChoice -> Processing -> MenuPrompt, until
// choice 8 (or end of input) moves to Exit. Domain errors are printed and
// the loop carries on; only I/O failures escape `run`.

use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::config::ConsoleConfig;
use crate::entities::{format_money, Account, AccountRegistry};
use crate::error::{BankError, BankResult};

// ============================================================================
// MENU
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    CreateSavings,
    CreateChecking,
    CreateFixedDeposit,
    Deposit,
    Withdraw,
    DisplayAll,
    CalculateInterest,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 8] = [
        MenuChoice::CreateSavings,
        MenuChoice::CreateChecking,
        MenuChoice::CreateFixedDeposit,
        MenuChoice::Deposit,
        MenuChoice::Withdraw,
        MenuChoice::DisplayAll,
        MenuChoice::CalculateInterest,
        MenuChoice::Exit,
    ];

    pub fn number(&self) -> i64 {
        match self {
            MenuChoice::CreateSavings => 1,
            MenuChoice::CreateChecking => 2,
            MenuChoice::CreateFixedDeposit => 3,
            MenuChoice::Deposit => 4,
            MenuChoice::Withdraw => 5,
            MenuChoice::DisplayAll => 6,
            MenuChoice::CalculateInterest => 7,
            MenuChoice::Exit => 8,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::CreateSavings => "Create Savings Account",
            MenuChoice::CreateChecking => "Create Checking Account",
            MenuChoice::CreateFixedDeposit => "Create Fixed Deposit Account",
            MenuChoice::Deposit => "Deposit Money",
            MenuChoice::Withdraw => "Withdraw Money",
            MenuChoice::DisplayAll => "Display Account Info",
            MenuChoice::CalculateInterest => "Calculate Interest",
            MenuChoice::Exit => "Exit",
        }
    }

    pub fn from_number(number: i64) -> Option<Self> {
        MenuChoice::ALL.into_iter().find(|c| c.number() == number)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleState {
    MenuPrompt,
    AwaitingChoice,
    Processing(MenuChoice),
    Exit,
}

// ============================================================================
// CONSOLE
// ============================================================================

pub struct Console<R, W> {
    input: R,
    output: W,
    pending: VecDeque<String>,
    registry: AccountRegistry,
    state: ConsoleState,
    config: ConsoleConfig,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, config: ConsoleConfig) -> Self {
        Console {
            input,
            output,
            pending: VecDeque::new(),
            registry: AccountRegistry::new(),
            state: ConsoleState::MenuPrompt,
            config,
        }
    }

    pub fn state(&self) -> ConsoleState {
        self.state
    }

    pub fn registry(&self) -> &AccountRegistry {
        &self.registry
    }

    /// Hand back the accounts once the session is over
    pub fn into_registry(self) -> AccountRegistry {
        self.registry
    }

    /// Drive the menu until the user exits or input runs out
    pub fn run(&mut self) -> BankResult<()> {
        info!("console session started");

        while self.step()? != ConsoleState::Exit {}

        writeln!(self.output, "Exiting system. Goodbye!")?;
        self.output.flush()?;

        info!(accounts = self.registry.len(), "console session ended");
        Ok(())
    }

    /// Perform one state transition and return the new state
    pub fn step(&mut self) -> BankResult<ConsoleState> {
        let current = self.state;
        let next = match current {
            ConsoleState::MenuPrompt => {
                self.render_menu()?;
                ConsoleState::AwaitingChoice
            }
            ConsoleState::AwaitingChoice => match self.read_choice() {
                Ok(choice) => ConsoleState::Processing(choice),
                Err(err) => self.recover(err)?,
            },
            ConsoleState::Processing(MenuChoice::Exit) | ConsoleState::Exit => ConsoleState::Exit,
            ConsoleState::Processing(choice) => match self.dispatch(choice) {
                Ok(()) => ConsoleState::MenuPrompt,
                Err(err) => self.recover(err)?,
            },
        };

        debug!(from = ?current, to = ?next, "console transition");
        self.state = next;
        Ok(next)
    }

    /// Report-and-continue for domain errors; end of input means exit
    fn recover(&mut self, err: BankError) -> BankResult<ConsoleState> {
        match err {
            BankError::InputClosed => {
                info!("input closed, leaving menu");
                Ok(ConsoleState::Exit)
            }
            err if err.is_recoverable() => {
                warn!(error = ?err, "operation failed");
                writeln!(self.output, "{}", err)?;
                Ok(ConsoleState::MenuPrompt)
            }
            err => Err(err),
        }
    }

    fn render_menu(&mut self) -> BankResult<()> {
        writeln!(self.output)?;
        writeln!(self.output, "--- Bank Account Management ---")?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{}. {}", choice.number(), choice.label())?;
        }
        write!(self.output, "Enter your choice: ")?;
        self.output.flush()?;
        Ok(())
    }

    fn read_choice(&mut self) -> BankResult<MenuChoice> {
        let token = self.read_token()?;
        let choice = token
            .parse::<i64>()
            .map_err(|_| BankError::InvalidNumber(token.clone()))
            .and_then(|number| {
                MenuChoice::from_number(number).ok_or(BankError::InvalidMenuChoice(number))
            });
        if choice.is_err() {
            self.discard_pending();
        }
        choice
    }

    fn dispatch(&mut self, choice: MenuChoice) -> BankResult<()> {
        match choice {
            MenuChoice::CreateSavings => {
                let number = self.prompt_text("Enter Account Number: ")?;
                let holder = self.prompt_text("Enter Account Holder Name: ")?;
                let balance = self.prompt_amount("Enter Initial Balance: ")?;
                let rate = self.prompt_amount("Enter Interest Rate (%): ")?;

                self.open_account(Account::savings(number, holder, balance, rate))?;
            }
            MenuChoice::CreateChecking => {
                let number = self.prompt_text("Enter Account Number: ")?;
                let holder = self.prompt_text("Enter Account Holder Name: ")?;
                let balance = self.prompt_amount("Enter Initial Balance: ")?;
                let overdraft = self.prompt_amount("Enter Overdraft Limit: ")?;

                self.open_account(Account::checking(number, holder, balance, overdraft))?;
            }
            MenuChoice::CreateFixedDeposit => {
                let number = self.prompt_text("Enter Account Number: ")?;
                let holder = self.prompt_text("Enter Account Holder Name: ")?;
                let balance = self.prompt_amount("Enter Initial Balance: ")?;
                let term = self.prompt_number::<u32>("Enter Term (in months): ")?;
                let rate = self.prompt_amount("Enter Interest Rate (%): ")?;

                self.open_account(Account::fixed_deposit(number, holder, balance, term, rate))?;
            }
            MenuChoice::Deposit => {
                let number = self.prompt_text("Enter Account Number: ")?;
                let amount = self.prompt_amount("Enter Deposit Amount: ")?;

                let balance = self.registry.require_mut(&number)?.deposit(amount);
                writeln!(
                    self.output,
                    "Deposited: {}. New Balance: {}",
                    format_money(amount),
                    format_money(balance)
                )?;
            }
            MenuChoice::Withdraw => {
                let number = self.prompt_text("Enter Account Number: ")?;
                let amount = self.prompt_amount("Enter Withdrawal Amount: ")?;

                let remaining = self.registry.require_mut(&number)?.withdraw(amount)?;
                writeln!(
                    self.output,
                    "Withdrawn: {}. Remaining Balance: {}",
                    format_money(amount),
                    format_money(remaining)
                )?;
            }
            MenuChoice::DisplayAll => {
                if self.registry.is_empty() {
                    writeln!(self.output, "No accounts available.")?;
                }
                for account in self.registry.iter() {
                    writeln!(self.output, "{}", account.account_info())?;
                }
            }
            MenuChoice::CalculateInterest => {
                if self.registry.is_empty() {
                    writeln!(self.output, "No accounts available.")?;
                }
                for account in self.registry.iter() {
                    writeln!(self.output, "{}", account.calculate_interest())?;
                }
            }
            MenuChoice::Exit => {}
        }

        self.output.flush()?;
        Ok(())
    }

    fn open_account(&mut self, account: Account) -> BankResult<()> {
        let kind = account.kind().as_str();
        info!(account_number = %account.account_number(), kind, "account opened");

        writeln!(self.output, "{} Account created successfully!", kind)?;
        self.registry.add(account);
        Ok(())
    }

    // ========================================================================
    // INPUT
    // ========================================================================

    /// Next whitespace-delimited token, reading more lines as needed.
    /// End of input is `InputClosed`.
    fn read_token(&mut self) -> BankResult<String> {
        while self.pending.is_empty() {
            let mut buf = String::new();
            if self.input.read_line(&mut buf)? == 0 {
                return Err(BankError::InputClosed);
            }
            self.pending
                .extend(buf.split_whitespace().map(str::to_string));
        }

        let token = self.pending.pop_front().ok_or(BankError::InputClosed)?;
        if self.config.echo_input {
            writeln!(self.output, "{}", token)?;
        }
        Ok(token)
    }

    /// Drop whatever is left of a line that failed to parse
    fn discard_pending(&mut self) {
        if !self.pending.is_empty() {
            debug!(dropped = self.pending.len(), "discarding buffered input");
            self.pending.clear();
        }
    }

    fn prompt(&mut self, label: &str) -> BankResult<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        self.read_token()
    }

    /// Single-token text field
    fn prompt_text(&mut self, label: &str) -> BankResult<String> {
        self.prompt(label)
    }

    /// Parse the answer as `T`, asking again on malformed input
    fn prompt_number<T: FromStr>(&mut self, label: &str) -> BankResult<T> {
        self.prompt_parsed(label, |token| token.parse::<T>().ok())
    }

    /// Money and rate fields: NaN and infinities are malformed input
    fn prompt_amount(&mut self, label: &str) -> BankResult<f64> {
        self.prompt_parsed(label, |token| {
            token.parse::<f64>().ok().filter(|value| value.is_finite())
        })
    }

    fn prompt_parsed<T>(
        &mut self,
        label: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> BankResult<T> {
        loop {
            let token = self.prompt(label)?;
            match parse(&token) {
                Some(value) => return Ok(value),
                None => {
                    self.discard_pending();
                    let err = BankError::InvalidNumber(token);
                    warn!(error = ?err, field = label.trim_end(), "rejected input");
                    writeln!(self.output, "{}", err)?;
                }
            }
        }
    }
}
