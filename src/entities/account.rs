// 💳 Account Entity - balance, identity and per-kind money rules
//
// "The account number is what the user types, the UUID is who the account is"
//
// Rules by kind:
// - Savings: no overdraft, simple interest on the balance
// - Checking: may go negative down to -overdraft_limit, never earns interest
// - FixedDeposit: no overdraft, interest scaled by the term in months

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

use crate::error::{BankError, BankResult};

/// Format an amount the way every console message shows money
pub fn format_money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", -amount)
    } else {
        format!("${:.2}", amount)
    }
}

// ============================================================================
// ACCOUNT KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccountKind {
    /// Interest-bearing, rate in percent
    Savings { interest_rate: f64 },

    /// Overdraft allowed down to -overdraft_limit
    Checking { overdraft_limit: f64 },

    /// Locked for `term_months`, rate in percent per year
    FixedDeposit { term_months: u32, interest_rate: f64 },
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Savings { .. } => "Savings",
            AccountKind::Checking { .. } => "Checking",
            AccountKind::FixedDeposit { .. } => "Fixed Deposit",
        }
    }

    /// Same kind, ignoring the parameters
    pub fn same_kind(&self, other: &AccountKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

// ============================================================================
// INTEREST REPORT
// ============================================================================

/// Result of an interest calculation. Never changes the balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InterestReport {
    Savings { interest: f64 },
    NoInterest,
    FixedDeposit { term_months: u32, interest: f64 },
}

impl InterestReport {
    /// Numeric interest, if this kind earns any
    pub fn amount(&self) -> Option<f64> {
        match self {
            InterestReport::Savings { interest } => Some(*interest),
            InterestReport::NoInterest => None,
            InterestReport::FixedDeposit { interest, .. } => Some(*interest),
        }
    }
}

impl fmt::Display for InterestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterestReport::Savings { interest } => {
                write!(f, "Savings Account Interest: {}", format_money(*interest))
            }
            InterestReport::NoInterest => write!(f, "No interest for checking accounts."),
            InterestReport::FixedDeposit {
                term_months,
                interest,
            } => write!(
                f,
                "Fixed Deposit Interest for {} months: {}",
                term_months,
                format_money(*interest)
            ),
        }
    }
}

// ============================================================================
// ACCOUNT ENTITY
// ============================================================================

/// A single bank account
///
/// Identity: `id` (UUID) and `account_number`, both fixed at creation
/// Value: `balance`, changed only by deposit / withdraw
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    id: String,
    account_number: String,
    holder_name: String,
    balance: f64,
    kind: AccountKind,
    opened_at: DateTime<Utc>,
}

impl Account {
    pub fn new(
        account_number: String,
        holder_name: String,
        opening_balance: f64,
        kind: AccountKind,
    ) -> Self {
        Account {
            id: uuid::Uuid::new_v4().to_string(),
            account_number,
            holder_name,
            balance: opening_balance,
            kind,
            opened_at: Utc::now(),
        }
    }

    pub fn savings(
        account_number: impl Into<String>,
        holder_name: impl Into<String>,
        opening_balance: f64,
        interest_rate: f64,
    ) -> Self {
        Self::new(
            account_number.into(),
            holder_name.into(),
            opening_balance,
            AccountKind::Savings { interest_rate },
        )
    }

    pub fn checking(
        account_number: impl Into<String>,
        holder_name: impl Into<String>,
        opening_balance: f64,
        overdraft_limit: f64,
    ) -> Self {
        Self::new(
            account_number.into(),
            holder_name.into(),
            opening_balance,
            AccountKind::Checking { overdraft_limit },
        )
    }

    pub fn fixed_deposit(
        account_number: impl Into<String>,
        holder_name: impl Into<String>,
        opening_balance: f64,
        term_months: u32,
        interest_rate: f64,
    ) -> Self {
        Self::new(
            account_number.into(),
            holder_name.into(),
            opening_balance,
            AccountKind::FixedDeposit {
                term_months,
                interest_rate,
            },
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }

    /// Add `amount` to the balance. No sign check; always succeeds.
    ///
    /// Returns the new balance.
    pub fn deposit(&mut self, amount: f64) -> f64 {
        self.balance += amount;
        debug!(
            account_number = %self.account_number,
            amount,
            balance = self.balance,
            "deposit applied"
        );
        self.balance
    }

    /// Take `amount` out of the balance, following the kind's overdraft rule.
    ///
    /// Returns the remaining balance. On error the balance is untouched.
    pub fn withdraw(&mut self, amount: f64) -> BankResult<f64> {
        let available = self.available_funds();

        // NaN compares false against everything, so it is rejected explicitly
        if amount.is_nan() || amount > available {
            warn!(
                account_number = %self.account_number,
                amount,
                available,
                kind = self.kind.as_str(),
                "withdrawal rejected"
            );
            return Err(match self.kind {
                AccountKind::Checking { .. } => BankError::OverdraftExceeded {
                    requested: amount,
                    available,
                },
                _ => BankError::InsufficientFunds {
                    requested: amount,
                    available,
                },
            });
        }

        self.balance -= amount;
        debug!(
            account_number = %self.account_number,
            amount,
            balance = self.balance,
            "withdrawal applied"
        );
        Ok(self.balance)
    }

    /// Most that can be withdrawn right now
    pub fn available_funds(&self) -> f64 {
        match self.kind {
            AccountKind::Checking { overdraft_limit } => self.balance + overdraft_limit,
            AccountKind::Savings { .. } | AccountKind::FixedDeposit { .. } => self.balance,
        }
    }

    pub fn calculate_interest(&self) -> InterestReport {
        match self.kind {
            AccountKind::Savings { interest_rate } => InterestReport::Savings {
                interest: self.balance * interest_rate / 100.0,
            },
            AccountKind::Checking { .. } => InterestReport::NoInterest,
            AccountKind::FixedDeposit {
                term_months,
                interest_rate,
            } => InterestReport::FixedDeposit {
                term_months,
                interest: self.balance * interest_rate / 100.0 * (term_months as f64 / 12.0),
            },
        }
    }

    /// One-line summary, same for every kind
    pub fn account_info(&self) -> String {
        format!(
            "Account Number: {}, Holder: {}, Balance: {}",
            self.account_number,
            self.holder_name,
            format_money(self.balance)
        )
    }

    pub fn is_overdrawn(&self) -> bool {
        self.balance < 0.0
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.account_info())
    }
}

// ============================================================================
// ACCOUNT REGISTRY
// ============================================================================

/// Every account created during one run, in insertion order
///
/// The registry is the only owner of its accounts. Account numbers are not
/// checked for uniqueness: lookups resolve to the earliest match.
#[derive(Debug, Default)]
pub struct AccountRegistry {
    accounts: Vec<Account>,
}

/// Serializable view of the registry
#[derive(Debug, Serialize)]
pub struct RegistrySnapshot<'a> {
    pub count: usize,
    pub total_balance: f64,
    pub accounts: &'a [Account],
}

impl AccountRegistry {
    pub fn new() -> Self {
        AccountRegistry {
            accounts: Vec::new(),
        }
    }

    /// Append an account at the end
    pub fn add(&mut self, account: Account) {
        debug!(
            account_number = %account.account_number,
            kind = account.kind.as_str(),
            "account registered"
        );
        self.accounts.push(account);
    }

    /// First account with this number, scanning in insertion order
    pub fn find_by_number(&self, account_number: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.account_number == account_number)
    }

    pub fn find_by_number_mut(&mut self, account_number: &str) -> Option<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|a| a.account_number == account_number)
    }

    /// Like `find_by_number_mut`, but a miss is an `AccountNotFound` error
    pub fn require_mut(&mut self, account_number: &str) -> BankResult<&mut Account> {
        self.find_by_number_mut(account_number)
            .ok_or_else(|| BankError::AccountNotFound(account_number.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn total_balance(&self) -> f64 {
        self.accounts.iter().map(|a| a.balance).sum()
    }

    /// Accounts of the same kind as `kind` (parameters ignored)
    pub fn by_kind(&self, kind: &AccountKind) -> Vec<&Account> {
        self.accounts
            .iter()
            .filter(|a| a.kind.same_kind(kind))
            .collect()
    }

    pub fn overdrawn_accounts(&self) -> Vec<&Account> {
        self.accounts.iter().filter(|a| a.is_overdrawn()).collect()
    }

    pub fn snapshot(&self) -> RegistrySnapshot<'_> {
        RegistrySnapshot {
            count: self.accounts.len(),
            total_balance: self.total_balance(),
            accounts: &self.accounts,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
