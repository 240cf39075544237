// Entity Models
//
// Account is the only entity: identity (number + UUID) plus a balance whose
// rules depend on the account kind. The registry owns every account.

pub mod account;

pub use account::{format_money, Account, AccountKind, AccountRegistry, InterestReport, RegistrySnapshot};
