//! Fungible-token ledger core
//!
//! Provides an EIP-20 style value-transfer state machine with:
//! - Checked 256-bit balances per account
//! - Per-(owner, spender) allowances for delegated transfers
//! - An append-only event log recording every successful mutation
//! - Commit-or-revert semantics: failures change nothing
//!
//! # Example
//!
//! ```ignore
//! use token_ledger::account::Address;
//! use token_ledger::amount::Amount;
//! use token_ledger::ledger::Token;
//!
//! let deployer = Address::from_label("deployer");
//! let mut token = Token::with_default_decimals(
//!     Amount::from(1_000_000_000u64),
//!     "Enzym".to_string(),
//!     "ZYM".to_string(),
//!     deployer,
//! ).unwrap();
//!
//! // Transfer tokens
//! let recipient = Address::from_label("recipient");
//! token.transfer(deployer, recipient, Amount::from(1000u64)).unwrap();
//!
//! // Check balance
//! let balance = token.balance_of(&recipient);
//! ```

pub mod events;
pub mod store;
pub mod token;

pub use events::{Event, EventLog};
pub use store::LedgerStore;
pub use token::{Token, TokenError, TokenMetadata, DEFAULT_DECIMALS};
