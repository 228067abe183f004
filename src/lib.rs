//! Token-Ledger: an EIP-20 style fungible-token ledger in Rust
//!
//! This crate provides an in-process value-transfer state machine featuring:
//! - Checked 256-bit unsigned arithmetic with no silent overflow
//! - Opaque 160-bit account identities
//! - Direct transfers by the balance owner
//! - Delegated transfers gated by per-(owner, spender) allowances
//! - An append-only event log with commit-or-revert discipline
//! - A host call surface that refuses native-currency ingress
//! - JSON persistence with atomic writes and backups
//!
//! # Example
//!
//! ```rust
//! use token_ledger::account::Address;
//! use token_ledger::amount::Amount;
//! use token_ledger::ledger::Token;
//!
//! // Deploy a ledger: the full supply lands on the deployer
//! let deployer = Address::from_label("deployer");
//! let mut token = Token::with_default_decimals(
//!     Amount::from(1_000_000_000u64),
//!     "Enzym".to_string(),
//!     "ZYM".to_string(),
//!     deployer,
//! ).unwrap();
//!
//! // Move value and delegate spending
//! let alice = Address::from_label("alice");
//! token.transfer(deployer, alice, Amount::from(1000u64)).unwrap();
//! token.approve(deployer, alice, Amount::from(500u64)).unwrap();
//!
//! assert_eq!(token.balance_of(&alice), Amount::from(1000u64));
//! ```

pub mod account;
pub mod amount;
pub mod cli;
pub mod host;
pub mod ledger;
pub mod storage;

// Re-export commonly used types
pub use account::{Address, AddressError};
pub use amount::Amount;
pub use host::{dispatch, Call, CallEnvelope, CallOutcome};
pub use ledger::{Event, EventLog, LedgerStore, Token, TokenError, TokenMetadata};
pub use storage::{Storage, StorageConfig, StorageError};
