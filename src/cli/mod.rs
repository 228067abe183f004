//! Command-line interface for the ledger

pub mod commands;

pub use commands::{
    cmd_allowance, cmd_approve, cmd_balance, cmd_events, cmd_info, cmd_init, cmd_resolve,
    cmd_transfer, cmd_transfer_from, AppState, CliResult,
};
