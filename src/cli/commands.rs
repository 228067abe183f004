//! CLI commands for the ledger
//!
//! Implements all command handlers for the CLI interface. Account
//! arguments are accepted as `0x`-prefixed hex addresses or as labels,
//! which resolve to SHA-256-derived addresses; decoding failures surface
//! as malformed calls.

use crate::account::Address;
use crate::amount::Amount;
use crate::host::{self, Call, CallEnvelope, CallOutcome};
use crate::ledger::{Token, TokenError};
use crate::storage::{Storage, StorageConfig};
use std::path::{Path, PathBuf};

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Application state
pub struct AppState {
    pub token: Token,
    pub storage: Storage,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load application state from an initialized data directory
    pub fn load(data_dir: PathBuf) -> CliResult<Self> {
        let storage_config = StorageConfig {
            data_dir: data_dir.clone(),
            ..Default::default()
        };
        let storage = Storage::new(storage_config)?;

        if !storage.exists() {
            return Err(format!(
                "No ledger found in {:?}. Run `ledger init` first.",
                data_dir
            )
            .into());
        }
        let token = storage.load()?;

        Ok(Self {
            token,
            storage,
            data_dir,
        })
    }

    /// Save the current state
    pub fn save(&self) -> CliResult<()> {
        self.storage.save(&self.token)?;
        Ok(())
    }

    /// Dispatch a call against the ledger and persist on success
    pub fn execute(&mut self, envelope: &CallEnvelope) -> CliResult<CallOutcome> {
        let outcome = host::dispatch(&mut self.token, envelope)?;
        self.save()?;
        Ok(outcome)
    }
}

/// Resolve an account argument: `0x`-prefixed hex, or a label
pub fn parse_account(input: &str) -> Result<Address, TokenError> {
    if input.starts_with("0x") {
        Address::from_hex(input)
            .map_err(|e| TokenError::MalformedCall(format!("bad address {:?}: {}", input, e)))
    } else {
        let derived = Address::from_label(input);
        log::debug!("Resolved label {:?} to {}", input, derived);
        Ok(derived)
    }
}

/// Parse a decimal amount argument in base units
pub fn parse_amount(input: &str) -> Result<Amount, TokenError> {
    Amount::from_dec_str(input)
        .map_err(|e| TokenError::MalformedCall(format!("bad amount {:?}: {}", input, e)))
}

/// Initialize a new ledger
pub fn cmd_init(
    data_dir: &Path,
    supply: &str,
    name: &str,
    symbol: &str,
    decimals: u8,
    deployer: &str,
) -> CliResult<()> {
    let storage_config = StorageConfig {
        data_dir: data_dir.to_path_buf(),
        ..Default::default()
    };
    let storage = Storage::new(storage_config)?;

    if storage.exists() {
        println!("⚠️  Ledger already exists at {:?}", data_dir);
        println!("   Delete the data directory to reinitialize (this discards all state)");
        return Ok(());
    }

    let deployer = parse_account(deployer)?;
    let initial_supply = parse_amount(supply)?;

    let token = Token::new(
        initial_supply,
        name.to_string(),
        symbol.to_string(),
        decimals,
        deployer,
    )?;
    storage.save(&token)?;

    println!("✅ Ledger initialized!");
    println!("   📁 Data directory: {:?}", data_dir);
    println!(
        "   🪙 {} ({}), {} decimals",
        token.name(),
        token.symbol(),
        token.decimals()
    );
    println!(
        "   💰 Total supply: {} base units, credited to {}",
        token.total_supply(),
        deployer
    );

    Ok(())
}

/// Display ledger information
pub fn cmd_info(state: &AppState) -> CliResult<()> {
    let token = &state.token;

    println!("🪙 {} ({})", token.name(), token.symbol());
    println!("   Decimals: {}", token.decimals());
    println!("   Total supply: {} base units", token.total_supply());
    println!("   Holders: {}", token.holder_count());
    println!("   Events logged: {}", token.events().len());

    let stats = state.storage.stats()?;
    println!(
        "   💾 {} bytes on disk, {} backup(s)",
        stats.file_size, stats.backup_count
    );

    Ok(())
}

/// Show the balance of an account
pub fn cmd_balance(state: &AppState, account: &str) -> CliResult<()> {
    let owner = parse_account(account)?;
    let balance = state.token.balance_of(&owner);

    println!("💰 Balance of {}", owner);
    println!("   {} base units", balance);

    Ok(())
}

/// Show the allowance granted by an owner to a spender
pub fn cmd_allowance(state: &AppState, owner: &str, spender: &str) -> CliResult<()> {
    let owner = parse_account(owner)?;
    let spender = parse_account(spender)?;
    let allowance = state.token.allowance(&owner, &spender);

    println!("🔓 Allowance {} -> {}", owner, spender);
    println!("   {} base units", allowance);

    Ok(())
}

/// Transfer tokens
pub fn cmd_transfer(state: &mut AppState, from: &str, to: &str, value: &str) -> CliResult<()> {
    let from = parse_account(from)?;
    let to = parse_account(to)?;
    let value = parse_amount(value)?;

    state.execute(&CallEnvelope::call(from, Call::Transfer { to, value }))?;

    println!("✅ Transferred {} base units", value);
    println!("   {} -> {}", from, to);
    println!("   Sender balance: {}", state.token.balance_of(&from));

    Ok(())
}

/// Set a spender's allowance
pub fn cmd_approve(state: &mut AppState, owner: &str, spender: &str, value: &str) -> CliResult<()> {
    let owner = parse_account(owner)?;
    let spender = parse_account(spender)?;
    let value = parse_amount(value)?;

    state.execute(&CallEnvelope::call(owner, Call::Approve { spender, value }))?;

    println!("✅ Approved {} base units", value);
    println!("   {} may now draw from {}", spender, owner);

    Ok(())
}

/// Transfer tokens on behalf of an owner
pub fn cmd_transfer_from(
    state: &mut AppState,
    spender: &str,
    from: &str,
    to: &str,
    value: &str,
) -> CliResult<()> {
    let spender = parse_account(spender)?;
    let from = parse_account(from)?;
    let to = parse_account(to)?;
    let value = parse_amount(value)?;

    state.execute(&CallEnvelope::call(
        spender,
        Call::TransferFrom { from, to, value },
    ))?;

    println!("✅ Transferred {} base units on behalf of {}", value, from);
    println!("   {} -> {}", from, to);
    println!(
        "   Remaining allowance: {}",
        state.token.allowance(&from, &spender)
    );

    Ok(())
}

/// Show the tail of the event log
pub fn cmd_events(state: &AppState, limit: usize) -> CliResult<()> {
    let log = state.token.events();

    if log.is_empty() {
        println!("📭 No events logged");
        return Ok(());
    }

    let tail = log.tail(limit);
    let start = log.len() - tail.len();

    println!("📋 Events ({} of {}):", tail.len(), log.len());
    for (i, event) in tail.iter().enumerate() {
        println!("   {:>4}. {}", start + i, event);
    }

    Ok(())
}

/// Resolve a label to its derived address
pub fn cmd_resolve(label: &str) -> CliResult<()> {
    let address = Address::from_label(label);

    println!("🏷️  {:?} -> {}", label, address);

    Ok(())
}
