//! Token-Ledger CLI Application
//!
//! A command-line interface for operating a persisted fungible-token
//! ledger.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use token_ledger::cli::{self, AppState};
use token_ledger::ledger::DEFAULT_DECIMALS;

#[derive(Parser)]
#[command(name = "ledger")]
#[command(author = "Darshan")]
#[command(version = "0.1.0")]
#[command(about = "An EIP-20 style fungible-token ledger", long_about = None)]
struct Cli {
    /// Data directory for ledger storage
    #[arg(short, long, default_value = ".ledger_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new ledger
    Init {
        /// Initial supply in display units (scaled by 10^decimals)
        #[arg(short, long)]
        supply: String,

        /// Token name
        #[arg(short, long)]
        name: String,

        /// Token symbol
        #[arg(long)]
        symbol: String,

        /// Decimal places between base and display units
        #[arg(long, default_value_t = DEFAULT_DECIMALS)]
        decimals: u8,

        /// Deployer account (hex address or label)
        #[arg(long)]
        deployer: String,
    },

    /// Display ledger information
    Info,

    /// Show the balance of an account
    Balance {
        /// Account (hex address or label)
        account: String,
    },

    /// Show the allowance granted by an owner to a spender
    Allowance {
        /// Owner account
        owner: String,

        /// Spender account
        spender: String,
    },

    /// Transfer tokens
    Transfer {
        /// Sender account (the caller)
        #[arg(short, long)]
        from: String,

        /// Recipient account
        #[arg(short, long)]
        to: String,

        /// Amount in base units
        #[arg(short, long)]
        value: String,
    },

    /// Set a spender's allowance
    Approve {
        /// Owner account (the caller)
        #[arg(short, long)]
        owner: String,

        /// Spender account
        #[arg(short, long)]
        spender: String,

        /// Allowance in base units
        #[arg(short, long)]
        value: String,
    },

    /// Transfer tokens on behalf of an owner
    TransferFrom {
        /// Spender account (the caller; needs an allowance)
        #[arg(long)]
        spender: String,

        /// Owner account to debit
        #[arg(short, long)]
        from: String,

        /// Recipient account
        #[arg(short, long)]
        to: String,

        /// Amount in base units
        #[arg(short, long)]
        value: String,
    },

    /// Show the tail of the event log
    Events {
        /// Maximum number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Resolve a label to its derived address
    Resolve {
        /// Human-readable account label
        label: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Handle commands that don't need loaded state
    if let Commands::Init {
        supply,
        name,
        symbol,
        decimals,
        deployer,
    } = &cli.command
    {
        return cli::cmd_init(&cli.data_dir, supply, name, symbol, *decimals, deployer);
    }
    if let Commands::Resolve { label } = &cli.command {
        return cli::cmd_resolve(label);
    }

    // Initialize application state
    let mut state = AppState::load(cli.data_dir.clone())?;

    // Process commands
    match cli.command {
        Commands::Init { .. } => unreachable!(),
        Commands::Resolve { .. } => unreachable!(),

        Commands::Info => {
            cli::cmd_info(&state)?;
        }

        Commands::Balance { account } => {
            cli::cmd_balance(&state, &account)?;
        }

        Commands::Allowance { owner, spender } => {
            cli::cmd_allowance(&state, &owner, &spender)?;
        }

        Commands::Transfer { from, to, value } => {
            cli::cmd_transfer(&mut state, &from, &to, &value)?;
        }

        Commands::Approve {
            owner,
            spender,
            value,
        } => {
            cli::cmd_approve(&mut state, &owner, &spender, &value)?;
        }

        Commands::TransferFrom {
            spender,
            from,
            to,
            value,
        } => {
            cli::cmd_transfer_from(&mut state, &spender, &from, &to, &value)?;
        }

        Commands::Events { limit } => {
            cli::cmd_events(&state, limit)?;
        }
    }

    Ok(())
}
