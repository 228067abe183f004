//! Ledger event records
//!
//! Every successful mutation appends exactly one typed record. The log is
//! append-only and ordered: entries are never removed or reordered, and
//! events from a single call are contiguous.

use crate::account::Address;
use crate::amount::Amount;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A record of a successful ledger mutation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Value moved between accounts; the construction-time mint carries the
    /// zero address as `from`
    Transfer {
        from: Address,
        to: Address,
        value: Amount,
    },
    /// An owner set a spender's allowance
    Approval {
        owner: Address,
        spender: Address,
        value: Amount,
    },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Transfer { from, to, value } => {
                write!(f, "Transfer {} -> {} value {}", from, to, value)
            }
            Event::Approval {
                owner,
                spender,
                value,
            } => {
                write!(f, "Approval {} -> {} value {}", owner, spender, value)
            }
        }
    }
}

/// Append-only ordered sequence of events
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vec<Event>,
}

impl EventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event to the end of the log
    pub fn append(&mut self, event: Event) {
        self.entries.push(event);
    }

    /// All entries in append order
    pub fn entries(&self) -> &[Event] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent entry
    pub fn last(&self) -> Option<&Event> {
        self.entries.last()
    }

    /// The last `n` entries in append order
    pub fn tail(&self, n: usize) -> &[Event] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }
}
