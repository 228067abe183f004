//! Host call surface
//!
//! The execution environment delivers calls as data: an operation selector
//! with decoded arguments, plus the caller identity and any attached native
//! currency, both supplied by the host rather than the argument list.
//! Dispatch is single-threaded and serialized; each call runs to completion
//! or fails with no state change.

use crate::account::Address;
use crate::amount::Amount;
use crate::ledger::{Token, TokenError};
use serde::{Deserialize, Serialize};

/// An operation selector with decoded arguments
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Call {
    TotalSupply,
    BalanceOf { owner: Address },
    Allowance { owner: Address, spender: Address },
    Transfer { to: Address, value: Amount },
    Approve { spender: Address, value: Amount },
    TransferFrom {
        from: Address,
        to: Address,
        value: Amount,
    },
    Name,
    Symbol,
    Decimals,
}

/// A call as delivered by the host environment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallEnvelope {
    /// Caller identity, authenticated by the host
    pub caller: Address,
    /// Native currency attached to the call
    pub attached: Amount,
    /// Operation selector; `None` models a bare native-currency send
    pub op: Option<Call>,
}

impl CallEnvelope {
    /// A plain call with no attached native value
    pub fn call(caller: Address, op: Call) -> Self {
        Self {
            caller,
            attached: Amount::zero(),
            op: Some(op),
        }
    }

    /// A bare native-currency send with no operation selector
    pub fn native_send(caller: Address, attached: Amount) -> Self {
        Self {
            caller,
            attached,
            op: None,
        }
    }
}

/// The value returned by a dispatched call
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallOutcome {
    Amount(Amount),
    Bool(bool),
    Text(String),
    Byte(u8),
}

/// Dispatch one call against the ledger
///
/// The ledger exposes no payable entry point: any attached native value,
/// and any selectorless call, is refused with
/// [`TokenError::NoPayableEntry`] before the ledger is touched. Queries
/// read directly; mutations go through the token's commit-or-revert
/// operations with the envelope's caller as the authenticated party.
pub fn dispatch(
    token: &mut Token,
    envelope: &CallEnvelope,
) -> Result<CallOutcome, TokenError> {
    if !envelope.attached.is_zero() {
        return Err(TokenError::NoPayableEntry);
    }
    let op = match &envelope.op {
        Some(op) => op,
        None => return Err(TokenError::NoPayableEntry),
    };

    match op {
        Call::TotalSupply => Ok(CallOutcome::Amount(token.total_supply())),
        Call::BalanceOf { owner } => Ok(CallOutcome::Amount(token.balance_of(owner))),
        Call::Allowance { owner, spender } => {
            Ok(CallOutcome::Amount(token.allowance(owner, spender)))
        }
        Call::Transfer { to, value } => token
            .transfer(envelope.caller, *to, *value)
            .map(CallOutcome::Bool),
        Call::Approve { spender, value } => token
            .approve(envelope.caller, *spender, *value)
            .map(CallOutcome::Bool),
        Call::TransferFrom { from, to, value } => token
            .transfer_from(envelope.caller, *from, *to, *value)
            .map(CallOutcome::Bool),
        Call::Name => Ok(CallOutcome::Text(token.name().to_string())),
        Call::Symbol => Ok(CallOutcome::Text(token.symbol().to_string())),
        Call::Decimals => Ok(CallOutcome::Byte(token.decimals())),
    }
}
