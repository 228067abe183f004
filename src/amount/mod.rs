//! Checked 256-bit amount arithmetic
//!
//! Balances, allowances, and supplies are unsigned 256-bit integers in
//! base units. All arithmetic is explicitly checked: overflow on addition
//! and underflow on subtraction are failure conditions, never wrapped.

pub use primitive_types::U256;

/// An amount of tokens in base units
pub type Amount = U256;

/// Computes `10^exp` in the 256-bit domain
///
/// Returns `None` if the power leaves the domain (exp >= 78).
pub fn pow10(exp: u8) -> Option<Amount> {
    Amount::from(10u8).checked_pow(Amount::from(exp))
}

/// Scales a supply given in display units into base units
///
/// Computes `initial * 10^decimals` entirely in the 256-bit domain;
/// returns `None` if the product overflows.
pub fn scale_supply(initial: Amount, decimals: u8) -> Option<Amount> {
    pow10(decimals).and_then(|unit| initial.checked_mul(unit))
}
