//! Monetary precision rules.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every amount in the ledger is a `rust_decimal::Decimal` with at most
//! [`MONEY_SCALE`] fractional digits, matching the `NUMERIC(10, 2)` columns.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits kept for stored amounts.
pub const MONEY_SCALE: u32 = 2;

/// Largest amount a `NUMERIC(10, 2)` column can hold.
/// 9_999_999_999 split across the low and mid 32-bit words.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, MONEY_SCALE);

/// Rounds an amount to [`MONEY_SCALE`] places using Banker's Rounding.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Returns true if the amount carries no more than [`MONEY_SCALE`] significant
/// fractional digits (trailing zeros are ignored).
#[must_use]
pub fn has_money_scale(amount: Decimal) -> bool {
    amount.normalize().scale() <= MONEY_SCALE
}
