use rust_decimal::Decimal;

use crate::bookings::models::PriceBreakdown;

/// Seat rates and fees used to price a booking
///
/// Rates are configuration, not code: `from_env` lets deployments override
/// them, and the defaults mirror the historical tariff (premium 190.0,
/// elite 150.0, 18% tax, flat 25.0 convenience fee).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceTable {
    pub elite_rate: Decimal,
    pub premium_rate: Decimal,
    /// Fraction of the subtotal, e.g. 0.18
    pub tax_rate: Decimal,
    pub convenience_fee: Decimal,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            elite_rate: Decimal::new(1500, 1),      // 150.0
            premium_rate: Decimal::new(1900, 1),    // 190.0
            tax_rate: Decimal::new(18, 2),          // 0.18
            convenience_fee: Decimal::new(250, 1),  // 25.0
        }
    }
}

impl PriceTable {
    /// Build a PriceTable from environment overrides, falling back to the
    /// defaults for anything unset or unparsable
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            elite_rate: env_decimal("ELITE_SEAT_RATE").unwrap_or(defaults.elite_rate),
            premium_rate: env_decimal("PREMIUM_SEAT_RATE").unwrap_or(defaults.premium_rate),
            tax_rate: env_decimal("TICKET_TAX_RATE").unwrap_or(defaults.tax_rate),
            convenience_fee: env_decimal("CONVENIENCE_FEE").unwrap_or(defaults.convenience_fee),
        }
    }
}

fn env_decimal(name: &str) -> Option<Decimal> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

/// Service for pricing seat selections
pub struct PriceCalculator;

impl PriceCalculator {
    /// Price a selection of elite and premium seats
    ///
    /// subtotal = elite*rate + premium*rate, tax = subtotal * tax_rate,
    /// total = subtotal + tax + convenience fee. Every component is rounded
    /// to one decimal place, so formatting can never drift from the stored
    /// amounts.
    pub fn price(table: &PriceTable, elite_count: u32, premium_count: u32) -> PriceBreakdown {
        let elite_cost = (table.elite_rate * Decimal::from(elite_count)).round_dp(1);
        let premium_cost = (table.premium_rate * Decimal::from(premium_count)).round_dp(1);
        let subtotal = (elite_cost + premium_cost).round_dp(1);
        let tax = (subtotal * table.tax_rate).round_dp(1);
        let convenience_fee = table.convenience_fee.round_dp(1);
        let total = (subtotal + tax + convenience_fee).round_dp(1);

        PriceBreakdown {
            elite_cost,
            premium_cost,
            subtotal,
            tax,
            convenience_fee,
            total,
        }
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    proptest! {
        /// Total is monotonically non-decreasing in the elite count
        #[test]
        fn prop_total_monotonic_in_elite(elite in 0u32..200, premium in 0u32..200) {
            let table = PriceTable::default();
            let base = PriceCalculator::price(&table, elite, premium);
            let more = PriceCalculator::price(&table, elite + 1, premium);
            prop_assert!(more.total >= base.total);
        }

        /// Total is monotonically non-decreasing in the premium count
        #[test]
        fn prop_total_monotonic_in_premium(elite in 0u32..200, premium in 0u32..200) {
            let table = PriceTable::default();
            let base = PriceCalculator::price(&table, elite, premium);
            let more = PriceCalculator::price(&table, elite, premium + 1);
            prop_assert!(more.total >= base.total);
        }

        /// Components always sum to the total and never exceed one decimal
        /// place, for arbitrary tariff tables
        #[test]
        fn prop_components_sum_and_scale(
            elite in 0u32..100,
            premium in 0u32..100,
            elite_cents in 1u32..50000u32,
            premium_cents in 1u32..50000u32,
        ) {
            let table = PriceTable {
                elite_rate: Decimal::from(elite_cents) / Decimal::from(100),
                premium_rate: Decimal::from(premium_cents) / Decimal::from(100),
                tax_rate: Decimal::new(18, 2),
                convenience_fee: Decimal::new(250, 1),
            };

            let b = PriceCalculator::price(&table, elite, premium);
            prop_assert_eq!(b.total, b.subtotal + b.tax + b.convenience_fee);
            prop_assert_eq!(b.subtotal, b.elite_cost + b.premium_cost);
            prop_assert!(b.total.scale() <= 1);
            prop_assert!(b.tax.scale() <= 1);
        }

        /// Price never goes below the convenience fee floor
        #[test]
        fn prop_fee_floor(elite in 0u32..100, premium in 0u32..100) {
            let table = PriceTable::default();
            let b = PriceCalculator::price(&table, elite, premium);
            prop_assert!(b.total >= table.convenience_fee);
        }
    }
}
