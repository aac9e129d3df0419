use contracts::domain::orders::CommissionMode;

/// Settlement/commission pair derived from an order's pricing fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedAmounts {
    pub settlement_amount: i64,
    pub commission_amount: i64,
}

/// Derives the settlement and commission amounts for an order.
///
/// Returns `None` in manual mode: the operator-entered amounts are
/// authoritative and must not be recomputed. Ratio mode floors the
/// percentage product; settlement may go negative (partner discount) and
/// is not clamped.
pub fn derive_amounts(
    order_price: i64,
    mode: CommissionMode,
    commission: i64,
) -> Option<DerivedAmounts> {
    let commission_amount = match mode {
        CommissionMode::Manual => return None,
        CommissionMode::Ratio => (order_price * commission).div_euclid(100),
        CommissionMode::Amount => commission,
    };
    Some(DerivedAmounts {
        settlement_amount: order_price - commission_amount,
        commission_amount,
    })
}

/// Recalculation as run on every pricing-field edit: in manual mode the
/// current pair passes through untouched, otherwise the derived pair
/// replaces it.
pub fn recalculated(
    order_price: i64,
    mode: CommissionMode,
    commission: i64,
    current: DerivedAmounts,
) -> DerivedAmounts {
    derive_amounts(order_price, mode, commission).unwrap_or(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_mode() {
        let derived = derive_amounts(100_000, CommissionMode::Ratio, 10).unwrap();
        assert_eq!(derived.commission_amount, 10_000);
        assert_eq!(derived.settlement_amount, 90_000);
    }

    #[test]
    fn test_ratio_mode_floors() {
        // 33,333 at 7% = 2,333.31 -> 2,333
        let derived = derive_amounts(33_333, CommissionMode::Ratio, 7).unwrap();
        assert_eq!(derived.commission_amount, 2_333);
        assert_eq!(derived.settlement_amount, 31_000);
    }

    #[test]
    fn test_amount_mode() {
        let derived = derive_amounts(50_000, CommissionMode::Amount, 5_000).unwrap();
        assert_eq!(derived.commission_amount, 5_000);
        assert_eq!(derived.settlement_amount, 45_000);
    }

    #[test]
    fn test_negative_settlement_not_clamped() {
        let derived = derive_amounts(10_000, CommissionMode::Amount, 12_000).unwrap();
        assert_eq!(derived.settlement_amount, -2_000);
    }

    #[test]
    fn test_percentage_not_clamped() {
        let derived = derive_amounts(10_000, CommissionMode::Ratio, 150).unwrap();
        assert_eq!(derived.commission_amount, 15_000);
        assert_eq!(derived.settlement_amount, -5_000);
    }

    #[test]
    fn test_idempotent() {
        for mode in [CommissionMode::Ratio, CommissionMode::Amount] {
            let once = derive_amounts(123_456, mode, 13).unwrap();
            let twice = derive_amounts(123_456, mode, 13).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_manual_mode_passes_through() {
        assert_eq!(derive_amounts(99_000, CommissionMode::Manual, 30), None);

        let entered = DerivedAmounts {
            settlement_amount: 77_777,
            commission_amount: 1_234,
        };
        let after = recalculated(99_000, CommissionMode::Manual, 30, entered);
        assert_eq!(after, entered);
    }
}
