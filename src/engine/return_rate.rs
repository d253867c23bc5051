use crate::domain::Decimal;

/// Combine two independent return rates: `1 - (1-base)(1-bonus)`.
///
/// Rounded to four decimals and kept within `[0, 0.9999]`, so the result
/// stays in `[0, 1)` even where rounding would reach 1.
pub fn combine_return_rates(base: Decimal, bonus: Decimal) -> Decimal {
    let one = Decimal::one();
    let combined = (one - (one - base) * (one - bonus)).round_dp(4);
    let ceiling = Decimal::from_scaled(9999, 4);
    combined.clamp(Decimal::zero(), ceiling)
}

/// Cost left after refunding `rr` of it, rounded to whole silver.
pub fn apply_return_rate(cost: Decimal, rr: Decimal) -> Decimal {
    (cost * (Decimal::one() - rr)).round_half_up()
}
