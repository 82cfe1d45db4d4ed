use soroban_sdk::contracttype;

/// Fixed-point scaling factor for the per-share accumulators.
///
/// Reward-per-share values are stored multiplied by this constant so
/// sub-unit precision survives integer division. The same scale expresses
/// attested checkpoint balances (`PRECISION` = the whole pool).
pub const PRECISION: i128 = 1_000_000_000_000;

/// Denominator for every basis-point quantity (multipliers, developer shares).
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Weight contributed by one staked unit without a booster.
pub const BASE_WEIGHT_PER_UNIT: i128 = BPS_DENOMINATOR;

/// Amounts of both reward currencies, as returned by claims and views.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RewardAmounts {
    pub tokens: i128,
    pub points: i128,
}

impl RewardAmounts {
    pub fn is_zero(&self) -> bool {
        self.tokens == 0 && self.points == 0
    }
}

// ── Accumulator math ─────────────────────────────────────────────────────────

/// `a × b / c`, rounded down, for non-negative operands.
///
/// Falls back to splitting `a` (then `b`) by `c` when the full product does
/// not fit, so the result is exact whenever the quotient itself fits.
#[allow(clippy::arithmetic_side_effects)]
pub fn mul_div(a: i128, b: i128, c: i128) -> i128 {
    if c <= 0 || a <= 0 || b <= 0 {
        return 0;
    }
    if let Some(product) = a.checked_mul(b) {
        return product / c;
    }
    let whole = (a / c).saturating_mul(b);
    let rem = a % c;
    let frac = match rem.checked_mul(b) {
        Some(product) => product / c,
        None => (b / c)
            .saturating_mul(rem)
            .saturating_add((b % c).saturating_mul(rem) / c),
    };
    whole.saturating_add(frac)
}

/// Increment of the reward-per-share accumulator for one pool.
///
/// ```text
/// Δacc = (emitted × strength / total_strength) × PRECISION / total_weight
/// ```
///
/// `emitted` is the global emission over the interval. The pool's share is
/// taken first so the scaled product stays small. Returns zero when nobody
/// is staked or when no pool has strength.
pub fn per_share_delta(
    emitted: i128,
    strength: i128,
    total_strength: i128,
    total_weight: i128,
) -> i128 {
    if total_weight <= 0 {
        return 0;
    }
    mul_div(
        pool_share(emitted, strength, total_strength),
        PRECISION,
        total_weight,
    )
}

/// Pool share of a global emission: `emitted × strength / total_strength`.
pub fn pool_share(emitted: i128, strength: i128, total_strength: i128) -> i128 {
    mul_div(emitted, strength, total_strength)
}

/// Reward accrued by `weight` since the accumulator stood at `snapshot`.
///
/// ```text
/// pending = weight × (acc − snapshot) / PRECISION
/// ```
///
/// Rounded down per settlement, so the stakers of a pool are never owed more
/// than the pool was emitted.
pub fn pending(weight: i128, acc: i128, snapshot: i128) -> i128 {
    mul_div(weight, acc.saturating_sub(snapshot), PRECISION)
}

/// Applies a basis-point cut: `amount × bps / 10 000`.
pub fn bps_of(amount: i128, bps: u32) -> i128 {
    mul_div(amount, bps as i128, BPS_DENOMINATOR)
}
