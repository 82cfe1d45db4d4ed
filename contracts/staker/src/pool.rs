//! Pool accumulators.
//!
//! Each pool keeps one reward-per-share accumulator per currency. The pool's
//! slice of the global emission is `strength / Σstrength`; the strength sums
//! are cached and rewritten whenever a pool is added or re-weighted, after
//! every pool has been accrued under the old sums.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::emission::{self, Currency};
use crate::ledger::AssetKind;
use crate::rewards;
use crate::storage::{self, DataKey, POOL_COUNT};
use crate::{booster, ContractError};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub id: u32,
    pub asset: Address,
    pub kind: AssetKind,
    pub token_strength: i128,
    pub point_strength: i128,
    pub total_share_weight: i128,
    /// Scaled by `rewards::PRECISION`. Never decreases.
    pub tokens_per_share: i128,
    /// Scaled by `rewards::PRECISION`. Never decreases.
    pub points_per_share: i128,
    pub last_accrual_time: u64,
    pub booster_ids: Vec<u32>,
    pub created_at: u64,
}

impl Pool {
    pub fn strength(&self, currency: Currency) -> i128 {
        match currency {
            Currency::Tokens => self.token_strength,
            Currency::Points => self.point_strength,
        }
    }

    pub fn accepts_booster(&self, booster_id: u32) -> bool {
        self.booster_ids.contains(booster_id)
    }
}

// ── Storage ──────────────────────────────────────────────────────────────────

pub fn count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_COUNT).unwrap_or(0)
}

pub fn load(env: &Env, pool_id: u32) -> Result<Pool, ContractError> {
    storage::read(env, &DataKey::Pool(pool_id)).ok_or(ContractError::InactivePool)
}

pub fn save(env: &Env, pool: &Pool) {
    storage::write(env, &DataKey::Pool(pool.id), pool);
}

pub fn total_strength(env: &Env, currency: Currency) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::TotalStrength(currency))
        .unwrap_or(0)
}

fn refresh_total_strengths(env: &Env) {
    let mut tokens: i128 = 0;
    let mut points: i128 = 0;
    for id in 1..=count(env) {
        if let Ok(pool) = load(env, id) {
            tokens = tokens.saturating_add(pool.token_strength);
            points = points.saturating_add(pool.point_strength);
        }
    }
    storage::write(env, &DataKey::TotalStrength(Currency::Tokens), &tokens);
    storage::write(env, &DataKey::TotalStrength(Currency::Points), &points);
}

// ── Accrual ──────────────────────────────────────────────────────────────────

/// Advances both accumulators of `pool` to `now`.
///
/// Time with no staked weight is skipped rather than carried forward, so a
/// later depositor never collects emission from before they joined.
pub fn accrue(env: &Env, pool: &mut Pool, now: u64) {
    if now <= pool.last_accrual_time {
        return;
    }
    if pool.total_share_weight > 0 {
        let from = pool.last_accrual_time;
        pool.tokens_per_share = pool
            .tokens_per_share
            .saturating_add(delta(env, pool, Currency::Tokens, from, now));
        pool.points_per_share = pool
            .points_per_share
            .saturating_add(delta(env, pool, Currency::Points, from, now));
    }
    pool.last_accrual_time = now;
}

fn delta(env: &Env, pool: &Pool, currency: Currency, from: u64, to: u64) -> i128 {
    let emitted = emission::emitted_between(&emission::schedule(env, currency), from, to);
    rewards::per_share_delta(
        emitted,
        pool.strength(currency),
        total_strength(env, currency),
        pool.total_share_weight,
    )
}

/// Accrues and persists every pool. Runs before anything that changes how
/// emission is apportioned (schedules, strengths, pool set).
pub fn accrue_all(env: &Env, now: u64) {
    for id in 1..=count(env) {
        if let Ok(mut pool) = load(env, id) {
            accrue(env, &mut pool, now);
            save(env, &pool);
        }
    }
}

// ── Lifecycle ────────────────────────────────────────────────────────────────

fn validate_params(
    env: &Env,
    token_strength: i128,
    point_strength: i128,
    booster_ids: &Vec<u32>,
) -> Result<(), ContractError> {
    if token_strength < 0 || point_strength < 0 {
        return Err(ContractError::InvalidInput);
    }
    for id in booster_ids.iter() {
        if booster::get(env, id).is_none() {
            return Err(ContractError::InvalidInfoStakeForBoost);
        }
    }
    Ok(())
}

pub fn create(
    env: &Env,
    asset: Address,
    kind: AssetKind,
    token_strength: i128,
    point_strength: i128,
    booster_ids: Vec<u32>,
) -> Result<Pool, ContractError> {
    if !emission::is_configured(env) {
        return Err(ContractError::EmissionsNotSet);
    }
    if !kind.is_stakeable() {
        return Err(ContractError::InvalidAssetKind);
    }
    if env
        .storage()
        .persistent()
        .has(&DataKey::PoolByAsset(asset.clone()))
    {
        return Err(ContractError::PoolAlreadyExists);
    }
    validate_params(env, token_strength, point_strength, &booster_ids)?;

    let now = env.ledger().timestamp();
    accrue_all(env, now);

    let id = storage::next_id_u32(env, &POOL_COUNT);
    let pool = Pool {
        id,
        asset: asset.clone(),
        kind,
        token_strength,
        point_strength,
        total_share_weight: 0,
        tokens_per_share: 0,
        points_per_share: 0,
        last_accrual_time: now,
        booster_ids,
        created_at: now,
    };
    save(env, &pool);
    storage::write(env, &DataKey::PoolByAsset(asset), &id);
    refresh_total_strengths(env);
    Ok(pool)
}

pub fn update(
    env: &Env,
    pool_id: u32,
    token_strength: i128,
    point_strength: i128,
    booster_ids: Vec<u32>,
) -> Result<Pool, ContractError> {
    load(env, pool_id)?;
    validate_params(env, token_strength, point_strength, &booster_ids)?;

    accrue_all(env, env.ledger().timestamp());

    let mut pool = load(env, pool_id)?;
    pool.token_strength = token_strength;
    pool.point_strength = point_strength;
    pool.booster_ids = booster_ids;
    save(env, &pool);
    refresh_total_strengths(env);
    Ok(pool)
}
