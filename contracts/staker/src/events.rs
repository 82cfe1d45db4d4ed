#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, BytesN, Env, Vec};

use common::AdminTier;
use crate::emission::Currency;
use crate::ledger::AssetBatch;
use crate::rewards::RewardAmounts;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub reward_token: Address,
    pub attestor: Address,
    pub timestamp: u64,
}

/// Fired when a currency's emission schedule is replaced.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmissionsSetEvent {
    pub currency: Currency,
    pub events: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfiguredEvent {
    pub pool_id: u32,
    pub asset: Address,
    pub token_strength: i128,
    pub point_strength: i128,
    pub booster_ids: Vec<u32>,
    pub timestamp: u64,
}

/// Fired when a staker deposits a batch.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositedEvent {
    pub staker: Address,
    pub pool_id: u32,
    pub batch: AssetBatch,
    pub booster_id: u32,
    pub weight: i128,
    /// Zero for unboosted deposits.
    pub iou_id: u64,
    pub timestamp: u64,
}

/// Fired when a staker withdraws assets or redeems IOUs.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub staker: Address,
    pub pool_id: u32,
    pub weight_removed: i128,
    pub new_share_weight: i128,
    pub timestamp: u64,
}

/// Fired for every non-empty payout, live or checkpointed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsClaimedEvent {
    pub staker: Address,
    pub pool_id: u32,
    pub gross: RewardAmounts,
    pub net: RewardAmounts,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IouTransferredEvent {
    pub iou_id: u64,
    pub from: Address,
    pub to: Address,
    pub weight: i128,
    pub timestamp: u64,
}

/// Fired when a signed checkpoint is accepted and its digest consumed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CheckpointClaimedEvent {
    pub claimant: Address,
    pub pool_id: u32,
    pub digest: BytesN<32>,
    pub intervals: u32,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address, reward_token: Address, attestor: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            reward_token,
            attestor,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emissions_set(env: &Env, currency: Currency, events: u32) {
    env.events().publish(
        (symbol_short!("EMIS_SET"),),
        EmissionsSetEvent {
            currency,
            events,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emissions_locked(env: &Env, currency: Currency) {
    env.events().publish(
        (symbol_short!("EMIS_LOCK"),),
        (currency, env.ledger().timestamp()),
    );
}

pub fn publish_boosters_configured(env: &Env, ids: Vec<u32>) {
    env.events().publish(
        (symbol_short!("BOOST_CFG"),),
        (ids, env.ledger().timestamp()),
    );
}

fn pool_configured(env: &Env, pool: &crate::pool::Pool) -> PoolConfiguredEvent {
    PoolConfiguredEvent {
        pool_id: pool.id,
        asset: pool.asset.clone(),
        token_strength: pool.token_strength,
        point_strength: pool.point_strength,
        booster_ids: pool.booster_ids.clone(),
        timestamp: env.ledger().timestamp(),
    }
}

pub fn publish_pool_added(env: &Env, pool: &crate::pool::Pool) {
    env.events().publish(
        (symbol_short!("POOL_ADD"), pool.id),
        pool_configured(env, pool),
    );
}

pub fn publish_pool_updated(env: &Env, pool: &crate::pool::Pool) {
    env.events().publish(
        (symbol_short!("POOL_UPD"), pool.id),
        pool_configured(env, pool),
    );
}

pub fn publish_deposited(
    env: &Env,
    staker: Address,
    pool_id: u32,
    batch: AssetBatch,
    booster_id: u32,
    weight: i128,
    iou_id: u64,
) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), staker.clone()),
        DepositedEvent {
            staker,
            pool_id,
            batch,
            booster_id,
            weight,
            iou_id,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(
    env: &Env,
    staker: Address,
    pool_id: u32,
    weight_removed: i128,
    new_share_weight: i128,
) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), staker.clone()),
        WithdrawnEvent {
            staker,
            pool_id,
            weight_removed,
            new_share_weight,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_claimed(
    env: &Env,
    staker: Address,
    pool_id: u32,
    gross: RewardAmounts,
    net: RewardAmounts,
) {
    env.events().publish(
        (symbol_short!("CLMD"), staker.clone()),
        RewardsClaimedEvent {
            staker,
            pool_id,
            gross,
            net,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_iou_minted(env: &Env, iou_id: u64, holder: Address, weight: i128) {
    env.events().publish(
        (symbol_short!("IOU_MINT"), holder),
        (iou_id, weight, env.ledger().timestamp()),
    );
}

pub fn publish_iou_transferred(env: &Env, iou_id: u64, from: Address, to: Address, weight: i128) {
    env.events().publish(
        (symbol_short!("IOU_XFER"), from.clone()),
        IouTransferredEvent {
            iou_id,
            from,
            to,
            weight,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_iou_burned(env: &Env, iou_id: u64, holder: Address) {
    env.events().publish(
        (symbol_short!("IOU_BURN"), holder),
        (iou_id, env.ledger().timestamp()),
    );
}

pub fn publish_checkpoint_claimed(
    env: &Env,
    claimant: Address,
    pool_id: u32,
    digest: BytesN<32>,
    intervals: u32,
) {
    env.events().publish(
        (symbol_short!("CKPT"), claimant.clone()),
        CheckpointClaimedEvent {
            claimant,
            pool_id,
            digest,
            intervals,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_attestor_set(env: &Env, attestor: Address) {
    env.events().publish(
        (symbol_short!("ATTST_SET"),),
        (attestor, env.ledger().timestamp()),
    );
}

pub fn publish_developer_set(env: &Env, developer: Address, share_bps: u32) {
    env.events().publish(
        (symbol_short!("DEV_SET"), developer),
        (share_bps, env.ledger().timestamp()),
    );
}

pub fn publish_developer_removed(env: &Env, developer: Address) {
    env.events().publish(
        (symbol_short!("DEV_DEL"), developer),
        env.ledger().timestamp(),
    );
}

pub fn publish_point_spender_set(env: &Env, spender: Address, approved: bool) {
    env.events().publish(
        (symbol_short!("PT_SPNDR"), spender),
        (approved, env.ledger().timestamp()),
    );
}

pub fn publish_points_spent(env: &Env, spender: Address, user: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("PT_SPENT"), user),
        (spender, amount, env.ledger().timestamp()),
    );
}

pub fn publish_paused(env: &Env, caller: Address, paused: bool) {
    let topic = if paused {
        symbol_short!("PAUSED")
    } else {
        symbol_short!("UNPAUSED")
    };
    env.events()
        .publish((topic, caller), env.ledger().timestamp());
}

pub fn publish_tier_granted(env: &Env, caller: Address, target: Address, tier: AdminTier) {
    env.events().publish(
        (symbol_short!("TIER_GRT"), target),
        (caller, tier, env.ledger().timestamp()),
    );
}

pub fn publish_tier_revoked(env: &Env, caller: Address, target: Address) {
    env.events().publish(
        (symbol_short!("TIER_RVK"), target),
        (caller, env.ledger().timestamp()),
    );
}
