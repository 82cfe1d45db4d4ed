#![no_std]

#[cfg(test)]
extern crate std;

pub mod booster;
pub mod checkpoint;
pub mod distributor;
pub mod emission;
mod errors;
pub mod events;
pub mod iou;
pub mod ledger;
pub mod pool;
pub mod position;
pub mod rewards;
mod storage;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

pub use booster::BoostInfo;
pub use checkpoint::{AttestationVerifier, AttestorClient, Checkpoint};
pub use distributor::Developer;
pub use emission::{Currency, EmissionEvent};
pub use errors::{ContractError, ErrorCategory};
pub use iou::IouReceipt;
pub use ledger::{AssetBatch, AssetKind, AssetLedger, AssetLedgerClient};
pub use pool::Pool;
pub use position::Position;
pub use rewards::RewardAmounts;

use common::{access, pause, replay, AdminTier};
use soroban_sdk::{contract, contractimpl, contracttype, Address, BytesN, Env, Vec};

use rewards::BASE_WEIGHT_PER_UNIT;
use storage::{ADMIN, ATTESTOR, INITIALIZED, REWARD_TOKEN};

/// What a withdrawal releases.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Withdrawal {
    /// Unboosted stake, returned straight from the position's holdings.
    Assets(AssetBatch),
    /// Boosted stake, redeemed by burning the listed receipts.
    Ious(Vec<u64>),
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakerContract;

#[contractimpl]
impl StakerContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `reward_token` – token contract paying token rewards out of this
    ///   contract's own balance.
    /// * `attestor`     – `AttestationVerifier` consulted by checkpoint claims.
    pub fn initialize(
        env: Env,
        admin: Address,
        reward_token: Address,
        attestor: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&REWARD_TOKEN, &reward_token);
        env.storage().instance().set(&ATTESTOR, &attestor);
        storage::bump_instance(&env);

        access::bootstrap(&env, &admin);

        events::publish_initialized(&env, admin, reward_token, attestor);
        Ok(())
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_reward_token(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&REWARD_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    // ── Tiers & pause ───────────────────────────────────────────────────────

    pub fn grant_tier(
        env: Env,
        caller: Address,
        target: Address,
        tier: AdminTier,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        access::grant(&env, &caller, &target, tier)?;
        events::publish_tier_granted(&env, caller, target, tier);
        Ok(())
    }

    pub fn revoke_tier(env: Env, caller: Address, target: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        access::revoke(&env, &caller, &target)?;
        events::publish_tier_revoked(&env, caller, target);
        Ok(())
    }

    pub fn get_tier(env: Env, admin: Address) -> Option<AdminTier> {
        access::tier_of(&env, &admin)
    }

    /// Stops deposits, IOU transfers and checkpoint claims. Withdrawals and
    /// live claims stay available.
    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_tier(&env, &caller, AdminTier::Operator)?;
        pause::set_paused(&env, true);
        events::publish_paused(&env, caller, true);
        Ok(())
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_tier(&env, &caller, AdminTier::Operator)?;
        pause::set_paused(&env, false);
        events::publish_paused(&env, caller, false);
        Ok(())
    }

    pub fn is_paused(env: Env) -> bool {
        pause::is_paused(&env)
    }

    pub fn set_attestor(env: Env, caller: Address, attestor: Address) -> Result<(), ContractError> {
        Self::require_tier(&env, &caller, AdminTier::Configurator)?;
        env.storage().instance().set(&ATTESTOR, &attestor);
        events::publish_attestor_set(&env, attestor);
        Ok(())
    }

    pub fn get_attestor(env: Env) -> Option<Address> {
        env.storage().instance().get(&ATTESTOR)
    }

    // ── Emission schedule ───────────────────────────────────────────────────

    /// Replaces the schedule of `currency`.
    ///
    /// Every pool is accrued to now under the old schedule first, so a
    /// back-dated event only changes emission from this moment on.
    pub fn set_emissions(
        env: Env,
        caller: Address,
        currency: Currency,
        schedule: Vec<EmissionEvent>,
    ) -> Result<(), ContractError> {
        Self::require_tier(&env, &caller, AdminTier::Configurator)?;
        if emission::is_locked(&env, currency) {
            return Err(ContractError::ScheduleLocked);
        }
        emission::validate(&schedule)?;

        pool::accrue_all(&env, env.ledger().timestamp());
        emission::store_schedule(&env, currency, &schedule);

        events::publish_emissions_set(&env, currency, schedule.len());
        Ok(())
    }

    /// Freezes the schedule of `currency` for good.
    pub fn lock_emissions(
        env: Env,
        caller: Address,
        currency: Currency,
    ) -> Result<(), ContractError> {
        Self::require_tier(&env, &caller, AdminTier::Configurator)?;
        if emission::schedule(&env, currency).is_empty() {
            return Err(ContractError::EmptySchedule);
        }
        emission::lock(&env, currency);
        events::publish_emissions_locked(&env, currency);
        Ok(())
    }

    pub fn is_emissions_locked(env: Env, currency: Currency) -> bool {
        emission::is_locked(&env, currency)
    }

    pub fn get_emissions(env: Env, currency: Currency) -> Vec<EmissionEvent> {
        emission::schedule(&env, currency)
    }

    /// Global emission of `currency` over `[t0, t1)`, before any pool split.
    pub fn get_total_emitted(env: Env, currency: Currency, t0: u64, t1: u64) -> i128 {
        emission::emitted_between(&emission::schedule(&env, currency), t0, t1)
    }

    // ── Boosters & pools ────────────────────────────────────────────────────

    pub fn configure_boosters(
        env: Env,
        caller: Address,
        ids: Vec<u32>,
        infos: Vec<BoostInfo>,
    ) -> Result<(), ContractError> {
        Self::require_tier(&env, &caller, AdminTier::Configurator)?;
        booster::configure_batch(&env, &ids, &infos)?;
        events::publish_boosters_configured(&env, ids);
        Ok(())
    }

    pub fn get_booster(env: Env, booster_id: u32) -> Option<BoostInfo> {
        booster::get(&env, booster_id)
    }

    pub fn add_pool(
        env: Env,
        caller: Address,
        asset: Address,
        kind: AssetKind,
        token_strength: i128,
        point_strength: i128,
        booster_ids: Vec<u32>,
    ) -> Result<u32, ContractError> {
        Self::require_tier(&env, &caller, AdminTier::Configurator)?;
        let pool = pool::create(
            &env,
            asset,
            kind,
            token_strength,
            point_strength,
            booster_ids,
        )?;
        events::publish_pool_added(&env, &pool);
        Ok(pool.id)
    }

    pub fn update_pool(
        env: Env,
        caller: Address,
        pool_id: u32,
        token_strength: i128,
        point_strength: i128,
        booster_ids: Vec<u32>,
    ) -> Result<(), ContractError> {
        Self::require_tier(&env, &caller, AdminTier::Configurator)?;
        let pool = pool::update(&env, pool_id, token_strength, point_strength, booster_ids)?;
        events::publish_pool_updated(&env, &pool);
        Ok(())
    }

    pub fn get_pool(env: Env, pool_id: u32) -> Result<Pool, ContractError> {
        pool::load(&env, pool_id)
    }

    pub fn get_pool_count(env: Env) -> u32 {
        pool::count(&env)
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Stakes `batch` into `pool_id`.
    ///
    /// With `booster_id = 0` the batch must be the pool's own asset and adds
    /// one base weight per unit. Otherwise the batch must satisfy the
    /// booster exactly, the weight is scaled by its multiplier, and an IOU
    /// receipt is minted to `staker`. Returns the receipt id, or 0.
    pub fn deposit(
        env: Env,
        staker: Address,
        pool_id: u32,
        batch: AssetBatch,
        booster_id: u32,
    ) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        pause::require_not_paused(&env)?;

        let mut pool = pool::load(&env, pool_id)?;
        ledger::validate_batch(&batch)?;
        let units = ledger::total_units(&batch);

        let weight = if booster_id == 0 {
            if batch.asset != pool.asset || batch.kind != pool.kind {
                return Err(ContractError::InvalidAssetToStake);
            }
            units.saturating_mul(BASE_WEIGHT_PER_UNIT)
        } else {
            if !pool.accepts_booster(booster_id) {
                return Err(ContractError::InvalidInfoStakeForBoost);
            }
            let multiplier = booster::multiplier_for(&env, booster_id, &batch)?;
            units.saturating_mul(multiplier as i128)
        };

        // 1. Settle the position at its pre-deposit weight.
        let now = env.ledger().timestamp();
        pool::accrue(&env, &mut pool, now);
        let mut position = position::load(&env, pool_id, &staker);
        position.settle(&pool);

        // 2. Apply the new weight; the debt snapshot covers it from now on.
        position.add_weight(weight, now);
        if booster_id == 0 {
            position.add_assets(&batch);
        }
        pool.total_share_weight = pool.total_share_weight.saturating_add(weight);
        position.reset_debt(&pool);

        pool::save(&env, &pool);
        position::save(&env, pool_id, &staker, &position);

        let iou_id = if booster_id == 0 {
            0
        } else {
            let receipt = iou::mint(&env, pool_id, booster_id, &staker, batch.clone(), weight);
            events::publish_iou_minted(&env, receipt.id, staker.clone(), weight);
            receipt.id
        };

        // 3. Pull the assets in once the books are final.
        ledger::transfer_in(&env, &batch, &staker);

        events::publish_deposited(&env, staker, pool_id, batch, booster_id, weight, iou_id);
        Ok(iou_id)
    }

    /// Releases stake and pays everything the whole position has earned.
    pub fn withdraw(
        env: Env,
        staker: Address,
        pool_id: u32,
        withdrawal: Withdrawal,
    ) -> Result<RewardAmounts, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let mut pool = pool::load(&env, pool_id)?;
        pool::accrue(&env, &mut pool, env.ledger().timestamp());
        let mut position = position::load(&env, pool_id, &staker);
        position.settle(&pool);

        let mut released: Vec<AssetBatch> = Vec::new(&env);
        let mut weight_removed: i128 = 0;
        match withdrawal {
            Withdrawal::Assets(batch) => {
                ledger::validate_batch(&batch)?;
                if batch.asset != pool.asset || batch.kind != pool.kind {
                    return Err(ContractError::InvalidAssetToStake);
                }
                position.remove_assets(&batch)?;
                weight_removed = ledger::total_units(&batch).saturating_mul(BASE_WEIGHT_PER_UNIT);
                released.push_back(batch);
            }
            Withdrawal::Ious(ids) => {
                if ids.is_empty() {
                    return Err(ContractError::InvalidAmount);
                }
                for id in ids.iter() {
                    let receipt = iou::redeemable(&env, id, &staker, pool_id)?;
                    iou::burn(&env, &receipt);
                    events::publish_iou_burned(&env, receipt.id, staker.clone());
                    weight_removed = weight_removed.saturating_add(receipt.weight);
                    released.push_back(receipt.batch);
                }
            }
        }

        position.remove_weight(weight_removed)?;
        pool.total_share_weight = pool.total_share_weight.saturating_sub(weight_removed);
        position.reset_debt(&pool);
        let gross = position.take_rewards();

        pool::save(&env, &pool);
        position::save(&env, pool_id, &staker, &position);

        for batch in released.iter() {
            ledger::transfer_out(&env, &batch, &staker);
        }
        events::publish_withdrawn(
            &env,
            staker.clone(),
            pool_id,
            weight_removed,
            position.share_weight,
        );

        Self::pay_out(&env, &staker, pool_id, &gross)
    }

    /// Pays everything `staker` has earned in `pool_id` so far.
    pub fn claim(env: Env, staker: Address, pool_id: u32) -> Result<RewardAmounts, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let mut pool = pool::load(&env, pool_id)?;
        pool::accrue(&env, &mut pool, env.ledger().timestamp());
        let mut position = position::load(&env, pool_id, &staker);
        position.settle(&pool);
        let gross = position.take_rewards();

        pool::save(&env, &pool);
        position::save(&env, pool_id, &staker, &position);

        Self::pay_out(&env, &staker, pool_id, &gross)
    }

    // ── IOU receipts ────────────────────────────────────────────────────────

    /// Hands receipt `iou_id` and the weight it carries to `to`.
    pub fn transfer_iou(
        env: Env,
        from: Address,
        to: Address,
        iou_id: u64,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        from.require_auth();
        pause::require_not_paused(&env)?;

        let mut receipt = iou::get(&env, iou_id).ok_or(ContractError::IouNotFound)?;
        if receipt.holder != from {
            return Err(ContractError::NotAnOwnerOfIouToken);
        }
        if from == to {
            return Err(ContractError::InvalidInput);
        }

        let now = env.ledger().timestamp();
        let mut pool = pool::load(&env, receipt.pool_id)?;
        pool::accrue(&env, &mut pool, now);

        let mut sender = position::load(&env, pool.id, &from);
        sender.settle(&pool);
        sender.remove_weight(receipt.weight)?;
        sender.reset_debt(&pool);

        let mut recipient = position::load(&env, pool.id, &to);
        recipient.settle(&pool);
        recipient.add_weight(receipt.weight, now);
        recipient.reset_debt(&pool);

        pool::save(&env, &pool);
        position::save(&env, pool.id, &from, &sender);
        position::save(&env, pool.id, &to, &recipient);
        iou::reassign(&env, &mut receipt, &to);

        events::publish_iou_transferred(&env, iou_id, from, to, receipt.weight);
        Ok(())
    }

    pub fn get_iou(env: Env, iou_id: u64) -> Option<IouReceipt> {
        iou::get(&env, iou_id)
    }

    pub fn get_ious_of(env: Env, holder: Address) -> Vec<u64> {
        iou::holdings(&env, &holder)
    }

    // ── Positions ───────────────────────────────────────────────────────────

    pub fn get_position(env: Env, staker: Address, pool_id: u32) -> Position {
        position::load(&env, pool_id, &staker)
    }

    /// Rewards `staker` could claim from `pool_id` right now, before
    /// developer cuts. Does not mutate state.
    pub fn get_pending_rewards(
        env: Env,
        staker: Address,
        pool_id: u32,
    ) -> Result<RewardAmounts, ContractError> {
        let mut pool = pool::load(&env, pool_id)?;
        pool::accrue(&env, &mut pool, env.ledger().timestamp());
        Ok(position::load(&env, pool_id, &staker).owed(&pool))
    }

    // ── Checkpoint claims ───────────────────────────────────────────────────

    /// Redeems an attested checkpoint for `claimant` in `pool_id`.
    ///
    /// The payload must hash to `signed_hash`, the attestor must accept
    /// `signature` over it, and the hash must not have been redeemed before.
    pub fn claim_checkpoint(
        env: Env,
        claimant: Address,
        pool_id: u32,
        checkpoint: Checkpoint,
        signed_hash: BytesN<32>,
        signature: BytesN<64>,
    ) -> Result<RewardAmounts, ContractError> {
        Self::require_initialized(&env)?;
        claimant.require_auth();
        pause::require_not_paused(&env)?;

        checkpoint::validate_shape(&checkpoint)?;
        checkpoint::validate_entries(&checkpoint, env.ledger().timestamp())?;
        pool::load(&env, pool_id)?;

        let digest = checkpoint::digest(&env, &claimant, pool_id, &checkpoint);
        if digest != signed_hash {
            return Err(ContractError::MismatchArgumentsAndHash);
        }
        checkpoint::verify_signature(&env, &signed_hash, &signature)?;
        if replay::is_consumed(&env, &signed_hash) {
            return Err(ContractError::HashUsed);
        }

        let position = position::load(&env, pool_id, &claimant);
        let joined = if position.has_joined {
            Some(position.joined_at)
        } else {
            None
        };
        checkpoint::ensure_no_live_overlap(&checkpoint, joined)?;

        let gross = checkpoint::reward(&env, &checkpoint);
        replay::consume(&env, &signed_hash)?;

        events::publish_checkpoint_claimed(
            &env,
            claimant.clone(),
            pool_id,
            signed_hash,
            checkpoint.start_times.len(),
        );
        Self::pay_out(&env, &claimant, pool_id, &gross)
    }

    /// Digest an attestor must sign for `claimant`'s checkpoint in `pool_id`.
    pub fn checkpoint_digest(
        env: Env,
        claimant: Address,
        pool_id: u32,
        checkpoint: Checkpoint,
    ) -> Result<BytesN<32>, ContractError> {
        checkpoint::validate_shape(&checkpoint)?;
        Ok(checkpoint::digest(&env, &claimant, pool_id, &checkpoint))
    }

    pub fn is_hash_used(env: Env, digest: BytesN<32>) -> bool {
        replay::is_consumed(&env, &digest)
    }

    // ── Distributor & points ────────────────────────────────────────────────

    pub fn set_developer(
        env: Env,
        caller: Address,
        developer: Address,
        share_bps: u32,
    ) -> Result<(), ContractError> {
        Self::require_tier(&env, &caller, AdminTier::Configurator)?;
        distributor::set_developer(&env, &developer, share_bps)?;
        events::publish_developer_set(&env, developer, share_bps);
        Ok(())
    }

    pub fn remove_developer(
        env: Env,
        caller: Address,
        developer: Address,
    ) -> Result<(), ContractError> {
        Self::require_tier(&env, &caller, AdminTier::Configurator)?;
        distributor::remove_developer(&env, &developer)?;
        events::publish_developer_removed(&env, developer);
        Ok(())
    }

    pub fn get_developers(env: Env) -> Vec<Developer> {
        distributor::developers(&env)
    }

    pub fn get_points(env: Env, user: Address) -> i128 {
        distributor::points_of(&env, &user)
    }

    pub fn set_point_spender(
        env: Env,
        caller: Address,
        spender: Address,
        approved: bool,
    ) -> Result<(), ContractError> {
        Self::require_tier(&env, &caller, AdminTier::Configurator)?;
        distributor::set_point_spender(&env, &spender, approved);
        events::publish_point_spender_set(&env, spender, approved);
        Ok(())
    }

    pub fn is_point_spender(env: Env, spender: Address) -> bool {
        distributor::is_point_spender(&env, &spender)
    }

    /// Debits `amount` points from `user` on behalf of an approved spender.
    /// Both parties authorise. Returns the user's remaining balance.
    pub fn spend_points(
        env: Env,
        spender: Address,
        user: Address,
        amount: i128,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        spender.require_auth();
        user.require_auth();
        if !distributor::is_point_spender(&env, &spender) {
            return Err(ContractError::NotPointSpender);
        }
        let remaining = distributor::debit_points(&env, &user, amount)?;
        events::publish_points_spent(&env, spender, user, amount);
        Ok(remaining)
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        storage::bump_instance(env);
        Ok(())
    }

    /// Guard: revert unless `caller` authorised and holds at least `min_tier`.
    fn require_tier(env: &Env, caller: &Address, min_tier: AdminTier) -> Result<(), ContractError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        access::require_tier(env, caller, min_tier)?;
        Ok(())
    }

    fn pay_out(
        env: &Env,
        recipient: &Address,
        pool_id: u32,
        gross: &RewardAmounts,
    ) -> Result<RewardAmounts, ContractError> {
        if gross.is_zero() {
            return Ok(RewardAmounts::default());
        }
        let net = distributor::pay(env, recipient, gross)?;
        events::publish_rewards_claimed(env, recipient.clone(), pool_id, gross.clone(), net.clone());
        Ok(net)
    }
}


#[cfg(test)]
mod test_admin_tiers;


#[cfg(test)]
mod test_checkpoint;

#[cfg(test)]
mod test_properties;
