use soroban_sdk::{contracttype, Address, Env, Map};

use crate::ledger::AssetBatch;
use crate::pool::Pool;
use crate::rewards::{self, RewardAmounts};
use crate::storage::{self, DataKey};
use crate::ContractError;

/// A staker's position in one pool.
///
/// A zero-weight position behaves exactly like an absent one.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub share_weight: i128,
    /// Token accumulator at the last settlement.
    pub token_debt: i128,
    /// Point accumulator at the last settlement.
    pub point_debt: i128,
    /// Settled but not yet paid.
    pub token_rewards: i128,
    pub point_rewards: i128,
    /// Unboosted stake, asset id → amount.
    pub owned_assets: Map<u128, i128>,
    pub has_joined: bool,
    /// Time the position first carried weight.
    pub joined_at: u64,
}

impl Position {
    pub fn empty(env: &Env) -> Self {
        Position {
            share_weight: 0,
            token_debt: 0,
            point_debt: 0,
            token_rewards: 0,
            point_rewards: 0,
            owned_assets: Map::new(env),
            has_joined: false,
            joined_at: 0,
        }
    }

    /// Rewards owed at the pool's current accumulators, stash included.
    pub fn owed(&self, pool: &Pool) -> RewardAmounts {
        RewardAmounts {
            tokens: self.token_rewards.saturating_add(rewards::pending(
                self.share_weight,
                pool.tokens_per_share,
                self.token_debt,
            )),
            points: self.point_rewards.saturating_add(rewards::pending(
                self.share_weight,
                pool.points_per_share,
                self.point_debt,
            )),
        }
    }

    /// Moves everything pending at the current weight into the stash.
    /// Call after accruing and before touching `share_weight`.
    pub fn settle(&mut self, pool: &Pool) {
        let owed = self.owed(pool);
        self.token_rewards = owed.tokens;
        self.point_rewards = owed.points;
        self.reset_debt(pool);
    }

    pub fn reset_debt(&mut self, pool: &Pool) {
        self.token_debt = pool.tokens_per_share;
        self.point_debt = pool.points_per_share;
    }

    /// Empties the stash and returns it.
    pub fn take_rewards(&mut self) -> RewardAmounts {
        let taken = RewardAmounts {
            tokens: self.token_rewards,
            points: self.point_rewards,
        };
        self.token_rewards = 0;
        self.point_rewards = 0;
        taken
    }

    pub fn add_weight(&mut self, weight: i128, now: u64) {
        self.share_weight = self.share_weight.saturating_add(weight);
        if !self.has_joined {
            self.has_joined = true;
            self.joined_at = now;
        }
    }

    pub fn remove_weight(&mut self, weight: i128) -> Result<(), ContractError> {
        if weight > self.share_weight {
            return Err(ContractError::InsufficientStake);
        }
        self.share_weight = self.share_weight.saturating_sub(weight);
        Ok(())
    }

    pub fn add_assets(&mut self, batch: &AssetBatch) {
        for (id, amount) in batch.ids.iter().zip(batch.amounts.iter()) {
            let held = self.owned_assets.get(id).unwrap_or(0);
            self.owned_assets.set(id, held.saturating_add(amount));
        }
    }

    /// Removes `batch` from the unboosted holdings, all or nothing.
    pub fn remove_assets(&mut self, batch: &AssetBatch) -> Result<(), ContractError> {
        let mut remaining = self.owned_assets.clone();
        for (id, amount) in batch.ids.iter().zip(batch.amounts.iter()) {
            let held = remaining.get(id).unwrap_or(0);
            if amount > held {
                return Err(ContractError::InsufficientStake);
            }
            let left = held.saturating_sub(amount);
            if left == 0 {
                remaining.remove(id);
            } else {
                remaining.set(id, left);
            }
        }
        self.owned_assets = remaining;
        Ok(())
    }
}

pub fn load(env: &Env, pool_id: u32, staker: &Address) -> Position {
    storage::read(env, &DataKey::Position(pool_id, staker.clone()))
        .unwrap_or_else(|| Position::empty(env))
}

pub fn save(env: &Env, pool_id: u32, staker: &Address, position: &Position) {
    storage::write(env, &DataKey::Position(pool_id, staker.clone()), position);
}
