//! Booster registry.
//!
//! A booster is a multiplier unlocked by staking a batch that matches its
//! requirements exactly. Boosters are never deleted; setting
//! `multiplier_bps` to zero disables new stakes under the id while leaving
//! every weight already applied through it untouched.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::ledger::{self, AssetBatch, AssetKind};
use crate::storage::{self, DataKey};
use crate::ContractError;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoostInfo {
    /// Weight multiplier in basis points (10 000 = 1×). Zero disables.
    pub multiplier_bps: u32,
    /// Exact number of units the batch must contain.
    pub amount_required: i128,
    /// Group every id must belong to; zero accepts any group.
    pub group_required: u64,
    pub contract_required: Address,
    pub asset_kind_required: AssetKind,
}

impl BoostInfo {
    pub fn is_enabled(&self) -> bool {
        self.multiplier_bps > 0
    }
}

/// Group of an asset id: its upper 64 bits.
pub fn group_of(id: u128) -> u64 {
    (id >> 64) as u64
}

/// Whether `batch` satisfies `info`.
///
/// Quantity must match exactly; over-staking does not qualify.
pub fn score(info: &BoostInfo, batch: &AssetBatch) -> bool {
    if batch.asset != info.contract_required || batch.kind != info.asset_kind_required {
        return false;
    }
    if info.group_required != 0
        && batch.ids.iter().any(|id| group_of(id) != info.group_required)
    {
        return false;
    }
    ledger::total_units(batch) == info.amount_required
}

// ── Registry ─────────────────────────────────────────────────────────────────

pub fn get(env: &Env, id: u32) -> Option<BoostInfo> {
    storage::read(env, &DataKey::Booster(id))
}

/// Creates or overwrites each `(ids[i], infos[i])` entry.
///
/// Everything is validated before the first write.
pub fn configure_batch(
    env: &Env,
    ids: &Vec<u32>,
    infos: &Vec<BoostInfo>,
) -> Result<(), ContractError> {
    if ids.len() != infos.len() {
        return Err(ContractError::InputLengthsMismatch);
    }
    if infos.is_empty() {
        return Err(ContractError::EmptyBoostInfoArray);
    }
    for (id, info) in ids.iter().zip(infos.iter()) {
        if id == 0 {
            return Err(ContractError::BoosterIdZero);
        }
        if !info.asset_kind_required.is_stakeable() {
            return Err(ContractError::InvalidConfBoostersAssetType);
        }
        if info.amount_required <= 0 {
            return Err(ContractError::InvalidInput);
        }
    }
    for (id, info) in ids.iter().zip(infos.iter()) {
        storage::write(env, &DataKey::Booster(id), &info);
    }
    Ok(())
}

/// Resolves `id` for a new stake against `batch`, returning the multiplier.
pub fn multiplier_for(env: &Env, id: u32, batch: &AssetBatch) -> Result<u32, ContractError> {
    let info = get(env, id).ok_or(ContractError::InvalidInfoStakeForBoost)?;
    if !info.is_enabled() || !score(&info, batch) {
        return Err(ContractError::InvalidInfoStakeForBoost);
    }
    Ok(info.multiplier_bps)
}
