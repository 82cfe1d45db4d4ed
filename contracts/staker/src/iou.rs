//! IOU receipts for boosted stakes.
//!
//! A receipt is a claim-check on one staked batch. It records the weight
//! applied when it was minted, so removing it later removes exactly that
//! weight regardless of what the booster is configured to now.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::ledger::AssetBatch;
use crate::storage::{self, DataKey, IOU_COUNT};
use crate::ContractError;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IouReceipt {
    pub id: u64,
    pub pool_id: u32,
    pub booster_id: u32,
    pub holder: Address,
    /// The staked batch, ids in deposit order.
    pub batch: AssetBatch,
    pub weight: i128,
}

pub fn get(env: &Env, id: u64) -> Option<IouReceipt> {
    storage::read(env, &DataKey::Iou(id))
}

pub fn holdings(env: &Env, holder: &Address) -> Vec<u64> {
    storage::read(env, &DataKey::IouHoldings(holder.clone())).unwrap_or(Vec::new(env))
}

fn store_holdings(env: &Env, holder: &Address, ids: &Vec<u64>) {
    let key = DataKey::IouHoldings(holder.clone());
    if ids.is_empty() {
        storage::remove(env, &key);
    } else {
        storage::write(env, &key, ids);
    }
}

fn track(env: &Env, holder: &Address, id: u64) {
    let mut ids = holdings(env, holder);
    ids.push_back(id);
    store_holdings(env, holder, &ids);
}

fn untrack(env: &Env, holder: &Address, id: u64) {
    let mut ids = holdings(env, holder);
    if let Some(index) = ids.first_index_of(id) {
        ids.remove(index);
    }
    store_holdings(env, holder, &ids);
}

pub fn mint(
    env: &Env,
    pool_id: u32,
    booster_id: u32,
    holder: &Address,
    batch: AssetBatch,
    weight: i128,
) -> IouReceipt {
    let id = storage::next_id_u64(env, &IOU_COUNT);
    let receipt = IouReceipt {
        id,
        pool_id,
        booster_id,
        holder: holder.clone(),
        batch,
        weight,
    };
    storage::write(env, &DataKey::Iou(id), &receipt);
    track(env, holder, id);
    receipt
}

/// Loads a receipt that `caller` may redeem against `pool_id`.
pub fn redeemable(
    env: &Env,
    id: u64,
    caller: &Address,
    pool_id: u32,
) -> Result<IouReceipt, ContractError> {
    let receipt = get(env, id).ok_or(ContractError::IouNotFound)?;
    if receipt.holder != *caller {
        return Err(ContractError::NotAnOwnerOfIouToken);
    }
    if receipt.pool_id != pool_id {
        return Err(ContractError::IouTokenFromDifferentPool);
    }
    Ok(receipt)
}

pub fn burn(env: &Env, receipt: &IouReceipt) {
    storage::remove(env, &DataKey::Iou(receipt.id));
    untrack(env, &receipt.holder, receipt.id);
}

pub fn reassign(env: &Env, receipt: &mut IouReceipt, to: &Address) {
    untrack(env, &receipt.holder, receipt.id);
    receipt.holder = to.clone();
    storage::write(env, &DataKey::Iou(receipt.id), receipt);
    track(env, to, receipt.id);
}
