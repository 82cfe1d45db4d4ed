//! Asset ledger adapter.
//!
//! Staked collections are external contracts speaking a minimal batch
//! transfer interface. A failed transfer traps and aborts the whole
//! invocation, which is the atomicity the staker relies on.

use soroban_sdk::{contractclient, contracttype, Address, Env, Vec};

use crate::ContractError;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AssetKind {
    Fungible = 0,
    /// One owner per id; every amount is exactly one.
    NftSingle = 1,
    /// Semi-fungible ids with per-id balances.
    NftMultiToken = 2,
}

impl AssetKind {
    pub fn is_stakeable(&self) -> bool {
        !matches!(self, AssetKind::Fungible)
    }
}

/// A batch of asset ids and amounts from one collection.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssetBatch {
    pub asset: Address,
    pub kind: AssetKind,
    pub ids: Vec<u128>,
    pub amounts: Vec<i128>,
}

/// Interface the staker consumes from every staked collection.
#[contractclient(name = "AssetLedgerClient")]
pub trait AssetLedger {
    fn transfer_batch(env: Env, from: Address, to: Address, ids: Vec<u128>, amounts: Vec<i128>);
    fn balance_of(env: Env, owner: Address, id: u128) -> i128;
}

/// Structural checks shared by deposits and direct withdrawals.
pub fn validate_batch(batch: &AssetBatch) -> Result<(), ContractError> {
    if batch.ids.len() != batch.amounts.len() {
        return Err(ContractError::InputLengthsMismatch);
    }
    if batch.ids.is_empty() {
        return Err(ContractError::InvalidAmount);
    }
    if !batch.kind.is_stakeable() {
        return Err(ContractError::InvalidAssetToStake);
    }
    for (i, amount) in batch.amounts.iter().enumerate() {
        match batch.kind {
            AssetKind::NftSingle => {
                if amount != 1 {
                    return Err(ContractError::InvalidAmount);
                }
                // A unique token cannot appear twice in one batch.
                let id = batch.ids.get_unchecked(i as u32);
                for j in 0..i as u32 {
                    if batch.ids.get_unchecked(j) == id {
                        return Err(ContractError::InvalidAmount);
                    }
                }
            }
            _ => {
                if amount <= 0 {
                    return Err(ContractError::InvalidAmount);
                }
            }
        }
    }
    Ok(())
}

/// Sum of the batch amounts.
pub fn total_units(batch: &AssetBatch) -> i128 {
    batch
        .amounts
        .iter()
        .fold(0i128, |acc, amount| acc.saturating_add(amount))
}

pub fn transfer_in(env: &Env, batch: &AssetBatch, from: &Address) {
    AssetLedgerClient::new(env, &batch.asset).transfer_batch(
        from,
        &env.current_contract_address(),
        &batch.ids,
        &batch.amounts,
    );
}

pub fn transfer_out(env: &Env, batch: &AssetBatch, to: &Address) {
    AssetLedgerClient::new(env, &batch.asset).transfer_batch(
        &env.current_contract_address(),
        to,
        &batch.ids,
        &batch.amounts,
    );
}
