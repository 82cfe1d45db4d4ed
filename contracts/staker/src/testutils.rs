//! In-memory collaborators for tests and fuzzing.
//!
//! [`MockAssetLedger`] speaks the `AssetLedger` interface with per-(owner, id)
//! balances. [`MockAttestor`] accepts exactly the signature produced by
//! [`fake_signature`], which lets tests exercise the checkpoint path without
//! key material.

use soroban_sdk::{contract, contractimpl, contracttype, Address, BytesN, Env, Vec};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum MockKey {
    Balance(Address, u128),
}

#[contract]
pub struct MockAssetLedger;

#[contractimpl]
impl MockAssetLedger {
    pub fn mint(env: Env, to: Address, id: u128, amount: i128) {
        let key = MockKey::Balance(to, id);
        let held: i128 = env.storage().persistent().get(&key).unwrap_or(0);
        env.storage().persistent().set(&key, &(held + amount));
    }

    pub fn transfer_batch(env: Env, from: Address, to: Address, ids: Vec<u128>, amounts: Vec<i128>) {
        from.require_auth();
        for (id, amount) in ids.iter().zip(amounts.iter()) {
            let from_key = MockKey::Balance(from.clone(), id);
            let held: i128 = env.storage().persistent().get(&from_key).unwrap_or(0);
            if held < amount {
                panic!("insufficient balance");
            }
            env.storage().persistent().set(&from_key, &(held - amount));

            let to_key = MockKey::Balance(to.clone(), id);
            let dest: i128 = env.storage().persistent().get(&to_key).unwrap_or(0);
            env.storage().persistent().set(&to_key, &(dest + amount));
        }
    }

    pub fn balance_of(env: Env, owner: Address, id: u128) -> i128 {
        env.storage()
            .persistent()
            .get(&MockKey::Balance(owner, id))
            .unwrap_or(0)
    }
}

/// The only signature [`MockAttestor`] accepts for `digest`: the digest
/// bytes written twice.
pub fn fake_signature(env: &Env, digest: &BytesN<32>) -> BytesN<64> {
    let mut raw = [0u8; 64];
    let bytes = digest.to_array();
    raw[..32].copy_from_slice(&bytes);
    raw[32..].copy_from_slice(&bytes);
    BytesN::from_array(env, &raw)
}

#[contract]
pub struct MockAttestor;

#[contractimpl]
impl MockAttestor {
    pub fn verify(env: Env, digest: BytesN<32>, signature: BytesN<64>) -> bool {
        signature == fake_signature(&env, &digest)
    }
}
