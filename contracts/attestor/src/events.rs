#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, BytesN, Env};

/// Fired once when the attestor is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttestorInitializedEvent {
    pub admin: Address,
    pub signer: BytesN<32>,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address, signer: BytesN<32>) {
    env.events().publish(
        (symbol_short!("INIT"),),
        AttestorInitializedEvent {
            admin,
            signer,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_signer_rotated(env: &Env, signer: BytesN<32>) {
    env.events().publish(
        (symbol_short!("SIGNER"),),
        (signer, env.ledger().timestamp()),
    );
}
