#![no_std]

//! Checkpoint attestation authority.
//!
//! Holds one ed25519 public key and answers `verify(digest, signature)` for
//! contracts that accept off-chain attested payloads. A signature that does
//! not verify traps inside the host; callers using `try_verify` observe it
//! as an error.

pub mod events;

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, symbol_short, Address, Bytes, BytesN,
    Env, Symbol,
};

const ADMIN: Symbol = symbol_short!("ADMIN");
const SIGNER: Symbol = symbol_short!("SIGNER");

const TTL_THRESHOLD: u32 = 17_280;
const TTL_EXTEND_TO: u32 = 518_400;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AttestorError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
}

#[contract]
pub struct AttestorContract;

#[contractimpl]
impl AttestorContract {
    pub fn initialize(env: Env, admin: Address, signer: BytesN<32>) -> Result<(), AttestorError> {
        if env.storage().instance().has(&ADMIN) {
            return Err(AttestorError::AlreadyInitialized);
        }
        admin.require_auth();
        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&SIGNER, &signer);
        env.storage()
            .instance()
            .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);

        events::publish_initialized(&env, admin, signer);
        Ok(())
    }

    /// Replaces the signing key. Digests signed by the old key stop verifying.
    pub fn rotate_signer(
        env: Env,
        admin: Address,
        signer: BytesN<32>,
    ) -> Result<(), AttestorError> {
        let stored: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(AttestorError::NotInitialized)?;
        admin.require_auth();
        if admin != stored {
            return Err(AttestorError::Unauthorized);
        }
        env.storage().instance().set(&SIGNER, &signer);
        events::publish_signer_rotated(&env, signer);
        Ok(())
    }

    pub fn get_signer(env: Env) -> Option<BytesN<32>> {
        env.storage().instance().get(&SIGNER)
    }

    /// Returns `true` when `signature` is the signer's ed25519 signature over
    /// the 32 digest bytes. Traps otherwise.
    pub fn verify(env: Env, digest: BytesN<32>, signature: BytesN<64>) -> bool {
        let signer: BytesN<32> = match env.storage().instance().get(&SIGNER) {
            Some(signer) => signer,
            None => panic_with_error!(&env, AttestorError::NotInitialized),
        };
        let message: Bytes = digest.into();
        env.crypto().ed25519_verify(&signer, &message, &signature);
        true
    }
}
