//! Shared building blocks for the staker contract suite.
//!
//! This crate provides:
//! - [`CommonError`]: error codes raised by the shared helpers.
//! - [`access`]: tiered administrator registry.
//! - [`pause`]: contract-wide pause switch.
//! - [`replay`]: consumed-digest registry for single-use signed payloads.
//!
//! Contracts convert these errors into their own enums with `From`.

#![no_std]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod access;
pub mod pause;
pub mod replay;

pub use access::AdminTier;

/// TTL policy for persistent entries written by the shared helpers.
pub const TTL_THRESHOLD: u32 = 17_280; // ~1 day
pub const TTL_EXTEND_TO: u32 = 518_400; // ~30 days

// ── Shared error enum ────────────────────────────────────────────────────────

/// Error codes shared by every contract in the suite.
///
/// # Code ranges
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 1 – 9   | Lifecycle / initialisation     |
/// | 10 – 19 | Authentication & authorisation |
/// | 30 – 39 | Validation / replay            |
/// | 40 – 49 | Contract state                 |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    NotInitialized = 1,
    AlreadyInitialized = 2,

    /// The caller does not hold the tier the operation requires.
    AccessDenied = 10,

    InvalidInput = 30,
    /// A single-use digest was presented a second time.
    AlreadyConsumed = 31,

    /// The contract is paused and refuses the operation.
    Paused = 40,
}
