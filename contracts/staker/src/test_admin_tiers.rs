extern crate std;

use common::AdminTier;
use soroban_sdk::{testutils::Address as _, vec, Address};

use crate::test::{ev, setup};
use crate::{ContractError, Currency};

// ── SuperAdmin bootstrapped on initialize ────────────────────────────────────

#[test]
fn test_admin_is_super_admin_after_init() {
    let s = setup();
    assert_eq!(s.client.get_tier(&s.admin), Some(AdminTier::SuperAdmin));
}

#[test]
fn test_non_admin_has_no_tier() {
    let s = setup();
    assert_eq!(s.client.get_tier(&Address::generate(&s.env)), None);
}

// ── Granting & revoking ──────────────────────────────────────────────────────

#[test]
fn test_super_admin_grants_and_revokes() {
    let s = setup();
    let target = Address::generate(&s.env);

    s.client
        .grant_tier(&s.admin, &target, &AdminTier::Configurator);
    assert_eq!(s.client.get_tier(&target), Some(AdminTier::Configurator));

    s.client.revoke_tier(&s.admin, &target);
    assert_eq!(s.client.get_tier(&target), None);
}

#[test]
fn test_configurator_cannot_grant() {
    let s = setup();
    let configurator = Address::generate(&s.env);
    let target = Address::generate(&s.env);
    s.client
        .grant_tier(&s.admin, &configurator, &AdminTier::Configurator);

    let result = s
        .client
        .try_grant_tier(&configurator, &target, &AdminTier::Operator);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_super_admin_cannot_revoke_itself() {
    let s = setup();
    let result = s.client.try_revoke_tier(&s.admin, &s.admin);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
    assert_eq!(s.client.get_tier(&s.admin), Some(AdminTier::SuperAdmin));
}

// ── Tier requirements ────────────────────────────────────────────────────────

#[test]
fn test_configurator_can_set_emissions() {
    let s = setup();
    let configurator = Address::generate(&s.env);
    s.client
        .grant_tier(&s.admin, &configurator, &AdminTier::Configurator);

    s.client.set_emissions(
        &configurator,
        &Currency::Points,
        &vec![&s.env, ev(0, 42)],
    );
    assert_eq!(
        s.client.get_emissions(&Currency::Points),
        vec![&s.env, ev(0, 42)]
    );
}

#[test]
fn test_operator_cannot_configure() {
    let s = setup();
    let operator = Address::generate(&s.env);
    s.client
        .grant_tier(&s.admin, &operator, &AdminTier::Operator);

    let result = s.client.try_set_developer(&operator, &operator, &100);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }

    let result = s.client.try_set_attestor(&operator, &operator);
    match result {
        Err(Ok(e)) => {
            assert_eq!(e, ContractError::Unauthorized);
            assert_eq!(e.category(), crate::ErrorCategory::Authorization);
        }
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_operator_can_pause() {
    let s = setup();
    let operator = Address::generate(&s.env);
    s.client
        .grant_tier(&s.admin, &operator, &AdminTier::Operator);

    s.client.pause(&operator);
    assert!(s.client.is_paused());
    s.client.unpause(&operator);
    assert!(!s.client.is_paused());
}

#[test]
fn test_non_admin_cannot_pause() {
    let s = setup();
    let stranger = Address::generate(&s.env);
    let result = s.client.try_pause(&stranger);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}
