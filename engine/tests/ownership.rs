//! Ownership gate tests: transfer, renouncement, initialization.

mod common;

use datareg_engine::{Call, Registry};
use datareg_hostapi::{MemStore, StoreConfig};
use datareg_primitives::{CallError, ZERO_ADDRESS};

use common::*;

#[test]
fn test_deploy_sets_owner_and_emits() {
    let mut registry = Registry::new(MemStore::new(), StoreConfig::default()).unwrap();
    let receipt = registry.initialize(alice()).unwrap();

    assert_eq!(registry.owner().unwrap(), alice());
    assert_eq!(receipt.events, vec![ownership_transferred(ZERO_ADDRESS, alice())]);
}

#[test]
fn test_initialize_only_once() {
    let mut registry = deploy_default();
    assert_eq!(
        registry.initialize(bob()).unwrap_err(),
        CallError::AlreadyInitialized
    );
    assert_eq!(registry.owner().unwrap(), alice());
}

#[test]
fn test_transfer_ownership() {
    let mut registry = deploy_default();
    let log = record_events(&mut registry);

    let receipt = registry
        .transfer_ownership(&as_caller(alice()), bob())
        .unwrap();
    assert_eq!(registry.owner().unwrap(), bob());
    assert_eq!(receipt.events, vec![ownership_transferred(alice(), bob())]);
    assert_eq!(*log.lock().unwrap(), receipt.events);

    // the old owner is locked out, the new one is in
    assert_eq!(
        registry
            .set_data(&as_caller(alice()), key("FirstDataKey"), vec![1])
            .unwrap_err(),
        CallError::Unauthorized { caller: alice() }
    );
    registry
        .set_data(&as_caller(bob()), key("FirstDataKey"), vec![1])
        .unwrap();
}

#[test]
fn test_transfer_to_self_still_emits() {
    let mut registry = deploy_default();
    let receipt = registry
        .transfer_ownership(&as_caller(alice()), alice())
        .unwrap();
    assert_eq!(receipt.events, vec![ownership_transferred(alice(), alice())]);
    assert_eq!(registry.owner().unwrap(), alice());
}

#[test]
fn test_non_owner_cannot_transfer() {
    let mut registry = deploy_default();
    let log = record_events(&mut registry);

    let err = registry
        .transfer_ownership(&as_caller(bob()), bob())
        .unwrap_err();
    assert_eq!(err, CallError::Unauthorized { caller: bob() });
    assert_eq!(registry.owner().unwrap(), alice());
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_renounce_is_terminal() {
    let mut registry = deploy_default();
    let receipt = registry.renounce_ownership(&as_caller(alice())).unwrap();
    assert_eq!(
        receipt.events,
        vec![ownership_transferred(alice(), ZERO_ADDRESS)]
    );
    assert_eq!(registry.owner().unwrap(), ZERO_ADDRESS);

    for caller in [alice(), bob(), ZERO_ADDRESS] {
        let ctx = as_caller(caller);
        assert!(matches!(
            registry.set_data(&ctx, key("k"), vec![1]),
            Err(CallError::Unauthorized { .. })
        ));
        assert!(matches!(
            registry.transfer_ownership(&ctx, caller),
            Err(CallError::Unauthorized { .. })
        ));
        assert!(matches!(
            registry.renounce_ownership(&ctx),
            Err(CallError::Unauthorized { .. })
        ));
    }
    assert_eq!(registry.owner().unwrap(), ZERO_ADDRESS);
}

#[test]
fn test_transfer_to_zero_behaves_like_renounce() {
    let mut registry = deploy_default();
    registry
        .execute(&as_caller(alice()), Call::TransferOwnership { new_owner: ZERO_ADDRESS })
        .unwrap();
    assert_eq!(registry.owner().unwrap(), ZERO_ADDRESS);
    assert!(registry
        .set_data(&as_caller(ZERO_ADDRESS), key("k"), vec![1])
        .is_err());
}

#[test]
fn test_owner_survives_store_handover() {
    let mut registry = deploy_default();
    registry
        .transfer_ownership(&as_caller(alice()), charlie())
        .unwrap();

    let reopened = Registry::new(registry.into_store(), StoreConfig::default()).unwrap();
    assert_eq!(reopened.owner().unwrap(), charlie());
}
