//! Atomicity tests: a reverted call leaves no slot written and no
//! notification delivered, whichever limit or check made it fail.

mod common;

use bytes::Bytes;
use datareg_hostapi::StoreConfig;
use datareg_primitives::{CallError, ErrorCode};

use common::*;

fn batch(n: usize) -> (Vec<datareg_primitives::DataKey>, Vec<Bytes>) {
    (0..n)
        .map(|i| (key(&format!("batch-{}", i)), value_of_len(4)))
        .unzip()
}

#[test]
fn test_out_of_gas_reverts_whole_batch() {
    let config = StoreConfig {
        gas_limit: 5_000,
        ..StoreConfig::default()
    };
    let mut registry = deploy_with_config(alice(), config);
    let log = record_events(&mut registry);
    let slots_before = registry.store().len();
    let (keys, values) = batch(10);

    let err = registry
        .set_data_batch(&as_caller(alice()), keys.clone(), values)
        .unwrap_err();
    assert!(matches!(err, CallError::OutOfGas { limit: 5_000, .. }));

    assert_eq!(registry.store().len(), slots_before);
    for value in registry.get_data_batch(&keys).unwrap() {
        assert!(value.is_empty());
    }
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_event_cap_reverts_whole_batch() {
    let config = StoreConfig {
        max_events: 2,
        ..StoreConfig::default()
    };
    let mut registry = deploy_with_config(alice(), config);
    let log = record_events(&mut registry);
    let (keys, values) = batch(3);

    let err = registry
        .set_data_batch(&as_caller(alice()), keys.clone(), values.clone())
        .unwrap_err();
    assert_eq!(err, CallError::Host(ErrorCode::EventLimit));
    assert!(registry
        .get_data_batch(&keys)
        .unwrap()
        .iter()
        .all(Bytes::is_empty));
    assert!(log.lock().unwrap().is_empty());

    // within the cap the same pairs go through
    registry
        .set_data_batch(&as_caller(alice()), keys[..2].to_vec(), values[..2].to_vec())
        .unwrap();
    assert_eq!(log.lock().unwrap().len(), 2);
}

#[test]
fn test_write_cap_reverts_large_value() {
    let config = StoreConfig {
        max_write_bytes: 1_000,
        ..StoreConfig::default()
    };
    let mut registry = deploy_with_config(alice(), config);
    let k = key("big");
    registry.set_data(&as_caller(alice()), k, vec![1, 2, 3]).unwrap();

    let err = registry
        .set_data(&as_caller(alice()), k, value_of_len(2_000))
        .unwrap_err();
    assert_eq!(err, CallError::Host(ErrorCode::WriteLimit));
    assert_eq!(registry.get_data(&k).unwrap(), vec![1, 2, 3]);
}

#[test]
fn test_failed_call_does_not_affect_next_one() {
    let mut registry = deploy_default();
    let log = record_events(&mut registry);
    let k = key("FirstDataKey");

    assert!(registry.set_data(&as_caller(bob()), k, vec![1]).is_err());
    let receipt = registry.set_data(&as_caller(alice()), k, vec![2]).unwrap();

    assert_eq!(receipt.events, vec![data_changed(k, vec![2])]);
    assert_eq!(*log.lock().unwrap(), receipt.events);
    assert_eq!(registry.get_data(&k).unwrap(), vec![2]);
}

#[test]
fn test_gas_grows_linearly_with_value_size() {
    let mut registry = deploy_with_config(alice(), small_packing());
    let mut gas = Vec::new();
    for (i, len) in [1_000usize, 2_000, 4_000].into_iter().enumerate() {
        let receipt = registry
            .set_data(&as_caller(alice()), key(&format!("lin-{}", i)), value_of_len(len))
            .unwrap();
        gas.push(receipt.gas_used);
    }
    // doubling the value at most slightly more than doubles the cost
    assert!(gas[1] < gas[0] * 2 + gas[0] / 10);
    assert!(gas[2] < gas[1] * 2 + gas[1] / 10);
}
