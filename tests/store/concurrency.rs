//! Concurrent access to the store and the ledger from many threads.

use std::sync::{Arc, Barrier};
use std::thread;

use cellphone_service::{
    sample, CellphoneStore, InMemoryCellphoneStore, InMemoryOrderLedger, OrderLedger, StoreError,
};

#[test]
fn fifty_concurrent_saves_with_distinct_ids() {
    let store = InMemoryCellphoneStore::new();
    let barrier = Arc::new(Barrier::new(50));

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let store = store.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let cellphone = sample::new_cellphone();
                barrier.wait();
                store.save(&cellphone)
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().is_ok());
    }
    assert_eq!(store.size(), 50);
}

#[test]
fn concurrent_saves_of_one_id_have_a_single_winner() {
    let store = InMemoryCellphoneStore::new();
    let template = sample::new_cellphone();
    let barrier = Arc::new(Barrier::new(16));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let store = store.clone();
            let barrier = Arc::clone(&barrier);
            let mut cellphone = template.clone();
            cellphone.brand = format!("writer-{i}");
            thread::spawn(move || {
                barrier.wait();
                store.save(&cellphone)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| *e == StoreError::AlreadyExists(template.id.clone())));
    assert_eq!(store.size(), 1);
}

#[test]
fn concurrent_purchases_lose_no_updates() {
    let ledger = InMemoryOrderLedger::new();
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let ledger = ledger.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..250 {
                    ledger.record_purchase("shared", 2.0).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let aggregate = ledger.get("shared").unwrap();
    assert_eq!(aggregate.count, 2000);
    assert_eq!(aggregate.total, 4000.0);
    assert_eq!(ledger.average("shared"), Some(2.0));
}

#[test]
fn readers_run_alongside_writers() {
    let store = InMemoryCellphoneStore::new();
    let writer = {
        let store = store.clone();
        thread::spawn(move || {
            for _ in 0..200 {
                store.save(&sample::new_cellphone()).unwrap();
            }
        })
    };

    // Every snapshot is internally consistent: never more results than
    // records, and the count never goes backwards.
    let mut last = 0;
    while !writer.is_finished() {
        let size = store.size();
        assert!(size >= last);
        last = size;
        assert!(store.search(&Default::default()).len() <= store.size());
    }
    writer.join().unwrap();
    assert_eq!(store.size(), 200);
}
