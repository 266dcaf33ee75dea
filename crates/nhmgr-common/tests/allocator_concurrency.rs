//! Concurrent next-hop ID allocation
//!
//! Many callers sharing one allocator must receive exactly 1..=N.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;

use nhmgr_common::NextHopIdAllocator;

#[test]
fn test_threads_receive_dense_unique_ids() {
    const THREADS: u32 = 16;
    const PER_THREAD: u32 = 250;

    let alloc = Arc::new(NextHopIdAllocator::new());

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let alloc = Arc::clone(&alloc);
            thread::spawn(move || {
                (0..PER_THREAD)
                    .map(|_| alloc.next_id().unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut seen = BTreeSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(seen.insert(id), "ID {} issued twice", id);
        }
    }

    let total = THREADS * PER_THREAD;
    assert_eq!(seen.len() as u32, total);
    assert_eq!(seen.iter().next().copied(), Some(1));
    assert_eq!(seen.iter().next_back().copied(), Some(total));
    assert_eq!(alloc.last_issued(), total);
}

#[test]
fn test_ids_increase_per_caller() {
    let alloc = Arc::new(NextHopIdAllocator::new());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let alloc = Arc::clone(&alloc);
            thread::spawn(move || {
                let ids: Vec<u32> = (0..100).map(|_| alloc.next_id().unwrap()).collect();
                ids.windows(2).all(|w| w[0] < w[1])
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_tasks_receive_dense_unique_ids() {
    const TASKS: u32 = 200;

    let alloc = Arc::new(NextHopIdAllocator::new());

    let mut handles = Vec::new();
    for _ in 0..TASKS {
        let alloc = Arc::clone(&alloc);
        handles.push(tokio::spawn(async move { alloc.next_id().unwrap() }));
    }

    let mut ids = BTreeSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap());
    }

    assert_eq!(ids, (1..=TASKS).collect::<BTreeSet<_>>());
}
