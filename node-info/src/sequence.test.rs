use std::collections::HashSet;
use std::sync::Arc;

use super::*;

#[test]
fn test_starting_at_is_deterministic() {
    let sequence = IdSequence::starting_at(7);
    assert_eq!(sequence.next(), 7);
    assert_eq!(sequence.next(), 8);
    assert_eq!(sequence.peek(), 9);
}

#[test]
fn test_random_seed_in_range() {
    for _ in 0..64 {
        assert!(IdSequence::random().peek() < SEED_RANGE);
    }
}

#[test]
fn test_next_environment_format() {
    let sequence = IdSequence::starting_at(41);
    assert_eq!(sequence.next_environment(), "test41");
    assert_eq!(sequence.next_environment(), "test42");
}

#[test]
fn test_shared_is_single_instance() {
    let a = IdSequence::shared();
    let b = IdSequence::shared();
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn test_concurrent_next_is_unique() {
    let sequence = IdSequence::starting_at(0);
    let values = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| (0..1000).map(|_| sequence.next()).collect::<Vec<_>>()))
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect::<Vec<_>>()
    });

    let unique: HashSet<_> = values.iter().copied().collect();
    assert_eq!(unique.len(), 8000);
    assert_eq!(sequence.peek(), 8000);
}
