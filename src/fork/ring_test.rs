// ABOUTME: Tests for the fork ring adjacency rule.
// ABOUTME: Philosopher i must map to forks i and (i + 1) mod n.

use super::ring::ForkRing;

#[test]
fn test_ring_creates_free_forks() {
    let ring = ForkRing::new(5);
    assert_eq!(ring.len(), 5);
    assert!(!ring.is_empty());
    for (i, fork) in ring.forks().iter().enumerate() {
        assert_eq!(fork.id(), i);
        assert!(!fork.is_held());
    }
}

#[test]
fn test_pair_wraps_around() {
    let ring = ForkRing::new(5);
    assert_eq!(ring.pair(0), (0, 1));
    assert_eq!(ring.pair(3), (3, 4));
    assert_eq!(ring.pair(4), (4, 0));
}

#[test]
fn test_two_philosophers_share_both_forks() {
    let ring = ForkRing::new(2);
    assert_eq!(ring.pair(0), (0, 1));
    assert_eq!(ring.pair(1), (1, 0));
}

#[test]
fn test_each_fork_used_by_exactly_two_neighbors() {
    let n = 6;
    let ring = ForkRing::new(n);
    let mut users = vec![Vec::new(); n];
    for p in 0..n {
        let (left, right) = ring.pair(p);
        users[left].push(p);
        users[right].push(p);
    }
    for (fork, who) in users.iter().enumerate() {
        assert_eq!(who.len(), 2, "fork {} used by {:?}", fork, who);
        assert!(who.contains(&fork));
        assert!(who.contains(&((fork + n - 1) % n)));
    }
}

#[test]
fn test_forks_share_ring_epoch() {
    let ring = ForkRing::new(3);
    let guard = ring.fork(1).try_acquire(0).unwrap();
    let held: Vec<bool> = ring
        .epoch()
        .read(|| ring.forks().iter().map(|f| f.is_held()).collect());
    assert_eq!(held, vec![false, true, false]);
    drop(guard);
    assert!(!ring.fork(1).is_held());
}
