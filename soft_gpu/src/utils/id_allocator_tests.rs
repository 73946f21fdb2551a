use super::*;

// ============================================================================
// Basic allocation tests
// ============================================================================

#[test]
fn test_sequential_alloc_starts_at_one() {
    let mut ids = IdAllocator::new();
    assert_eq!(ids.alloc(), Some(1));
    assert_eq!(ids.alloc(), Some(2));
    assert_eq!(ids.alloc(), Some(3));
}

#[test]
fn test_new_is_empty() {
    let ids = IdAllocator::new();
    assert!(ids.is_empty());
    assert_eq!(ids.len(), 0);
    assert_eq!(ids.last_id(), 0);
}

#[test]
fn test_default_is_empty() {
    let ids = IdAllocator::default();
    assert!(ids.is_empty());
}

// ============================================================================
// Release tests
// ============================================================================

#[test]
fn test_released_ids_are_never_recycled() {
    let mut ids = IdAllocator::new();
    let a = ids.alloc().unwrap();
    let b = ids.alloc().unwrap();
    ids.release(a);
    ids.release(b);

    let c = ids.alloc().unwrap();
    assert_eq!(c, 3);
    assert!(c > a && c > b);
}

#[test]
fn test_len_tracks_live_ids() {
    let mut ids = IdAllocator::new();
    let a = ids.alloc().unwrap();
    let _b = ids.alloc().unwrap();
    assert_eq!(ids.len(), 2);

    ids.release(a);
    assert_eq!(ids.len(), 1);
    assert!(!ids.is_empty());
    assert_eq!(ids.last_id(), 2);
}
