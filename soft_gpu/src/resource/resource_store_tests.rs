use super::*;

// ============================================================================
// Buffer table tests
// ============================================================================

#[test]
fn test_create_buffer_ids_start_at_one() {
    let mut store = ResourceStore::new();
    let a = store.create_buffer(8).unwrap();
    let b = store.create_buffer(8).unwrap();
    assert_eq!(a, BufferId(1));
    assert_eq!(b, BufferId(2));
    assert_eq!(store.buffer_count(), 2);
}

#[test]
fn test_delete_buffer_and_ids_not_reused() {
    let mut store = ResourceStore::new();
    let a = store.create_buffer(4).unwrap();
    store.delete_buffer(a).unwrap();
    assert!(!store.has_buffer(a));
    assert_eq!(store.buffer_count(), 0);

    let b = store.create_buffer(4).unwrap();
    assert!(b > a);
    assert!(!store.has_buffer(a));
}

#[test]
fn test_delete_unknown_buffer_fails() {
    let mut store = ResourceStore::new();
    assert!(matches!(store.delete_buffer(BufferId(42)), Err(Error::InvalidResource(_))));
    assert!(matches!(store.buffer(BufferId::EMPTY), Err(Error::InvalidResource(_))));
}

#[test]
fn test_failed_buffer_allocation_consumes_no_id() {
    let mut store = ResourceStore::new();
    assert_eq!(store.create_buffer(u64::MAX), Err(Error::OutOfMemory));
    assert_eq!(store.buffer_count(), 0);
    assert_eq!(store.create_buffer(1).unwrap(), BufferId(1));
}

#[test]
fn test_buffer_mut_writes_are_visible() {
    let mut store = ResourceStore::new();
    let id = store.create_buffer(4).unwrap();
    store.buffer_mut(id).unwrap().write(0, &[1, 2, 3, 4]).unwrap();
    assert_eq!(store.buffer(id).unwrap().data(), &[1, 2, 3, 4]);
}

// ============================================================================
// Vertex puller table tests
// ============================================================================

#[test]
fn test_vertex_puller_lifecycle() {
    let mut store = ResourceStore::new();
    let id = store.create_vertex_puller().unwrap();
    assert!(store.has_vertex_puller(id));
    assert_eq!(store.vertex_puller_count(), 1);

    store.vertex_puller_mut(id).unwrap().enable_head(0).unwrap();
    assert!(store.vertex_puller(id).unwrap().head(0).unwrap().enabled);

    store.delete_vertex_puller(id).unwrap();
    assert!(!store.has_vertex_puller(id));
    assert!(store.delete_vertex_puller(id).is_err());
}

#[test]
fn test_kinds_have_independent_counters() {
    let mut store = ResourceStore::new();
    store.create_buffer(1).unwrap();
    store.create_buffer(1).unwrap();
    assert_eq!(store.create_vertex_puller().unwrap(), VertexPullerId(1));
    assert_eq!(store.create_program().unwrap(), ProgramId(1));
}

// ============================================================================
// Program table tests
// ============================================================================

#[test]
fn test_program_lifecycle() {
    let mut store = ResourceStore::new();
    let a = store.create_program().unwrap();
    let b = store.create_program().unwrap();
    assert_eq!(store.program_count(), 2);

    store.delete_program(a).unwrap();
    assert!(!store.has_program(a));
    assert!(store.has_program(b));
    assert!(matches!(store.program(a), Err(Error::InvalidResource(_))));

    let c = store.create_program().unwrap();
    assert_eq!(c, ProgramId(3));
}
