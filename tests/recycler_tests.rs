use chart_engine::recycler::Recycler;

fn counting_factory(created: &mut u32) -> impl FnMut(&()) -> u32 + '_ {
    move |_| {
        *created += 1;
        1000 + *created
    }
}

#[test]
fn test_requests_within_pool_create_nothing() {
    let mut created = 0;
    let mut factory = counting_factory(&mut created);
    let mut recycler = Recycler::new([1u32, 2, 3, 4, 5]);

    let handed: Vec<u32> = (0..3).map(|_| recycler.next(&(), &mut factory).1).collect();
    assert_eq!(handed, vec![1, 2, 3], "pool is drained FIFO");

    let outcome = recycler.finish();
    assert!(outcome.created.is_empty());
    assert_eq!(outcome.unused, vec![4, 5]);
    assert_eq!(outcome.reused, 3);
    drop(factory);
    assert_eq!(created, 0);
}

#[test]
fn test_requests_beyond_pool_create_the_difference() {
    let mut created = 0;
    let mut factory = counting_factory(&mut created);
    let mut recycler = Recycler::new([1u32, 2]);

    let results: Vec<(bool, u32)> = (0..5).map(|_| recycler.next(&(), &mut factory)).collect();
    assert_eq!(results[0], (false, 1));
    assert_eq!(results[2], (true, 1001));

    let outcome = recycler.finish();
    assert_eq!(outcome.created.len(), 3);
    assert!(outcome.unused.is_empty());
    drop(factory);
    assert_eq!(created, 3);
}

#[test]
fn test_equal_counts_are_a_noop() {
    let mut recycler = Recycler::new(["a", "b"]);
    recycler.next(&(), |_| unreachable!());
    recycler.next(&(), |_| unreachable!());
    assert!(recycler.finish().is_noop());
}

#[test]
fn test_recycled_handles_serve_later_requests() {
    let mut recycler: Recycler<u32> = Recycler::default();
    recycler.recycle(7);
    assert_eq!(recycler.unused().count(), 1);

    let (created, handle) = recycler.next(&(), |_| 99);
    assert!(!created);
    assert_eq!(handle, 7);
    let (created, handle) = recycler.next(&(), |_| 99);
    assert!(created);
    assert_eq!(handle, 99);
    assert_eq!(recycler.created(), &[99]);
    assert_eq!(recycler.reused(), 1);
}

#[test]
fn test_handle_created_and_recycled_in_one_pass_cancels_out() {
    let mut recycler = Recycler::new([1u32]);
    let (_, kept) = recycler.next(&(), |_| 99);
    let (created, fresh) = recycler.next(&(), |_| 100);
    assert!(created);
    recycler.recycle(fresh);
    recycler.recycle(kept);

    let outcome = recycler.finish();
    assert!(outcome.created.is_empty(), "never placed, nothing to add");
    assert_eq!(outcome.unused, vec![1], "only the previously placed handle leaves");
}

#[test]
fn test_recreated_handle_reused_later_is_still_placed() {
    let mut recycler: Recycler<u32> = Recycler::default();
    let (_, fresh) = recycler.next(&(), |_| 5);
    recycler.recycle(fresh);
    let (created, again) = recycler.next(&(), |_| unreachable!());
    assert!(!created);
    assert_eq!(again, 5);

    let outcome = recycler.finish();
    assert_eq!(outcome.created, vec![5]);
    assert!(outcome.unused.is_empty());
}
