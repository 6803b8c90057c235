use std::cell::Cell;
use std::panic::{AssertUnwindSafe, catch_unwind};

use wrapcall::{CallArgs, Wrapped, memoize, try_memoize};

#[test]
fn repeated_call_runs_function_once() {
    let calls = Cell::new(0);
    let mut add = memoize(|(a, b): (i32, i32)| {
        calls.set(calls.get() + 1);
        a + b
    });

    assert_eq!(add.call((2, 3)), 5);
    assert_eq!(calls.get(), 1);

    assert_eq!(add.call((2, 3)), 5);
    assert_eq!(calls.get(), 1);

    // Equal result, distinct key.
    assert_eq!(add.call((3, 2)), 5);
    assert_eq!(calls.get(), 2);
}

#[test]
fn invocation_count_matches_distinct_keys() {
    let calls = Cell::new(0usize);
    let mut square = memoize(|n: u64| {
        calls.set(calls.get() + 1);
        n * n
    });

    let inputs = [1, 2, 1, 3, 2, 1, 3, 3, 4];
    for n in inputs {
        assert_eq!(square.call(n), n * n);
    }

    assert_eq!(calls.get(), 4);
    assert_eq!(square.len(), 4);

    let stats = square.stats();
    assert_eq!(stats.entries, 4);
    assert_eq!(stats.misses, 4);
    assert_eq!(stats.hits, (inputs.len() - 4) as u64);
}

#[test]
fn zero_argument_function_is_cached() {
    let calls = Cell::new(0);
    let mut answer = memoize(|(): ()| {
        calls.set(calls.get() + 1);
        42
    });

    assert_eq!(answer.call(()), 42);
    assert_eq!(answer.call(()), 42);
    assert_eq!(calls.get(), 1);
}

#[test]
fn caches_are_not_shared_between_wrappers() {
    let calls = Cell::new(0);
    let double = |n: i32| {
        calls.set(calls.get() + 1);
        n * 2
    };
    let mut first = memoize(double);
    let mut second = memoize(double);

    first.call(5);
    second.call(5);

    assert_eq!(calls.get(), 2);
    assert!(first.contains(&5));
    assert!(second.contains(&5));
}

#[test]
fn keywords_are_part_of_the_key_and_forwarded() {
    let calls = Cell::new(0);
    let mut power = memoize(|call: CallArgs<(i64,), u32>| {
        calls.set(calls.get() + 1);
        let exponent = call.keyword("exp").copied().unwrap_or(2);
        let (base,) = call.positional;
        base.pow(exponent)
    });

    assert_eq!(power.call(CallArgs::new((3,))), 9);
    assert_eq!(power.call(CallArgs::new((3,)).kw("exp", 3)), 27);
    assert_eq!(calls.get(), 2);

    assert_eq!(power.call(CallArgs::new((3,)).kw("exp", 3)), 27);
    assert_eq!(calls.get(), 2);
}

#[test]
fn keyword_order_hits_the_same_entry() {
    let calls = Cell::new(0);
    let mut area = memoize(|call: CallArgs<(), u32>| {
        calls.set(calls.get() + 1);
        call.keyword("width").copied().unwrap_or(0) * call.keyword("height").copied().unwrap_or(0)
    });

    let first = area.call(CallArgs::new(()).kw("width", 4).kw("height", 5));
    let second = area.call(CallArgs::new(()).kw("height", 5).kw("width", 4));

    assert_eq!(first, 20);
    assert_eq!(second, 20);
    assert_eq!(calls.get(), 1);
}

#[test]
fn failed_computation_is_not_cached() {
    let calls = Cell::new(0);
    let outcomes = Cell::new(0);
    let mut flaky = try_memoize(|n: u32| {
        calls.set(calls.get() + 1);
        let attempt = outcomes.get();
        outcomes.set(attempt + 1);
        if attempt == 0 {
            Err(format!("attempt {attempt} for {n} failed"))
        } else {
            Ok(n + 1)
        }
    });

    assert_eq!(flaky.call(7), Err("attempt 0 for 7 failed".to_owned()));
    assert!(!flaky.contains(&7));
    assert!(flaky.is_empty());

    assert_eq!(flaky.call(7), Ok(8));
    assert_eq!(flaky.call(7), Ok(8));
    assert_eq!(calls.get(), 2);

    let stats = flaky.stats();
    assert_eq!(stats.entries, 1);
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hits, 1);
}

#[test]
fn persistent_failure_is_retried_every_call() {
    let calls = Cell::new(0);
    let mut always_fails = try_memoize(|text: &'static str| -> Result<u8, String> {
        calls.set(calls.get() + 1);
        Err(format!("cannot handle {text}"))
    });

    for _ in 0..3 {
        assert!(always_fails.call("x").is_err());
    }
    assert_eq!(calls.get(), 3);
    assert!(always_fails.is_empty());
}

#[test]
fn panicking_computation_leaves_key_absent() {
    let calls = Cell::new(0);
    let mut fragile = memoize(|n: i32| {
        calls.set(calls.get() + 1);
        if calls.get() == 1 {
            panic!("first attempt for {n} blew up");
        }
        n * 10
    });

    let outcome = catch_unwind(AssertUnwindSafe(|| fragile.call(4)));
    assert!(outcome.is_err());
    assert!(!fragile.contains(&4));

    assert_eq!(fragile.call(4), 40);
    assert_eq!(calls.get(), 2);
}

#[test]
fn cached_value_is_handed_out_as_a_copy() {
    let mut letters = memoize(|n: usize| vec!['a'; n]);

    let mut first = letters.call(3);
    first.push('z');

    assert_eq!(letters.call(3), vec!['a'; 3]);
    assert_eq!(letters.cached(&3), Some(&vec!['a'; 3]));
}

#[test]
fn memoized_converts_into_plain_closure() {
    let calls = Cell::new(0);
    let mut triple = memoize(|n: u8| {
        calls.set(calls.get() + 1);
        u32::from(n) * 3
    })
    .into_fn();

    let results: Vec<u32> = [1, 1, 2].into_iter().map(&mut triple).collect();
    assert_eq!(results, [3, 3, 6]);
    assert_eq!(calls.get(), 2);
}

#[test]
fn hit_rate_reflects_lookups() {
    let mut identity = memoize(|n: i32| n);
    assert_eq!(identity.stats().hit_rate(), 0.0);

    identity.call(1);
    identity.call(1);
    identity.call(1);
    identity.call(2);

    let stats = identity.stats();
    assert_eq!(stats.lookups(), 4);
    assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
}
