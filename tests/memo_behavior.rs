// ==============================================
// MEMOIZATION BEHAVIOR TESTS (integration)
// ==============================================
//
// End-to-end checks through the public API: key derivation, FIFO
// eviction, per-callable isolation, error handling and recursion.

use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};

use memokit::prelude::*;

// ==============================================
// Hits and Keys
// ==============================================

mod hits_and_keys {
    use super::*;

    #[test]
    fn repeated_call_is_served_from_cache() {
        let calls = Cell::new(0);
        let mut f = memoize(4, |(x,): (i32,)| {
            calls.set(calls.get() + 1);
            x * 10
        })
        .unwrap();

        let first = f.call((7,));
        let second = f.call((7,));
        assert_eq!(first, second);
        assert_eq!(calls.get(), 1);
        assert_eq!(f.cache().len(), 1);
    }

    #[test]
    fn keyword_order_does_not_matter() {
        let calls = Cell::new(0);
        let mut f = memoize(4, |kw: Kwargs<i32>| {
            calls.set(calls.get() + 1);
            kw.iter().map(|(_, v)| *v).sum::<i32>()
        })
        .unwrap();

        f.call(Kwargs::new().with("x", 1).with("y", 2));
        f.call(Kwargs::new().with("y", 2).with("x", 1));
        assert_eq!(calls.get(), 1);
        assert_eq!(f.cache().len(), 1);
    }

    #[test]
    fn positional_order_matters() {
        let calls = Cell::new(0);
        let mut f = memoize(4, |(a, b): (i32, i32)| {
            calls.set(calls.get() + 1);
            a + b
        })
        .unwrap();

        assert_eq!(f.call((1, 2)), 3);
        assert_eq!(f.call((2, 1)), 3);
        assert_eq!(calls.get(), 2);
        assert_eq!(f.cache().len(), 2);
    }

    #[test]
    fn nested_sequences_are_usable_as_arguments() {
        let calls = Cell::new(0);
        let mut total = memoize(4, |(m,): (Vec<Vec<i64>>,)| {
            calls.set(calls.get() + 1);
            m.iter().flatten().sum::<i64>()
        })
        .unwrap();

        let matrix = vec![vec![1, 2], vec![3, 4]];
        assert_eq!(total.call((matrix.clone(),)), 10);
        assert_eq!(total.call((matrix,)), 10);
        assert_eq!(total.call((vec![vec![1, 2, 3], vec![4]],)), 10);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn mapping_arguments_ignore_insertion_order() {
        let mut a = HashMap::new();
        a.insert("alpha".to_string(), 1);
        a.insert("beta".to_string(), 2);

        let mut b = BTreeMap::new();
        b.insert("beta".to_string(), 2);
        b.insert("alpha".to_string(), 1);

        assert_eq!(a.normalize(), b.normalize());
        assert_eq!((a,).cache_key(), (b,).cache_key());
    }

    #[test]
    fn string_fallback_collides_on_equal_rendering() {
        #[derive(Debug)]
        struct Point {
            x: i32,
        }

        let one = ByDebug(Point { x: 1 });
        let also_one = ByDebug(Point { x: 1 });
        let two = ByDebug(Point { x: 2 });

        assert_eq!(one.normalize(), also_one.normalize());
        assert_ne!(one.normalize(), two.normalize());
        assert!((one,).cache_key().is_lossy());
        assert_eq!(two.0.x, 2);
    }
}

// ==============================================
// FIFO Eviction
// ==============================================

mod fifo_eviction {
    use super::*;

    #[test]
    fn overflow_evicts_oldest_insert() {
        let calls = Cell::new(0);
        let mut f = memoize(2, |(x,): (i32,)| {
            calls.set(calls.get() + 1);
            x
        })
        .unwrap();

        f.call((1,));
        f.call((2,));
        f.call((3,));
        assert!(!f.cache().contains(&(1,).cache_key()));
        assert_eq!(calls.get(), 3);

        f.call((1,));
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn hit_does_not_bump_recency() {
        let mut f = memoize(2, |(x,): (i32,)| x).unwrap();

        f.call((1,));
        f.call((2,));
        f.call((1,)); // hit
        f.call((3,));

        let keys: Vec<_> = f.cache().keys().cloned().collect();
        assert_eq!(keys, vec![(2,).cache_key(), (3,).cache_key()]);
    }

    #[test]
    fn sum_of_numbers_scenario() {
        let calls = Cell::new(0);
        let mut sum_of_numbers = memoize(2, |(x, y): (i64, i64)| {
            calls.set(calls.get() + 1);
            x + y
        })
        .unwrap();

        assert_eq!(sum_of_numbers.call((1, 2)), 3); // miss
        assert_eq!(sum_of_numbers.call((1, 2)), 3); // hit
        assert_eq!(sum_of_numbers.call((2, 3)), 5); // miss
        assert_eq!(sum_of_numbers.call((3, 4)), 7); // miss, evicts (1, 2)
        assert_eq!(sum_of_numbers.call((1, 2)), 3); // miss again
        assert_eq!(calls.get(), 4);

        let keys: Vec<_> = sum_of_numbers.cache().keys().cloned().collect();
        assert_eq!(keys, vec![(3, 4).cache_key(), (1, 2).cache_key()]);
    }

    #[test]
    fn size_never_exceeds_bound() {
        let mut f = memoize(3, |(x,): (u32,)| x).unwrap();
        for i in 0..50 {
            f.call((i % 7,));
            assert!(f.cache().len() <= 3);
        }
    }
}

// ==============================================
// Isolation
// ==============================================

mod isolation {
    use super::*;

    #[test]
    fn wrapped_callables_keep_separate_caches() {
        let mut add = memoize(2, |(a, b): (i32, i32)| a + b).unwrap();
        let mut mul = memoize(2, |(a, b): (i32, i32)| a * b).unwrap();

        assert_eq!(add.call((2, 3)), 5);
        assert_eq!(mul.call((2, 3)), 6);
        add.call((4, 5));
        add.call((6, 7));

        assert_eq!(add.cache().len(), 2);
        assert_eq!(mul.cache().len(), 1);
        assert!(mul.cache().contains(&(2, 3).cache_key()));
    }

    #[test]
    fn registry_isolates_names() {
        let mut registry = Registry::new(2).unwrap();
        registry.call("add", (2, 3), |(a, b): (i32, i32)| a + b);
        registry.call("mul", (2, 3), |(a, b): (i32, i32)| a * b);

        assert_eq!(registry.cache("add").unwrap().get(&(2, 3).cache_key()), Some(&5));
        assert_eq!(registry.cache("mul").unwrap().get(&(2, 3).cache_key()), Some(&6));
    }
}

// ==============================================
// Errors and Configuration
// ==============================================

mod errors {
    use super::*;

    #[test]
    fn failures_are_not_cached() {
        let calls = Cell::new(0);
        let mut parse = try_memoize(4, |(s,): (String,)| {
            calls.set(calls.get() + 1);
            s.parse::<i32>()
        })
        .unwrap();

        assert!(parse.call(("x".to_string(),)).is_err());
        assert!(parse.call(("x".to_string(),)).is_err());
        assert_eq!(calls.get(), 2);
        assert!(parse.cache().is_empty());

        assert_eq!(parse.call(("42".to_string(),)), Ok(42));
        assert_eq!(parse.cache().len(), 1);
    }

    #[test]
    fn zero_max_keys_is_rejected() {
        let err = memoize(0, |(x,): (i32,)| x).unwrap_err();
        assert_eq!(err.message(), "max_keys must be greater than 0");
        assert!(MemoBuilder::new(0).try_build(|(x,): (i32,)| x).is_err());
    }
}

// ==============================================
// Recursion
// ==============================================

mod recursion {
    use super::*;

    #[test]
    fn recursive_fib_computes_each_argument_once() {
        let calls = Cell::new(0);
        let mut fib = memoize_recursive(3, |recurse, (n,): (u64,)| {
            calls.set(calls.get() + 1);
            if n < 2 {
                n
            } else {
                recurse((n - 1,)) + recurse((n - 2,))
            }
        })
        .unwrap();

        assert_eq!(fib.call((40,)), 102_334_155);
        assert_eq!(calls.get(), 41);
        assert_eq!(fib.cache().len(), 3);

        let keys: Vec<_> = fib.cache().keys().cloned().collect();
        assert_eq!(keys, vec![(38,).cache_key(), (39,).cache_key(), (40,).cache_key()]);
    }
}
