//! Property-based tests for pipeline operators.
//!
//! These tests verify set-operator laws, join count arithmetic and zip
//! length bounds for randomly generated inputs.

use proptest::prelude::*;
use std::collections::HashSet;
use velum_core::Value;
use velum_query::{ExecutionContext, Execution, Pipeline};

/// Strategy for generating random i64 keys within a small range, so
/// collisions (and therefore join matches and duplicates) are common.
fn key_strategy() -> impl Strategy<Value = i64> {
    -20i64..20i64
}

fn values_strategy(max_len: usize) -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(key_strategy(), 0..max_len)
        .prop_map(|ks| ks.into_iter().map(|k| Value::Number(k as f64)).collect())
}

fn run(pipeline: &Pipeline) -> Vec<Value> {
    match pipeline.execute(&ExecutionContext::new()).unwrap() {
        Execution::Sequence(items) => items,
        Execution::Scalar(v) => panic!("expected sequence, got {:?}", v),
    }
}

fn as_set(items: &[Value]) -> HashSet<i64> {
    items
        .iter()
        .filter_map(|v| v.as_f64())
        .map(|n| n as i64)
        .collect()
}

proptest! {
    /// Property: union with self yields the distinct elements, each once.
    #[test]
    fn union_self_is_distinct(items in values_strategy(40)) {
        let out = run(&Pipeline::from_values(items.clone()).union(items.clone()));

        let distinct = as_set(&items);
        prop_assert_eq!(out.len(), distinct.len());
        prop_assert_eq!(as_set(&out), distinct);
    }

    /// Property: union result has no structural duplicates.
    #[test]
    fn union_has_no_duplicates(
        left in values_strategy(40),
        right in values_strategy(40),
    ) {
        let out = run(&Pipeline::from_values(left).union(right));

        let mut seen = HashSet::new();
        for v in &out {
            prop_assert!(seen.insert(v.clone()), "duplicate {:?} in union output", v);
        }
    }

    /// Property: except removes exactly the operand's members.
    #[test]
    fn except_excludes_operand_members(
        left in values_strategy(40),
        right in values_strategy(40),
    ) {
        let out = run(&Pipeline::from_values(left.clone()).except(right.clone()));

        let excluded = as_set(&right);
        for v in &out {
            prop_assert!(!excluded.contains(&(v.as_f64().unwrap() as i64)));
        }
        // Every source element outside the operand survives, duplicates kept.
        let expected = left
            .iter()
            .filter(|v| !excluded.contains(&(v.as_f64().unwrap() as i64)))
            .count();
        prop_assert_eq!(out.len(), expected);
    }

    /// Property: intersect yields distinct elements present on both sides.
    #[test]
    fn intersect_is_distinct_intersection(
        left in values_strategy(40),
        right in values_strategy(40),
    ) {
        let out = run(&Pipeline::from_values(left.clone()).intersect(right.clone()));

        let expected: HashSet<i64> = as_set(&left)
            .intersection(&as_set(&right))
            .copied()
            .collect();
        prop_assert_eq!(out.len(), expected.len());
        prop_assert_eq!(as_set(&out), expected);
    }

    /// Property: inner join count equals the number of key-equal pairs.
    #[test]
    fn inner_join_count_is_pair_count(
        left in values_strategy(25),
        right in values_strategy(25),
    ) {
        let mut expected = 0usize;
        for l in &left {
            for r in &right {
                if l == r {
                    expected += 1;
                }
            }
        }

        let key = velum_query::key_fn(|v, _| Ok(v.clone()));
        let p = Pipeline::from_values(left)
            .join(right, key.clone(), key, None)
            .unwrap();
        prop_assert_eq!(run(&p).len(), expected);
    }

    /// Property: full join count = pairs + unmatched left + unmatched right.
    #[test]
    fn full_join_count_arithmetic(
        left in values_strategy(25),
        right in values_strategy(25),
    ) {
        let mut pairs = 0usize;
        let mut unmatched_left = 0usize;
        for l in &left {
            let matches = right.iter().filter(|r| *r == l).count();
            if matches == 0 {
                unmatched_left += 1;
            }
            pairs += matches;
        }
        let unmatched_right = right
            .iter()
            .filter(|r| !left.iter().any(|l| l == *r))
            .count();

        let key = velum_query::key_fn(|v, _| Ok(v.clone()));
        let p = Pipeline::from_values(left)
            .full_join(right, key.clone(), key, None)
            .unwrap();
        prop_assert_eq!(run(&p).len(), pairs + unmatched_left + unmatched_right);
    }

    /// Property: cross join count is the product of the input lengths.
    #[test]
    fn cross_join_count_is_product(
        left in values_strategy(20),
        right in values_strategy(20),
    ) {
        let expected = left.len() * right.len();
        let p = Pipeline::from_values(left).cross_join(right, None);
        prop_assert_eq!(run(&p).len(), expected);
    }

    /// Property: zip length is the shorter input's length.
    #[test]
    fn zip_length_is_min(
        left in values_strategy(40),
        right in values_strategy(40),
    ) {
        let expected = left.len().min(right.len());
        let p = Pipeline::from_values(left).zip(right, None);
        prop_assert_eq!(run(&p).len(), expected);
    }

    /// Property: execution never consumes the operand; re-running a pipeline
    /// gives the same result.
    #[test]
    fn execution_is_repeatable(
        left in values_strategy(30),
        right in values_strategy(30),
    ) {
        let p = Pipeline::from_values(left)
            .concat(right.clone())
            .union(right)
            .intersect(Vec::<Value>::new());

        let first = run(&p);
        let second = run(&p);
        prop_assert_eq!(first, second);
    }

    /// Property: sequenceEqual agrees with element-wise Vec equality.
    #[test]
    fn sequence_equal_matches_vec_eq(
        left in values_strategy(30),
        right in values_strategy(30),
    ) {
        let expected = left == right;
        let p = Pipeline::from_values(left).sequence_equal(right);
        prop_assert_eq!(
            p.execute(&ExecutionContext::new()).unwrap(),
            Execution::Scalar(Value::Bool(expected))
        );
    }
}
