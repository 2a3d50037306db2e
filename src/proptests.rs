use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
enum Op {
    Insert(u8, u32),
    Remove(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (any::<u8>(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        1 => any::<u8>().prop_map(Op::Remove),
    ]
}

/// AVL height bound: h < 1.4405 * log2(n + 2).
fn max_height(len: usize) -> f64 {
    1.4405 * ((len + 2) as f64).log2()
}

fn entries(tree: &Tree<u8, u32>) -> Vec<(u8, u32)> {
    let mut entries = Vec::with_capacity(tree.len());
    tree.for_each(|&key, &value| entries.push((key, value)));
    entries
}

proptest! {
    #[test]
    fn matches_btreemap(ops in prop::collection::vec(op_strategy(), 0..300)) {
        let mut tree = Tree::new();
        let mut model = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    prop_assert_eq!(tree.insert(key, value), model.insert(key, value));
                }
                Op::Remove(key) => {
                    prop_assert_eq!(tree.remove(&key), model.remove(&key));
                }
            }
            tree.check_consistency();
            prop_assert_eq!(tree.len(), model.len());
            prop_assert!((tree.height() as f64) < max_height(tree.len()));
        }

        let expected: Vec<(u8, u32)> = model.iter().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(entries(&tree), expected);

        for key in 0..=u8::MAX {
            prop_assert_eq!(tree.search(&key), model.get(&key));
        }
        prop_assert_eq!(tree.first(), model.iter().next());
        prop_assert_eq!(tree.last(), model.iter().next_back());
    }

    #[test]
    fn remove_is_idempotent(
        keys in prop::collection::vec(any::<u8>(), 0..100),
        target in any::<u8>(),
    ) {
        let mut tree: Tree<u8, u32> = keys.iter().map(|&k| (k, u32::from(k))).collect();

        tree.remove(&target);
        let once = entries(&tree);
        tree.remove(&target);
        prop_assert_eq!(entries(&tree), once);
        prop_assert!(tree.search(&target).is_none());
        tree.check_consistency();
    }

    #[test]
    fn traverse_stops_at_first_error(
        keys in prop::collection::btree_set(any::<u8>(), 1..100),
        stop_after in 1usize..100,
    ) {
        let tree: Tree<u8, ()> = keys.iter().map(|&k| (k, ())).collect();
        let stop_after = stop_after.min(keys.len());

        let mut visited = Vec::new();
        let result = tree.traverse(|&key, _| {
            visited.push(key);
            if visited.len() == stop_after {
                return Err(key);
            }
            Ok(())
        });

        let expected: Vec<u8> = keys.iter().copied().take(stop_after).collect();
        prop_assert_eq!(result, Err(expected[stop_after - 1]));
        prop_assert_eq!(visited, expected);
    }
}
