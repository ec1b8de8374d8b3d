use super::*;

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::HashMap;

fn check_against_model(map: &mut HashKv<u64>, ops: &[(Vec<u8>, u64)]) -> Result<(), TestCaseError> {
    let mut model: HashMap<Vec<u8>, u64> = HashMap::new();
    for (key, value) in ops {
        let displaced = map.set(key, *value).unwrap();
        let expected = model.insert(key.clone(), *value);
        prop_assert_eq!(displaced, expected, "displaced value must match the model");
    }
    for (key, value) in &model {
        prop_assert_eq!(map.get(key).unwrap(), Some(value));
    }
    prop_assert_eq!(map.len(), model.len());
    Ok(())
}

fn key_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..12)
}

proptest! {
    #[test]
    fn matches_std_hashmap(
        ops in prop::collection::vec((key_strategy(), any::<u64>()), 1..300),
    ) {
        let mut map: HashKv<u64> = HashKv::new(16).unwrap();
        check_against_model(&mut map, &ops)?;
    }

    // Depth 4 leaves only 16 trie leaves, so most inserts extend
    // collision chains rather than trie paths.
    #[test]
    fn matches_std_hashmap_with_heavy_chaining(
        ops in prop::collection::vec((key_strategy(), any::<u64>()), 1..300),
    ) {
        let mut map: HashKv<u64> = HashKv::new(4).unwrap();
        check_against_model(&mut map, &ops)?;
    }

    // Tiny arena blocks cross growth boundaries constantly; earlier
    // entries must survive every growth step.
    #[test]
    fn matches_std_hashmap_across_arena_growth(
        ops in prop::collection::vec((key_strategy(), any::<u64>()), 1..200),
    ) {
        let config = Config {
            max_level: 8,
            node_index_capacity: 1,
            node_block_capacity: 2,
            entry_index_capacity: 1,
            entry_block_capacity: 2,
        };
        let mut map: HashKv<u64> = HashKv::with_config(config).unwrap();
        check_against_model(&mut map, &ops)?;
    }

    #[test]
    fn get_never_observes_foreign_values(
        present in prop::collection::vec((key_strategy(), any::<u64>()), 1..50),
        absent in prop::collection::vec(key_strategy(), 1..50),
    ) {
        let mut map: HashKv<u64> = HashKv::new(16).unwrap();
        let mut model: HashMap<Vec<u8>, u64> = HashMap::new();
        for (key, value) in &present {
            map.set(key, *value).unwrap();
            model.insert(key.clone(), *value);
        }
        for key in &absent {
            if !model.contains_key(key) {
                prop_assert_eq!(map.get(key).unwrap(), None);
            }
        }
    }

    #[test]
    fn fingerprints_are_deterministic(key in key_strategy()) {
        let table = PrimeTable::new();
        let a = table.fingerprint(&key);
        let b = PrimeTable::new().fingerprint(&key);
        prop_assert_eq!(a, b);
        prop_assert!(a.is_some());
    }
}
