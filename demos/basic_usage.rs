//! Basic usage of the hashkv map.

use hashkv::{Config, HashKv, HashKvError};

fn main() -> Result<(), HashKvError> {
    let mut map: HashKv<u64> = HashKv::new(16)?;

    // Insert data
    map.set(b"user:1001", 1001)?;
    map.set(b"user:1002", 1002)?;
    map.set(b"user:1003", 1003)?;

    // Lookups
    println!("user:1001 = {:?}", map.get(b"user:1001")?);
    println!("user:9999 = {:?}", map.get(b"user:9999")?);
    println!("Contains user:1002: {}", map.contains(b"user:1002")?);
    println!("Count: {}\n", map.len());

    // A shallow trie forces collision chains; the map still resolves
    // every key through the fingerprint comparison.
    let mut shallow: HashKv<u64> = HashKv::with_config(Config {
        max_level: 4,
        ..Config::default()
    })?;
    for i in 0..1000u64 {
        shallow.set(format!("key:{i}").as_bytes(), i)?;
    }
    println!("Shallow map count: {}", shallow.len());
    println!("Shallow map stats: {:#?}", shallow.stats());

    Ok(())
}
