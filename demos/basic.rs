use byte_lru::Cache;

fn main() {
    env_logger::init();

    let mut fruits = Cache::new(2 * 1024 + 512);
    fruits.add("apple", vec![0u8; 1024]);
    fruits.add("banana", vec![0u8; 1024]);

    // This `get` touches "apple" so it is now the newest.
    assert!(fruits.get("apple").is_some());

    fruits.add("brocolli", vec![0u8; 1024]);

    assert!(fruits.get("apple").is_some());
    assert!(fruits.get("banana").is_none());

    println!("{:?}", fruits);
}
