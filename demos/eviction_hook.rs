use byte_lru::{Cache, CacheConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // BYTE_LRU_MAX_BYTES=64 cargo run --example eviction_hook
    let mut config = CacheConfig::from_env()?;
    if config.is_unbounded() {
        config = CacheConfig::with_max_bytes(64);
    }

    let mut pages = Cache::from_config(&config);
    pages.set_on_evicted(|key, page: String| {
        eprintln!("evicted {} ({} bytes)", key, page.len());
    });

    for i in 0..10 {
        pages.add(format!("/page/{}", i), "x".repeat(8 * (i + 1)));
    }
    pages.remove_oldest();

    for (key, page) in pages.iter() {
        println!("{} -> {} bytes", key, page.len());
    }
    println!("{:?}", pages);

    Ok(())
}
