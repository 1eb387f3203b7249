use byte_lru::Cache;
use rand::Rng;
use std::sync::{Arc, Mutex};

fn main() {
    env_logger::init();

    // The cache does no locking of its own.
    let numbers = Arc::new(Mutex::new(Cache::<u64>::new(1024 * 1024)));

    let handles = (0..4)
        .map(|thread| {
            let numbers = Arc::clone(&numbers);
            std::thread::spawn(move || {
                eprintln!("Thread {} started", thread);
                let mut rng = rand::thread_rng();
                for i in 0..1_000_000u64 {
                    let key = (i % 200_000).to_string();
                    let mut numbers = numbers.lock().unwrap();
                    if numbers.get(&key).is_none() {
                        numbers.add(key, rng.gen());
                    }
                    if i % 100_000 == 0 {
                        eprintln!("Thread {} finished {}", thread, i);
                    }
                }
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        handle.join().unwrap();
    }

    eprintln!("Done: {:?}", numbers.lock().unwrap());
}
