#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::print_stdout)]

use std::{collections::HashSet, time::Instant};

use clap::Parser;
use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};
use sepchain::ChainedHashTable;

const START_SIZE: usize = 30_000_000;
const NUM_TESTS: u64 = 50_000_000;

/// Times a large number of random-key inserts
#[derive(Debug, Parser)]
#[command(name = "sepchain_stress", version)]
struct Args {
    /// Initial number of buckets
    #[arg(long, default_value_t = START_SIZE)]
    start_size: usize,

    /// Number of inserts to perform
    #[arg(long, default_value_t = NUM_TESTS)]
    inserts: u64,

    /// Seed for the key and value generator
    #[arg(long, default_value_t = 2)]
    seed: u64,

    /// Also track distinct keys and check them against the final count
    #[arg(long)]
    verify: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut table = ChainedHashTable::with_capacity(args.start_size)?;
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut distinct = args.verify.then(HashSet::new);

    println!("Performing stress test with starting hash table size of {}", table.capacity());
    println!("Inserting {} keys...", args.inserts);

    let start = Instant::now();
    for _ in 0..args.inserts {
        let key = rng.random_range(0..=i32::MAX);
        let value = rng.random_range(0..=i32::MAX);
        table.put(key, value)?;
        if let Some(seen) = distinct.as_mut() {
            seen.insert(key);
        }
    }
    let elapsed = start.elapsed();

    println!("{} insertions took {:.6} seconds", args.inserts, elapsed.as_secs_f64());
    println!("Hash table size = {} & count = {}", table.capacity(), table.len());
    info!(
        "load factor {:.3}, longest chain {}",
        table.load_factor(),
        table.longest_chain()
    );

    if let Some(seen) = distinct {
        if seen.len() != table.len() {
            return Err(format!(
                "count mismatch: table holds {} entries but {} distinct keys were inserted",
                table.len(),
                seen.len()
            )
            .into());
        }
        println!("Verified {} distinct keys", seen.len());
    }

    Ok(())
}
