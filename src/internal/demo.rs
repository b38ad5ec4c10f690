#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::print_stdout)]

use clap::Parser;
use log::info;
use sepchain::{ChainedHashTable, TableError};

/// Inserts a run of keys into a small table and reads them back
#[derive(Debug, Parser)]
#[command(name = "sepchain_demo", version)]
struct Args {
    /// Initial number of buckets; small so the table has to grow
    #[arg(long, default_value_t = 5)]
    capacity: usize,

    /// Keys `0..keys` are inserted with value `key * 10`
    #[arg(long, default_value_t = 20)]
    keys: i32,

    /// Size of the lookup buffer
    #[arg(long, default_value_t = 5)]
    max_results: usize,

    /// Key queried at the end, expected to be absent
    #[arg(long, default_value_t = 100)]
    missing_key: i32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut table = match ChainedHashTable::with_capacity(args.capacity) {
        Ok(table) => {
            println!("Hash Table Allocation Successful");
            table
        }
        Err(err) => {
            println!("FAILED to Create Hash Table: {err}");
            return Err(err.into());
        }
    };

    for key in 0..args.keys {
        table.put(key, key.saturating_mul(10))?;
        println!("Inserted {key}, Size: {}, Count: {}", table.capacity(), table.len());
    }

    let mut values = vec![0; args.max_results];
    for key in 0..args.keys {
        report(&table, key, &mut values);
    }

    report(&table, args.missing_key, &mut values);

    info!("longest chain: {}", table.longest_chain());
    Ok(())
}

fn report(table: &ChainedHashTable, key: i32, values: &mut [i32]) {
    match table.get_into(key, values) {
        Ok(found) => {
            println!("Number of results for key {key}: {found}");
            for (i, value) in values.iter().take(found).enumerate() {
                println!("Value {}: {value}", i.saturating_add(1));
            }
            if found > values.len() {
                println!("Not all results could be stored in the buffer.");
            }
        }
        Err(TableError::InvalidArgument { reason }) => {
            println!("Error retrieving values for key {key}: {reason}");
        }
        Err(err) => println!("Error retrieving values for key {key}: {err}"),
    }
}
