use chain_hash::HashTable;
use chain_hash::TableConfig;
use clap::Parser;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'n', long = "count", default_value_t = 1000)]
    count: usize,

    #[arg(short = 'c', long = "initial_capacity", default_value_t = 16)]
    initial_capacity: usize,

    #[arg(short = 'l', long = "max_load", default_value_t = 0.75)]
    max_load: f64,
}

fn main() {
    let args = Args::parse();

    let config = match TableConfig::new(args.initial_capacity, args.max_load) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    println!(
        "Creating HashTable with {} buckets and max load {:.2}",
        config.capacity, config.max_load
    );

    let mut table: HashTable<u64, u64> = match HashTable::with_config(config) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    println!("Filling table with {} u64 keys...", args.count);

    let mut resizes = 0;
    for i in 0..args.count as u64 {
        let before = table.capacity();
        table.put(i, i);
        if table.capacity() != before {
            resizes += 1;
            println!("  resized {} -> {} at key {}", before, table.capacity(), i);
        }
    }

    println!("Inserted {} keys into table", table.len());
    println!(
        "Final load factor: {:.2}% after {} resizes",
        table.load_factor() * 100.0,
        resizes
    );

    table.print_bucket_histogram();
    table.debug_stats().print();
}
