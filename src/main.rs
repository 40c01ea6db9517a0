//! avldb - command-line driver for a disk-resident AVL index file.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::debug;

use avldb::{loader, AvlIndex, IndexConfig, Record};

/// Inspect and modify an avldb index file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Index file (created if missing)
    file: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Skip fsync after each write
    #[arg(long)]
    no_sync: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bulk-load a CSV file with a header row (key,name,quantity,price,date)
    Load {
        csv: PathBuf,
        /// Field delimiter
        #[arg(long, default_value_t = ',')]
        delimiter: char,
    },
    /// Print the record stored under a key
    Get { key: i32 },
    /// Insert one record
    Insert {
        key: i32,
        name: String,
        quantity: i32,
        price: f32,
        date: String,
    },
    /// Delete the record stored under a key
    Delete { key: i32 },
    /// Print records with low <= key <= high
    Range { low: i32, high: i32 },
    /// Print every record
    Dump {
        /// Print in slot order instead of key order
        #[arg(long)]
        slots: bool,
    },
    /// Check ordering, balance and heights of the stored tree
    Verify,
    /// Print tree shape and I/O counters
    Stats,
}

fn print_record(record: &Record) {
    println!(
        "{:>8}  {:<30}  {:>6}  {:>10.2}  {}",
        record.key, record.name, record.quantity, record.unit_price, record.date
    );
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = IndexConfig::default().sync_writes(!args.no_sync);
    let mut index = AvlIndex::open_with(&args.file, config)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    debug!("opened {} with {:?}", args.file.display(), config);

    match args.command {
        Command::Load { csv, delimiter } => {
            if !delimiter.is_ascii() {
                bail!("delimiter must be a single ASCII character, got {:?}", delimiter);
            }
            let summary = loader::load_delimited_file(&mut index, &csv, delimiter as u8)
                .with_context(|| format!("Failed to load {}", csv.display()))?;
            println!(
                "inserted {}, duplicates {}, malformed {}",
                summary.inserted, summary.duplicates, summary.malformed
            );
        }
        Command::Get { key } => match index.get(key)? {
            Some(record) => print_record(&record),
            None => bail!("key {} not found", key),
        },
        Command::Insert {
            key,
            name,
            quantity,
            price,
            date,
        } => {
            index.insert(Record::new(key, name, quantity, price, date))?;
        }
        Command::Delete { key } => {
            let removed = index.delete(key)?;
            print_record(&removed);
        }
        Command::Range { low, high } => {
            for record in index.range_query(low, high)? {
                print_record(&record);
            }
        }
        Command::Dump { slots } => {
            let records = if slots {
                index.traverse_insertion_order()?
            } else {
                index.traverse_sorted()?
            };
            for record in &records {
                print_record(record);
            }
        }
        Command::Verify => {
            let count = index.verify().context("Index failed verification")?;
            println!("ok: {} records", count);
        }
        Command::Stats => {
            println!("root:    {}", index.root()?);
            println!("height:  {}", index.height()?);
            println!("records: {}", index.len()?);
            println!("slots:   {}", index.slot_count()?);
            println!("{}", index.stats().snapshot());
        }
    }

    Ok(())
}
