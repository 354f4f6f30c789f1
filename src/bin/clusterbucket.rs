//! Clusterbucket CLI: compare two cluster sets and write relationship buckets.
//!
//! Usage:
//!   clusterbucket <SET1> <SET2> <PREFIX> [--db path] [--summary] [-v|-q]
//!
//! Writes <PREFIX>.0to1, .1to0, .1to1, .1toN, .Nto1 and .NtoN. A set argument
//! of the form `table:NAME:CID:CMID` is read from the --db database; any
//! other argument is a file path.

use clap::{ArgAction, Parser};
use clusterbucket::{Bucketizer, FileSink, SetDescriptor, SourceRouter, SqliteSource};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "clusterbucket",
    version,
    about = "Compare two cluster sets and split them into relationship buckets",
    after_help = "A SET is a `ClusterID<TAB>MemberID` file path, or `table:NAME:CID:CMID` \
                  to read columns CID and CMID of table NAME from the --db database. \
                  Only arguments starting with `table:` are treated as tables."
)]
struct Cli {
    /// First cluster set: a file path, or `table:NAME:CID:CMID` (needs --db)
    set1: String,
    /// Second cluster set, same forms as SET1
    set2: String,
    /// Prefix for the six bucket files
    prefix: PathBuf,
    /// SQLite database that table cluster sets are read from
    #[arg(long)]
    db: Option<PathBuf>,
    /// Print a JSON summary of record counts on stdout
    #[arg(long)]
    summary: bool,
    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::INFO,
        (false, _) => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn open_router(db: Option<PathBuf>) -> Result<SourceRouter, String> {
    let router = SourceRouter::new();
    match db {
        Some(path) => {
            let database = SqliteSource::open(&path)
                .map_err(|e| format!("Failed to open database: {}", e))?;
            Ok(router.with_database(database))
        }
        None => Ok(router),
    }
}

fn cmd_bucketize(cli: Cli) -> i32 {
    if cli.prefix.as_os_str().is_empty() {
        eprintln!("Error: bucket prefix must not be empty");
        return 1;
    }

    let (set1, set2) = match (
        SetDescriptor::from_arg(&cli.set1),
        SetDescriptor::from_arg(&cli.set2),
    ) {
        (Ok(set1), Ok(set2)) => (set1, set2),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let router = match open_router(cli.db) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let bucketizer = Bucketizer::new(router, FileSink::new(&cli.prefix));
    let summary = match bucketizer.run(&set1, &set2) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    if cli.summary {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        }
    }
    0
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    let code = cmd_bucketize(cli);
    std::process::exit(code);
}
