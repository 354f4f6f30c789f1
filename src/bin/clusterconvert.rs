//! Clusterconvert CLI: turn member-list cluster files into one member per line.
//!
//! Usage:
//!   clusterconvert <INPUT> <OUTPUT> <DELIMITER> [-v|-q]
//!
//! Each input line is `ClusterID<TAB>Member<DELIM>Member...`; the output is
//! the `ClusterID<TAB>MemberID` format read by clusterbucket.

use clap::{ArgAction, Parser};
use clusterbucket::convert_member_lists;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "clusterconvert",
    version,
    about = "Expand a cluster file with member lists into one member per line",
    after_help = "Lines without a cluster id or without members are skipped. \
                  The OUTPUT file must not exist yet."
)]
struct Cli {
    /// Cluster file with a delimited member list after each cluster id
    input: PathBuf,
    /// File to create; an existing file is never overwritten
    output: PathBuf,
    /// Separator between member ids, e.g. ' ' or ','
    delimiter: String,
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

fn cmd_convert(cli: Cli) -> i32 {
    match convert_member_lists(&cli.input, &cli.output, &cli.delimiter) {
        Ok(_) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    let code = cmd_convert(cli);
    std::process::exit(code);
}
