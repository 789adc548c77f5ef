use std::{env, path::Path, path::PathBuf, process};

use gbcartgen::driver::{self, Outcome, RunOptions};
use gbcartgen::header::{RAM_SIZES, ROM_SIZES};
use gbcartgen::mbc::MBC_TYPES;
use gbcartgen::memory_map::{KIB, ROM_BANK_SIZE};
use gbcartgen::worklist::{self, WorklistEntry};

mod cli;
mod constants;

use cli::CliArgs;

fn main() -> anyhow::Result<()> {
    // --- Argument Parsing ---
    let args = match cli::parse_args_from(env::args().collect()) {
        Ok(args) => args,
        Err(code) => process::exit(code),
    };

    // --- Logging ---
    let filter = if args.verbose {
        constants::VERBOSE_LOG_FILTER
    } else {
        constants::DEFAULT_LOG_FILTER
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .target(env_logger::Target::Stderr)
        .init();

    if args.list {
        print_tables();
        return Ok(());
    }

    // --- Generate ---
    let entries = select_worklist(&args)?;
    for (first, later) in worklist::find_collisions(&entries) {
        if let Ok(codes) = &entries[later] {
            log::warn!(
                "Entries {} and {} produce the same cartridge {}",
                first,
                later,
                codes
            );
        }
    }

    let options = RunOptions {
        out_dir: PathBuf::from(&args.out_dir),
        verify: args.verify,
    };
    let report = driver::run(entries, &options);

    for entry in &report.entries {
        let codes = entry.codes.map(|codes| codes.to_string()).unwrap_or_default();
        match &entry.outcome {
            Outcome::Generated(path) => println!("{}", path.display()),
            Outcome::Duplicate { first, path } => eprintln!(
                "{}: same file as entry {}, not rewritten: {}",
                codes,
                first,
                path.display()
            ),
            Outcome::Failed(e) => eprintln!("{}: {}", codes, e),
            Outcome::Unparsable(e) => eprintln!("entry {}: {}", entry.index, e),
        }
    }

    if report.failures() > 0 {
        eprintln!("{} of {} cartridges failed", report.failures(), report.entries.len());
        process::exit(1);
    }
    Ok(())
}

/// Positional triples win over `--worklist`, which wins over the built-in list.
///
/// Bad triples or lines stay in the list as failed entries; only an unreadable
/// worklist file stops the run.
fn select_worklist(args: &CliArgs) -> anyhow::Result<Vec<WorklistEntry>> {
    if !args.triples.is_empty() {
        return Ok(worklist::parse_arguments(&args.triples));
    }
    if let Some(path) = &args.worklist {
        return Ok(worklist::load_worklist(Path::new(path))?);
    }
    Ok(worklist::default_entries())
}

fn print_tables() {
    println!("MBC types (0x0147):");
    for (code, label) in MBC_TYPES.iter() {
        println!("  {:#04x}  {}", code, label);
    }
    println!("ROM sizes (0x0148):");
    for (code, bytes) in ROM_SIZES.iter() {
        println!("  {:#04x}  {} KiB ({} banks)", code, bytes / KIB, bytes / ROM_BANK_SIZE);
    }
    println!("RAM sizes (0x0149):");
    for (code, bytes) in RAM_SIZES.iter() {
        println!("  {:#04x}  {} KiB", code, bytes / KIB);
    }
}
