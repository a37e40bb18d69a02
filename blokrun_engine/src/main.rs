#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** blokrun **
//! Runs a scanned card program against a level map.

use std::{env, fs, process};

use blokrun_engine::{CancelToken, RunOutcome, TerminalFrames, compile_and_run, resolve_map};

use anyhow::{Context, Result};
use colored::Colorize;
use log::info;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let (program_path, map_spec) = match args.as_slice() {
        [_, program] => (program.clone(), "foret1".to_string()),
        [_, program, flag, map] if flag == "--map" => (program.clone(), map.clone()),
        _ => {
            eprintln!("Usage:\n  blokrun_engine <program.cartes> [--map <name-or-path.ron>]");
            process::exit(2);
        },
    };

    let source = fs::read_to_string(&program_path)
        .with_context(|| format!("while reading program file '{program_path}'"))?;
    // one recognized fragment per line; blank lines and # comments skipped
    let fragments: Vec<&str> = source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();
    info!("{} fragments read from '{program_path}'", fragments.len());

    let map = resolve_map(&map_spec).context("while resolving the map")?;

    println!("{:^60}", "BLOKRUN".bright_yellow().underline());
    println!("map: {} (theme {})\n", map.name.bold(), map.theme);

    match compile_and_run(&fragments, &map, TerminalFrames::new(), CancelToken::new()) {
        Ok(RunOutcome::Won(message)) => println!("{}", message.bright_green().bold()),
        Ok(RunOutcome::Lost(reason)) => println!("{}", reason.bright_red().bold()),
        Ok(RunOutcome::Cancelled) => println!("{}", "run cancelled".dimmed()),
        Err(e) => {
            eprintln!("{} {e}", "error:".bright_red().bold());
            process::exit(1);
        },
    }
    Ok(())
}
