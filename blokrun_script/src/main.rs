//! CLI entry point for blokrun_script.
//! Usage: cargo run -p blokrun_script -- compile blokrun_engine/data/programmes/exemple.cartes

use std::{env, fs, process};

use blokrun_script::{compile_to_ron, parse_fragments};

fn main() {
    let args: Vec<String> = env::args().collect();

    // Accept either:
    // 1) cargo run: <bin> -- compile <args>
    // 2) direct:    <bin> compile <args>
    let rest: Vec<String> = match args.as_slice() {
        [_, flag, cmd, tail @ ..] if flag == "--" && cmd == "compile" => tail.to_vec(),
        [_, cmd, tail @ ..] if cmd == "compile" => tail.to_vec(),
        _ => {
            eprintln!("Usage:\n  blokrun_script compile <file.cartes> [--out <out.ron>]");
            process::exit(2);
        },
    };
    run_compile(&rest);
}

fn run_compile(args: &[String]) {
    let mut path: Option<String> = None;
    let mut out_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--out" {
            if i + 1 >= args.len() {
                eprintln!("--out requires a filepath");
                process::exit(2);
            }
            out_path = Some(args[i + 1].clone());
            i += 2;
            continue;
        }
        if path.is_none() {
            path = Some(args[i].clone());
        }
        i += 1;
    }
    let Some(path) = path else {
        eprintln!("Usage: blokrun_script compile <file.cartes> [--out <out.ron>]");
        process::exit(2);
    };
    let src = fs::read_to_string(&path).unwrap_or_else(|e| {
        eprintln!("error: unable to read '{}': {}", &path, e);
        process::exit(1);
    });
    // one recognized fragment per line; blank lines and # comments skipped
    let fragments: Vec<&str> = src
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();
    let program = parse_fragments(&fragments).unwrap_or_else(|e| {
        eprintln!("parse error: {}", e);
        process::exit(1);
    });
    match compile_to_ron(&program) {
        Ok(ron) => {
            if let Some(out) = out_path {
                fs::write(&out, ron).unwrap_or_else(|e| {
                    eprintln!("error: writing '{}': {}", &out, e);
                    process::exit(1);
                });
            } else {
                println!("{}", ron);
            }
        },
        Err(e) => {
            eprintln!("compile error: {}", e);
            process::exit(1);
        },
    }
}
