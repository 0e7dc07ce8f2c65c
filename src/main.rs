use std::{fs, path::PathBuf, process};

use clap::Parser;
use frr::{Error, StdConsole};

const USAGE: &str = "Usage: frr <path/to/script.fr>";

/// frr runs pseudocode scripts written with French keywords, the way
/// algorithmics courses write them.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path of the script to run.
    script: Option<PathBuf>,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(error) => {
            let _ = error.print();
            if error.use_stderr() {
                // Extra positional arguments or unknown flags.
                eprintln!("{USAGE}");
                process::exit(1);
            }
            // --help and --version are not errors.
            process::exit(0);
        },
    };

    let Some(path) = args.script else {
        println!("{USAGE}");
        process::exit(0);
    };

    if !path.exists() {
        eprintln!("The file \"{}\" does not exist.", path.display());
        process::exit(2);
    }

    if !path.is_file() {
        eprintln!("\"{}\" is not a file.", path.display());
        process::exit(3);
    }

    let source = match fs::read_to_string(&path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("{error}");
            process::exit(5);
        },
    };

    let mut console = StdConsole::new();
    match frr::run_source(&source, &mut console) {
        Ok(()) => {},
        Err(Error::Io(error)) => {
            eprintln!("{error}");
            process::exit(5);
        },
        Err(error) => {
            eprintln!("{error}");
            process::exit(4);
        },
    }
}
