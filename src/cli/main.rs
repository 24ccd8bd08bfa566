#![allow(clippy::collapsible_if)]

#[cfg(not(target_env = "msvc"))]
#[cfg(feature = "jemalloc")]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = Jemalloc;

use std::path::PathBuf;

use otter_simplify::pipeline::Pipeline;

mod parse;

const EXIT_FATAL: i32 = 1;
const EXIT_FINDINGS: i32 = 3;

fn main() {
    #[cfg(feature = "log")]
    env_logger::init();

    let matches = parse::cli::cli().get_matches();

    let config = match parse::config::config_from_args(&matches) {
        Ok(config) => config,
        Err(e) => {
            println!("c Configuration error: {e}");
            std::process::exit(EXIT_FATAL);
        }
    };

    let Some(input) = matches.get_one::<PathBuf>("input") else {
        println!("c Path to an expression file required");
        std::process::exit(EXIT_FATAL);
    };

    let output_dir = matches
        .get_one::<PathBuf>("output_dir")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("output"));

    println!("c Reading expressions from {input:?}");

    let pipeline = Pipeline::new(config);
    let outcome = match pipeline.run_file(input, &output_dir) {
        Ok(outcome) => outcome,
        Err(e) => {
            println!("c {e}");
            std::process::exit(EXIT_FATAL);
        }
    };

    print!("{}", outcome.verified.summary);
    println!();
    println!("c Output written to {:?}", outcome.output_dir);
    if outcome.narrations > 0 {
        println!("c {} narrations written", outcome.narrations);
    }

    match outcome.verified.summary.all_equivalent() {
        true => std::process::exit(0),
        false => std::process::exit(EXIT_FINDINGS),
    }
}
