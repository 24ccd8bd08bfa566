use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};

use otter_simplify::config::{CapacityPolicy, Config, NormalForm};

pub fn cli() -> Command {
    let defaults = Config::default();

    Command::new("otter_simplify")
        .about("Normalizes, simplifies, and verifies propositional logic expressions")
        .version(env!("CARGO_PKG_VERSION"))

        .arg(Arg::new("input")
            .required(true)
            .num_args(1)
            .value_parser(value_parser!(PathBuf))
            .help("A file of raw expressions, one per line.")
            .long_help("A file of raw expressions, one per line.

Empty lines, and lines beginning with '#', are skipped.
With the xz feature, a file with extension xz is decompressed."))

        .arg(Arg::new("output_dir")
            .long("output-dir")
            .short('o')
            .value_name("DIRECTORY")
            .value_parser(value_parser!(PathBuf))
            .required(false)
            .num_args(1)
            .default_value("output")
            .help("The directory to write the expression store, mappings, summary, and narrations to."))

        .arg(Arg::new("workers")
            .long("workers")
            .short('w')
            .value_name("COUNT")
            .value_parser(value_parser!(usize))
            .required(false)
            .num_args(1)
            .help(format!("The count of threads verifying records.
Default: {}", defaults.verifier.workers.value)))

        .arg(Arg::new("time_limit")
            .long("time-limit")
            .short('t')
            .value_name("MILLISECONDS")
            .value_parser(value_parser!(u64))
            .required(false)
            .num_args(1)
            .help(format!("Time limit for each verification, in milliseconds, where 0 is no limit.
Default: {}", defaults.verifier.time_limit.value.as_millis())))

        .arg(Arg::new("simplify_time_limit")
            .long("simplify-time-limit")
            .value_name("MILLISECONDS")
            .value_parser(value_parser!(u64))
            .required(false)
            .num_args(1)
            .help("Time limit for each simplification, in milliseconds, where 0 is no limit.
Default: No limit"))

        .arg(Arg::new("max_atoms")
            .long("max-atoms")
            .value_name("COUNT")
            .value_parser(value_parser!(usize))
            .required(false)
            .num_args(1)
            .help(format!("The most atoms an expression may have and be simplified.
Default: {}", defaults.simplifier.max_atoms.value))
            .long_help(format!("The most atoms an expression may have and be simplified.
Default: {}

Simplification enumerates the truth table of an expression, and so takes time exponential in the count of atoms.
An expression with more atoms fails simplification, and is reported as such.", defaults.simplifier.max_atoms.value)))

        .arg(Arg::new("max_depth")
            .long("max-depth")
            .value_name("DEPTH")
            .value_parser(value_parser!(usize))
            .required(false)
            .num_args(1)
            .help(format!("The deepest nesting of parentheses and negations read from an expression.
Default: {}", defaults.normalizer.max_depth.value)))

        .arg(Arg::new("form")
            .long("form")
            .value_name("FORM")
            .value_parser(clap::builder::ValueParser::new(normal_form_parser))
            .required(false)
            .num_args(1)
            .help(format!("The form of simplifications.
Default: {}", defaults.simplifier.form.value))
            .long_help(format!("The form of simplifications.
Default: {}

  - auto: Whichever of sop and pos has fewer literals, preferring sop
  - sop:  A disjunction of conjunctions (also: dnf)
  - pos:  A conjunction of disjunctions (also: cnf)", defaults.simplifier.form.value)))

        .arg(Arg::new("capacity")
            .long("capacity")
            .value_name("POLICY")
            .value_parser(clap::builder::ValueParser::new(capacity_parser))
            .required(false)
            .num_args(1)
            .help(format!("What to do once the letters A to Z are exhausted.
Default: {}", defaults.normalizer.capacity.value))
            .long_help(format!("What to do once the letters A to Z are exhausted.
Default: {}

  - reject: Fail normalization of the expression
  - extend: Continue with AA, AB, …", defaults.normalizer.capacity.value)))

        .arg(Arg::new("strip_prefix")
            .long("strip-prefix")
            .value_name("PREFIX")
            .value_parser(value_parser!(String))
            .required(false)
            .num_args(1)
            .action(ArgAction::Append)
            .help("A prefix to remove from identifiers, e.g. 'dw.'. May be given more than once."))

        .arg(Arg::new("whole_implications")
            .long("whole-implications")
            .action(ArgAction::SetTrue)
            .help("Simplify the whole of a top-level implication, rather than the antecedent only."))

        .arg(Arg::new("no_cache")
            .long("no-cache")
            .action(ArgAction::SetTrue)
            .help("Normalize each expression afresh, even if an identical expression was seen before."))

        .arg(Arg::new("no_narration")
            .long("no-narration")
            .action(ArgAction::SetTrue)
            .help("Skip writing a natural language rendering of each simplification."))

        .arg(Arg::new("polarity_lean")
            .long("polarity-lean")
            .value_name("LEAN")
            .value_parser(value_parser!(f64))
            .required(false)
            .num_args(1)
            .help(format!("The chance of assigning true to an atom when making a decision during verification.
Default: {}", defaults.verifier.polarity_lean.value)))
}

fn normal_form_parser(arg: &str) -> Result<NormalForm, std::io::Error> {
    arg.parse::<NormalForm>().map_err(|_| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Unknown form, expected one of auto, sop, pos",
        )
    })
}

fn capacity_parser(arg: &str) -> Result<CapacityPolicy, std::io::Error> {
    arg.parse::<CapacityPolicy>().map_err(|_| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Unknown capacity policy, expected one of reject, extend",
        )
    })
}
