use std::time::Duration;

use clap::ArgMatches;

use otter_simplify::config::{CapacityPolicy, Config, ConfigOption, NormalForm, PolarityLean};

/// Sets `option` to `value`, or notes the bounds of `option` if `value` is outside them.
fn set_option<T: Clone + PartialOrd + std::fmt::Debug>(
    option: &mut ConfigOption<T>,
    value: T,
) -> Result<(), String> {
    match option.set_within_bounds(value.clone()) {
        true => Ok(()),
        false => {
            let (min, max) = option.min_max();
            Err(format!(
                "{} must be between {min:?} and {max:?}, found {value:?}",
                option.name
            ))
        }
    }
}

pub fn config_from_args(args: &ArgMatches) -> Result<Config, String> {
    let mut the_config = Config::default();

    if let Ok(Some(workers)) = args.try_get_one::<usize>("workers") {
        set_option(&mut the_config.verifier.workers, *workers)?;
    };

    if let Ok(Some(millis)) = args.try_get_one::<u64>("time_limit") {
        set_option(
            &mut the_config.verifier.time_limit,
            Duration::from_millis(*millis),
        )?;
    };

    if let Ok(Some(millis)) = args.try_get_one::<u64>("simplify_time_limit") {
        set_option(
            &mut the_config.simplifier.time_limit,
            Duration::from_millis(*millis),
        )?;
    };

    if let Ok(Some(atoms)) = args.try_get_one::<usize>("max_atoms") {
        set_option(&mut the_config.simplifier.max_atoms, *atoms)?;
    };

    if let Ok(Some(depth)) = args.try_get_one::<usize>("max_depth") {
        set_option(&mut the_config.normalizer.max_depth, *depth)?;
    };

    if let Ok(Some(form)) = args.try_get_one::<NormalForm>("form") {
        set_option(&mut the_config.simplifier.form, *form)?;
    };

    if let Ok(Some(policy)) = args.try_get_one::<CapacityPolicy>("capacity") {
        set_option(&mut the_config.normalizer.capacity, *policy)?;
    };

    if let Ok(Some(prefixes)) = args.try_get_many::<String>("strip_prefix") {
        the_config.normalizer.strip_prefixes = prefixes.cloned().collect();
    };

    if let Ok(Some(true)) = args.try_get_one::<bool>("whole_implications") {
        the_config.simplifier.antecedent_only.value = false;
    };

    if let Ok(Some(true)) = args.try_get_one::<bool>("no_cache") {
        the_config.normalizer.cache.value = false;
    };

    if let Ok(Some(true)) = args.try_get_one::<bool>("no_narration") {
        the_config.pipeline.narrate.value = false;
    };

    if let Ok(Some(lean)) = args.try_get_one::<PolarityLean>("polarity_lean") {
        set_option(&mut the_config.verifier.polarity_lean, *lean)?;
    };

    Ok(the_config)
}

#[cfg(test)]
mod config_tests {
    use super::*;
    use crate::parse::cli::cli;

    #[test]
    fn flags_and_values() {
        let matches = cli().get_matches_from([
            "otter_simplify",
            "--workers",
            "4",
            "--time-limit",
            "250",
            "--form",
            "cnf",
            "--strip-prefix",
            "dw.",
            "--strip-prefix",
            "cfg.",
            "--no-cache",
            "input.txt",
        ]);
        let config = config_from_args(&matches).unwrap();

        assert_eq!(config.verifier.workers.value, 4);
        assert_eq!(config.verifier.time_limit.value, Duration::from_millis(250));
        assert_eq!(config.simplifier.form.value, NormalForm::Pos);
        assert_eq!(config.normalizer.strip_prefixes, vec!["dw.", "cfg."]);
        assert!(!config.normalizer.cache.value);
        assert!(config.pipeline.narrate.value);
        assert!(config.simplifier.antecedent_only.value);
    }

    #[test]
    fn out_of_bounds() {
        let matches = cli().get_matches_from(["otter_simplify", "--workers", "0", "input.txt"]);
        assert!(config_from_args(&matches).is_err());

        let matches =
            cli().get_matches_from(["otter_simplify", "--polarity-lean", "1.5", "input.txt"]);
        assert!(config_from_args(&matches).is_err());
    }
}
