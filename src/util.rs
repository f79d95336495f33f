use std::path::Path;
use std::str::FromStr;

use clap::ArgMatches;
use serde_json::Value;

use crate::{
    config::{GeneratorConfig, parse_seed},
    cost::{CostPolicy, PolicyFlags},
    error::{Error, Result},
};

/** initializes the logger. verbose: debug level, otherwise RUST_LOG (default: info) */
pub fn init_logger(verbose:bool) {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    );
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

/// parses an optional numeric argument
fn parse_arg<T:FromStr>(main_args:&ArgMatches, name:&str) -> Result<Option<T>> {
    match main_args.value_of(name) {
        None => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(|_| Error::Config(
            format!("unable to parse --{} \"{}\"", name, s)
        )),
    }
}

/** reads the generation parameters from the command line.

Either a JSON configuration (--config) or policy flags can be given, not both.
Without any policy flag, costs are random in [1, 10] (as with an empty configuration).
*/
pub fn read_params(main_args:&ArgMatches) -> Result<GeneratorConfig> {
    let flags = PolicyFlags {
        random: main_args.is_present("random-costs"),
        seed: match main_args.value_of("seed") {
            None => None,
            Some(s) => parse_seed(s)?,
        },
        max_cost: parse_arg(main_args, "max-cost")?,
        const_cost: parse_arg(main_args, "const-cost")?,
        product: main_args.is_present("product-costs"),
        no_costs: main_args.is_present("no-costs"),
    };
    let max_candidates:Option<usize> = parse_arg(main_args, "max-candidates")?;
    let color_count:Option<usize> = parse_arg(main_args, "colors")?;
    let res = match main_args.value_of("config") {
        Some(filename) => {
            if flags.random || flags.const_cost.is_some() || flags.product || flags.no_costs
                || flags.seed.is_some() || flags.max_cost.is_some() {
                return Err(Error::Config(
                    "cost policy flags cannot be combined with --config".to_string()
                ));
            }
            let mut config = GeneratorConfig::from_file(Path::new(filename))?;
            if let Some(m) = max_candidates { config.max_candidates = m; }
            if color_count.is_some() { config.color_count = color_count; }
            config
        },
        None => GeneratorConfig {
            cost: CostPolicy::from_flags(&flags)?,
            max_candidates: max_candidates.unwrap_or(0),
            color_count,
        }
    };
    res.validate()?;
    println!("cost policy: {:?}", res.cost);
    if res.max_candidates > 0 {
        println!("at most {} costed pairs", res.max_candidates);
    }
    Ok(res)
}

/// exports statistics to a JSON file (if a file is given)
pub fn export_stats(perf_file:Option<&str>, stats:&Value) -> Result<()> {
    match perf_file {
        None => Ok(()),
        Some(filename) => {
            let path = Path::new(filename);
            let s = serde_json::to_string_pretty(stats)
                .map_err(|e| Error::Config(format!("unable to serialize the statistics: {}", e)))?;
            std::fs::write(path, s).map_err(|e| Error::io(path, e))?;
            println!("statistics written in: {}", filename);
            Ok(())
        }
    }
}
