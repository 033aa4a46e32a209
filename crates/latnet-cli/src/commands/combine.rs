use std::error::Error;

use clap::Args;
use latnet_core::{NetError, PointSetType, Real};
use latnet_merit::{parse_level_combiner, LevelCombiner};

#[derive(Args, Debug)]
pub struct CombineArgs {
    /// Combiner: sum, max, level:<n> or level:max.
    pub combiner: String,
    /// Merit values of levels 0, 1, ...
    #[arg(allow_negative_numbers = true, required = true)]
    pub values: Vec<Real>,
    /// Highest level accepted by `level:<n>`; defaults to the last value's level.
    #[arg(long = "max-level")]
    pub max_level: Option<usize>,
    /// Treat the values as a unilevel point set, ignoring the combiner.
    #[arg(long)]
    pub unilevel: bool,
}

pub fn run(args: &CombineArgs) -> Result<(), Box<dyn Error>> {
    let (combiner, value) = evaluate(args)?;
    println!("{combiner}: {value}");
    Ok(())
}

/// Parses the combiner and applies it to the values.
pub fn evaluate(args: &CombineArgs) -> Result<(LevelCombiner, Real), NetError> {
    let max_level = args
        .max_level
        .unwrap_or_else(|| args.values.len().saturating_sub(1));
    let point_set_type = if args.unilevel {
        PointSetType::Unilevel
    } else {
        PointSetType::Multilevel
    };
    let combiner = parse_level_combiner(point_set_type, &args.combiner, max_level)?;
    let value = combiner.combine(&args.values)?;
    Ok((combiner, value))
}
