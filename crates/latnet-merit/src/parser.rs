use latnet_core::{ErrorInfo, NetError, PointSetType};
use log::debug;

use crate::combiner::LevelCombiner;

fn bad_combiner(input: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new("bad-level-combiner", format!("cannot parse combiner string: {message}"))
        .with_context("input", input)
        .with_hint("expected sum, max, level:<n> or level:max")
}

/// Parses `sum`, `max`, `level:<n>` or `level:max`.
///
/// `max_level` is `log2` of the number of points; `level:max` selects it and
/// `level:<n>` must satisfy `0 < n <= max_level`.
pub fn parse_combiner(input: &str, max_level: usize) -> Result<LevelCombiner, NetError> {
    match input {
        "sum" => return Ok(LevelCombiner::Sum),
        "max" => return Ok(LevelCombiner::Max),
        _ => {}
    }
    let level = match input.split(':').collect::<Vec<_>>().as_slice() {
        ["level", level] => *level,
        _ => return Err(NetError::Config(bad_combiner(input, input))),
    };
    if level == "max" {
        return Ok(LevelCombiner::LevelSelector(max_level));
    }
    let level: usize = level
        .parse()
        .map_err(|_| NetError::Config(bad_combiner(input, input)))?;
    if level == 0 || level > max_level {
        let info = bad_combiner(input, "incompatible combiner level and size.")
            .with_context("max_level", max_level.to_string());
        return Err(NetError::Config(info));
    }
    Ok(LevelCombiner::LevelSelector(level))
}

/// Parses the combiner for a point set of type `point_set_type`.
///
/// Unilevel point sets have a single merit value, so `input` is ignored and
/// [`LevelCombiner::Sum`] is returned.
pub fn parse_level_combiner(
    point_set_type: PointSetType,
    input: &str,
    max_level: usize,
) -> Result<LevelCombiner, NetError> {
    match point_set_type {
        PointSetType::Unilevel => {
            debug!("ignoring combiner {input:?} for a unilevel point set");
            Ok(LevelCombiner::Sum)
        }
        PointSetType::Multilevel => parse_combiner(input, max_level),
    }
}
