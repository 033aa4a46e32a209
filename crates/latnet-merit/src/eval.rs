use latnet_core::{pow2, ErrorInfo, NetError, Real};
use latnet_net::{coordinate_values, DigitalNet, MAX_POINT_COLUMNS};
use log::debug;

use crate::combiner::LevelCombiner;
use crate::functor::MeritFunctor;

/// Largest number of columns [`level_merits`] evaluates, which bounds the
/// number of points materialised to `2^MAX_EVAL_LEVEL`.
pub const MAX_EVAL_LEVEL: usize = MAX_POINT_COLUMNS;

/// Averages `functor` over the embedded point sets of coordinate `coord`.
///
/// Entry `l` of the result, for `l` in `0..=net.num_columns()`, is the mean
/// of `functor` over the first `2^l` points.
pub fn level_merits(
    net: &dyn DigitalNet,
    coord: usize,
    functor: &dyn MeritFunctor,
) -> Result<Vec<Real>, NetError> {
    let max_level = net.num_columns();
    if max_level > MAX_EVAL_LEVEL {
        let info = ErrorInfo::new("too-many-levels", "net is too large for level evaluation")
            .with_context("num_columns", max_level.to_string())
            .with_context("max_level", MAX_EVAL_LEVEL.to_string());
        return Err(NetError::OutOfRange(info));
    }
    let values = coordinate_values(net, coord, net.num_points())?;

    let merits = (0..=max_level)
        .map(|level| -> Result<Real, NetError> {
            let n = pow2(level)?;
            let sum: Real = values[..n as usize]
                .iter()
                .map(|&x| functor.evaluate(x, n))
                .sum();
            Ok(sum / n as Real)
        })
        .collect::<Result<Vec<Real>, NetError>>()?;
    debug!(
        "evaluated {} on coordinate {} over {} levels",
        functor.name(),
        coord,
        merits.len()
    );
    Ok(merits)
}

/// Evaluates [`level_merits`] and reduces it with `combiner`.
pub fn combined_merit(
    net: &dyn DigitalNet,
    coord: usize,
    functor: &dyn MeritFunctor,
    combiner: LevelCombiner,
) -> Result<Real, NetError> {
    let merits = level_merits(net, coord, functor)?;
    combiner.combine(&merits)
}
