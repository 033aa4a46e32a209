use latnet_core::{ErrorInfo, NetError};

use crate::matrix::GeneratingMatrix;
use crate::net::DigitalNet;

/// Largest number of columns whose points [`points`] materialises, and
/// `2^MAX_POINT_COLUMNS` is the most values [`coordinate_values`] returns.
pub const MAX_POINT_COLUMNS: usize = 24;

const MAX_POINT_COUNT: u64 = 1 << MAX_POINT_COLUMNS;

/// Maps point `index` through `matrix` to its coordinate in `[0, 1)`.
///
/// Digit `c` of `index` (least significant first) multiplies column `c`;
/// output row `r` contributes `2^-(r+1)`.
pub fn coordinate_value(matrix: &GeneratingMatrix, index: u64) -> f64 {
    let mut value = 0.0;
    let mut weight = 0.5;
    for r in 0..matrix.num_rows() {
        if matrix.row_parity(r, index) {
            value += weight;
        }
        weight *= 0.5;
    }
    value
}

/// Returns the values of coordinate `coord` for the first `count` points of `net`.
pub fn coordinate_values(
    net: &dyn DigitalNet,
    coord: usize,
    count: u64,
) -> Result<Vec<f64>, NetError> {
    if count > net.num_points() {
        let info = ErrorInfo::new("too-many-points", "net does not contain that many points")
            .with_context("requested", count.to_string())
            .with_context("num_points", net.num_points().to_string());
        return Err(NetError::OutOfRange(info));
    }
    if count > MAX_POINT_COUNT {
        let info = ErrorInfo::new("too-many-points", "too many points to materialise")
            .with_context("requested", count.to_string())
            .with_context("max_points", MAX_POINT_COUNT.to_string());
        return Err(NetError::OutOfRange(info));
    }
    let matrix = net.pointer_to_generating_matrix(coord)?;
    Ok((0..count).map(|i| coordinate_value(matrix, i)).collect())
}

/// Returns every point of `net`, one `Vec` of `dimension()` coordinates per point.
pub fn points(net: &dyn DigitalNet) -> Result<Vec<Vec<f64>>, NetError> {
    if net.num_columns() > MAX_POINT_COLUMNS {
        let info = ErrorInfo::new("too-many-points", "net is too large to materialise its points")
            .with_context("num_columns", net.num_columns().to_string())
            .with_context("max_columns", MAX_POINT_COLUMNS.to_string());
        return Err(NetError::OutOfRange(info));
    }
    let columns = (1..=net.dimension())
        .map(|coord| coordinate_values(net, coord, net.num_points()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((0..net.num_points() as usize)
        .map(|i| columns.iter().map(|column| column[i]).collect())
        .collect())
}
