//! Page layout sizing.

use crate::error::{Error, Result};

/// Edge length of a grid cell for small grids, in centimetres.
pub const DEFAULT_CELL_SIZE: f64 = 0.8;

/// Tallest the printed grid may be, in centimetres.
pub const MAX_GRID_HEIGHT: f64 = 13.5;

/// Uniform cell edge length so that `rows` cells fit in `max_total_height`.
///
/// Small grids keep `default_size`; taller ones shrink to fit.
///
/// # Examples
///
/// ```
/// use crossprint::latex::cell_size;
///
/// assert_eq!(cell_size(20, 1.0, 14.0).unwrap(), 0.7);
/// assert_eq!(cell_size(5, 1.0, 14.0).unwrap(), 1.0);
/// assert!(cell_size(0, 1.0, 14.0).is_err());
/// ```
pub fn cell_size(rows: u32, default_size: f64, max_total_height: f64) -> Result<f64> {
    if rows == 0 {
        return Err(Error::Render(
            "cannot size a grid with no rows".to_string(),
        ));
    }
    Ok(default_size.min(max_total_height / f64::from(rows)))
}
