use ndarray::Array1;

use crate::{axis::CoordinateAxis, errors::Result};

/// Deferred I/O collaborator that fetches an axis's explicit coordinate values.
///
/// Invoked at most once per axis instance per load attempt, while that instance's value slot is
/// locked: concurrent first callers on the same axis serialize behind a single read, and a
/// successful result is cached for every later caller. Implementations must not call back into
/// [`CoordinateAxis::values`] on the axis being read.
///
/// The returned array must follow the axis's spacing layout: `ncoords` entries for irregular
/// point spacing, `ncoords + 1` edges for contiguous intervals, `2 * ncoords` edge pairs for
/// discontiguous intervals.
///
pub trait CoordAxisReader: Send + Sync {
    /// Read the explicit coordinate values for the given axis.
    fn read_values(&self, axis: &CoordinateAxis) -> Result<Array1<f64>>;
}
