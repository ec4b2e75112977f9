use std::fmt::Debug;

use ndarray::{Array1, Array2, ArrayView1};
use num_traits::Float;

/// Analytic coordinate generator for regularly spaced axes.
///
/// Coordinate `i` is `start + i * step` for `i` in `[0, len)`. No array is ever stored; slices
/// are computed on demand. `step` may be negative for descending axes.
///
#[derive(Clone)]
pub struct RegularCoords<N>
where
    N: Float + Debug + Send + Sync + 'static,
{
    pub start: N,
    pub step: N,
    pub len: usize,
}

impl<N> RegularCoords<N>
where
    N: Float + Debug + Send + Sync + 'static,
{
    pub fn new(start: N, step: N, len: usize) -> Self {
        Self { start, step, len }
    }

    pub fn get(&self, index: usize) -> N {
        self.check_bounds(index);
        N::from(index).unwrap() * self.step + self.start
    }

    pub fn slice(&self, start: usize, stop: usize) -> Array1<N> {
        if stop > start {
            self.check_bounds(stop - 1);
        }
        Array1::from_iter((start..stop).map(|i| N::from(i).unwrap() * self.step + self.start))
    }

    pub fn materialize(&self) -> Array1<N> {
        self.slice(0, self.len)
    }

    /// Cell edge `i`, halfway between coordinates `i - 1` and `i`. Edges `0` and `len` are
    /// extrapolated half a step beyond the end coordinates, so there are `len + 1` edges.
    pub fn edge(&self, index: usize) -> N {
        if index > self.len {
            panic!(
                "Out of bounds: edge {index} is out of bounds for axis with {} coordinates",
                self.len
            );
        }
        let half = N::from(0.5).unwrap();
        (N::from(index).unwrap() - half) * self.step + self.start
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn shape(&self) -> [usize; 1] {
        [self.len]
    }

    fn check_bounds(&self, index: usize) {
        if index >= self.len {
            panic!(
                "Out of bounds: index {index} is out of bounds for axis with {} coordinates",
                self.len
            );
        }
    }
}

/// Interpreters for the explicit value layouts.
///
/// The meaning of a stored value array depends on the axis's spacing: irregular points store one
/// value per coordinate, contiguous intervals store `ncoords + 1` shared edges, and discontiguous
/// intervals store `2 * ncoords` edges as (low, high) pairs.
pub(crate) mod layout {
    use super::*;

    /// Number of stored values required for `ncoords` coordinates under each spacing kind.
    /// Regular spacing stores nothing; an eagerly supplied array, if any, is one per coordinate.
    pub(crate) fn point_len(ncoords: usize) -> usize {
        ncoords
    }

    pub(crate) fn contiguous_len(ncoords: usize) -> usize {
        ncoords + 1
    }

    pub(crate) fn discontiguous_len(ncoords: usize) -> usize {
        2 * ncoords
    }

    /// Edges for irregular point spacing: halfway between consecutive points, extrapolated half
    /// the adjacent gap at both ends. A single point gets a degenerate cell.
    pub(crate) fn point_interval(values: ArrayView1<f64>, index: usize) -> (f64, f64) {
        let n = values.len();
        let low = if index == 0 {
            if n > 1 {
                values[0] - (values[1] - values[0]) / 2.0
            } else {
                values[0]
            }
        } else {
            (values[index - 1] + values[index]) / 2.0
        };
        let high = if index == n - 1 {
            if n > 1 {
                values[n - 1] + (values[n - 1] - values[n - 2]) / 2.0
            } else {
                values[n - 1]
            }
        } else {
            (values[index] + values[index + 1]) / 2.0
        };

        (low, high)
    }

    pub(crate) fn contiguous_interval(values: ArrayView1<f64>, index: usize) -> (f64, f64) {
        (values[index], values[index + 1])
    }

    pub(crate) fn discontiguous_interval(values: ArrayView1<f64>, index: usize) -> (f64, f64) {
        (values[2 * index], values[2 * index + 1])
    }

    pub(crate) fn contiguous_midpoints(values: ArrayView1<f64>, ncoords: usize) -> Array1<f64> {
        Array1::from_iter((0..ncoords).map(|i| (values[i] + values[i + 1]) / 2.0))
    }

    pub(crate) fn discontiguous_midpoints(values: ArrayView1<f64>, ncoords: usize) -> Array1<f64> {
        Array1::from_iter((0..ncoords).map(|i| (values[2 * i] + values[2 * i + 1]) / 2.0))
    }

    /// Assemble an `[ncoords, 2]` array of (low, high) cell bounds from a per-cell interval
    /// function.
    pub(crate) fn bounds<F>(ncoords: usize, interval: F) -> Array2<f64>
    where
        F: Fn(usize) -> (f64, f64),
    {
        let mut bounds = Array2::zeros([ncoords, 2]);
        for i in 0..ncoords {
            let (low, high) = interval(i);
            bounds[[i, 0]] = low;
            bounds[[i, 1]] = high;
        }

        bounds
    }
}
