use chrono::{DateTime, Utc};
use ndarray::{s, Array1};

use crate::{
    axis::{AxisType, CoordinateAxis, CoordinateAxisBuilder, DependenceType, Spacing},
    errors::{Error, Result},
    range::SubsetWindow,
};

/// A bag of named subset constraints.
///
/// Callers fill in whichever constraints apply to their request; each axis reads the fields
/// relevant to its own type and ignores the rest.
///
#[derive(Clone, Debug, Default)]
pub struct SubsetParams {
    time_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    time_offset_range: Option<(f64, f64)>,
    vertical_range: Option<(f64, f64)>,
    latitude_range: Option<(f64, f64)>,
    longitude_range: Option<(f64, f64)>,
    ensemble: Option<f64>,
    stride: Option<usize>,
}

impl SubsetParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn time_range(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.time_range = Some((start, end));
        self
    }

    pub fn time_offset_range(mut self, min: f64, max: f64) -> Self {
        self.time_offset_range = Some((min, max));
        self
    }

    pub fn vertical_range(mut self, min: f64, max: f64) -> Self {
        self.vertical_range = Some((min, max));
        self
    }

    pub fn latitude_range(mut self, min: f64, max: f64) -> Self {
        self.latitude_range = Some((min, max));
        self
    }

    pub fn longitude_range(mut self, min: f64, max: f64) -> Self {
        self.longitude_range = Some((min, max));
        self
    }

    pub fn ensemble(mut self, member: f64) -> Self {
        self.ensemble = Some(member);
        self
    }

    pub fn stride(mut self, stride: usize) -> Self {
        self.stride = Some(stride);
        self
    }
}

fn ordered(min: f64, max: f64) -> (f64, f64) {
    if min <= max {
        (min, max)
    } else {
        (max, min)
    }
}

/// Every `stride`-th index over `ncoords` coordinates, starting from the first.
fn stride_window(ncoords: usize, stride: usize) -> SubsetWindow {
    let last = ((ncoords - 1) / stride) * stride;
    SubsetWindow::with_stride(0, last, stride)
}

impl CoordinateAxis {
    /// Restrict this axis according to a generic subset request.
    ///
    /// Reads the constraints relevant to this axis's type: a calendar date range for time and
    /// run-time axes (converted through the time delegate), an offset range for time-offset
    /// axes, value ranges for vertical and horizontal axes, and a stride. Returns an unchanged
    /// copy when nothing in the request constrains this axis. Scalar axes are never constrained.
    pub fn subset(&self, params: &SubsetParams) -> Result<CoordinateAxis> {
        if self.is_scalar() {
            return Ok(self.clone());
        }

        let range = match self.axis_type {
            AxisType::Time | AxisType::RunTime => match params.time_range {
                Some((start, end)) => {
                    Some(ordered(self.convert(start)?, self.convert(end)?))
                }
                None => None,
            },
            AxisType::TimeOffset => params.time_offset_range,
            AxisType::GeoZ | AxisType::Height | AxisType::Pressure => params.vertical_range,
            AxisType::Lat | AxisType::GeoY => params.latitude_range,
            AxisType::Lon | AxisType::GeoX => params.longitude_range,
            AxisType::Ensemble => params.ensemble.map(|member| (member, member)),
        };

        // When a range and a stride both apply, the stride is resolved against the range window
        // so the result's window still indexes the receiver.
        match range {
            Some((min, max)) => {
                let window = self.range_window(min, max)?;
                match params.stride {
                    Some(stride) if stride > 1 => {
                        self.check_stride(stride)?;
                        self.rebuild(window.compose(stride_window(window.len(), stride)))
                    }
                    _ => self.rebuild(window),
                }
            }
            None => match params.stride {
                Some(stride) if stride > 1 => self.subset_stride(stride),
                _ => Ok(self.clone()),
            },
        }
    }

    /// Restrict this axis to the maximal contiguous run of coordinates whose value (point
    /// spacings) or interval (interval spacings) intersects `[min, max]`.
    ///
    /// Valid only on one-dimensional axes. Handles ascending and descending coordinate order;
    /// the result keeps this axis's spacing kind and records the index window it occupies in the
    /// receiver. An empty intersection is an error.
    pub fn subset_range(&self, min: f64, max: f64) -> Result<CoordinateAxis> {
        let window = self.range_window(min, max)?;

        self.rebuild(window)
    }

    /// The window selected by a numeric-range restriction, as receiver indices.
    fn range_window(&self, min: f64, max: f64) -> Result<SubsetWindow> {
        if matches!(
            self.dependence_type,
            DependenceType::TwoD | DependenceType::Scalar
        ) {
            return Err(Error::NotOneDimensional(self.name.clone()));
        }

        let (min, max) = ordered(min, max);
        let (first, last) = self.select_intersecting(min, max)?;

        Ok(SubsetWindow::new(first, last))
    }

    /// Restrict this axis to every `stride`-th coordinate, starting from the first.
    ///
    /// Interval spacings reject striding: dropping edges would break their layout.
    pub fn subset_stride(&self, stride: usize) -> Result<CoordinateAxis> {
        self.check_stride(stride)?;
        if stride == 1 || self.ncoords == 0 {
            return Ok(self.clone());
        }

        self.rebuild(stride_window(self.ncoords, stride))
    }

    fn check_stride(&self, stride: usize) -> Result<()> {
        if stride == 0 || self.is_interval() {
            return Err(Error::BadStride {
                axis: self.name.clone(),
                stride,
                spacing: self.spacing,
            });
        }

        Ok(())
    }

    /// Re-express this dependent axis in terms of a subset already applied to the axis it
    /// depends on.
    ///
    /// Requires `dependence_type == Dependent` and `governing` to be named in this axis's
    /// dependsOn list. When the governing axis carries no subset window, this axis is returned
    /// unchanged.
    pub fn subset_dependent(&self, governing: &CoordinateAxis) -> Result<CoordinateAxis> {
        if self.dependence_type != DependenceType::Dependent
            || !self.depends_on.iter().any(|name| name == governing.name())
        {
            return Err(Error::NotDependent {
                axis: self.name.clone(),
                governing: governing.name().to_string(),
            });
        }

        let window = match governing.subset_window() {
            Some(window) => window,
            None => return Ok(self.clone()),
        };
        if window.last >= self.ncoords {
            return Err(Error::OutOfBounds {
                axis: self.name.clone(),
                index: window.last,
                ncoords: self.ncoords,
            });
        }
        if window.stride > 1 && self.is_interval() {
            return Err(Error::BadStride {
                axis: self.name.clone(),
                stride: window.stride,
                spacing: self.spacing,
            });
        }

        self.rebuild(window)
    }

    /// Scan for the maximal contiguous run of coordinates intersecting `[min, max]`.
    ///
    /// Discontiguous intervals need not be ordered, so several runs can intersect; the longest
    /// one wins, with ties going to the earliest. Monotonic spacings produce a single run.
    fn select_intersecting(&self, min: f64, max: f64) -> Result<(usize, usize)> {
        let longest = |best: Option<(usize, usize)>, run: (usize, usize)| match best {
            Some((first, last)) if last - first >= run.1 - run.0 => Some((first, last)),
            _ => Some(run),
        };

        let mut best = None;
        let mut current: Option<(usize, usize)> = None;

        for i in 0..self.ncoords {
            let hit = match self.spacing {
                Spacing::Regular | Spacing::IrregularPoint => {
                    let value = self.coord(i)?;
                    min <= value && value <= max
                }
                Spacing::ContiguousInterval | Spacing::DiscontiguousInterval => {
                    let (low, high) = self.interval(i)?;
                    let (low, high) = ordered(low, high);
                    low <= max && high >= min
                }
            };

            if hit {
                current = match current {
                    Some((first, _)) => Some((first, i)),
                    None => Some((i, i)),
                };
            } else if let Some(run) = current.take() {
                best = longest(best, run);
            }
        }
        if let Some(run) = current {
            best = longest(best, run);
        }

        best.ok_or_else(|| Error::EmptySubset {
            axis: self.name.clone(),
            min,
            max,
            start: self.start_value,
            end: self.end_value,
        })
    }

    /// Build the restricted copy selected by `window`, preserving this axis's spacing kind and
    /// metadata and recomputing count, start/end, and the backing slice per the layout rules.
    fn rebuild(&self, window: SubsetWindow) -> Result<CoordinateAxis> {
        let ncoords = window.len();
        let resolution = self.resolution * window.stride as f64;

        let mut builder = CoordinateAxisBuilder::new(self.name.clone(), self.axis_type, self.spacing)
            .units(self.units.clone())
            .description(self.description.clone())
            .data_type(self.data_type)
            .attributes(self.attributes.clone())
            .dependence(self.dependence_type, self.depends_on.clone())
            .ncoords(ncoords)
            .resolution(resolution)
            .subset_of(window);
        if let Some(time) = &self.time {
            builder = builder.time_helper(time.clone());
        }

        let builder = match self.spacing {
            Spacing::Regular => {
                let coords = self.regular_coords();
                builder
                    .start(coords.get(window.first))
                    .end(coords.get(window.last))
            }
            Spacing::IrregularPoint => {
                let values = self.subset_values()?;
                let picked: Array1<f64> =
                    Array1::from_iter(window.indices().map(|i| values[i]));
                builder.values(picked)
            }
            Spacing::ContiguousInterval => {
                let values = self.subset_values()?;
                builder.values(values.slice(s![window.first..window.last + 2]).to_owned())
            }
            Spacing::DiscontiguousInterval => {
                let values = self.subset_values()?;
                builder.values(
                    values
                        .slice(s![2 * window.first..2 * (window.last + 1)])
                        .to_owned(),
                )
            }
        };

        builder.build()
    }

    fn subset_values(&self) -> Result<std::sync::Arc<Array1<f64>>> {
        self.values()
            .ok_or_else(|| Error::NoValues(self.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use chrono::{Duration, TimeZone};
    use ndarray::array;

    use crate::axis::tests::{epoch, HoursSince};
    use crate::axis::LoadState;

    fn points(name: &str, axis_type: AxisType, values: Array1<f64>) -> CoordinateAxis {
        let ncoords = values.len();
        CoordinateAxisBuilder::new(name, axis_type, Spacing::IrregularPoint)
            .ncoords(ncoords)
            .values(values)
            .build()
            .unwrap()
    }

    #[test]
    fn test_subset_range_points() {
        let axis = points("height", AxisType::Height, array![1.0, 3.0, 5.0, 7.0, 9.0]);
        let subset = axis.subset_range(4.0, 8.0).unwrap();

        assert_eq!(subset.ncoords(), 2);
        assert_eq!(*subset.values().unwrap(), array![5.0, 7.0]);
        assert_eq!(subset.start_value(), 5.0);
        assert_eq!(subset.end_value(), 7.0);
        assert_eq!(subset.spacing(), Spacing::IrregularPoint);
        assert!(subset.is_subset());
        assert_eq!(subset.subset_window(), Some(SubsetWindow::new(2, 3)));
        // The receiver is untouched.
        assert_eq!(axis.ncoords(), 5);
        assert!(!axis.is_subset());
    }

    #[test]
    fn test_subset_range_regular() {
        let axis = CoordinateAxisBuilder::new("x", AxisType::GeoX, Spacing::Regular)
            .ncoords(10)
            .start(0.0)
            .end(18.0)
            .resolution(2.0)
            .build()
            .unwrap();

        let subset = axis.subset_range(3.0, 7.0).unwrap();
        assert_eq!(subset.ncoords(), 2);
        assert_eq!(subset.start_value(), 4.0);
        assert_eq!(subset.end_value(), 6.0);
        assert_eq!(subset.resolution(), 2.0);
        assert!(subset.values().is_none());
        assert_eq!(subset.subset_window(), Some(SubsetWindow::new(2, 3)));
    }

    #[test]
    fn test_subset_range_descending_regular() {
        let axis = CoordinateAxisBuilder::new("lat", AxisType::Lat, Spacing::Regular)
            .ncoords(5)
            .start(90.0)
            .end(70.0)
            .resolution(-5.0)
            .build()
            .unwrap();

        let subset = axis.subset_range(72.0, 86.0).unwrap();
        assert_eq!(subset.ncoords(), 3);
        assert_eq!(subset.start_value(), 85.0);
        assert_eq!(subset.end_value(), 75.0);
        assert_eq!(subset.resolution(), -5.0);
    }

    #[test]
    fn test_subset_range_contiguous() {
        let axis = CoordinateAxisBuilder::new("depth", AxisType::GeoZ, Spacing::ContiguousInterval)
            .ncoords(3)
            .values(array![0.0, 2.0, 4.0, 6.0])
            .build()
            .unwrap();

        let subset = axis.subset_range(3.0, 5.0).unwrap();
        assert_eq!(subset.ncoords(), 2);
        assert_eq!(subset.spacing(), Spacing::ContiguousInterval);
        assert_eq!(*subset.values().unwrap(), array![2.0, 4.0, 6.0]);
        assert_eq!(subset.interval(0).unwrap(), (2.0, 4.0));
        assert_eq!(subset.interval(1).unwrap(), (4.0, 6.0));
    }

    #[test]
    fn test_subset_range_contiguous_single_cell_stays_interval() {
        let axis = CoordinateAxisBuilder::new("depth", AxisType::GeoZ, Spacing::ContiguousInterval)
            .ncoords(3)
            .values(array![0.0, 2.0, 4.0, 6.0])
            .build()
            .unwrap();

        let subset = axis.subset_range(2.5, 3.5).unwrap();
        assert_eq!(subset.ncoords(), 1);
        assert_eq!(subset.spacing(), Spacing::ContiguousInterval);
        assert_eq!(*subset.values().unwrap(), array![2.0, 4.0]);
    }

    #[test]
    fn test_subset_range_discontiguous() {
        let axis =
            CoordinateAxisBuilder::new("layer", AxisType::GeoZ, Spacing::DiscontiguousInterval)
                .ncoords(3)
                .values(array![0.0, 1.0, 5.0, 6.0, 10.0, 11.0])
                .build()
                .unwrap();

        let subset = axis.subset_range(4.0, 7.0).unwrap();
        assert_eq!(subset.ncoords(), 1);
        assert_eq!(subset.spacing(), Spacing::DiscontiguousInterval);
        assert_eq!(*subset.values().unwrap(), array![5.0, 6.0]);
        assert_eq!(subset.interval(0).unwrap(), (5.0, 6.0));
    }

    #[test]
    fn test_subset_range_discontiguous_unordered_keeps_longest_run() {
        // Intervals are out of order, so [0, 7] intersects two separate runs; the longer run
        // (indices 2..=4) wins over the single cell at index 0.
        let axis =
            CoordinateAxisBuilder::new("layer", AxisType::GeoZ, Spacing::DiscontiguousInterval)
                .ncoords(5)
                .values(array![0.0, 1.0, 10.0, 11.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0])
                .build()
                .unwrap();

        let subset = axis.subset_range(0.0, 7.0).unwrap();
        assert_eq!(subset.ncoords(), 3);
        assert_eq!(subset.subset_window(), Some(SubsetWindow::new(2, 4)));
        assert_eq!(
            *subset.values().unwrap(),
            array![2.0, 3.0, 4.0, 5.0, 6.0, 7.0]
        );
    }

    #[test]
    fn test_subset_range_discontiguous_equal_runs_keeps_first() {
        let axis =
            CoordinateAxisBuilder::new("layer", AxisType::GeoZ, Spacing::DiscontiguousInterval)
                .ncoords(3)
                .values(array![0.0, 1.0, 20.0, 21.0, 4.0, 5.0])
                .build()
                .unwrap();

        let subset = axis.subset_range(0.0, 5.0).unwrap();
        assert_eq!(subset.subset_window(), Some(SubsetWindow::new(0, 0)));
        assert_eq!(*subset.values().unwrap(), array![0.0, 1.0]);
    }

    #[test]
    fn test_subset_range_empty() {
        let axis = points("height", AxisType::Height, array![1.0, 3.0, 5.0]);
        let result = axis.subset_range(10.0, 20.0);
        assert!(matches!(result, Err(Error::EmptySubset { .. })));
    }

    #[test]
    fn test_subset_range_two_d_rejected() {
        let axis = CoordinateAxisBuilder::new("time", AxisType::Time, Spacing::Regular)
            .ncoords(4)
            .dependence(
                DependenceType::TwoD,
                vec![String::from("reftime"), String::from("offset")],
            )
            .time_helper(Arc::new(HoursSince(epoch())))
            .build()
            .unwrap();

        assert!(matches!(
            axis.subset_range(0.0, 1.0),
            Err(Error::NotOneDimensional(_))
        ));
    }

    #[test]
    fn test_subset_range_scalar_rejected() {
        let axis = CoordinateAxisBuilder::new("reftime", AxisType::RunTime, Spacing::Regular)
            .dependence(DependenceType::Scalar, vec![])
            .ncoords(1)
            .time_helper(Arc::new(HoursSince(epoch())))
            .build()
            .unwrap();

        assert!(matches!(
            axis.subset_range(0.0, 1.0),
            Err(Error::NotOneDimensional(_))
        ));
    }

    #[test]
    fn test_subset_stride_regular() {
        let axis = CoordinateAxisBuilder::new("x", AxisType::GeoX, Spacing::Regular)
            .ncoords(10)
            .start(0.0)
            .end(9.0)
            .resolution(1.0)
            .build()
            .unwrap();

        let subset = axis.subset_stride(3).unwrap();
        assert_eq!(subset.ncoords(), 4);
        assert_eq!(subset.resolution(), 3.0);
        assert_eq!(subset.coords().unwrap(), array![0.0, 3.0, 6.0, 9.0]);
        assert_eq!(
            subset.subset_window(),
            Some(SubsetWindow::with_stride(0, 9, 3))
        );
    }

    #[test]
    fn test_subset_stride_points() {
        let axis = points("height", AxisType::Height, array![1.0, 3.0, 5.0, 7.0, 9.0]);
        let subset = axis.subset_stride(2).unwrap();

        assert_eq!(subset.ncoords(), 3);
        assert_eq!(*subset.values().unwrap(), array![1.0, 5.0, 9.0]);
    }

    #[test]
    fn test_subset_stride_interval_rejected() {
        let axis = CoordinateAxisBuilder::new("depth", AxisType::GeoZ, Spacing::ContiguousInterval)
            .ncoords(3)
            .values(array![0.0, 2.0, 4.0, 6.0])
            .build()
            .unwrap();

        assert!(matches!(
            axis.subset_stride(2),
            Err(Error::BadStride { stride: 2, .. })
        ));
    }

    #[test]
    fn test_subset_params_time() {
        let axis = CoordinateAxisBuilder::new("time", AxisType::Time, Spacing::Regular)
            .units("hours since 2000-01-01")
            .ncoords(8)
            .start(0.0)
            .end(42.0)
            .resolution(6.0)
            .time_helper(Arc::new(HoursSince(epoch())))
            .build()
            .unwrap();

        let params = SubsetParams::new().time_range(
            Utc.with_ymd_and_hms(2000, 1, 1, 10, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2000, 1, 2, 2, 0, 0).unwrap(),
        );
        let subset = axis.subset(&params).unwrap();

        assert_eq!(subset.ncoords(), 3);
        assert_eq!(subset.start_value(), 12.0);
        assert_eq!(subset.end_value(), 24.0);
        let (start, _) = subset.date_range().unwrap();
        assert_eq!(start, epoch() + Duration::hours(12));
    }

    #[test]
    fn test_subset_params_irrelevant_constraint_ignored() {
        let axis = points("height", AxisType::Height, array![1.0, 3.0, 5.0]);
        let params = SubsetParams::new().latitude_range(0.0, 10.0);
        let subset = axis.subset(&params).unwrap();

        assert_eq!(subset.ncoords(), 3);
        assert!(!subset.is_subset());
    }

    #[test]
    fn test_subset_params_vertical_with_stride() {
        let axis = points(
            "height",
            AxisType::Height,
            array![0.0, 10.0, 20.0, 30.0, 40.0, 50.0],
        );
        let params = SubsetParams::new().vertical_range(5.0, 45.0).stride(2);
        let subset = axis.subset(&params).unwrap();

        assert_eq!(*subset.values().unwrap(), array![10.0, 30.0]);
        // The window indexes the receiver, not the intermediate range restriction.
        assert_eq!(
            subset.subset_window(),
            Some(SubsetWindow::with_stride(1, 3, 2))
        );
    }

    #[test]
    fn test_subset_params_range_and_stride_window_indexes_receiver() {
        let axis = points(
            "height",
            AxisType::Height,
            array![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0],
        );
        let params = SubsetParams::new().vertical_range(15.0, 45.0).stride(2);
        let subset = axis.subset(&params).unwrap();

        assert_eq!(*subset.values().unwrap(), array![20.0, 40.0]);
        assert_eq!(
            subset.subset_window(),
            Some(SubsetWindow::with_stride(2, 4, 2))
        );

        // A dependent axis sliced through that window picks the receiver's indices.
        let aux = CoordinateAxisBuilder::new("aux", AxisType::Height, Spacing::IrregularPoint)
            .ncoords(8)
            .values(array![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0])
            .dependence(DependenceType::Dependent, vec![String::from("height")])
            .build()
            .unwrap();
        let aux_subset = aux.subset_dependent(&subset).unwrap();
        assert_eq!(*aux_subset.values().unwrap(), array![2.0, 4.0]);
    }

    #[test]
    fn test_subset_params_scalar_unchanged() {
        let axis = CoordinateAxisBuilder::new("reftime", AxisType::RunTime, Spacing::Regular)
            .dependence(DependenceType::Scalar, vec![])
            .ncoords(1)
            .time_helper(Arc::new(HoursSince(epoch())))
            .build()
            .unwrap();

        let params = SubsetParams::new().time_range(epoch(), epoch() + Duration::hours(1));
        let subset = axis.subset(&params).unwrap();
        assert!(subset.is_scalar());
        assert!(!subset.is_subset());
    }

    #[test]
    fn test_subset_dependent() {
        let time = CoordinateAxisBuilder::new("time", AxisType::Time, Spacing::IrregularPoint)
            .units("hours since 2000-01-01")
            .ncoords(5)
            .values(array![0.0, 6.0, 12.0, 18.0, 24.0])
            .time_helper(Arc::new(HoursSince(epoch())))
            .build()
            .unwrap();
        let reftime = CoordinateAxisBuilder::new(
            "reftime",
            AxisType::RunTime,
            Spacing::IrregularPoint,
        )
        .units("hours since 2000-01-01")
        .ncoords(5)
        .values(array![0.0, 0.0, 12.0, 12.0, 24.0])
        .dependence(DependenceType::Dependent, vec![String::from("time")])
        .time_helper(Arc::new(HoursSince(epoch())))
        .build()
        .unwrap();

        let time_subset = time.subset_range(6.0, 18.0).unwrap();
        assert_eq!(time_subset.subset_window(), Some(SubsetWindow::new(1, 3)));

        let reftime_subset = reftime.subset_dependent(&time_subset).unwrap();
        assert_eq!(reftime_subset.ncoords(), 3);
        assert_eq!(*reftime_subset.values().unwrap(), array![0.0, 12.0, 12.0]);
        assert!(reftime_subset.is_subset());
        assert_eq!(reftime_subset.dependence_type(), DependenceType::Dependent);
    }

    #[test]
    fn test_subset_dependent_no_window_unchanged() {
        let time = points("time_like", AxisType::Height, array![0.0, 6.0, 12.0]);
        let dependent = CoordinateAxisBuilder::new(
            "aux",
            AxisType::Height,
            Spacing::IrregularPoint,
        )
        .ncoords(3)
        .values(array![1.0, 2.0, 3.0])
        .dependence(DependenceType::Dependent, vec![String::from("time_like")])
        .build()
        .unwrap();

        let result = dependent.subset_dependent(&time).unwrap();
        assert_eq!(result.ncoords(), 3);
        assert!(!result.is_subset());
    }

    #[test]
    fn test_subset_dependent_misuse_rejected() {
        let governing = points("height", AxisType::Height, array![0.0, 6.0, 12.0]);
        let independent = points("other", AxisType::Height, array![1.0, 2.0, 3.0]);

        assert!(matches!(
            independent.subset_dependent(&governing),
            Err(Error::NotDependent { .. })
        ));
    }

    #[test]
    fn test_subset_of_lazy_axis_loads_values() {
        use crate::reader::CoordAxisReader;

        struct Fixed;
        impl CoordAxisReader for Fixed {
            fn read_values(&self, _axis: &CoordinateAxis) -> Result<Array1<f64>> {
                Ok(array![1.0, 3.0, 5.0, 7.0])
            }
        }

        let axis = CoordinateAxisBuilder::new("height", AxisType::Height, Spacing::IrregularPoint)
            .ncoords(4)
            .reader(Arc::new(Fixed))
            .build()
            .unwrap();
        assert_eq!(axis.load_state(), LoadState::Unloaded);

        let subset = axis.subset_range(2.0, 6.0).unwrap();
        assert_eq!(*subset.values().unwrap(), array![3.0, 5.0]);
        // The range subset forced the receiver's lazy load.
        assert_eq!(axis.load_state(), LoadState::Loaded);
    }
}
